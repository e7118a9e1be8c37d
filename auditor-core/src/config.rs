// SPDX-License-Identifier: MIT

//! JSON configuration loading: a flat array of `{ id, binary_path, key_path }`
//! entries, one per stream.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The `id` field accepts either a JSON string or a JSON number; both are
/// normalized to the number's decimal string form before matching a packet's
/// `stream_id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IdField {
    Number(u64),
    Text(String),
}

impl IdField {
    fn normalized(&self) -> String {
        match self {
            IdField::Number(n) => n.to_string(),
            IdField::Text(s) => s.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawEntry {
    id: IdField,
    binary_path: PathBuf,
    key_path: PathBuf,
}

/// One validated configuration entry: `id` has been parsed to the `u32` a
/// wire `stream_id` would carry.
#[derive(Debug, Clone)]
pub struct ConfigEntry {
    pub id: u32,
    pub binary_path: PathBuf,
    pub key_path: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub entries: Vec<ConfigEntry>,
}

impl Config {
    /// Load and validate the JSON configuration file at `path`.
    pub fn load(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("reading {}: {e}", path.display())))?;
        Self::parse(&text)
    }

    fn parse(text: &str) -> Result<Config> {
        let raw: Vec<RawEntry> = serde_json::from_str(text)?;
        let mut entries = Vec::with_capacity(raw.len());
        for entry in raw {
            let normalized = entry.id.normalized();
            let id: u32 = normalized
                .parse()
                .map_err(|_| Error::Config(format!("id {normalized:?} is not a valid u32")))?;
            if !entry.binary_path.is_file() {
                return Err(Error::Config(format!(
                    "binary_path {} for stream {id} does not exist",
                    entry.binary_path.display()
                )));
            }
            if !entry.key_path.is_file() {
                return Err(Error::Config(format!(
                    "key_path {} for stream {id} does not exist",
                    entry.key_path.display()
                )));
            }
            entries.push(ConfigEntry {
                id,
                binary_path: entry.binary_path,
                key_path: entry.key_path,
            });
        }
        Ok(Config { entries })
    }
}
