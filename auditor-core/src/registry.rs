// SPDX-License-Identifier: MIT

//! Builds the set of live [`Stream`]s from a loaded [`Config`] at startup.

use crate::config::Config;
use crate::crypto;
use crate::error::Result;
use crate::stream::Stream;
use std::collections::HashMap;
use std::sync::Arc;

/// `stream_id` → live stream state. Built once at startup and then owned
/// exclusively by the validator thread.
#[derive(Debug, Default)]
pub struct StreamRegistry {
    streams: HashMap<u32, Stream>,
}

impl StreamRegistry {
    /// Load every configured stream's artifact and public key into memory.
    pub fn load(config: &Config) -> Result<StreamRegistry> {
        let mut streams = HashMap::with_capacity(config.entries.len());
        for entry in &config.entries {
            let artifact = std::fs::read(&entry.binary_path)?;
            tracing::debug!(
                stream_id = entry.id,
                bytes = artifact.len(),
                path = %entry.binary_path.display(),
                "loaded artifact"
            );
            let public_key = crypto::load_public_key(&entry.key_path)?;
            let stream = Stream::new(entry.id, Arc::from(artifact), Arc::new(public_key));
            streams.insert(entry.id, stream);
        }
        Ok(StreamRegistry { streams })
    }

    pub fn get_mut(&mut self, stream_id: u32) -> Option<&mut Stream> {
        self.streams.get_mut(&stream_id)
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigEntry;
    use std::io::Write;

    fn write_custom_key(public: &rsa::RsaPublicKey) -> tempfile::NamedTempFile {
        let e = public.e().to_bytes_le();
        let mut exponent = [0u8; 3];
        exponent[..e.len().min(3)].copy_from_slice(&e[..e.len().min(3)]);
        let mut bytes = exponent.to_vec();
        bytes.extend(public.n().to_bytes_le());
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&bytes).unwrap();
        f
    }

    #[test]
    fn loads_configured_streams_by_id() {
        let mut rng = rand::thread_rng();
        let private = rsa::RsaPrivateKey::new(&mut rng, 512).unwrap();
        let public = rsa::RsaPublicKey::from(&private);
        let key_file = write_custom_key(&public);

        let mut binary_file = tempfile::NamedTempFile::new().unwrap();
        binary_file.write_all(b"\x00\x01\x02\x03").unwrap();

        let config = Config {
            entries: vec![ConfigEntry {
                id: 42,
                binary_path: binary_file.path().to_path_buf(),
                key_path: key_file.path().to_path_buf(),
            }],
        };

        let mut registry = StreamRegistry::load(&config).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get_mut(42).is_some());
        assert!(registry.get_mut(999).is_none());
    }
}