// SPDX-License-Identifier: MIT

//! Error types for the checksum auditor
//!
//! Provides a unified error taxonomy using `thiserror` for ergonomic error handling.
//! This covers *fatal* startup failures only — the non-fatal, per-packet validation
//! failures that get journaled instead of propagated live in [`crate::failure::Failure`].

pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fatal auditor operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cryptographic key material could not be loaded
    #[error("Cryptographic error: {0}")]
    Crypto(String),

    /// UDP socket could not be bound
    #[error("Socket bind error: {0}")]
    SocketBind(std::io::Error),

    /// I/O error reading a configured file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(format!("invalid JSON: {e}"))
    }
}