// SPDX-License-Identifier: MIT

//! Per-stream long-lived state: the artifact, the public key, and the
//! sequence/CRC state machine, all owned exclusively by the validator.

use crate::crc_chain::ChainState;
use rsa::RsaPublicKey;
use std::sync::Arc;

/// One configured stream. Created once at startup and mutated only by the
/// validator thread for the rest of the process's life.
#[derive(Debug, Clone)]
pub struct Stream {
    pub id: u32,
    /// The full artifact, loaded once; shared cheaply if a `Stream` is cloned
    /// (tests clone streams freely, the running server never does).
    pub artifact: Arc<[u8]>,
    pub public_key: Arc<RsaPublicKey>,
    pub next_sequence: u32,
    pub chain: ChainState,
}

impl Stream {
    pub fn new(id: u32, artifact: Arc<[u8]>, public_key: Arc<RsaPublicKey>) -> Self {
        Self {
            id,
            artifact,
            public_key,
            next_sequence: 0,
            chain: ChainState::fresh(),
        }
    }
}
