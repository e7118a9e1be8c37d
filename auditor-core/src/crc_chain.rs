// SPDX-License-Identifier: MIT

//! Per-stream chained CRC32 state machine.
//!
//! A stream's CRC32 sequence is *chained*: each window's CRC32 is computed over
//! the same artifact bytes, but resumed from the previous window's CRC32 as the
//! initial register state, using the zlib invert-in/invert-out convention that
//! `crc32fast::Hasher::new_with_initial` exposes directly.

/// The running CRC state for one stream: `None` until the first checksum has
/// been computed (fresh, unstarted), `Some(crc)` afterward (running, chained
/// off the prior result).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainState(Option<u32>);

impl ChainState {
    pub fn fresh() -> Self {
        Self(None)
    }

    pub fn is_fresh(&self) -> bool {
        self.0.is_none()
    }

    pub fn last_crc(&self) -> Option<u32> {
        self.0
    }

    /// Compute the next chained CRC32 over `artifact` and advance the state to
    /// hold it. Callers are expected to call this once per claimed checksum, in
    /// order, advancing the chain before comparing against the claimed value —
    /// that ordering is what keeps a single bad checksum from desyncing the
    /// chain for every claim after it.
    pub fn advance(&mut self, artifact: &[u8]) -> u32 {
        let fresh = match self.0 {
            None => crc32fast::hash(artifact),
            Some(seed) => {
                let mut hasher = crc32fast::Hasher::new_with_initial(seed);
                hasher.update(artifact);
                hasher.finalize()
            }
        };
        self.0 = Some(fresh);
        fresh
    }
}
