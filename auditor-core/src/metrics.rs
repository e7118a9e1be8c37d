// SPDX-License-Identifier: MIT

//! In-process counters for the receiver/validator/journaler pipeline, with
//! no HTTP scrape surface — there is no inbound TCP server in this system to
//! host one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Counters {
    received: AtomicU64,
    decoded: AtomicU64,
    rejected_malformed: AtomicU64,
    unknown_stream: AtomicU64,
    sequence_mismatches: AtomicU64,
    checksum_mismatches: AtomicU64,
    signature_failures: AtomicU64,
    journaled: AtomicU64,
}

/// Cheaply cloned handle shared by the receiver, validator, and journaler
/// threads.
#[derive(Debug, Default, Clone)]
pub struct Metrics(Arc<Counters>);

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_received(&self) {
        self.0.received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_decoded(&self) {
        self.0.decoded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_malformed(&self) {
        self.0.rejected_malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self, failure: &crate::failure::Failure) {
        use crate::failure::Failure;
        match failure {
            Failure::MalformedFrame { .. } => self.record_rejected_malformed(),
            Failure::UnknownStreamId { .. } => {
                self.0.unknown_stream.fetch_add(1, Ordering::Relaxed);
            }
            Failure::SequenceMismatch { .. } => {
                self.0.sequence_mismatches.fetch_add(1, Ordering::Relaxed);
            }
            Failure::ChecksumMismatch { .. } => {
                self.0.checksum_mismatches.fetch_add(1, Ordering::Relaxed);
            }
            Failure::SignatureVerificationFailed { .. } => {
                self.0.signature_failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn record_journaled(&self, count: u64) {
        self.0.journaled.fetch_add(count, Ordering::Relaxed);
    }

    /// Snapshot for a periodic tracing summary line.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            received: self.0.received.load(Ordering::Relaxed),
            decoded: self.0.decoded.load(Ordering::Relaxed),
            rejected_malformed: self.0.rejected_malformed.load(Ordering::Relaxed),
            unknown_stream: self.0.unknown_stream.load(Ordering::Relaxed),
            sequence_mismatches: self.0.sequence_mismatches.load(Ordering::Relaxed),
            checksum_mismatches: self.0.checksum_mismatches.load(Ordering::Relaxed),
            signature_failures: self.0.signature_failures.load(Ordering::Relaxed),
            journaled: self.0.journaled.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub received: u64,
    pub decoded: u64,
    pub rejected_malformed: u64,
    pub unknown_stream: u64,
    pub sequence_mismatches: u64,
    pub checksum_mismatches: u64,
    pub signature_failures: u64,
    pub journaled: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::Failure;

    #[test]
    fn counters_tally_independently() {
        let metrics = Metrics::new();
        metrics.record_received();
        metrics.record_received();
        metrics.record_decoded();
        metrics.record_failure(&Failure::SequenceMismatch {
            stream_id: 1,
            sequence: 1,
            expected_sequence: 0,
        });
        metrics.record_journaled(3);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.received, 2);
        assert_eq!(snapshot.decoded, 1);
        assert_eq!(snapshot.sequence_mismatches, 1);
        assert_eq!(snapshot.journaled, 3);
    }

    #[test]
    fn clone_shares_the_same_counters() {
        let metrics = Metrics::new();
        let clone = metrics.clone();
        clone.record_received();
        assert_eq!(metrics.snapshot().received, 1);
    }
}