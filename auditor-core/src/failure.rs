// SPDX-License-Identifier: MIT

//! The non-fatal, per-packet validation failures the validator emits.
//!
//! These are data describing one rejected or mismatched packet, not
//! `std::error::Error`s — they never abort the pipeline, they get rendered to a
//! line and handed to the journaler. Each `Display` impl renders the exact
//! error-record line format for that failure kind.

use crate::protocol::DecodeError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// A raw datagram that could not be decoded into a `Packet` at all.
    MalformedFrame { reason: DecodeError },
    /// `stream_id` did not resolve to any configured stream.
    UnknownStreamId { stream_id: u32, sequence: u32 },
    /// The packet's declared sequence disagreed with the stream's expectation.
    SequenceMismatch {
        stream_id: u32,
        sequence: u32,
        expected_sequence: u32,
    },
    /// One claimed checksum did not match the recomputed, XOR-masked CRC.
    ChecksumMismatch {
        stream_id: u32,
        sequence: u32,
        received: u32,
        expected: u32,
    },
    /// The trailing RSA signature did not verify under the stream's public key.
    SignatureVerificationFailed { stream_id: u32, sequence: u32 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DecodeError::TooShort => "too short",
            DecodeError::MisalignedLength => "misaligned length",
            DecodeError::InconsistentCount => "inconsistent checksum count",
        };
        f.write_str(text)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::MalformedFrame { reason } => write!(f, "- - (malformed frame: {reason})"),
            Failure::UnknownStreamId { stream_id, sequence } => {
                write!(f, "{stream_id} {sequence} (unknown stream)")
            }
            Failure::SequenceMismatch {
                stream_id,
                sequence,
                expected_sequence,
            } => write!(f, "{stream_id} {sequence} {expected_sequence} (expected sequence)"),
            Failure::ChecksumMismatch {
                stream_id,
                sequence,
                received,
                expected,
            } => write!(
                f,
                "{stream_id} {sequence} {received:08x} (received hash) {expected:08x} (expected hash)"
            ),
            Failure::SignatureVerificationFailed { stream_id, sequence } => {
                write!(f, "{stream_id} {sequence} (signature verification failed)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_mismatch_matches_spec_example() {
        // A packet declaring sequence 5 when the stream expects 2.
        let failure = Failure::SequenceMismatch {
            stream_id: 1,
            sequence: 5,
            expected_sequence: 2,
        };
        assert_eq!(failure.to_string(), "1 5 2 (expected sequence)");
    }

    #[test]
    fn checksum_mismatch_renders_both_hex_values() {
        let failure = Failure::ChecksumMismatch {
            stream_id: 1,
            sequence: 0,
            received: 0xdead_beef,
            expected: 0x0000_0001,
        };
        assert_eq!(
            failure.to_string(),
            "1 0 deadbeef (received hash) 00000001 (expected hash)"
        );
    }

    #[test]
    fn unknown_stream_and_signature_failure_render() {
        let unknown = Failure::UnknownStreamId {
            stream_id: 999,
            sequence: 0,
        };
        assert_eq!(unknown.to_string(), "999 0 (unknown stream)");

        let sig = Failure::SignatureVerificationFailed {
            stream_id: 1,
            sequence: 3,
        };
        assert_eq!(sig.to_string(), "1 3 (signature verification failed)");
    }
}