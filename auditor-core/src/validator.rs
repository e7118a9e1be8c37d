// SPDX-License-Identifier: MIT

//! The core validation algorithm: sequence check, chained-CRC check, signature
//! check, in that order, against one already-decoded [`Packet`] and its
//! [`Stream`].

use crate::crypto;
use crate::failure::Failure;
use crate::protocol::Packet;
use crate::registry::StreamRegistry;
use crate::stream::Stream;

/// Validate one decoded packet against its stream, mutating the stream's
/// sequence/CRC state unconditionally, and returning every failure observed
/// (zero, one, or several — a bad sequence and a bad checksum can both fire
/// for the same packet).
pub fn validate_packet(stream: &mut Stream, packet: &Packet) -> Vec<Failure> {
    let mut failures = Vec::new();

    if packet.sequence != stream.next_sequence {
        failures.push(Failure::SequenceMismatch {
            stream_id: stream.id,
            sequence: packet.sequence,
            expected_sequence: stream.next_sequence,
        });
    }

    let mask = packet.xor_mask();
    for &claimed in &packet.checksums {
        let fresh = stream.chain.advance(&stream.artifact);
        stream.next_sequence += 1;
        let expected = fresh ^ mask;
        if expected != claimed {
            tracing::warn!(
                stream_id = stream.id,
                sequence = packet.sequence,
                received = claimed,
                expected,
                "checksum mismatch"
            );
            failures.push(Failure::ChecksumMismatch {
                stream_id: stream.id,
                sequence: packet.sequence,
                received: claimed,
                expected,
            });
        }
    }

    if !crypto::verify(&stream.public_key, packet.signed_bytes(), &packet.signature) {
        tracing::warn!(stream_id = stream.id, sequence = packet.sequence, "signature verification failed");
        failures.push(Failure::SignatureVerificationFailed {
            stream_id: stream.id,
            sequence: packet.sequence,
        });
    }

    failures
}

/// Look up `packet`'s stream in `registry` and validate it, or report an
/// unknown-stream failure without touching any state.
pub fn validate_in_registry(registry: &mut StreamRegistry, packet: &Packet) -> Vec<Failure> {
    match registry.get_mut(packet.stream_id) {
        Some(stream) => validate_packet(stream, packet),
        None => vec![Failure::UnknownStreamId {
            stream_id: packet.stream_id,
            sequence: packet.sequence,
        }],
    }
}
