// SPDX-License-Identifier: MIT

//! Wire format for the checksum-audit datagram.
//!
//! Defines the fixed binary frame producers send over UDP and the total decoder
//! that turns raw datagram bytes into a [`Packet`]. All multi-byte integers on
//! the wire are big-endian; this is a from-scratch fixed binary layout, not a
//! MessagePack/JSON envelope, so decoding is hand-rolled slicing rather than
//! `serde`.

/// Fixed header size: stream_id(4) + sequence(4) + xor_key(2) + num_cksum(2)
const HEADER_LEN: usize = 12;
/// Trailing RSA-2048 PKCS#1 v1.5 signature size
const SIGNATURE_LEN: usize = 64;
/// Size of one checksum entry
const CKSUM_LEN: usize = 4;
/// Header + signature with zero checksums; the minimum legal frame length.
/// A legal frame additionally needs at least one checksum on top of this.
const FIXED_LEN: usize = HEADER_LEN + SIGNATURE_LEN;

/// A decoded datagram: one batch of claimed chained-CRC values for a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub stream_id: u32,
    pub sequence: u32,
    pub xor_key: u16,
    pub checksums: Vec<u32>,
    /// Trailing RSA-2048 PKCS#1 v1.5 signature, opaque to everything but [`crate::crypto`]
    pub signature: [u8; SIGNATURE_LEN],
    /// The raw bytes this packet was decoded from, kept around because the
    /// signature is verified over `bytes[0..len-SIGNATURE_LEN]`, not over the
    /// re-encoded fields.
    pub raw: Vec<u8>,
}

/// Why a raw datagram was rejected before becoming a [`Packet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Shorter than the smallest legal frame, or not `76 + 4*k` bytes long.
    TooShort,
    /// `(len - 76) % 4 != 0`: the checksum section doesn't end on a 4-byte boundary.
    MisalignedLength,
    /// The declared `num_cksum` field disagrees with the number of checksums the
    /// datagram's length implies.
    InconsistentCount,
}

impl Packet {
    /// Decode a raw datagram. Total: never panics, always returns either a
    /// `Packet` or the specific reason it was rejected.
    pub fn decode(bytes: &[u8]) -> Result<Packet, DecodeError> {
        if bytes.len() < FIXED_LEN {
            return Err(DecodeError::TooShort);
        }
        let without_fixed = bytes.len() - FIXED_LEN;
        if without_fixed % CKSUM_LEN != 0 {
            return Err(DecodeError::MisalignedLength);
        }
        let implied_count = without_fixed / CKSUM_LEN;

        let stream_id = be_u32(&bytes[0..4]);
        let sequence = be_u32(&bytes[4..8]);
        let xor_key = be_u16(&bytes[8..10]);
        let num_cksum = be_u16(&bytes[10..12]) as usize;

        if num_cksum == 0 || num_cksum != implied_count {
            return Err(DecodeError::InconsistentCount);
        }

        let cksum_start = HEADER_LEN;
        let cksum_end = cksum_start + num_cksum * CKSUM_LEN;
        let checksums = bytes[cksum_start..cksum_end]
            .chunks_exact(CKSUM_LEN)
            .map(be_u32)
            .collect();

        let mut signature = [0u8; SIGNATURE_LEN];
        signature.copy_from_slice(&bytes[bytes.len() - SIGNATURE_LEN..]);

        Ok(Packet {
            stream_id,
            sequence,
            xor_key,
            checksums,
            signature,
            raw: bytes.to_vec(),
        })
    }

    /// Bytes the signature was computed over: everything but the trailing 64 octets.
    pub fn signed_bytes(&self) -> &[u8] {
        &self.raw[..self.raw.len() - SIGNATURE_LEN]
    }

    /// The 4-byte XOR mask: `xor_key` concatenated with itself, big-endian.
    pub fn xor_mask(&self) -> u32 {
        xor_mask_of(self.xor_key)
    }
}

/// The 4-byte XOR mask for a given 2-byte wire key: the key doubled and read
/// big-endian, per the wire format.
pub fn xor_mask_of(xor_key: u16) -> u32 {
    let doubled = [
        (xor_key >> 8) as u8,
        (xor_key & 0xff) as u8,
        (xor_key >> 8) as u8,
        (xor_key & 0xff) as u8,
    ];
    be_u32(&doubled)
}

/// Encode a packet's fields (sans signature) plus a caller-supplied signature.
/// Used by tests and by any generator that needs to produce wire-valid frames.
pub fn encode(
    stream_id: u32,
    sequence: u32,
    xor_key: u16,
    checksums: &[u32],
    signature: &[u8; SIGNATURE_LEN],
) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + checksums.len() * CKSUM_LEN + SIGNATURE_LEN);
    out.extend_from_slice(&stream_id.to_be_bytes());
    out.extend_from_slice(&sequence.to_be_bytes());
    out.extend_from_slice(&xor_key.to_be_bytes());
    out.extend_from_slice(&(checksums.len() as u16).to_be_bytes());
    for c in checksums {
        out.extend_from_slice(&c.to_be_bytes());
    }
    out.extend_from_slice(signature);
    out
}

fn be_u16(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

fn be_u32(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame(num_cksum: u16, extra_len: i32) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1u32.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&0x1234u16.to_be_bytes());
        bytes.extend_from_slice(&num_cksum.to_be_bytes());
        for i in 0..num_cksum {
            bytes.extend_from_slice(&(i as u32).to_be_bytes());
        }
        bytes.extend_from_slice(&[0xAB; SIGNATURE_LEN]);
        if extra_len > 0 {
            bytes.extend(std::iter::repeat(0).take(extra_len as usize));
        } else if extra_len < 0 {
            bytes.truncate(bytes.len() - (-extra_len as usize));
        }
        bytes
    }

    #[test]
    fn decodes_minimum_legal_shape() {
        let bytes = sample_frame(1, 0);
        assert_eq!(bytes.len(), 80);
        let packet = Packet::decode(&bytes).unwrap();
        assert_eq!(packet.stream_id, 1);
        assert_eq!(packet.sequence, 0);
        assert_eq!(packet.xor_key, 0x1234);
        assert_eq!(packet.checksums, vec![0]);
        assert_eq!(packet.signature, [0xAB; SIGNATURE_LEN]);
    }

    #[test]
    fn rejects_too_short() {
        let bytes = sample_frame(1, -5);
        assert_eq!(Packet::decode(&bytes), Err(DecodeError::TooShort));
    }

    #[test]
    fn rejects_total_length_75() {
        // One byte short of the 76-byte floor.
        let bytes = vec![0u8; 75];
        assert_eq!(Packet::decode(&bytes), Err(DecodeError::TooShort));
    }

    #[test]
    fn rejects_misaligned_length() {
        let mut bytes = sample_frame(2, 0);
        bytes.push(0); // one stray byte breaks the 4-byte checksum alignment
        assert_eq!(Packet::decode(&bytes), Err(DecodeError::MisalignedLength));
    }

    #[test]
    fn rejects_inconsistent_count() {
        // Declares 3 checksums in the header but only carries 2 worth of bytes.
        let mut bytes = sample_frame(2, 0);
        bytes[10..12].copy_from_slice(&3u16.to_be_bytes());
        assert_eq!(Packet::decode(&bytes), Err(DecodeError::InconsistentCount));
    }

    #[test]
    fn rejects_zero_num_cksum() {
        let mut bytes = sample_frame(1, 0);
        bytes[10..12].copy_from_slice(&0u16.to_be_bytes());
        // length now implies 1 checksum but header claims 0: inconsistent
        assert_eq!(Packet::decode(&bytes), Err(DecodeError::InconsistentCount));
    }

    #[test]
    fn xor_mask_doubles_the_key() {
        assert_eq!(xor_mask_of(0x1234), 0x1234_1234);
        assert_eq!(xor_mask_of(0x0000), 0x0000_0000);
        assert_eq!(xor_mask_of(0xFFFF), 0xFFFF_FFFF);
    }

    #[test]
    fn encode_then_decode_round_trips() {
        let sig = [0x42; SIGNATURE_LEN];
        let bytes = encode(7, 99, 0xBEEF, &[1, 2, 3], &sig);
        let packet = Packet::decode(&bytes).unwrap();
        assert_eq!(packet.stream_id, 7);
        assert_eq!(packet.sequence, 99);
        assert_eq!(packet.xor_key, 0xBEEF);
        assert_eq!(packet.checksums, vec![1, 2, 3]);
        assert_eq!(packet.signature, sig);
    }

    proptest::proptest! {
        #[test]
        fn round_trip_holds_for_arbitrary_fields(
            stream_id: u32,
            sequence: u32,
            xor_key: u16,
            checksums in proptest::collection::vec(proptest::num::u32::ANY, 1..8),
            sig_byte: u8,
        ) {
            let sig = [sig_byte; SIGNATURE_LEN];
            let bytes = encode(stream_id, sequence, xor_key, &checksums, &sig);
            let decoded = Packet::decode(&bytes).unwrap();
            proptest::prop_assert_eq!(decoded.stream_id, stream_id);
            proptest::prop_assert_eq!(decoded.sequence, sequence);
            proptest::prop_assert_eq!(decoded.xor_key, xor_key);
            proptest::prop_assert_eq!(decoded.checksums, checksums);
            proptest::prop_assert_eq!(decoded.signature, sig);
        }
    }
}