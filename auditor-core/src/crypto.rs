// SPDX-License-Identifier: MIT

//! RSA-2048 PKCS#1 v1.5 / SHA-256 signature verification, and the custom key
//! file format producers ship alongside each stream's artifact.
//!
//! The key file layout is non-standard (not DER, not PEM): the first 3 bytes
//! are a little-endian public exponent, the rest is a little-endian modulus.
//! Implementers must preserve this exact framing for interoperability with
//! existing producers; `load_public_key` is the sole place that layout is
//! assumed. Verification itself is handed to the `rsa` crate (RustCrypto) so
//! the modular exponentiation and EMSA-PKCS1-v1_5 padding check are performed
//! by a vetted implementation rather than reproduced by hand.

use crate::error::{Error, Result};
use rsa::{BigUint, Pkcs1v15Sign, RsaPublicKey};
use sha2::{Digest, Sha256};

const EXPONENT_LEN: usize = 3;

/// Parse the custom key-file layout: 3 little-endian exponent bytes followed
/// by a little-endian modulus.
pub fn parse_public_key(bytes: &[u8]) -> Result<RsaPublicKey> {
    if bytes.len() <= EXPONENT_LEN {
        return Err(Error::Crypto(format!(
            "key file too short: {} bytes, need more than {EXPONENT_LEN}",
            bytes.len()
        )));
    }
    let e = BigUint::from_bytes_le(&bytes[..EXPONENT_LEN]);
    let n = BigUint::from_bytes_le(&bytes[EXPONENT_LEN..]);
    RsaPublicKey::new(n, e).map_err(|e| Error::Crypto(format!("invalid RSA key material: {e}")))
}

/// Load and parse a key file from disk.
pub fn load_public_key(path: &std::path::Path) -> Result<RsaPublicKey> {
    let bytes = std::fs::read(path)?;
    parse_public_key(&bytes)
}

/// Verify an RSA-2048 PKCS#1 v1.5 / SHA-256 signature over `signed_bytes`.
///
/// Returns `Ok(true)` when the signature checks out, `Ok(false)` on a clean
/// mismatch (the common case for a corrupted or forged packet), and `Err` only
/// when the key material itself is unusable.
pub fn verify(public_key: &RsaPublicKey, signed_bytes: &[u8], signature: &[u8]) -> bool {
    let digest = Sha256::digest(signed_bytes);
    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .is_ok()
}
