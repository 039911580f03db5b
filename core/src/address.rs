//! Versioned base-58 address derivation
//!
//! Addresses are `base58(prefix ‖ script_hash ‖ checksum)` where the
//! checksum is the first four bytes of a double SHA-256 over
//! `prefix ‖ script_hash`. The prefix bytes and resulting text length
//! are grammar-specific.

use crate::{
    base::encode_base_58,
    engine::{Driver, Error},
};

/// Script hash length in bytes
pub const SCRIPT_HASH_LEN: usize = 20;

/// Checksum length in bytes
pub const CHECKSUM_LEN: usize = 4;

/// Longest supported version prefix in bytes
pub const MAX_PREFIX_LEN: usize = 2;

/// Longest supported encoded address in characters
pub const MAX_ADDRESS_LEN: usize = 35;

/// Uncompressed SECP256R1 public key length
pub const PUBLIC_KEY_LEN: usize = 65;

/// Derive the base-58 address for a script hash
///
/// Returns the number of characters written to `out`.
pub fn derive_address<D: Driver>(
    drv: &D,
    prefix: &[u8],
    script_hash: &[u8; SCRIPT_HASH_LEN],
    out: &mut [u8],
) -> Result<usize, Error> {
    if prefix.is_empty() || prefix.len() > MAX_PREFIX_LEN {
        return Err(Error::EncodingOverflow);
    }

    let mut payload = [0u8; MAX_PREFIX_LEN + SCRIPT_HASH_LEN + CHECKSUM_LEN];
    let n = prefix.len() + SCRIPT_HASH_LEN;

    payload[..prefix.len()].copy_from_slice(prefix);
    payload[prefix.len()..n].copy_from_slice(script_hash);

    let checksum = drv.sha256(&drv.sha256(&payload[..n]));
    payload[n..n + CHECKSUM_LEN].copy_from_slice(&checksum[..CHECKSUM_LEN]);

    encode_base_58(&payload[..n + CHECKSUM_LEN], out)
}

/// Compress an uncompressed SECP256R1 public key
///
/// Prefix byte selected by the parity of the Y coordinate.
pub fn compress_public_key(public_key: &[u8; PUBLIC_KEY_LEN]) -> [u8; 33] {
    let mut compressed = [0u8; 33];

    compressed[0] = match public_key[64] & 1 {
        0 => 0x02,
        _ => 0x03,
    };
    compressed[1..].copy_from_slice(&public_key[1..33]);

    compressed
}

/// Script hash for a single-signature verification script
///
/// The script is `0x21 ‖ compressed_key ‖ 0xAC` (PUSH33, CHECKSIG),
/// hashed with SHA-256 then RIPEMD-160.
pub fn public_key_script_hash<D: Driver>(
    drv: &D,
    public_key: &[u8; PUBLIC_KEY_LEN],
) -> [u8; SCRIPT_HASH_LEN] {
    let compressed = compress_public_key(public_key);

    let mut script = [0u8; 35];
    script[0] = 0x21;
    script[1..34].copy_from_slice(&compressed);
    script[34] = 0xAC;

    drv.ripemd160(&drv.sha256(&script))
}
