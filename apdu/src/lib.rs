//! Protocol / APDU definitions for NEO hardware wallet communication
//!
//! This module provides the wire protocol spoken between a controlling
//! wallet application and the signing device. Transactions are streamed
//! to the device in bounded chunks ([`sign::SignTxChunk`]), with the
//! final chunk triggering on-device review; signatures and public keys
//! are returned as response APDUs with a trailing 2-byte status word.
//!
//! Encodings are primitive binary (packed big-endian fields for the
//! BIP-44 path, raw payloads otherwise) for compatibility with existing
//! host wallet implementations.

#![no_std]

use num_enum::TryFromPrimitive;

pub use ledger_proto::{ApduError, ApduStatic};

pub mod prelude;
pub mod public_key;
pub mod sign;
pub mod status;

/// NEO APDU class
pub const NEO_APDU_CLA: u8 = 0x80;

/// NEO APDU instruction codes
#[derive(Copy, Clone, Debug, PartialEq, TryFromPrimitive)]
#[repr(u8)]
pub enum Instruction {
    /// Stream a transaction chunk for signing
    SignTx = 0x02,

    /// Fetch the public key (and display its address)
    GetPublicKey = 0x04,

    /// Return to the dashboard
    ///
    /// Served by the firmware event loop directly, never forwarded to
    /// the engine as an event.
    Exit = 0xFF,
}

/// Number of path components in a BIP-44 derivation path
pub const BIP44_PATH_LEN: usize = 5;

/// Serialized length of a BIP-44 derivation path
pub const BIP44_BYTE_LEN: usize = BIP44_PATH_LEN * 4;

/// BIP-44 derivation path, five hardened/unhardened components
pub type Bip44Path = [u32; BIP44_PATH_LEN];

/// Parse a [`Bip44Path`] from its packed big-endian encoding
pub fn parse_bip44(buff: &[u8]) -> Result<Bip44Path, ApduError> {
    use byteorder::{BigEndian, ByteOrder};

    if buff.len() < BIP44_BYTE_LEN {
        return Err(ApduError::InvalidLength);
    }

    let mut path = [0u32; BIP44_PATH_LEN];
    for (i, p) in path.iter_mut().enumerate() {
        *p = BigEndian::read_u32(&buff[i * 4..]);
    }

    Ok(path)
}

/// Encode a [`Bip44Path`] to its packed big-endian form
pub fn encode_bip44(path: &Bip44Path, buff: &mut [u8]) -> Result<usize, ApduError> {
    use byteorder::{BigEndian, ByteOrder};

    if buff.len() < BIP44_BYTE_LEN {
        return Err(ApduError::InvalidLength);
    }

    for (i, p) in path.iter().enumerate() {
        BigEndian::write_u32(&mut buff[i * 4..], *p);
    }

    Ok(BIP44_BYTE_LEN)
}
