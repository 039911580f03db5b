//! Transaction signing APDUs
//!
//! A transaction (with the signer's BIP-44 path appended) is streamed to
//! the device as a sequence of [`SignTxChunk`]s. Chunks carry a P1 marker
//! distinguishing intermediate chunks from the final one; the final chunk
//! triggers decoding and on-device review, and the signature is returned
//! as a [`SignatureResp`] once the user approves.

use encdec::{Decode, Encode};

use crate::{ApduError, ApduStatic, Instruction, NEO_APDU_CLA};

/// P1 marker for a chunk with more data to follow
pub const P1_MORE: u8 = 0x00;

/// P1 marker for the final chunk of a transaction
pub const P1_LAST: u8 = 0x80;

/// Marker bytes separating the signature from the transaction digest
/// in a [`SignatureResp`]
pub const DIGEST_MARKER: [u8; 2] = [0xFF, 0xFF];

/// Transaction chunk APDU
///
/// The chunk body is the raw transaction fragment; the more/last marker
/// travels in the P1 header byte.
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                            PAYLOAD                            /
/// /                       (variable length)                       /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct SignTxChunk<'a> {
    /// Set on the final chunk of the transaction
    pub last: bool,

    /// Raw transaction fragment
    pub data: &'a [u8],
}

impl<'a> ApduStatic for SignTxChunk<'a> {
    const CLA: u8 = NEO_APDU_CLA;
    const INS: u8 = Instruction::SignTx as u8;
}

impl<'a> SignTxChunk<'a> {
    /// Create a new [`SignTxChunk`] APDU
    pub fn new(last: bool, data: &'a [u8]) -> Self {
        Self { last, data }
    }

    /// P1 header byte for this chunk
    pub fn p1(&self) -> u8 {
        match self.last {
            true => P1_LAST,
            false => P1_MORE,
        }
    }

    /// Parse a chunk from its P1 header byte and body
    pub fn parse(p1: u8, body: &'a [u8]) -> Result<Self, ApduError> {
        let last = match p1 {
            P1_LAST => true,
            P1_MORE => false,
            _ => return Err(ApduError::InvalidEncoding),
        };

        Ok(Self { last, data: body })
    }
}

impl<'a> Encode for SignTxChunk<'a> {
    type Error = ApduError;

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < self.data.len() {
            return Err(ApduError::InvalidLength);
        }

        buff[..self.data.len()].copy_from_slice(self.data);

        Ok(self.data.len())
    }

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(self.data.len())
    }
}

/// Signature response APDU
///
/// Contains the DER-encoded ECDSA signature followed by a marker and the
/// SHA-256 transaction digest that was signed, allowing the host to check
/// the device signed the transaction it sent.
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                       DER SIGNATURE                           /
/// /                      (variable length)                        /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |      0xFF     |      0xFF     |                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                                 /
/// /                       TX_DIGEST (32-byte SHA-256)             /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct SignatureResp<'a> {
    /// DER-encoded ECDSA signature
    pub signature: &'a [u8],

    /// SHA-256 digest of the signed transaction bytes
    pub digest: [u8; 32],
}

impl<'a> SignatureResp<'a> {
    /// Create a new [`SignatureResp`] APDU
    pub fn new(signature: &'a [u8], digest: [u8; 32]) -> Self {
        Self { signature, digest }
    }
}

impl<'a> Encode for SignatureResp<'a> {
    type Error = ApduError;

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        let n = self.encode_len()?;
        if buff.len() < n {
            return Err(ApduError::InvalidLength);
        }

        let mut index = 0;

        buff[..self.signature.len()].copy_from_slice(self.signature);
        index += self.signature.len();

        buff[index..][..2].copy_from_slice(&DIGEST_MARKER);
        index += 2;

        buff[index..][..32].copy_from_slice(&self.digest);
        index += 32;

        Ok(index)
    }

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(self.signature.len() + 2 + 32)
    }
}

impl<'a> Decode<'a> for SignatureResp<'a> {
    type Output = Self;
    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self, usize), ApduError> {
        if buff.len() < 34 {
            return Err(ApduError::InvalidLength);
        }

        let sig_len = buff.len() - 34;
        if buff[sig_len..][..2] != DIGEST_MARKER {
            return Err(ApduError::InvalidEncoding);
        }

        let mut digest = [0u8; 32];
        digest.copy_from_slice(&buff[sig_len + 2..]);

        Ok((
            Self {
                signature: &buff[..sig_len],
                digest,
            },
            buff.len(),
        ))
    }
}
