//! Public key request / response APDUs

use encdec::{Decode, Encode};

use crate::{
    encode_bip44, parse_bip44, ApduError, ApduStatic, Bip44Path, Instruction, BIP44_BYTE_LEN,
    NEO_APDU_CLA,
};

/// Public key request APDU
///
/// Fetches the uncompressed SECP256R1 public key for a BIP-44 path.
/// The device renders the matching address for the user to check but
/// answers without waiting for confirmation.
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                  BIP44 PATH (5x 32-bit words, BE)             /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct PublicKeyReq {
    /// BIP-44 derivation path
    pub path: Bip44Path,
}

impl ApduStatic for PublicKeyReq {
    const CLA: u8 = NEO_APDU_CLA;
    const INS: u8 = Instruction::GetPublicKey as u8;
}

impl PublicKeyReq {
    /// Create a new [`PublicKeyReq`] APDU
    pub fn new(path: Bip44Path) -> Self {
        Self { path }
    }
}

impl Encode for PublicKeyReq {
    type Error = ApduError;

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        encode_bip44(&self.path, buff)
    }

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(BIP44_BYTE_LEN)
    }
}

impl<'a> Decode<'a> for PublicKeyReq {
    type Output = Self;
    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self, usize), ApduError> {
        let path = parse_bip44(buff)?;
        Ok((Self { path }, BIP44_BYTE_LEN))
    }
}

/// Public key response APDU
///
/// ## Encoding:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// /                 PUBLIC KEY (65-byte uncompressed)             /
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct PublicKeyResp {
    /// Uncompressed SECP256R1 public key (0x04 prefix)
    pub public_key: [u8; 65],
}

impl PublicKeyResp {
    /// Create a new [`PublicKeyResp`] APDU
    pub fn new(public_key: [u8; 65]) -> Self {
        Self { public_key }
    }
}

impl Encode for PublicKeyResp {
    type Error = ApduError;

    fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        if buff.len() < 65 {
            return Err(ApduError::InvalidLength);
        }

        buff[..65].copy_from_slice(&self.public_key);

        Ok(65)
    }

    fn encode_len(&self) -> Result<usize, ApduError> {
        Ok(65)
    }
}

impl<'a> Decode<'a> for PublicKeyResp {
    type Output = Self;
    type Error = ApduError;

    fn decode(buff: &'a [u8]) -> Result<(Self, usize), ApduError> {
        if buff.len() < 65 {
            return Err(ApduError::InvalidLength);
        }

        let mut public_key = [0u8; 65];
        public_key.copy_from_slice(&buff[..65]);

        Ok((Self { public_key }, 65))
    }
}
