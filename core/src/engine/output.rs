use encdec::Encode;
use heapless::String;

use ledger_proto::ApduError;

use ledger_neo_apdu::{
    public_key::PublicKeyResp,
    sign::SignatureResp,
    status::{SW_DENIED, SW_OK},
};

use super::Signature;
use crate::address::MAX_ADDRESS_LEN;

/// [`Engine`][super::Engine] outputs (in response to events), encoded to
/// response APDUs by the transport
#[derive(Clone, PartialEq, Debug)]
pub enum Output {
    None,

    /// Public key with its display address
    PublicKey {
        public_key: [u8; 65],
        address: String<MAX_ADDRESS_LEN>,
    },

    /// Signature over the approved transaction
    Signature {
        signature: Signature,
        digest: [u8; 32],
    },

    /// User denied the signing request
    Denied,
}

impl Output {
    /// Encode the response body, returning the number of bytes written
    pub fn encode(&self, buff: &mut [u8]) -> Result<usize, ApduError> {
        match self {
            Output::None | Output::Denied => Ok(0),
            Output::PublicKey { public_key, .. } => {
                PublicKeyResp::new(*public_key).encode(buff)
            }
            Output::Signature { signature, digest } => {
                SignatureResp::new(signature.as_slice(), *digest).encode(buff)
            }
        }
    }

    /// Status word for the response trailer
    pub fn status(&self) -> u16 {
        match self {
            Output::Denied => SW_DENIED,
            _ => SW_OK,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_words() {
        assert_eq!(Output::None.status(), 0x9000);
        assert_eq!(Output::Denied.status(), 0x6985);
    }

    #[test]
    fn signature_encoding() {
        let mut signature = Signature::new();
        signature.extend_from_slice(&[0x30, 0x02, 0x01, 0x00]).unwrap();
        let digest = [0xab; 32];

        let out = Output::Signature { signature, digest };

        let mut buff = [0u8; 64];
        let n = out.encode(&mut buff).unwrap();

        assert_eq!(n, 4 + 2 + 32);
        assert_eq!(&buff[..4], &[0x30, 0x02, 0x01, 0x00]);
        assert_eq!(&buff[4..6], &[0xff, 0xff]);
        assert_eq!(&buff[6..38], &[0xab; 32]);
    }

    #[test]
    fn denied_has_empty_body() {
        let mut buff = [0u8; 8];
        assert_eq!(Output::Denied.encode(&mut buff).unwrap(), 0);
    }
}
