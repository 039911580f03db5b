use encdec::Decode;

use ledger_neo_apdu::{
    prelude::*,
    public_key::PublicKeyReq,
    sign::SignTxChunk,
};

/// [`Engine`][super::Engine] input events, decoded from request APDUs or
/// mapped from user input gestures
#[derive(Clone, PartialEq, Debug)]
pub enum Event<'a> {
    None,

    /// Fetch a public key and display its address
    GetPublicKey {
        path: Bip44Path,
    },

    /// Transaction chunk, `last` triggers decode and review
    TxChunk {
        last: bool,
        data: &'a [u8],
    },

    /// Scroll up through the review ring
    NavUp,

    /// Scroll down through the review ring
    NavDown,

    /// Approve signing the reviewed transaction
    Approve,

    /// Deny the reviewed transaction
    Deny,
}

/// Helper for decoding APDUs to events
fn decode_event<'a, T>(buff: &'a [u8]) -> Result<Event<'a>, ApduError>
where
    T: Decode<'a, Error = ApduError>,
    Event<'a>: From<T::Output>,
{
    T::decode(buff).map(|(v, _n)| Event::from(v))
}

impl<'a> Event<'a> {
    /// Parse an incoming APDU to an engine event
    pub fn parse(ins: u8, p1: u8, buff: &'a [u8]) -> Result<Self, ApduError> {
        match ins {
            SignTxChunk::INS => SignTxChunk::parse(p1, buff).map(Event::from),
            PublicKeyReq::INS => decode_event::<PublicKeyReq>(buff),
            _ => Err(ApduError::InvalidEncoding),
        }
    }
}

impl<'a> From<SignTxChunk<'a>> for Event<'a> {
    fn from(apdu: SignTxChunk<'a>) -> Self {
        Event::TxChunk {
            last: apdu.last,
            data: apdu.data,
        }
    }
}

impl<'a> From<PublicKeyReq> for Event<'a> {
    fn from(apdu: PublicKeyReq) -> Self {
        Event::GetPublicKey { path: apdu.path }
    }
}
