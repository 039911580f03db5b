use ledger_neo_apdu::status::*;

/// [Engine][super::Engine] errors
///
/// Every variant maps to exactly one status word via [`Error::status`].
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum Error {
    /// Decode read past the end of the finalized buffer
    #[cfg_attr(feature = "thiserror", error("read past end of transaction"))]
    BufferExhausted = 0x00,

    /// Accumulation would exceed the transaction buffer capacity
    #[cfg_attr(feature = "thiserror", error("transaction too large"))]
    BufferOverflow = 0x01,

    /// Multi-byte varbytes length escape, unsupported by this protocol
    #[cfg_attr(feature = "thiserror", error("unsupported length encoding"))]
    UnsupportedLengthEncoding = 0x02,

    /// Unrecognized type or attribute discriminator
    #[cfg_attr(feature = "thiserror", error("malformed transaction field"))]
    MalformedField = 0x03,

    /// Encoded text too large for its destination
    #[cfg_attr(feature = "thiserror", error("encoded value exceeds destination"))]
    EncodingOverflow = 0x04,

    /// Navigation gesture outside an active review
    #[cfg_attr(feature = "thiserror", error("navigation gesture without active review"))]
    NavigationMisuse = 0x05,

    /// Invalid argument length
    #[cfg_attr(feature = "thiserror", error("invalid argument length"))]
    InvalidLength = 0x06,

    /// Event not valid in the current session state
    #[cfg_attr(feature = "thiserror", error("invalid session state"))]
    InvalidState = 0x07,

    /// Unhandled event
    #[cfg_attr(feature = "thiserror", error("unexpected event"))]
    UnexpectedEvent = 0x08,

    /// Signing failed in the platform driver
    #[cfg_attr(feature = "thiserror", error("signing error"))]
    SignError = 0x09,
}

impl Error {
    /// Status word reported to the transport for this error
    pub fn status(&self) -> u16 {
        match self {
            Error::BufferExhausted => SW_BUFFER_EXHAUSTED,
            Error::BufferOverflow => SW_BUFFER_OVERFLOW,
            Error::UnsupportedLengthEncoding => SW_BAD_VARBYTES,
            Error::MalformedField => SW_MALFORMED_FIELD,
            Error::EncodingOverflow => SW_ENCODING_OVERFLOW,
            Error::NavigationMisuse => SW_NAV_MISUSE,
            Error::InvalidLength => SW_INVALID_LENGTH,
            Error::InvalidState => SW_INVALID_STATE,
            Error::UnexpectedEvent => SW_INVALID_INS,
            Error::SignError => SW_SIGN_FAILED,
        }
    }
}
