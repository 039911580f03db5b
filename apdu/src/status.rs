//! Response status words
//!
//! Every response APDU ends with one of these 2-byte words; fault words
//! follow the `0x6Dxx` / `0x6Exx` / `0x6Axx` families used by the
//! original host tooling.

/// Request completed
pub const SW_OK: u16 = 0x9000;

/// User denied the signing request
pub const SW_DENIED: u16 = 0x6985;

/// Unknown instruction byte
pub const SW_INVALID_INS: u16 = 0x6D00;

/// Navigation gesture received outside of an active review
pub const SW_NAV_MISUSE: u16 = 0x6D02;

/// Decode read past the end of the accumulated transaction
pub const SW_BUFFER_EXHAUSTED: u16 = 0x6D05;

/// Reserved multi-byte varbytes length prefix
pub const SW_BAD_VARBYTES: u16 = 0x6D04;

/// Unrecognized transaction type or attribute discriminator
pub const SW_MALFORMED_FIELD: u16 = 0x6D06;

/// Accumulated transaction would exceed the raw buffer capacity
pub const SW_BUFFER_OVERFLOW: u16 = 0x6D08;

/// Request payload too short
pub const SW_INVALID_LENGTH: u16 = 0x6D09;

/// Encoded text did not fit its destination
pub const SW_ENCODING_OVERFLOW: u16 = 0x6D14;

/// Request issued in a state that cannot serve it
pub const SW_INVALID_STATE: u16 = 0x6D0A;

/// Platform signing call failed
pub const SW_SIGN_FAILED: u16 = 0x6D10;

/// Bad P1 marker on a signing chunk
pub const SW_INVALID_P1: u16 = 0x6A86;

/// Request class byte mismatch
pub const SW_INVALID_CLA: u16 = 0x6E00;
