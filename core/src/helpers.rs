//! Display formatting helpers

use crate::{
    base::{adjust_decimals, encode_base_10},
    engine::Error,
};

const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

/// Working digit buffer, sized for the longest base-10 expansion
const DIGITS_LEN: usize = 200;

/// Format a big-endian integer field as a decimal string with a
/// fixed-point scale
///
/// Returns the number of bytes written to `buff`.
pub fn fmt_value_scaled(value: &[u8], scale: usize, buff: &mut [u8]) -> Result<usize, Error> {
    let mut digits = [0u8; DIGITS_LEN];
    let n = encode_base_10(value, &mut digits)?;

    if n == 0 {
        if buff.is_empty() {
            return Err(Error::EncodingOverflow);
        }
        buff[0] = b'0';
        return Ok(1);
    }

    // leading zero bytes surface as zero digits, keep at most one
    let mut start = 0;
    while start + 1 < n && digits[start] == b'0' {
        start += 1;
    }

    adjust_decimals(&digits[start..n], scale, buff)
}

/// Write uppercase hex characters for `src`, truncating at whole bytes
/// when `dest` runs out
///
/// Returns the number of characters written.
pub fn to_hex(src: &[u8], dest: &mut [u8]) -> usize {
    let mut n = 0;
    for &b in src {
        if n + 2 > dest.len() {
            break;
        }
        dest[n] = HEX_CHARS[(b >> 4) as usize];
        dest[n + 1] = HEX_CHARS[(b & 0x0f) as usize];
        n += 2;
    }
    n
}
