//! Arbitrary-precision base conversion and decimal formatting
//!
//! Base-58 and base-10 share one schoolbook long-division conversion over
//! big-endian byte strings, differing only in alphabet. [`adjust_decimals`]
//! turns a scaled integer digit string into a human decimal string.

use crate::engine::Error;

/// Base-58 alphabet (bitcoin variant, omits `0`, `O`, `I`, `l`)
pub const ALPHABET_BASE58: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Base-10 alphabet
pub const ALPHABET_BASE10: &[u8; 10] = b"0123456789";

/// Maximum input length accepted by the base converters
pub const MAX_ENCODE_INPUT: usize = 82;

/// Working buffer size, covers the worst-case base-10 expansion of
/// [`MAX_ENCODE_INPUT`] bytes
const WORK_LEN: usize = 200;

/// Encode a big-endian byte string into the provided alphabet
///
/// Leading zero bytes encode to the same count of the alphabet's zero
/// symbol. Returns the number of bytes written to `out`, or
/// [`Error::EncodingOverflow`] if the input or output exceeds bounds.
pub fn encode_base_x(alphabet: &[u8], input: &[u8], out: &mut [u8]) -> Result<usize, Error> {
    if input.len() > MAX_ENCODE_INPUT {
        return Err(Error::EncodingOverflow);
    }

    let base = alphabet.len() as u16;

    let mut tmp = [0u8; MAX_ENCODE_INPUT];
    tmp[..input.len()].copy_from_slice(input);

    let mut zero_count = 0;
    while zero_count < input.len() && tmp[zero_count] == 0 {
        zero_count += 1;
    }

    // long division in base 256, least-significant digit emitted first
    let mut buffer = [0u8; WORK_LEN];
    let mut j = WORK_LEN;
    let mut start_at = zero_count;

    while start_at < input.len() {
        let mut remainder: u16 = 0;
        for div_loop in start_at..input.len() {
            let tmp_div = remainder * 256 + tmp[div_loop] as u16;
            tmp[div_loop] = (tmp_div / base) as u8;
            remainder = tmp_div % base;
        }
        if tmp[start_at] == 0 {
            start_at += 1;
        }
        j -= 1;
        buffer[j] = alphabet[remainder as usize];
    }

    while j < WORK_LEN && buffer[j] == alphabet[0] {
        j += 1;
    }

    let digits = WORK_LEN - j;
    let total = zero_count + digits;
    if total > out.len() {
        return Err(Error::EncodingOverflow);
    }

    out[..zero_count].fill(alphabet[0]);
    out[zero_count..total].copy_from_slice(&buffer[j..]);

    Ok(total)
}

/// Encode bytes as base-58 text
pub fn encode_base_58(input: &[u8], out: &mut [u8]) -> Result<usize, Error> {
    encode_base_x(ALPHABET_BASE58, input, out)
}

/// Encode bytes as base-10 digits
pub fn encode_base_10(input: &[u8], out: &mut [u8]) -> Result<usize, Error> {
    encode_base_x(ALPHABET_BASE10, input, out)
}

/// Decode alphabet-encoded text back to big-endian bytes
///
/// Inverse of [`encode_base_x`], leading zero symbols decode to the same
/// count of zero bytes. Characters outside the alphabet fail with
/// [`Error::MalformedField`].
pub fn decode_base_x(alphabet: &[u8], input: &[u8], out: &mut [u8]) -> Result<usize, Error> {
    let base = alphabet.len() as u32;

    let mut zero_count = 0;
    while zero_count < input.len() && input[zero_count] == alphabet[0] {
        zero_count += 1;
    }

    // little-endian multiply-accumulate, reversed on output
    let mut raw = [0u8; MAX_ENCODE_INPUT];
    let mut raw_len = 0usize;

    for &c in &input[zero_count..] {
        let digit = alphabet
            .iter()
            .position(|&a| a == c)
            .ok_or(Error::MalformedField)?;

        let mut carry = digit as u32;
        for b in raw[..raw_len].iter_mut() {
            carry += (*b as u32) * base;
            *b = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            if raw_len == raw.len() {
                return Err(Error::EncodingOverflow);
            }
            raw[raw_len] = (carry & 0xff) as u8;
            raw_len += 1;
            carry >>= 8;
        }
    }

    let total = zero_count + raw_len;
    if total > out.len() {
        return Err(Error::EncodingOverflow);
    }

    out[..zero_count].fill(0);
    for i in 0..raw_len {
        out[zero_count + i] = raw[raw_len - 1 - i];
    }

    Ok(total)
}

/// Decode base-58 text back to bytes
pub fn decode_base_58(input: &[u8], out: &mut [u8]) -> Result<usize, Error> {
    decode_base_x(ALPHABET_BASE58, input, out)
}

/// Insert a decimal point `decimals` places from the right of a base-10
/// digit string, trimming trailing fractional zeros and a bare point
///
/// `"0"` passes through unchanged, `decimals == 0` never inserts a point.
/// Returns the number of bytes written to `target`.
pub fn adjust_decimals(src: &[u8], decimals: usize, target: &mut [u8]) -> Result<usize, Error> {
    let mut offset = 0;
    let start_offset;

    if src == b"0" {
        if target.is_empty() {
            return Err(Error::EncodingOverflow);
        }
        target[0] = b'0';
        return Ok(1);
    }

    if src.len() <= decimals {
        let delta = decimals - src.len();
        if target.len() < src.len() + 2 + delta {
            return Err(Error::EncodingOverflow);
        }

        target[offset] = b'0';
        target[offset + 1] = b'.';
        offset += 2;
        target[offset..offset + delta].fill(b'0');
        offset += delta;

        start_offset = offset;
        target[offset..offset + src.len()].copy_from_slice(src);
        offset += src.len();
    } else {
        let delta = src.len() - decimals;
        if target.len() < src.len() + 1 {
            return Err(Error::EncodingOverflow);
        }

        target[..delta].copy_from_slice(&src[..delta]);
        offset += delta;
        if decimals != 0 {
            target[offset] = b'.';
            offset += 1;
        }

        start_offset = offset;
        target[offset..offset + decimals].copy_from_slice(&src[delta..]);
        offset += decimals;
    }

    // trim the trailing zero run of the fraction, and the point itself
    // if nothing survives after it
    let mut last_zero_offset = 0;
    for i in start_offset..offset {
        if target[i] == b'0' {
            if last_zero_offset == 0 {
                last_zero_offset = i;
            }
        } else {
            last_zero_offset = 0;
        }
    }
    if last_zero_offset != 0 {
        offset = last_zero_offset;
        if target[offset - 1] == b'.' {
            offset -= 1;
        }
    }

    Ok(offset)
}
