//! Bounds-checked cursor over a finalized transaction buffer
//!
//! All decoding runs against a [`Reader`], every read is checked against
//! the buffer end and fails with [`Error::BufferExhausted`] rather than
//! returning short data. Length prefixes are restricted to single-byte
//! values, the reserved multi-byte escapes fault.

use crate::engine::Error;

/// Reserved var-length escape bytes, unsupported by this protocol
const VARBYTES_RESERVED: u8 = 0xFD;

/// Read cursor over an immutable byte buffer
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    buff: &'a [u8],
    index: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over the provided buffer
    pub fn new(buff: &'a [u8]) -> Self {
        Self { buff, index: 0 }
    }

    /// Current read position
    pub fn position(&self) -> usize {
        self.index
    }

    /// Bytes remaining past the cursor
    pub fn remaining(&self) -> usize {
        self.buff.len() - self.index
    }

    /// Read a single byte, advancing the cursor
    pub fn read_byte(&mut self) -> Result<u8, Error> {
        if self.index >= self.buff.len() {
            return Err(Error::BufferExhausted);
        }

        let b = self.buff[self.index];
        self.index += 1;

        Ok(b)
    }

    /// Read exactly `n` bytes, advancing the cursor
    ///
    /// Never returns a short slice
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], Error> {
        if self.remaining() < n {
            return Err(Error::BufferExhausted);
        }

        let s = &self.buff[self.index..self.index + n];
        self.index += n;

        Ok(s)
    }

    /// Discard `n` bytes without copying
    pub fn skip(&mut self, n: usize) -> Result<(), Error> {
        if self.remaining() < n {
            return Err(Error::BufferExhausted);
        }

        self.index += n;

        Ok(())
    }

    /// Read a single-byte length prefix
    ///
    /// The multi-byte escapes `0xFD..=0xFF` are rejected with
    /// [`Error::UnsupportedLengthEncoding`]
    pub fn read_varbytes_len(&mut self) -> Result<usize, Error> {
        let b = self.read_byte()?;
        if b >= VARBYTES_RESERVED {
            return Err(Error::UnsupportedLengthEncoding);
        }

        Ok(b as usize)
    }
}
