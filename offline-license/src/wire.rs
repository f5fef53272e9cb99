//! Bounds-checked cursor over untrusted bytes.

use crate::error::{MalformedLicense, ParseResult};

/// Reads big-endian fields from a byte slice, failing instead of panicking
/// on underflow.
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn take(&mut self, len: usize) -> ParseResult<&'a [u8]> {
        if len > self.buf.len() {
            return Err(MalformedLicense);
        }
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    pub(crate) fn take_array<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        let bytes = self.take(N)?;
        bytes.try_into().map_err(|_| MalformedLicense)
    }

    pub(crate) fn u8(&mut self) -> ParseResult<u8> {
        let [byte] = self.take_array::<1>()?;
        Ok(byte)
    }

    pub(crate) fn u16_be(&mut self) -> ParseResult<u16> {
        Ok(u16::from_be_bytes(self.take_array::<2>()?))
    }

    /// Returns the bytes before the next NUL and consumes the NUL.
    pub(crate) fn until_nul(&mut self) -> ParseResult<&'a [u8]> {
        let len = self
            .buf
            .iter()
            .position(|&b| b == 0)
            .ok_or(MalformedLicense)?;
        let field = self.take(len)?;
        self.take(1)?;
        Ok(field)
    }

    pub(crate) fn rest(self) -> &'a [u8] {
        self.buf
    }
}
