#![doc = r#"
A positioned cursor over the bytes of a bank file.

Every record decoder in this crate pulls its fields through a [`Reader`].
Reads never panic: running past the end of the buffer yields
[`ReaderErrorKind::OutOfBounds`] tagged with the position of the failed read.
"#]

mod error;
pub use error::*;

use byteorder::ByteOrder;
use std::borrow::Cow;

/// A forward reading, seekable cursor over a byte buffer.
pub struct Reader<'a> {
    data: Cow<'a, [u8]>,
    position: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over owned or borrowed bytes.
    pub fn from_bytes<B>(bytes: B) -> Self
    where
        B: Into<Cow<'a, [u8]>>,
    {
        Self {
            data: bytes.into(),
            position: 0,
        }
    }

    /// Create a reader over a borrowed slice.
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self {
            data: Cow::Borrowed(bytes),
            position: 0,
        }
    }

    /// The current offset from the start of the buffer.
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the underlying buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// True once the cursor sits at (or past) the end of the buffer.
    pub fn is_eof(&self) -> bool {
        self.remaining() == 0
    }

    /// Move the cursor to an absolute offset.
    ///
    /// Seeking to exactly the end of the buffer is allowed.
    pub fn set_position(&mut self, position: usize) -> ReadResult<()> {
        if position > self.data.len() {
            return Err(ReaderError::oob(position));
        }
        self.position = position;
        Ok(())
    }

    /// Advance the cursor without interpreting the bytes.
    pub fn skip(&mut self, len: usize) -> ReadResult<()> {
        let end = self.checked_end(len)?;
        self.position = end;
        Ok(())
    }

    /// Read `len` bytes and advance past them.
    pub fn read_slice(&mut self, len: usize) -> ReadResult<&[u8]> {
        let start = self.position;
        let end = self.checked_end(len)?;
        self.position = end;
        Ok(&self.data[start..end])
    }

    /// Read a fixed number of bytes into an array.
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut out = [0; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }

    /// Read one unsigned byte.
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let [byte] = self.read_exact_size()?;
        Ok(byte)
    }

    /// Read one byte as a two's complement value.
    pub fn read_i8(&mut self) -> ReadResult<i8> {
        self.read_u8().map(|b| b as i8)
    }

    /// Read one byte as a flag (any nonzero value is `true`).
    pub fn read_bool(&mut self) -> ReadResult<bool> {
        self.read_u8().map(|b| b != 0)
    }

    /// Read a 16-bit word in the given byte order.
    pub fn read_u16<B: ByteOrder>(&mut self) -> ReadResult<u16> {
        let bytes: [u8; 2] = self.read_exact_size()?;
        Ok(B::read_u16(&bytes))
    }

    /// Read a 32-bit word in the given byte order.
    pub fn read_u32<B: ByteOrder>(&mut self) -> ReadResult<u32> {
        let bytes: [u8; 4] = self.read_exact_size()?;
        Ok(B::read_u32(&bytes))
    }

    /// Read `count` 16-bit signed samples in the given byte order.
    pub fn read_i16s<B: ByteOrder>(&mut self, count: usize) -> ReadResult<Vec<i16>> {
        let len = count
            .checked_mul(2)
            .ok_or(ReaderError::oob(self.position))?;
        let bytes = self.read_slice(len)?;
        let mut out = vec![0; count];
        B::read_i16_into(bytes, &mut out);
        Ok(out)
    }

    fn checked_end(&self, len: usize) -> ReadResult<usize> {
        match self.position.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(end),
            _ => Err(ReaderError::oob(self.position)),
        }
    }
}

#[test]
fn reads_mixed_endianness() {
    use byteorder::{BigEndian, LittleEndian};
    use pretty_assertions::assert_eq;

    let bytes = [0x12, 0x34, 0x12, 0x34, 0xFF, 0x01, 0x00, 0x00, 0x00];
    let mut reader = Reader::from_byte_slice(&bytes);

    assert_eq!(reader.read_u16::<BigEndian>().unwrap(), 0x1234);
    assert_eq!(reader.read_u16::<LittleEndian>().unwrap(), 0x3412);
    assert_eq!(reader.read_i8().unwrap(), -1);
    assert_eq!(reader.read_u32::<LittleEndian>().unwrap(), 1);
    assert!(reader.is_eof());
}

#[test]
fn out_of_bounds_reports_position() {
    let bytes = [0u8; 3];
    let mut reader = Reader::from_byte_slice(&bytes);
    reader.skip(2).unwrap();

    let err = reader.read_u16::<byteorder::BigEndian>().unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 2);

    // a failed read leaves the cursor where it was
    assert_eq!(reader.buffer_position(), 2);
    assert!(reader.set_position(4).is_err());
    assert!(reader.set_position(3).is_ok());
    assert!(reader.is_eof());
}
