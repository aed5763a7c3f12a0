use super::ChunkName;
use crate::{
    ChunkError,
    reader::{ReadResult, Reader, inv_data},
};
use byteorder::BigEndian;

/// Size of a chunk name plus its length field.
pub const CHUNK_HEADER_SIZE: usize = 8;

#[doc = r#"
The name and declared length at the front of a chunk.

Reading a header never descends into the payload: what follows depends on the
tag, so interpreting it is left to the caller.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    name: ChunkName,
    length: u32,
}

impl ChunkHeader {
    /// Create a header
    pub const fn new(name: ChunkName, length: u32) -> Self {
        Self { name, length }
    }

    /// Read a name and a big-endian length.
    pub fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let name = ChunkName::from_bytes(reader.read_exact_size()?);
        let length = reader.read_u32::<BigEndian>()?;
        Ok(Self { name, length })
    }

    /// Read a header and require a particular tag.
    pub fn read_expecting(reader: &mut Reader<'_>, expected: ChunkName) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let header = Self::read(reader)?;
        if header.name != expected {
            reader.set_position(start)?;
            return Err(inv_data(
                reader,
                ChunkError::UnexpectedName {
                    expected,
                    found: header.name,
                },
            ));
        }
        Ok(header)
    }

    /// The chunk tag
    pub const fn name(&self) -> ChunkName {
        self.name
    }

    /// The declared length
    pub const fn length(&self) -> u32 {
        self.length
    }
}

#[test]
fn unexpected_tag_rewinds() {
    use crate::ParseError;
    use crate::reader::ReaderErrorKind;

    let bytes = b"TOC0\0\0\0\x20";
    let mut reader = Reader::from_byte_slice(bytes);
    let err = ChunkHeader::read_expecting(&mut reader, ChunkName::TOC1).unwrap_err();
    assert_eq!(err.position(), 0);
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::UnexpectedName { .. }))
    ));

    let header = ChunkHeader::read(&mut reader).unwrap();
    assert_eq!(header.name().as_bytes(), b"TOC0");
    assert_eq!(header.length(), 32);
}
