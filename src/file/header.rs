use crate::{
    ChunkError,
    file::chunk::{ChunkHeader, ChunkName},
    reader::{ReadResult, Reader, inv_data},
};

/// Size of the outer header: `FORM`, its length and `E4B0`.
pub const FILE_HEADER_SIZE: usize = 12;

#[doc = r#"
The outer `FORM` chunk header and the `E4B0` format identifier that opens
every bank file.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankHeader {
    length: u32,
}

impl BankHeader {
    /// Read `FORM`, its length and the format identifier.
    pub fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let form = ChunkHeader::read_expecting(reader, ChunkName::FORM)?;

        let start = reader.buffer_position();
        let format = ChunkName::from_bytes(reader.read_exact_size()?);
        if format != ChunkName::E4B0 {
            reader.set_position(start)?;
            return Err(inv_data(
                reader,
                ChunkError::UnexpectedName {
                    expected: ChunkName::E4B0,
                    found: format,
                },
            ));
        }

        Ok(Self {
            length: form.length(),
        })
    }

    /// Length declared by the `FORM` chunk
    pub const fn length(&self) -> u32 {
        self.length
    }
}

#[test]
fn requires_both_tags() {
    use crate::{ParseError, reader::ReaderErrorKind};

    let header = BankHeader::read(&mut Reader::from_byte_slice(b"FORM\0\0\x01\0E4B0")).unwrap();
    assert_eq!(header.length(), 256);

    let err = BankHeader::read(&mut Reader::from_byte_slice(b"FORM\0\0\x01\0E4B1")).unwrap_err();
    assert_eq!(err.position(), 8);
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::UnexpectedName { .. }))
    ));

    let err = BankHeader::read(&mut Reader::from_byte_slice(b"RIFF\0\0\x01\0E4B0")).unwrap_err();
    assert_eq!(err.position(), 0);
}
