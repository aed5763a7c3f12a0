#![doc = r#"
The table of contents (`TOC1`).

Each entry is 32 bytes:

```text
tag(4) length(u32) offset(u32) index(u16) name(16) reserved(2)
```

`length` is the size of the referenced block's payload minus two and `offset`
is the absolute file position of the block's header.
"#]

use crate::{
    file::chunk::{CHUNK_HEADER_SIZE, Chunk, ChunkHeader, ChunkName},
    name::NAME_LEN,
    reader::{ReadResult, Reader},
};
use byteorder::BigEndian;

/// Size of one table of contents entry.
pub const TOC_ENTRY_SIZE: usize = 32;

/// Difference between a block's payload size and the length its entry declares.
pub const TOC_LENGTH_ADJUST: u32 = 2;

/// A table of contents entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocEntry {
    tag: ChunkName,
    length: u32,
    offset: u32,
    index: u16,
    name: [u8; NAME_LEN],
}

impl TocEntry {
    /// Describe `block`, which will be written at `offset`.
    pub fn for_block(block: &Chunk, offset: u32, index: u16, name: [u8; NAME_LEN]) -> Self {
        let payload = block.total_size(false) as u32;
        Self {
            tag: block.name(),
            length: payload.saturating_sub(TOC_LENGTH_ADJUST),
            offset,
            index,
            name,
        }
    }

    /// Tag of the referenced block
    pub const fn tag(&self) -> ChunkName {
        self.tag
    }
    /// Declared length, two less than the block's payload
    pub const fn length(&self) -> u32 {
        self.length
    }
    /// Size of the referenced block's payload
    pub const fn block_size(&self) -> usize {
        (self.length as usize).saturating_add(TOC_LENGTH_ADJUST as usize)
    }
    /// Absolute position of the block header
    pub const fn offset(&self) -> u32 {
        self.offset
    }
    /// Absolute position of the block payload
    pub const fn payload_offset(&self) -> usize {
        self.offset as usize + CHUNK_HEADER_SIZE
    }
    /// Index of the described entity
    pub const fn index(&self) -> u16 {
        self.index
    }
    /// Name of the described entity, as stored
    pub const fn name(&self) -> &[u8; NAME_LEN] {
        &self.name
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let header = ChunkHeader::read(reader)?;
        let offset = reader.read_u32::<BigEndian>()?;
        let index = reader.read_u16::<BigEndian>()?;
        let name = reader.read_exact_size()?;
        reader.skip(2)?;
        Ok(Self {
            tag: header.name(),
            length: header.length(),
            offset,
            index,
            name,
        })
    }

    /// The entry as a chunk with an explicit length.
    pub(crate) fn to_chunk(&self) -> Chunk {
        let mut chunk = Chunk::with_length(self.tag, self.length);
        chunk.append_u32::<BigEndian>(self.offset);
        chunk.append_u16::<BigEndian>(self.index);
        chunk.append(&self.name);
        chunk.reserve_zeroed(2);
        chunk
    }
}

#[test]
fn entry_is_32_bytes() {
    use pretty_assertions::assert_eq;

    let mut block = Chunk::new(ChunkName::E3S1);
    block.reserve_zeroed(102);
    let entry = TocEntry::for_block(&block, 482, 7, *b"Sample          ");
    assert_eq!(entry.length(), 100);
    assert_eq!(entry.block_size(), 102);
    assert_eq!(entry.payload_offset(), 490);

    let mut out = Vec::new();
    entry.to_chunk().write(&mut out).unwrap();
    assert_eq!(out.len(), TOC_ENTRY_SIZE);
    assert_eq!(&out[..12], b"E3S1\0\0\0\x64\0\0\x01\xe2");

    let back = TocEntry::read(&mut Reader::from_byte_slice(&out)).unwrap();
    assert_eq!(back, entry);
}
