#![doc = r#"
Contains types for bank file chunks

# Overview

A bank is a tree of chunks. Each chunk is identified by a 4-character ASCII
tag followed by a big-endian 32-bit length and then the chunk data, which may
be followed by nested chunks.

```text
[FORM] "E4B0"
  [TOC1]
    [E4P1 entry] [E3S1 entry] ...
  [E4P1] preset
  [E3S1] sample
  [E4s1] sequence
  [EMSt] startup state
```

## [`ChunkHeader`]

Decoding only ever reads the header of a chunk. The payload layout depends on
the tag, so the record decoders take over from there.

## [`Chunk`]

Encoding builds the tree in memory. A chunk's payload is append-only: record
encoders push known bytes or reserve zeroed regions, and the declared length
is derived from the payload and children when the tree is written. Table of
contents entries are the exception and carry an explicit length.
"#]

mod name;
pub use name::*;

mod header;
pub use header::*;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::io::{self, Write};

/// An in-memory chunk that is being assembled for writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    name: ChunkName,
    length_override: Option<u32>,
    payload: Vec<u8>,
    children: Vec<Chunk>,
}

impl Chunk {
    /// Create an empty chunk whose length is computed on write.
    pub const fn new(name: ChunkName) -> Self {
        Self {
            name,
            length_override: None,
            payload: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an empty chunk that declares `length` regardless of its contents.
    pub const fn with_length(name: ChunkName, length: u32) -> Self {
        Self {
            name,
            length_override: Some(length),
            payload: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The chunk tag
    pub const fn name(&self) -> ChunkName {
        self.name
    }

    /// Bytes appended so far
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Nested chunks, in write order
    pub fn children(&self) -> &[Chunk] {
        &self.children
    }

    /// Copy `bytes` onto the end of the payload.
    pub fn append(&mut self, bytes: &[u8]) {
        self.payload.extend_from_slice(bytes);
    }

    /// Lay down `len` zero bytes.
    pub fn reserve_zeroed(&mut self, len: usize) {
        self.payload.resize(self.payload.len() + len, 0);
    }

    /// Append one byte
    pub fn append_u8(&mut self, value: u8) {
        self.payload.push(value);
    }

    /// Append one signed byte
    pub fn append_i8(&mut self, value: i8) {
        self.payload.push(value as u8);
    }

    /// Append a flag as `0` or `1`
    pub fn append_bool(&mut self, value: bool) {
        self.payload.push(value as u8);
    }

    /// Append a 16-bit word in the given byte order
    pub fn append_u16<B: ByteOrder>(&mut self, value: u16) {
        let mut buf = [0; 2];
        B::write_u16(&mut buf, value);
        self.append(&buf);
    }

    /// Append a 32-bit word in the given byte order
    pub fn append_u32<B: ByteOrder>(&mut self, value: u32) {
        let mut buf = [0; 4];
        B::write_u32(&mut buf, value);
        self.append(&buf);
    }

    /// Append 16-bit samples in the given byte order
    pub fn append_i16s<B: ByteOrder>(&mut self, values: &[i16]) {
        let start = self.payload.len();
        self.reserve_zeroed(values.len() * 2);
        B::write_i16_into(values, &mut self.payload[start..]);
    }

    /// Nest `child` after the payload and any earlier children.
    pub fn push_child(&mut self, child: Chunk) {
        self.children.push(child);
    }

    /// Size of the payload and all children, recursively.
    ///
    /// With `include_header` every chunk's own 8 header bytes are counted.
    pub fn total_size(&self, include_header: bool) -> usize {
        let header = if include_header { CHUNK_HEADER_SIZE } else { 0 };
        header
            + self.payload.len()
            + self
                .children
                .iter()
                .map(|c| c.total_size(include_header))
                .sum::<usize>()
    }

    /// The length this chunk declares when written.
    pub fn declared_length(&self) -> io::Result<u32> {
        match self.length_override {
            Some(length) => Ok(length),
            None => u32::try_from(self.total_size(true) - CHUNK_HEADER_SIZE).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("chunk {} is larger than 4 GiB", self.name),
                )
            }),
        }
    }

    /// Serialize the chunk depth first.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.name.as_bytes())?;
        writer.write_u32::<BigEndian>(self.declared_length()?)?;
        writer.write_all(&self.payload)?;
        for child in &self.children {
            child.write(writer)?;
        }
        Ok(())
    }
}

#[test]
fn sizes_and_lengths() {
    use pretty_assertions::assert_eq;

    let mut toc = Chunk::new(ChunkName::TOC1);
    let mut entry = Chunk::with_length(ChunkName::E4P1, 388);
    entry.append_u32::<BigEndian>(84);
    entry.reserve_zeroed(20);
    toc.push_child(entry);

    let mut form = Chunk::new(ChunkName::FORM);
    form.append(ChunkName::E4B0.as_bytes());
    form.push_child(toc);

    assert_eq!(form.total_size(true), 8 + 4 + 8 + 32);
    assert_eq!(form.total_size(false), 4 + 24);
    assert_eq!(form.declared_length().unwrap(), 44);

    let mut out = Vec::new();
    form.write(&mut out).unwrap();
    assert_eq!(out.len(), 52);
    assert_eq!(&out[..12], b"FORM\0\0\0\x2cE4B0");
    assert_eq!(&out[12..20], b"TOC1\0\0\0\x20");
    // the entry keeps its explicit length
    assert_eq!(&out[20..28], b"E4P1\0\0\x01\x84");
    assert_eq!(&out[28..32], &[0, 0, 0, 84]);
}

#[test]
fn appends_in_byte_order() {
    use byteorder::LittleEndian;

    let mut chunk = Chunk::new(ChunkName::E3S1);
    chunk.append_u16::<BigEndian>(0x0102);
    chunk.append_u32::<LittleEndian>(0x0304_0506);
    chunk.append_i8(-1);
    chunk.append_bool(true);
    chunk.append_i16s::<LittleEndian>(&[-2, 0x0708]);
    assert_eq!(
        chunk.payload(),
        &[1, 2, 6, 5, 4, 3, 0xff, 1, 0xfe, 0xff, 8, 7]
    );
}
