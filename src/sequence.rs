//! MIDI sequences (`E4s1` blocks).
//!
//! A sequence record is the index, the name and a standard MIDI file, kept as
//! raw bytes.

use crate::{
    EncodeError, ParseError,
    bank::{AUTO_INDEX, MAX_SEQUENCES},
    file::chunk::{Chunk, ChunkName},
    name::{self, NAME_LEN},
    reader::{ReadResult, Reader, inv_data},
};
use byteorder::BigEndian;

/// Size of a sequence record without its MIDI data.
pub const SEQUENCE_HEADER_SIZE: usize = 2 + NAME_LEN;

/// A named MIDI sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence {
    index: u16,
    name: String,
    midi_data: Vec<u8>,
}

impl Sequence {
    /// Create a sequence. The index is assigned when it is added to a bank.
    pub fn new(name: &str, midi_data: Vec<u8>) -> Self {
        Self {
            index: AUTO_INDEX,
            name: name::normalize(name),
            midi_data,
        }
    }

    /// Bank index, or [`AUTO_INDEX`]
    pub fn index(&self) -> u16 {
        self.index
    }
    /// The name, always 16 characters
    pub fn name(&self) -> &str {
        &self.name
    }
    /// The MIDI file bytes
    pub fn midi_data(&self) -> &[u8] {
        &self.midi_data
    }

    /// Set the bank index.
    ///
    /// [`AUTO_INDEX`] is kept as is, anything else is clamped below
    /// [`MAX_SEQUENCES`].
    pub fn set_index(&mut self, index: u16) {
        self.index = if index == AUTO_INDEX {
            index
        } else {
            index.min(MAX_SEQUENCES as u16 - 1)
        };
    }
    /// Set the name. It is padded or truncated to 16 characters.
    pub fn set_name(&mut self, name: &str) {
        self.name = name::normalize(name);
    }
    /// Replace the MIDI file bytes
    pub fn set_midi_data(&mut self, midi_data: Vec<u8>) {
        self.midi_data = midi_data;
    }

    pub(crate) fn read(reader: &mut Reader<'_>, size: usize) -> ReadResult<Self> {
        let Some(len) = size.checked_sub(SEQUENCE_HEADER_SIZE) else {
            return Err(inv_data(
                reader,
                ParseError::BlockTooSmall {
                    name: ChunkName::E4S1,
                    size,
                },
            ));
        };
        let index = reader.read_u16::<BigEndian>()?;
        let name = name::name_from_bytes(&reader.read_exact_size::<NAME_LEN>()?);
        let midi_data = reader.read_slice(len)?.to_vec();
        Ok(Self {
            index,
            name,
            midi_data,
        })
    }

    pub(crate) fn write(&self, chunk: &mut Chunk) -> Result<(), EncodeError> {
        if self.midi_data.is_empty() {
            return Err(EncodeError::EmptySequence { index: self.index });
        }
        chunk.append_u16::<BigEndian>(self.index);
        chunk.append(&name::to_name_bytes(&self.name));
        chunk.append(&self.midi_data);
        Ok(())
    }
}

#[test]
fn sequence_record() {
    let mut sequence = Sequence::new("Groove", b"MThd\0\0\0\x06".to_vec());
    sequence.set_index(1200);
    assert_eq!(sequence.index(), MAX_SEQUENCES as u16 - 1);

    let mut chunk = Chunk::new(ChunkName::E4S1);
    sequence.write(&mut chunk).unwrap();
    let bytes = chunk.payload();
    assert_eq!(bytes.len(), SEQUENCE_HEADER_SIZE + 8);
    assert_eq!(&bytes[..2], &[0x03, 0xe7]);

    let back = Sequence::read(&mut Reader::from_byte_slice(bytes), bytes.len()).unwrap();
    assert_eq!(back, sequence);
}

#[test]
fn empty_sequence_is_not_written() {
    let sequence = Sequence::new("Nothing", Vec::new());
    let mut chunk = Chunk::new(ChunkName::E4S1);
    assert!(matches!(
        sequence.write(&mut chunk),
        Err(EncodeError::EmptySequence { .. })
    ));
}
