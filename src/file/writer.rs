use super::{FILE_HEADER_SIZE, TOC_ENTRY_SIZE, TocEntry};
use crate::{
    EncodeError,
    bank::Bank,
    file::chunk::{CHUNK_HEADER_SIZE, Chunk, ChunkName},
    name::{self, NAME_LEN},
};
use std::io::{self, Write};

struct QueuedBlock {
    chunk: Chunk,
    index: u16,
    name: [u8; NAME_LEN],
}

impl Bank {
    /// Serialize the bank into `writer`.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), EncodeError> {
        self.to_chunk()?.write(writer)?;
        Ok(())
    }

    /// Serialize the bank into a new buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let form = self.to_chunk()?;
        let mut out = Vec::with_capacity(form.total_size(true));
        form.write(&mut out)?;
        Ok(out)
    }

    /// Build the whole chunk tree.
    ///
    /// Blocks are queued first so every table entry can be given the final
    /// offset of its block before anything is written.
    pub(crate) fn to_chunk(&self) -> Result<Chunk, EncodeError> {
        let mut blocks = Vec::with_capacity(
            self.presets().len() + self.samples().len() + self.sequences().len(),
        );
        for preset in self.presets() {
            let mut chunk = Chunk::new(ChunkName::E4P1);
            preset.write(&mut chunk)?;
            blocks.push(QueuedBlock {
                chunk,
                index: preset.index(),
                name: name::to_name_bytes(preset.name()),
            });
        }
        for sample in self.samples() {
            let mut chunk = Chunk::new(ChunkName::E3S1);
            sample.write(&mut chunk)?;
            blocks.push(QueuedBlock {
                chunk,
                index: sample.index(),
                name: name::to_name_bytes(sample.name()),
            });
        }
        for sequence in self.sequences() {
            let mut chunk = Chunk::new(ChunkName::E4S1);
            sequence.write(&mut chunk)?;
            blocks.push(QueuedBlock {
                chunk,
                index: sequence.index(),
                name: name::to_name_bytes(sequence.name()),
            });
        }

        let mut toc = Chunk::new(ChunkName::TOC1);
        let mut offset = FILE_HEADER_SIZE + CHUNK_HEADER_SIZE + blocks.len() * TOC_ENTRY_SIZE;
        for block in &blocks {
            let position = u32::try_from(offset).map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidData, "bank is larger than 4 GiB")
            })?;
            let entry = TocEntry::for_block(&block.chunk, position, block.index, block.name);
            log::trace!("{} #{} at offset {position}", entry.tag(), entry.index());
            toc.push_child(entry.to_chunk());
            offset += block.chunk.total_size(true);
        }

        let mut form = Chunk::new(ChunkName::FORM);
        form.append(ChunkName::E4B0.as_bytes());
        form.push_child(toc);
        for block in blocks {
            form.push_child(block.chunk);
        }

        let mut startup = self.startup_state().clone();
        startup.set_current_preset(self.startup_preset());
        let mut emst = Chunk::new(ChunkName::EMST);
        startup.write(&mut emst);
        form.push_child(emst);

        Ok(form)
    }
}

#[test]
fn offsets_follow_block_sizes() {
    use crate::{
        preset::{Preset, SampleZone, Voice},
        sequence::Sequence,
    };
    use pretty_assertions::assert_eq;

    let mut bank = Bank::new();
    bank.add_preset(Preset::with_voices(
        "One",
        vec![Voice::with_zone(SampleZone::default())],
    ))
    .unwrap();
    bank.add_preset(Preset::new("Two")).unwrap();
    bank.add_sequence(Sequence::new("Song", vec![1, 2, 3]))
        .unwrap();

    let form = bank.to_chunk().unwrap();
    let toc = &form.children()[0];
    assert_eq!(toc.children().len(), 3);

    let offsets: Vec<u32> = toc
        .children()
        .iter()
        .map(|entry| u32::from_be_bytes([entry.payload()[0], entry.payload()[1], entry.payload()[2], entry.payload()[3]]))
        .collect();
    let first = 12 + 8 + 3 * 32;
    assert_eq!(offsets, vec![first, first + 8 + 390, first + 8 + 390 + 8 + 84]);

    let bytes = bank.to_bytes().unwrap();
    for (entry, offset) in toc.children().iter().zip(offsets) {
        let at = offset as usize;
        assert_eq!(&bytes[at..at + 4], entry.name().as_bytes());
    }
}
