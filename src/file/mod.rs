#![doc = r#"
Reading and writing whole bank files.

# Overview

```text
FORM <length> "E4B0"
  TOC1 <length>      32 byte entries, one per block
  E4P1 / E3S1 / E4s1 blocks, in table order
  EMSt               startup state
```

Decoding walks the table of contents and seeks to each block it names, so the
order of the blocks themselves does not matter. Encoding lays out presets,
then samples, then sequences, and computes every table entry's offset from
the sizes of the blocks queued before it.
"#]

/// Contains the [`BankBuilder`](builder::BankBuilder) and the decoded
/// block types.
pub mod builder;

pub mod chunk;

mod header;
pub use header::*;

mod toc;
pub use toc::*;

mod writer;

use crate::{
    ChunkError, EncodeError,
    bank::Bank,
    file::{
        builder::{BankBuilder, SubBlock},
        chunk::{ChunkHeader, ChunkName},
    },
    reader::{ReadResult, Reader, ReaderError, inv_data},
    startup::StartupState,
};
use std::{
    borrow::Cow,
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Outcome of a file level read, in the device's terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadStatus {
    /// The bank was read
    Success,
    /// The file could not be found or opened
    FileNotExist,
    /// The file is not a bank, or is damaged
    FileInvalid,
}

/// Errors from [`Bank::read_file`] and [`Bank::write_file`]
#[derive(Debug, Error)]
pub enum FileError {
    /// Nothing exists at the path
    #[error("{} does not exist", .0.display())]
    NotExist(PathBuf),
    /// The path does not end in `.e4b` or `.E4B`
    #[error("{} is not an .e4b file", .0.display())]
    Extension(PathBuf),
    /// The file contents could not be decoded
    #[error(transparent)]
    Invalid(#[from] ReaderError),
    /// Opening, reading or writing failed
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The bank could not be encoded
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl FileError {
    /// The read status this error reports.
    pub fn status(&self) -> ReadStatus {
        match self {
            Self::NotExist(_) | Self::Io(_) => ReadStatus::FileNotExist,
            Self::Extension(_) | Self::Invalid(_) | Self::Encode(_) => ReadStatus::FileInvalid,
        }
    }
}

/// The read status of a file level result.
pub fn read_status<T>(result: &Result<T, FileError>) -> ReadStatus {
    match result {
        Ok(_) => ReadStatus::Success,
        Err(e) => e.status(),
    }
}

/// True if `path` ends in `.e4b` or `.E4B`.
pub fn has_bank_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("e4b" | "E4B")
    )
}

impl Bank {
    /// Parse a set of bytes into a bank.
    pub fn parse<'a, B>(bytes: B) -> ReadResult<Self>
    where
        B: Into<Cow<'a, [u8]>>,
    {
        let mut reader = Reader::from_bytes(bytes);
        BankHeader::read(&mut reader)?;

        let toc = ChunkHeader::read_expecting(&mut reader, ChunkName::TOC1)?;
        let entry_count = toc.length() as usize / TOC_ENTRY_SIZE;
        if entry_count == 0 {
            return Err(inv_data(&reader, ChunkError::EmptyToc));
        }
        let toc_start = reader.buffer_position();

        let mut builder = BankBuilder::default();
        let mut blocks_end = toc_start;
        for i in 0..entry_count {
            reader.set_position(toc_start + i * TOC_ENTRY_SIZE)?;
            let entry = TocEntry::read(&mut reader)?;
            log::debug!(
                "table entry {i}: {} #{} at {}",
                entry.tag(),
                entry.index(),
                entry.offset()
            );

            let block = SubBlock::read(&mut reader, &entry)?;
            builder.handle_sub_block(block);
            blocks_end = entry.payload_offset().saturating_add(entry.block_size());
        }

        if blocks_end < reader.len() {
            reader.set_position(blocks_end)?;
            match read_startup(&mut reader) {
                Ok(Some(state)) => builder.handle_sub_block(SubBlock::Startup(state)),
                Ok(None) => {}
                Err(e) => log::warn!("ignoring unreadable startup state: {e}"),
            }
        }

        Ok(builder.build())
    }

    /// Read a bank from a `.e4b` file.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, FileError> {
        let path = path.as_ref();
        if !has_bank_extension(path) {
            return Err(FileError::Extension(path.to_path_buf()));
        }
        if !path.exists() {
            return Err(FileError::NotExist(path.to_path_buf()));
        }
        let bytes = fs::read(path)?;
        Ok(Self::parse(bytes)?)
    }

    /// Write the bank to a `.e4b` file.
    ///
    /// Any other extension is logged and nothing is written.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), FileError> {
        let path = path.as_ref();
        if !has_bank_extension(path) {
            log::warn!("not writing {}: not an .e4b path", path.display());
            return Ok(());
        }
        let mut writer = BufWriter::new(fs::File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn read_startup(reader: &mut Reader<'_>) -> ReadResult<Option<StartupState>> {
    let header = ChunkHeader::read(reader)?;
    if header.name() != ChunkName::EMST {
        log::debug!("ignoring trailing {} block", header.name());
        return Ok(None);
    }
    StartupState::read(reader).map(Some)
}

#[test]
fn extension_check() {
    assert!(has_bank_extension(Path::new("bank.e4b")));
    assert!(has_bank_extension(Path::new("dir/BANK.E4B")));
    assert!(!has_bank_extension(Path::new("bank.E4b")));
    assert!(!has_bank_extension(Path::new("bank.wav")));
    assert!(!has_bank_extension(Path::new("e4b")));
}

#[test]
fn status_codes() {
    let missing: Result<(), FileError> = Err(FileError::NotExist(PathBuf::from("x.e4b")));
    assert_eq!(read_status(&missing), ReadStatus::FileNotExist);

    let wrong: Result<(), FileError> = Err(FileError::Extension(PathBuf::from("x.wav")));
    assert_eq!(read_status(&wrong), ReadStatus::FileInvalid);

    assert_eq!(read_status(&Ok::<_, FileError>(())), ReadStatus::Success);
}
