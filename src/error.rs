use crate::file::chunk::ChunkName;
use std::io;
use thiserror::Error;

#[doc = r#"
Structural problems found while decoding a bank.

Truncation is not a parse error; it surfaces as
[`ReaderErrorKind::OutOfBounds`](crate::reader::ReaderErrorKind::OutOfBounds).
"#]
#[derive(Debug, Error)]
pub enum ParseError {
    /// Container level problems
    #[error("Chunk: {0}")]
    Chunk(#[from] ChunkError),
    /// A malformed preset header
    #[error("Preset: {0}")]
    Preset(#[from] PresetError),
    /// A malformed voice record
    #[error("Voice: {0}")]
    Voice(#[from] VoiceError),
    /// A variable length block declared fewer bytes than its fixed header
    #[error("{name} block of {size} bytes is smaller than its header")]
    BlockTooSmall {
        /// Tag of the offending block
        name: ChunkName,
        /// Declared payload size
        size: usize,
    },
}

/// Errors in the chunk container and the table of contents
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    /// Chunk names are always four bytes
    #[error("chunk names must be 4 bytes, got {0}")]
    NameLength(usize),
    /// A mandatory tag was not where it should be
    #[error("expected {expected}, found {found}")]
    UnexpectedName {
        /// The tag required at this position
        expected: ChunkName,
        /// What the file holds instead
        found: ChunkName,
    },
    /// The table of contents points at a block this crate does not know
    #[error("unknown sub-block {0}")]
    UnknownSubBlock(ChunkName),
    /// The table of contents holds no entries
    #[error("the table of contents is empty")]
    EmptyToc,
}

/// Errors decoding a preset header
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PresetError {
    /// The preset data size marker is always 82
    #[error("preset data size {0}, expected 82")]
    DataSize(u16),
}

/// Errors decoding a voice record
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoiceError {
    /// Voice sizes are 284 bytes plus 22 per zone
    #[error("voice data size {0} is not 284 + 22 * zones")]
    DataSize(u16),
    /// Stored voices always carry at least one zone
    #[error("voice has no zones")]
    NoZones,
}

/// Errors raised while serializing a bank
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Samples without PCM data cannot be written
    #[error("sample {index} has no sample data")]
    EmptySample {
        /// Index of the offending sample
        index: u16,
    },
    /// Sequences without MIDI data cannot be written
    #[error("sequence {index} has no MIDI data")]
    EmptySequence {
        /// Index of the offending sequence
        index: u16,
    },
    /// The zone count is stored in one byte
    #[error("a voice holds {0} zones, at most 255 can be stored")]
    ZoneCount(usize),
    /// The output stream failed
    #[error(transparent)]
    Io(#[from] io::Error),
}
