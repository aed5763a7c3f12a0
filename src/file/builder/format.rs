use crate::{ChunkError, file::chunk::ChunkName};

#[doc = r#"
What a table of contents entry points at.

`E4Ma` and `EMS0` hold multi-setup and effect data. They are recognised so a
bank carrying them still loads, but their payload is not decoded.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubBlockKind {
    /// `E4P1`
    Preset,
    /// `E3S1`
    Sample,
    /// `E4s1`
    Sequence,
    /// `E4Ma` or `EMS0`
    Skipped(ChunkName),
}

impl SubBlockKind {
    /// Identify a block by its tag.
    pub fn from_tag(tag: ChunkName) -> Result<Self, ChunkError> {
        match tag {
            ChunkName::E4P1 => Ok(Self::Preset),
            ChunkName::E3S1 => Ok(Self::Sample),
            ChunkName::E4S1 => Ok(Self::Sequence),
            ChunkName::E4MA | ChunkName::EMS0 => Ok(Self::Skipped(tag)),
            other => Err(ChunkError::UnknownSubBlock(other)),
        }
    }

    /// The tag written for this kind of block
    pub const fn tag(&self) -> ChunkName {
        match self {
            Self::Preset => ChunkName::E4P1,
            Self::Sample => ChunkName::E3S1,
            Self::Sequence => ChunkName::E4S1,
            Self::Skipped(tag) => *tag,
        }
    }
}

#[test]
fn tags_are_case_sensitive() {
    assert_eq!(
        SubBlockKind::from_tag(ChunkName::from_bytes(*b"E4s1")),
        Ok(SubBlockKind::Sequence)
    );
    assert_eq!(
        SubBlockKind::from_tag(ChunkName::from_bytes(*b"E4S1")),
        Err(ChunkError::UnknownSubBlock(ChunkName::from_bytes(*b"E4S1")))
    );
    assert_eq!(
        SubBlockKind::from_tag(ChunkName::EMS0).map(|k| k.tag()),
        Ok(ChunkName::EMS0)
    );
}
