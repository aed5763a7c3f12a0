#![doc = r#"
The in-memory bank: presets, samples, sequences and the startup state.

Every preset, sample and sequence carries a 16 bit index that is unique
within its collection. Adding an entity whose index is [`AUTO_INDEX`] gives
it the current size of its collection. Mutations that would break an
invariant are rejected with a [`BankError`] and leave the bank untouched.

Entities are owned by the bank. Lookups hand out plain borrows.
"#]

use crate::{
    preset::Preset,
    sample::Sample,
    sequence::Sequence,
    startup::StartupState,
};
use core::fmt;
use thiserror::Error;

/// Index sentinel meaning "assign on insert".
pub const AUTO_INDEX: u16 = u16::MAX;
/// Startup preset sentinel meaning "no preset".
pub const NO_STARTUP_PRESET: u16 = u16::MAX;

/// Most presets a bank holds.
pub const MAX_PRESETS: usize = 1000;
/// Most samples a bank holds.
pub const MAX_SAMPLES: usize = 1000;
/// Most sequences a bank holds.
pub const MAX_SEQUENCES: usize = 1000;

/// The kinds of entity a [`BankError`] can refer to.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Preset,
    Sample,
    Sequence,
    Voice,
    Zone,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Preset => "preset",
            Self::Sample => "sample",
            Self::Sequence => "sequence",
            Self::Voice => "voice",
            Self::Zone => "zone",
        };
        f.write_str(name)
    }
}

/// A rejected change to a bank or one of its entities
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BankError {
    /// Another entity already uses this index
    #[error("a {kind} with index {index} already exists")]
    DuplicateIndex {
        /// Collection that was modified
        kind: EntityKind,
        /// The clashing index
        index: u16,
    },
    /// Nothing is stored under this index
    #[error("no {kind} with index {index}")]
    MissingIndex {
        /// Collection that was looked up
        kind: EntityKind,
        /// The requested index
        index: u16,
    },
    /// The collection is full
    #[error("cannot hold more than {limit} {kind} entries")]
    Capacity {
        /// Collection that was modified
        kind: EntityKind,
        /// Its capacity
        limit: usize,
    },
    /// A startup preset needs at least one preset
    #[error("the bank has no presets")]
    NoPresets,
}

trait Indexed {
    const KIND: EntityKind;
    const LIMIT: usize;

    fn index(&self) -> u16;
    fn set_index(&mut self, index: u16);
}

macro_rules! indexed {
    ($ty:ty, $kind:ident, $limit:expr) => {
        impl Indexed for $ty {
            const KIND: EntityKind = EntityKind::$kind;
            const LIMIT: usize = $limit;

            fn index(&self) -> u16 {
                <$ty>::index(self)
            }
            fn set_index(&mut self, index: u16) {
                <$ty>::set_index(self, index)
            }
        }
    };
}

indexed!(Preset, Preset, MAX_PRESETS);
indexed!(Sample, Sample, MAX_SAMPLES);
indexed!(Sequence, Sequence, MAX_SEQUENCES);

fn insert<T: Indexed>(items: &mut Vec<T>, mut item: T) -> Result<u16, BankError> {
    if items.len() >= T::LIMIT {
        return Err(BankError::Capacity {
            kind: T::KIND,
            limit: T::LIMIT,
        });
    }
    if item.index() == AUTO_INDEX {
        item.set_index(items.len() as u16);
    }
    let index = item.index();
    if items.iter().any(|existing| existing.index() == index) {
        return Err(BankError::DuplicateIndex {
            kind: T::KIND,
            index,
        });
    }
    items.push(item);
    Ok(index)
}

fn remove<T: Indexed>(items: &mut Vec<T>, index: u16) -> Result<T, BankError> {
    let position = items
        .iter()
        .position(|item| item.index() == index)
        .ok_or(BankError::MissingIndex {
            kind: T::KIND,
            index,
        })?;
    Ok(items.remove(position))
}

/// A sampler bank.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bank {
    presets: Vec<Preset>,
    samples: Vec<Sample>,
    sequences: Vec<Sequence>,
    startup_preset: u16,
    startup: StartupState,
}

impl Bank {
    /// An empty bank
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a preset, returning its index.
    pub fn add_preset(&mut self, preset: Preset) -> Result<u16, BankError> {
        insert(&mut self.presets, preset)
    }
    /// Add a sample, returning its index.
    pub fn add_sample(&mut self, sample: Sample) -> Result<u16, BankError> {
        insert(&mut self.samples, sample)
    }
    /// Add a sequence, returning its index.
    pub fn add_sequence(&mut self, sequence: Sequence) -> Result<u16, BankError> {
        insert(&mut self.sequences, sequence)
    }

    /// Remove the preset stored under `index`.
    pub fn remove_preset(&mut self, index: u16) -> Result<Preset, BankError> {
        remove(&mut self.presets, index)
    }
    /// Remove the sample stored under `index`.
    pub fn remove_sample(&mut self, index: u16) -> Result<Sample, BankError> {
        remove(&mut self.samples, index)
    }
    /// Remove the sequence stored under `index`.
    pub fn remove_sequence(&mut self, index: u16) -> Result<Sequence, BankError> {
        remove(&mut self.sequences, index)
    }

    /// All presets, in insertion order
    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }
    /// All samples, in insertion order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
    /// All sequences, in insertion order
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// The preset stored under `index`
    pub fn preset(&self, index: u16) -> Option<&Preset> {
        self.presets.iter().find(|p| p.index() == index)
    }
    /// The sample stored under `index`
    pub fn sample(&self, index: u16) -> Option<&Sample> {
        self.samples.iter().find(|s| s.index() == index)
    }
    /// The sequence stored under `index`
    pub fn sequence(&self, index: u16) -> Option<&Sequence> {
        self.sequences.iter().find(|s| s.index() == index)
    }

    /// The preset stored under `index`, for editing.
    ///
    /// Index changes made through this borrow are not checked for clashes.
    pub fn preset_mut(&mut self, index: u16) -> Option<&mut Preset> {
        self.presets.iter_mut().find(|p| p.index() == index)
    }
    /// The sample stored under `index`, for editing.
    ///
    /// Index changes made through this borrow are not checked for clashes.
    pub fn sample_mut(&mut self, index: u16) -> Option<&mut Sample> {
        self.samples.iter_mut().find(|s| s.index() == index)
    }
    /// The sequence stored under `index`, for editing.
    ///
    /// Index changes made through this borrow are not checked for clashes.
    pub fn sequence_mut(&mut self, index: u16) -> Option<&mut Sequence> {
        self.sequences.iter_mut().find(|s| s.index() == index)
    }

    /// Index of the preset selected at power-up, or [`NO_STARTUP_PRESET`]
    pub fn startup_preset(&self) -> u16 {
        self.startup_preset
    }

    /// Select the preset loaded at power-up.
    ///
    /// [`NO_STARTUP_PRESET`] is always accepted. An index no preset uses
    /// selects the first preset instead.
    pub fn set_startup_preset(&mut self, index: u16) -> Result<(), BankError> {
        let Some(first) = self.presets.first() else {
            return Err(BankError::NoPresets);
        };
        self.startup_preset = if index == NO_STARTUP_PRESET || self.preset(index).is_some() {
            index
        } else {
            first.index()
        };
        Ok(())
    }

    /// The startup state written at the end of the bank
    pub fn startup_state(&self) -> &StartupState {
        &self.startup
    }
    /// The startup state, for editing.
    ///
    /// Its current preset is replaced by [`Bank::startup_preset`] on write.
    pub fn startup_state_mut(&mut self) -> &mut StartupState {
        &mut self.startup
    }
    pub(crate) fn set_startup_state(&mut self, state: StartupState) {
        self.startup = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{SampleChannels, SampleLoop};
    use pretty_assertions::assert_eq;

    fn preset_with_index(index: u16) -> Preset {
        let mut preset = Preset::new("p");
        preset.set_index(index);
        preset
    }

    #[test]
    fn auto_index_follows_collection_size() {
        let mut bank = Bank::new();
        assert_eq!(bank.add_preset(Preset::new("a")), Ok(0));
        assert_eq!(bank.add_preset(Preset::new("b")), Ok(1));
        assert_eq!(bank.add_preset(Preset::new("c")), Ok(2));
        assert_eq!(bank.preset(1).map(Preset::name), Some("b               "));
    }

    #[test]
    fn duplicate_index_keeps_first() {
        let mut bank = Bank::new();
        let mut first = preset_with_index(4);
        first.set_name("first");
        bank.add_preset(first).unwrap();

        assert_eq!(
            bank.add_preset(preset_with_index(4)),
            Err(BankError::DuplicateIndex {
                kind: EntityKind::Preset,
                index: 4
            })
        );
        assert_eq!(bank.presets().len(), 1);
        assert_eq!(bank.preset(4).unwrap().name(), "first           ");
    }

    #[test]
    fn auto_index_can_clash() {
        let mut bank = Bank::new();
        bank.add_preset(preset_with_index(1)).unwrap();
        assert!(matches!(
            bank.add_preset(Preset::new("auto")),
            Err(BankError::DuplicateIndex { index: 1, .. })
        ));
    }

    #[test]
    fn capacity() {
        let mut bank = Bank::new();
        for _ in 0..MAX_PRESETS {
            bank.add_preset(Preset::new("p")).unwrap();
        }
        for _ in 0..MAX_SAMPLES {
            bank.add_sample(Sample::new(
                "s",
                vec![0],
                44_100,
                SampleChannels::Mono,
                SampleLoop::default(),
            ))
            .unwrap();
        }
        for _ in 0..MAX_SEQUENCES {
            bank.add_sequence(Sequence::new("s", vec![0])).unwrap();
        }

        assert_eq!(
            bank.add_preset(Preset::new("p")),
            Err(BankError::Capacity {
                kind: EntityKind::Preset,
                limit: MAX_PRESETS
            })
        );
        assert_eq!(
            bank.add_sample(Sample::new(
                "s",
                vec![0],
                44_100,
                SampleChannels::Mono,
                SampleLoop::default(),
            )),
            Err(BankError::Capacity {
                kind: EntityKind::Sample,
                limit: MAX_SAMPLES
            })
        );
        assert_eq!(
            bank.add_sequence(Sequence::new("s", vec![0])),
            Err(BankError::Capacity {
                kind: EntityKind::Sequence,
                limit: MAX_SEQUENCES
            })
        );
        assert_eq!(bank.presets().len(), MAX_PRESETS);
        assert_eq!(bank.samples().len(), MAX_SAMPLES);
        assert_eq!(bank.sequences().len(), MAX_SEQUENCES);
    }

    #[test]
    fn removal_by_index() {
        let mut bank = Bank::new();
        bank.add_preset(preset_with_index(10)).unwrap();
        bank.add_preset(preset_with_index(3)).unwrap();

        assert_eq!(bank.remove_preset(3).map(|p| p.index()), Ok(3));
        assert_eq!(
            bank.remove_preset(3),
            Err(BankError::MissingIndex {
                kind: EntityKind::Preset,
                index: 3
            })
        );
        assert_eq!(bank.presets().len(), 1);
    }

    #[test]
    fn startup_preset_rules() {
        let mut bank = Bank::new();
        assert_eq!(bank.set_startup_preset(0), Err(BankError::NoPresets));

        bank.add_preset(preset_with_index(5)).unwrap();
        bank.add_preset(preset_with_index(8)).unwrap();

        bank.set_startup_preset(8).unwrap();
        assert_eq!(bank.startup_preset(), 8);

        bank.set_startup_preset(99).unwrap();
        assert_eq!(bank.startup_preset(), 5);

        bank.set_startup_preset(NO_STARTUP_PRESET).unwrap();
        assert_eq!(bank.startup_preset(), NO_STARTUP_PRESET);
    }
}
