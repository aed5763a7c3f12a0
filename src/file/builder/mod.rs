mod format;
pub use format::*;

use crate::{
    bank::Bank,
    file::{TocEntry, chunk::ChunkName},
    preset::Preset,
    reader::{ReadResult, Reader, inv_data},
    sample::Sample,
    sequence::Sequence,
    startup::StartupState,
};

/// A decoded block of a bank file.
#[derive(Debug, Clone, PartialEq)]
pub enum SubBlock {
    /// A preset
    Preset(Preset),
    /// A sample
    Sample(Sample),
    /// A sequence
    Sequence(Sequence),
    /// A recognised block whose payload was not decoded
    Skipped(ChunkName),
    /// The trailing startup state
    Startup(StartupState),
}

impl SubBlock {
    /// Decode the block `entry` points at.
    ///
    /// The reader is left at the end of whatever was decoded.
    pub fn read(reader: &mut Reader<'_>, entry: &TocEntry) -> ReadResult<Self> {
        let kind = SubBlockKind::from_tag(entry.tag()).map_err(|e| inv_data(reader, e))?;
        reader.set_position(entry.payload_offset())?;

        let block = match kind {
            SubBlockKind::Preset => Self::Preset(Preset::read(reader)?),
            SubBlockKind::Sample => Self::Sample(Sample::read(reader, entry.block_size())?),
            SubBlockKind::Sequence => Self::Sequence(Sequence::read(reader, entry.block_size())?),
            SubBlockKind::Skipped(tag) => Self::Skipped(tag),
        };
        Ok(block)
    }
}

/// Collects decoded blocks into a [`Bank`].
///
/// Entities the bank refuses (a repeated index, a full collection) are logged
/// and dropped; they do not fail the decode.
#[derive(Default)]
pub struct BankBuilder {
    bank: Bank,
    startup: Option<StartupState>,
}

impl BankBuilder {
    /// Handles one decoded block.
    pub fn handle_sub_block(&mut self, block: SubBlock) {
        let result = match block {
            SubBlock::Preset(preset) => self.bank.add_preset(preset),
            SubBlock::Sample(sample) => self.bank.add_sample(sample),
            SubBlock::Sequence(sequence) => self.bank.add_sequence(sequence),
            SubBlock::Skipped(tag) => {
                log::debug!("skipping {tag} block");
                return;
            }
            SubBlock::Startup(state) => {
                self.startup = Some(state);
                return;
            }
        };
        if let Err(e) = result {
            log::warn!("dropping decoded entity: {e}");
        }
    }

    /// Finish the bank, applying the startup state if one was read.
    pub fn build(self) -> Bank {
        let mut bank = self.bank;
        if let Some(state) = self.startup {
            let current = state.current_preset();
            bank.set_startup_state(state);
            if let Err(e) = bank.set_startup_preset(current) {
                log::warn!("startup preset {current} not applied: {e}");
            }
        }
        bank
    }
}

#[test]
fn rejected_entities_are_dropped() {
    let mut builder = BankBuilder::default();
    let mut preset = Preset::new("one");
    preset.set_index(3);
    builder.handle_sub_block(SubBlock::Preset(preset.clone()));
    preset.set_name("two");
    builder.handle_sub_block(SubBlock::Preset(preset));
    builder.handle_sub_block(SubBlock::Skipped(ChunkName::E4MA));

    let mut state = StartupState::default();
    state.set_current_preset(40);
    builder.handle_sub_block(SubBlock::Startup(state));

    let bank = builder.build();
    assert_eq!(bank.presets().len(), 1);
    assert_eq!(bank.presets()[0].name(), "one             ");
    // unknown startup preset falls back to the first preset
    assert_eq!(bank.startup_preset(), 3);
}
