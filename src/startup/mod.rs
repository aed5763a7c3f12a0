#![doc = r#"
The startup state (`EMSt` block).

The block closes every bank file. It names the preset selected at power-up
and holds the initial settings of all 32 MIDI channels.

# Layout

```text
   0 reserved(2) name(16) reserved(4) current preset(u16)
  24 channels(32 x 32)
1048 reserved(5) tempo reserved(312)
```
"#]

mod channel;
pub use channel::*;

use crate::{
    file::chunk::Chunk,
    name::{self, NAME_LEN},
    reader::{ReadResult, Reader},
};
use byteorder::BigEndian;

/// Size of the startup state record.
pub const STARTUP_STATE_SIZE: usize = 1366;
/// Number of MIDI channels in the startup state.
pub const MIDI_CHANNELS: usize = 32;
/// Name given to a new startup state.
pub const DEFAULT_STARTUP_NAME: &str = "Untitled MSetup ";
/// Slowest tempo, in beats per minute.
pub const MIN_TEMPO: u8 = 20;
/// Fastest tempo, in beats per minute.
pub const MAX_TEMPO: u8 = 240;

/// Bank wide power-up state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartupState {
    name: String,
    current_preset: u16,
    channels: [MidiChannelSettings; MIDI_CHANNELS],
    tempo: u8,
}

impl Default for StartupState {
    fn default() -> Self {
        Self {
            name: DEFAULT_STARTUP_NAME.to_string(),
            current_preset: 0,
            channels: [MidiChannelSettings::default(); MIDI_CHANNELS],
            tempo: MIN_TEMPO,
        }
    }
}

impl StartupState {
    /// The name, always 16 characters
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Index of the preset selected at power-up
    pub fn current_preset(&self) -> u16 {
        self.current_preset
    }
    /// Per-channel settings
    pub fn channels(&self) -> &[MidiChannelSettings; MIDI_CHANNELS] {
        &self.channels
    }
    /// Per-channel settings, for editing
    pub fn channels_mut(&mut self) -> &mut [MidiChannelSettings; MIDI_CHANNELS] {
        &mut self.channels
    }
    /// Tempo in beats per minute
    pub fn tempo(&self) -> u8 {
        self.tempo
    }

    /// Set the name. It is padded or truncated to 16 characters.
    pub fn set_name(&mut self, name: &str) {
        self.name = name::normalize(name);
    }
    /// Set the current preset.
    ///
    /// A bank overwrites this with its startup preset when it is written.
    pub fn set_current_preset(&mut self, index: u16) {
        self.current_preset = index;
    }
    /// Set the tempo, clamped to `[20, 240]`.
    pub fn set_tempo(&mut self, bpm: u8) {
        self.tempo = bpm.clamp(MIN_TEMPO, MAX_TEMPO);
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        reader.skip(2)?;
        let name = name::name_from_bytes(&reader.read_exact_size::<NAME_LEN>()?);
        reader.skip(4)?;
        let current_preset = reader.read_u16::<BigEndian>()?;

        let mut channels = [MidiChannelSettings::default(); MIDI_CHANNELS];
        for channel in channels.iter_mut() {
            *channel = MidiChannelSettings::read(reader)?;
        }

        reader.skip(5)?;
        let tempo = reader.read_u8()?;
        reader.skip(312)?;

        Ok(Self {
            name,
            current_preset,
            channels,
            tempo,
        })
    }

    pub(crate) fn write(&self, chunk: &mut Chunk) {
        chunk.reserve_zeroed(2);
        chunk.append(&name::to_name_bytes(&self.name));
        chunk.reserve_zeroed(4);
        chunk.append_u16::<BigEndian>(self.current_preset);
        for channel in &self.channels {
            channel.write(chunk);
        }
        chunk.reserve_zeroed(5);
        chunk.append_u8(self.tempo);
        chunk.reserve_zeroed(312);
    }
}

#[test]
fn startup_layout() {
    use crate::file::chunk::ChunkName;

    let mut state = StartupState::default();
    state.set_current_preset(0x0102);
    state.set_tempo(250);

    let mut chunk = Chunk::new(ChunkName::EMST);
    state.write(&mut chunk);
    let bytes = chunk.payload();
    assert_eq!(bytes.len(), STARTUP_STATE_SIZE);
    assert_eq!(&bytes[2..18], DEFAULT_STARTUP_NAME.as_bytes());
    assert_eq!(&bytes[22..24], &[1, 2]);
    assert_eq!(bytes[24], 127);
    assert_eq!(bytes[1053], MAX_TEMPO);
}

#[test]
fn startup_state_survives() {
    use crate::file::chunk::ChunkName;
    use pretty_assertions::assert_eq;

    let mut state = StartupState::default();
    state.set_name("Live");
    state.channels_mut()[3].set_preset(Some(9));
    state.channels_mut()[31].set_pan(20);

    let mut chunk = Chunk::new(ChunkName::EMST);
    state.write(&mut chunk);
    let back = StartupState::read(&mut Reader::from_byte_slice(chunk.payload())).unwrap();
    assert_eq!(back, state);
    assert_eq!(back.name(), "Live            ");
}
