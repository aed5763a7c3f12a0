#![doc = r#"
Presets and everything a preset is built from.

A [`Preset`] is a named patch holding one or more [`Voice`]s. Each voice
carries its own tone shaping ([`Envelope`], [`Lfo`], [`Cord`]) and maps key
and velocity spans onto samples through [`SampleZone`]s.

# Layout

The `E4P1` block starts with an 84 byte header, followed by the voices:

```text
 0 index(u16) name(16) data size(u16 = 82) voices(u16) reserved(4)
26 transpose(i8) volume(i8) reserved(24) "R#\0~"
56 initial controllers(4) reserved(24)
84 voices
```
"#]

mod cord;
mod envelope;
mod lfo;
mod params;
mod voice;
mod zone;

pub use cord::*;
pub use envelope::*;
pub use lfo::*;
pub use params::*;
pub use voice::*;
pub use zone::*;

use crate::{
    EncodeError, PresetError,
    bank::{AUTO_INDEX, BankError, EntityKind, MAX_PRESETS},
    file::chunk::Chunk,
    name::{self, NAME_LEN},
    reader::{ReadResult, Reader, inv_data},
};
use byteorder::BigEndian;

/// Size of the preset header.
pub const PRESET_HEADER_SIZE: usize = 84;
/// Value of the data size marker in every preset header.
pub const PRESET_DATA_SIZE: u16 = 82;
/// Most voices a preset holds.
pub const MAX_VOICES: usize = u16::MAX as usize;
/// Initial controller value meaning "not set".
pub const CONTROLLER_OFF: u8 = 0xFF;

const PRESET_MARKER: [u8; 4] = *b"R#\0~";

/// A named patch made of voices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Preset {
    index: u16,
    name: String,
    transpose: i8,
    volume: i8,
    initial_controllers: [u8; 4],
    voices: Vec<Voice>,
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("")
    }
}

impl Preset {
    /// An empty preset. Its index is assigned when it is added to a bank.
    pub fn new(name: &str) -> Self {
        Self {
            index: AUTO_INDEX,
            name: name::normalize(name),
            transpose: 0,
            volume: 0,
            initial_controllers: [CONTROLLER_OFF; 4],
            voices: Vec::new(),
        }
    }

    /// A preset holding `voices`.
    ///
    /// Voices past [`MAX_VOICES`] are dropped.
    pub fn with_voices(name: &str, mut voices: Vec<Voice>) -> Self {
        voices.truncate(MAX_VOICES);
        Self {
            voices,
            ..Self::new(name)
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
    /// Transpose in semitones
    pub fn transpose(&self) -> i8 {
        self.transpose
    }
    /// Volume in dB
    pub fn volume(&self) -> i8 {
        self.volume
    }
    /// Initial MIDI controller values, [`CONTROLLER_OFF`] when unset
    pub fn initial_controllers(&self) -> &[u8; 4] {
        &self.initial_controllers
    }
    /// Initial MIDI controller values, for editing
    pub fn initial_controllers_mut(&mut self) -> &mut [u8; 4] {
        &mut self.initial_controllers
    }
    /// The voices, in stored order
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }
    /// A voice by position
    pub fn voice_mut(&mut self, position: usize) -> Option<&mut Voice> {
        self.voices.get_mut(position)
    }

    /// Set the bank index.
    ///
    /// [`AUTO_INDEX`] is kept as is, anything else is clamped below
    /// [`MAX_PRESETS`].
    pub fn set_index(&mut self, index: u16) {
        self.index = if index == AUTO_INDEX {
            index
        } else {
            index.min(MAX_PRESETS as u16 - 1)
        };
    }
    /// Set the name. It is padded or truncated to 16 characters.
    pub fn set_name(&mut self, name: &str) {
        self.name = name::normalize(name);
    }
    /// Set the transpose, clamped to `[-36, 36]`.
    pub fn set_transpose(&mut self, semitones: i8) {
        self.transpose = semitones.clamp(TRANSPOSE_RANGE.0, TRANSPOSE_RANGE.1);
    }
    /// Set the volume, clamped to `[-96, 10]` dB.
    pub fn set_volume(&mut self, db: i8) {
        self.volume = db.clamp(MIN_VOLUME, MAX_VOLUME);
    }

    /// Append a voice.
    pub fn add_voice(&mut self, voice: Voice) -> Result<(), BankError> {
        if self.voices.len() >= MAX_VOICES {
            return Err(BankError::Capacity {
                kind: EntityKind::Voice,
                limit: MAX_VOICES,
            });
        }
        self.voices.push(voice);
        Ok(())
    }

    /// Remove the voice at `position`.
    pub fn remove_voice(&mut self, position: usize) -> Option<Voice> {
        (position < self.voices.len()).then(|| self.voices.remove(position))
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let index = reader.read_u16::<BigEndian>()?;
        let name = name::name_from_bytes(&reader.read_exact_size::<NAME_LEN>()?);

        let data_size = reader.read_u16::<BigEndian>()?;
        if data_size != PRESET_DATA_SIZE {
            reader.set_position(reader.buffer_position() - 2)?;
            return Err(inv_data(reader, PresetError::DataSize(data_size)));
        }

        let voice_count = reader.read_u16::<BigEndian>()?;
        reader.skip(4)?;
        let transpose = reader.read_i8()?;
        let volume = reader.read_i8()?;
        // reserved run and the fixed marker
        reader.skip(28)?;
        let initial_controllers = reader.read_exact_size()?;
        reader.skip(24)?;

        let voices = (0..voice_count)
            .map(|_| Voice::read(reader))
            .collect::<ReadResult<_>>()?;

        Ok(Self {
            index,
            name,
            transpose,
            volume,
            initial_controllers,
            voices,
        })
    }

    pub(crate) fn write(&self, chunk: &mut Chunk) -> Result<(), EncodeError> {
        chunk.append_u16::<BigEndian>(self.index);
        chunk.append(&name::to_name_bytes(&self.name));
        chunk.append_u16::<BigEndian>(PRESET_DATA_SIZE);
        chunk.append_u16::<BigEndian>(self.voices.len() as u16);
        chunk.reserve_zeroed(4);
        chunk.append_i8(self.transpose);
        chunk.append_i8(self.volume);
        chunk.reserve_zeroed(24);
        chunk.append(&PRESET_MARKER);
        chunk.append(&self.initial_controllers);
        chunk.reserve_zeroed(24);

        for voice in &self.voices {
            voice.write(chunk)?;
        }
        Ok(())
    }
}

#[cfg(test)]
fn encode(preset: &Preset) -> Vec<u8> {
    use crate::file::chunk::ChunkName;
    let mut chunk = Chunk::new(ChunkName::E4P1);
    preset.write(&mut chunk).unwrap();
    chunk.payload().to_vec()
}

#[test]
fn header_layout() {
    let mut preset = Preset::new("Strings");
    preset.set_index(7);
    preset.set_volume(-3);
    preset.initial_controllers_mut()[1] = 64;

    let bytes = encode(&preset);
    assert_eq!(bytes.len(), PRESET_HEADER_SIZE);
    assert_eq!(&bytes[..2], &[0, 7]);
    assert_eq!(&bytes[2..18], b"Strings         ");
    assert_eq!(&bytes[18..22], &[0, 82, 0, 0]);
    assert_eq!(bytes[27], 0xfd);
    assert_eq!(&bytes[52..56], b"R#\0~");
    assert_eq!(&bytes[56..60], &[0xff, 64, 0xff, 0xff]);
}

#[test]
fn decodes_voices() {
    use pretty_assertions::assert_eq;

    let mut preset = Preset::with_voices(
        "Pad",
        vec![
            Voice::with_zone(SampleZone::default()),
            Voice::with_zone(SampleZone::new(1, crate::note::Note::from_byte(72))),
        ],
    );
    preset.set_index(2);
    preset.set_transpose(100);

    let bytes = encode(&preset);
    assert_eq!(bytes.len(), PRESET_HEADER_SIZE + 2 * (VOICE_HEAD_SIZE + ZONE_SIZE));

    let back = Preset::read(&mut Reader::from_byte_slice(&bytes)).unwrap();
    assert_eq!(back.index(), 2);
    assert_eq!(back.name(), "Pad             ");
    assert_eq!(back.transpose(), 36);
    assert_eq!(back.initial_controllers(), &[CONTROLLER_OFF; 4]);
    assert_eq!(back.voices().len(), 2);
    assert_eq!(back.voices()[1].zones()[0].sample_index(), 1);
}

#[test]
fn rejects_bad_data_size() {
    use crate::{ParseError, reader::ReaderErrorKind};

    let mut bytes = encode(&Preset::new("x"));
    bytes[19] = 81;
    let err = Preset::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert_eq!(err.position(), 18);
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::ParseError(ParseError::Preset(PresetError::DataSize(81)))
    ));
}

#[test]
fn index_clamps_but_keeps_auto() {
    let mut preset = Preset::default();
    assert_eq!(preset.index(), AUTO_INDEX);
    preset.set_index(5000);
    assert_eq!(preset.index(), MAX_PRESETS as u16 - 1);
    preset.set_index(AUTO_INDEX);
    assert_eq!(preset.index(), AUTO_INDEX);
}

#[test]
fn voice_editing() {
    let mut preset = Preset::new("Edit");
    preset.add_voice(Voice::default()).unwrap();
    preset.add_voice(Voice::default()).unwrap();
    preset.voice_mut(1).unwrap().set_volume(-10);
    assert_eq!(preset.remove_voice(1).map(|v| v.volume()), Some(-10));
    assert!(preset.remove_voice(1).is_none());
    assert_eq!(preset.voices().len(), 1);
}
