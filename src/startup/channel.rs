use crate::{
    file::chunk::Chunk,
    reader::{ReadResult, Reader},
};
use byteorder::BigEndian;

/// Size of one channel record.
pub const CHANNEL_SETTINGS_SIZE: usize = 32;
/// Number of controller values per channel.
pub const CHANNEL_CONTROLLERS: usize = 16;
/// Stored preset number meaning "no preset".
pub const NO_PRESET: u16 = u16::MAX;

const MAX_VALUE: u8 = 127;
const AUX_ON: u8 = 255;
const DEFAULT_OPAQUE: [u8; 8] = [0, 0, 0, 0, 127, 0, 0, 0];

#[doc = r#"
Power-up settings of one MIDI channel.

```text
volume pan reserved(3) aux controllers(16) opaque(8) preset(u16)
```

The eight bytes after the controllers have no known meaning. They are kept
as decoded and written back unchanged.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiChannelSettings {
    volume: u8,
    pan: i8,
    aux: bool,
    controllers: [u8; CHANNEL_CONTROLLERS],
    opaque: [u8; 8],
    preset: Option<u16>,
}

impl Default for MidiChannelSettings {
    fn default() -> Self {
        Self {
            volume: MAX_VALUE,
            pan: 0,
            aux: true,
            controllers: [0; CHANNEL_CONTROLLERS],
            opaque: DEFAULT_OPAQUE,
            preset: None,
        }
    }
}

impl MidiChannelSettings {
    /// Volume, `[0, 127]`
    pub fn volume(&self) -> u8 {
        self.volume
    }
    /// Pan, `[-64, 63]`
    pub fn pan(&self) -> i8 {
        self.pan
    }
    /// True if the aux send is on
    pub fn is_aux_on(&self) -> bool {
        self.aux
    }
    /// Controller values
    pub fn controllers(&self) -> &[u8; CHANNEL_CONTROLLERS] {
        &self.controllers
    }
    /// The eight unknown bytes
    pub fn opaque(&self) -> &[u8; 8] {
        &self.opaque
    }
    /// Preset index played on this channel
    pub fn preset(&self) -> Option<u16> {
        self.preset
    }

    /// Set the volume, clamped to `[0, 127]`.
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(MAX_VALUE);
    }
    /// Set the pan, clamped to `[-64, 63]`.
    pub fn set_pan(&mut self, pan: i8) {
        self.pan = pan.clamp(-64, 63);
    }
    /// Switch the aux send
    pub fn set_aux(&mut self, on: bool) {
        self.aux = on;
    }
    /// Set one controller value, clamped to `[0, 127]`.
    ///
    /// Returns `false` if `slot` is out of range.
    pub fn set_controller(&mut self, slot: usize, value: u8) -> bool {
        match self.controllers.get_mut(slot) {
            Some(controller) => {
                *controller = value.min(MAX_VALUE);
                true
            }
            None => false,
        }
    }
    /// Set the preset index, `None` for no preset.
    pub fn set_preset(&mut self, preset: Option<u16>) {
        self.preset = preset.filter(|&index| index != NO_PRESET);
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let volume = reader.read_u8()?;
        let pan = reader.read_i8()?;
        reader.skip(3)?;
        let aux = reader.read_u8()? != 0;
        let controllers = reader.read_exact_size()?;
        let opaque = reader.read_exact_size()?;
        let preset = match reader.read_u16::<BigEndian>()? {
            NO_PRESET => None,
            index => Some(index),
        };
        Ok(Self {
            volume,
            pan,
            aux,
            controllers,
            opaque,
            preset,
        })
    }

    pub(crate) fn write(&self, chunk: &mut Chunk) {
        chunk.append_u8(self.volume);
        chunk.append_i8(self.pan);
        chunk.reserve_zeroed(3);
        chunk.append_u8(if self.aux { AUX_ON } else { 0 });
        chunk.append(&self.controllers);
        chunk.append(&self.opaque);
        chunk.append_u16::<BigEndian>(self.preset.unwrap_or(NO_PRESET));
    }
}

#[test]
fn default_channel_record() {
    use crate::file::chunk::ChunkName;

    let mut chunk = Chunk::new(ChunkName::EMST);
    MidiChannelSettings::default().write(&mut chunk);
    let bytes = chunk.payload();
    assert_eq!(bytes.len(), CHANNEL_SETTINGS_SIZE);
    assert_eq!(&bytes[..6], &[127, 0, 0, 0, 0, 255]);
    assert_eq!(&bytes[22..30], &DEFAULT_OPAQUE);
    assert_eq!(&bytes[30..], &[0xff, 0xff]);
}

#[test]
fn channel_settings_survive() {
    use crate::file::chunk::ChunkName;

    let mut settings = MidiChannelSettings::default();
    settings.set_volume(200);
    settings.set_pan(-100);
    settings.set_aux(false);
    assert!(settings.set_controller(15, 99));
    assert!(!settings.set_controller(16, 1));
    settings.set_preset(Some(12));

    let mut chunk = Chunk::new(ChunkName::EMST);
    settings.write(&mut chunk);
    let back = MidiChannelSettings::read(&mut Reader::from_byte_slice(chunk.payload())).unwrap();
    assert_eq!(back, settings);
    assert_eq!(back.volume(), 127);
    assert_eq!(back.pan(), -64);
    assert_eq!(back.controllers()[15], 99);

    settings.set_preset(Some(NO_PRESET));
    assert_eq!(settings.preset(), None);
}
