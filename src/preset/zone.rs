use crate::{
    file::chunk::Chunk,
    note::Note,
    reader::{ReadResult, Reader},
    units,
};
use byteorder::BigEndian;

/// Size of one zone record.
pub const ZONE_SIZE: usize = 22;
/// Highest value a note range byte accepts.
pub const MAX_RANGE_BYTE: u8 = 127;

/// Quietest volume, in dB.
pub const MIN_VOLUME: i8 = -96;
/// Loudest volume, in dB.
pub const MAX_VOLUME: i8 = 10;
/// Hard left.
pub const MIN_PAN: i8 = -64;
/// Hard right.
pub const MAX_PAN: i8 = 63;

#[doc = r#"
A key, velocity or realtime span: low, low fade, high fade and high.

Every value is clamped to `[0, 127]`. `low <= high` is expected but not
enforced.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteRange {
    low: u8,
    low_fade: u8,
    high_fade: u8,
    high: u8,
}

impl Default for NoteRange {
    /// The full range, without fades.
    fn default() -> Self {
        Self::new(0, MAX_RANGE_BYTE)
    }
}

impl NoteRange {
    /// A range without fades
    pub const fn new(low: u8, high: u8) -> Self {
        Self::with_fades(low, 0, 0, high)
    }

    /// A range with fades
    pub const fn with_fades(low: u8, low_fade: u8, high_fade: u8, high: u8) -> Self {
        Self {
            low: clamp_range_byte(low),
            low_fade: clamp_range_byte(low_fade),
            high_fade: clamp_range_byte(high_fade),
            high: clamp_range_byte(high),
        }
    }

    /// Lowest value
    pub const fn low(&self) -> u8 {
        self.low
    }
    /// Low fade width
    pub const fn low_fade(&self) -> u8 {
        self.low_fade
    }
    /// High fade width
    pub const fn high_fade(&self) -> u8 {
        self.high_fade
    }
    /// Highest value
    pub const fn high(&self) -> u8 {
        self.high
    }

    /// Set the low end
    pub fn set_low(&mut self, value: u8) {
        self.low = clamp_range_byte(value);
    }
    /// Set the low fade
    pub fn set_low_fade(&mut self, value: u8) {
        self.low_fade = clamp_range_byte(value);
    }
    /// Set the high fade
    pub fn set_high_fade(&mut self, value: u8) {
        self.high_fade = clamp_range_byte(value);
    }
    /// Set the high end
    pub fn set_high(&mut self, value: u8) {
        self.high = clamp_range_byte(value);
    }

    /// Stored bytes are taken verbatim.
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let [low, low_fade, high_fade, high] = reader.read_exact_size()?;
        Ok(Self {
            low,
            low_fade,
            high_fade,
            high,
        })
    }

    pub(crate) fn write(&self, chunk: &mut Chunk) {
        chunk.append(&[self.low, self.low_fade, self.high_fade, self.high]);
    }
}

const fn clamp_range_byte(value: u8) -> u8 {
    if value > MAX_RANGE_BYTE {
        MAX_RANGE_BYTE
    } else {
        value
    }
}

#[doc = r#"
Maps a key and velocity span of a voice onto one sample.

```text
key(4) vel(4) sample(u16) reserved(1) fine(i8) original key(1)
volume(i8) pan(i8) reserved(7)
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleZone {
    key_range: NoteRange,
    velocity_range: NoteRange,
    sample_index: u16,
    fine_tune: f64,
    original_key: Note,
    volume: i8,
    pan: i8,
}

impl SampleZone {
    /// A full range zone playing `sample_index` at its `original_key`.
    pub fn new(sample_index: u16, original_key: Note) -> Self {
        Self {
            sample_index,
            original_key,
            ..Default::default()
        }
    }

    /// Key span
    pub fn key_range(&self) -> &NoteRange {
        &self.key_range
    }
    /// Key span, for editing
    pub fn key_range_mut(&mut self) -> &mut NoteRange {
        &mut self.key_range
    }
    /// Velocity span
    pub fn velocity_range(&self) -> &NoteRange {
        &self.velocity_range
    }
    /// Velocity span, for editing
    pub fn velocity_range_mut(&mut self) -> &mut NoteRange {
        &mut self.velocity_range
    }
    /// Index of the sample this zone plays
    pub fn sample_index(&self) -> u16 {
        self.sample_index
    }
    /// Fine tune in cents
    pub fn fine_tune(&self) -> f64 {
        self.fine_tune
    }
    /// The key at which the sample plays unshifted
    pub fn original_key(&self) -> Note {
        self.original_key
    }
    /// Volume in dB
    pub fn volume(&self) -> i8 {
        self.volume
    }
    /// Pan position
    pub fn pan(&self) -> i8 {
        self.pan
    }

    /// Set the sample index
    pub fn set_sample_index(&mut self, index: u16) {
        self.sample_index = index;
    }
    /// Set the fine tune, clamped to `[-100, 100]` cents.
    pub fn set_fine_tune(&mut self, cents: f64) {
        self.fine_tune = cents.clamp(-100.0, 100.0);
    }
    /// Set the original key
    pub fn set_original_key(&mut self, key: Note) {
        self.original_key = key;
    }
    /// Set the volume, clamped to `[-96, 10]` dB.
    pub fn set_volume(&mut self, db: i8) {
        self.volume = db.clamp(MIN_VOLUME, MAX_VOLUME);
    }
    /// Set the pan, clamped to `[-64, 63]`.
    pub fn set_pan(&mut self, pan: i8) {
        self.pan = pan.clamp(MIN_PAN, MAX_PAN);
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let key_range = NoteRange::read(reader)?;
        let velocity_range = NoteRange::read(reader)?;
        let sample_index = reader.read_u16::<BigEndian>()?;
        reader.skip(1)?;
        let fine_tune = units::fine_tune_from_byte(reader.read_i8()?);
        let original_key = Note::from_byte(reader.read_u8()?);
        let volume = reader.read_i8()?;
        let pan = reader.read_i8()?;
        reader.skip(7)?;
        Ok(Self {
            key_range,
            velocity_range,
            sample_index,
            fine_tune,
            original_key,
            volume,
            pan,
        })
    }

    pub(crate) fn write(&self, chunk: &mut Chunk) {
        self.key_range.write(chunk);
        self.velocity_range.write(chunk);
        chunk.append_u16::<BigEndian>(self.sample_index);
        chunk.reserve_zeroed(1);
        chunk.append_i8(units::byte_from_fine_tune(self.fine_tune));
        chunk.append_u8(self.original_key.byte());
        chunk.append_i8(self.volume);
        chunk.append_i8(self.pan);
        chunk.reserve_zeroed(7);
    }
}

#[test]
fn zone_layout() {
    use crate::file::chunk::ChunkName;
    use pretty_assertions::assert_eq;

    let mut zone = SampleZone::new(0x0102, Note::default());
    zone.key_range_mut().set_low(36);
    zone.set_volume(-120);
    zone.set_pan(5);
    zone.set_fine_tune(-1.5625);

    let mut chunk = Chunk::new(ChunkName::E4P1);
    zone.write(&mut chunk);
    assert_eq!(
        chunk.payload(),
        &[
            36, 0, 0, 127, 0, 0, 0, 127, 1, 2, 0, 0xff, 60, 0xa0, 5, 0, 0, 0, 0, 0, 0, 0
        ]
    );

    let back = SampleZone::read(&mut Reader::from_byte_slice(chunk.payload())).unwrap();
    assert_eq!(back.volume(), MIN_VOLUME);
    assert_eq!(back.fine_tune(), -1.56);
    assert_eq!(back.original_key(), Note::default());
    assert_eq!(back.key_range().low(), 36);
}

#[test]
fn range_clamps() {
    let mut range = NoteRange::with_fades(0, 200, 3, 255);
    assert_eq!(range.low_fade(), 127);
    assert_eq!(range.high(), 127);
    range.set_high(64);
    assert_eq!(range.high(), 64);
}
