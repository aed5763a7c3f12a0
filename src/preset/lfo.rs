use crate::{
    file::chunk::Chunk,
    reader::{ReadResult, Reader},
    units,
};
use num_enum::{FromPrimitive, IntoPrimitive};

/// Size of one LFO record.
pub const LFO_SIZE: usize = 7;

/// LFO waveforms.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LfoShape {
    Triangle = 0,
    Sine = 1,
    Sawtooth = 2,
    Square = 3,
    Pulse33 = 4,
    Pulse25 = 5,
    Pulse16 = 6,
    Pulse12 = 7,
    Octaves = 8,
    FifthPlusOctave = 9,
    Sus4Trip = 10,
    Neener = 11,
    Sine12 = 12,
    Sine135 = 13,
    SineNoise = 14,
    HemiQuaver = 15,
    #[num_enum(catch_all)]
    Unknown(u8),
    Random = 255,
}

impl Default for LfoShape {
    fn default() -> Self {
        Self::Triangle
    }
}

#[doc = r#"
A low frequency oscillator.

On disk the LFO is seven bytes: rate, shape, delay, variation, an inverted
key-sync flag and two reserved bytes.
"#]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lfo {
    rate: f64,
    shape: LfoShape,
    delay: f64,
    variation: f32,
    key_sync: bool,
}

impl Default for Lfo {
    fn default() -> Self {
        Self {
            rate: units::MIN_LFO_RATE,
            shape: LfoShape::Triangle,
            delay: 0.0,
            variation: 0.0,
            key_sync: false,
        }
    }
}

impl Lfo {
    /// Create an LFO, clamping every value to its range.
    pub fn new(rate: f64, shape: LfoShape, delay: f64, variation: f32, key_sync: bool) -> Self {
        let mut lfo = Self {
            shape,
            key_sync,
            ..Default::default()
        };
        lfo.set_rate(rate);
        lfo.set_delay(delay);
        lfo.set_variation(variation);
        lfo
    }

    /// Rate in hertz
    pub fn rate(&self) -> f64 {
        self.rate
    }
    /// Waveform
    pub fn shape(&self) -> LfoShape {
        self.shape
    }
    /// Delay in seconds
    pub fn delay(&self) -> f64 {
        self.delay
    }
    /// Variation in percent
    pub fn variation(&self) -> f32 {
        self.variation
    }
    /// True if the LFO restarts on every key
    pub fn is_key_sync(&self) -> bool {
        self.key_sync
    }

    /// Set the rate, clamped to `[0.06, 18.01]` hertz.
    ///
    /// The floor is the rate stored as byte 0, below the panel's 0.08.
    pub fn set_rate(&mut self, hertz: f64) {
        self.rate = hertz.clamp(units::LFO_RATE_FLOOR, units::MAX_LFO_RATE);
    }
    /// Set the waveform
    pub fn set_shape(&mut self, shape: LfoShape) {
        self.shape = shape;
    }
    /// Set the delay, clamped to `[0, 21.694]` seconds.
    pub fn set_delay(&mut self, seconds: f64) {
        self.delay = seconds.clamp(0.0, units::MAX_LFO_DELAY);
    }
    /// Set the variation, clamped to `[0, 100]` percent.
    pub fn set_variation(&mut self, percent: f32) {
        self.variation = percent.clamp(0.0, 100.0);
    }
    /// Set key sync
    pub fn set_key_sync(&mut self, key_sync: bool) {
        self.key_sync = key_sync;
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let rate = units::lfo_rate_from_byte(reader.read_u8()?);
        let shape = LfoShape::from(reader.read_u8()?);
        let delay = units::lfo_delay_from_byte(reader.read_u8()?);
        let variation = units::percent_from_byte(reader.read_u8()?);
        // stored inverted
        let key_sync = !reader.read_bool()?;
        reader.skip(2)?;
        Ok(Self {
            rate,
            shape,
            delay,
            variation,
            key_sync,
        })
    }

    pub(crate) fn write(&self, chunk: &mut Chunk) {
        chunk.append_u8(units::byte_from_lfo_rate(self.rate));
        chunk.append_u8(self.shape.into());
        chunk.append_u8(units::byte_from_lfo_delay(self.delay));
        chunk.append_u8(units::byte_from_percent(self.variation));
        chunk.append_bool(!self.key_sync);
        chunk.reserve_zeroed(2);
    }
}

#[test]
fn key_sync_is_inverted_on_disk() {
    use crate::file::chunk::ChunkName;

    let lfo = Lfo::new(5.79, LfoShape::Sine, 0.0, 0.0, true);
    let mut chunk = Chunk::new(ChunkName::E4P1);
    lfo.write(&mut chunk);

    let bytes = chunk.payload();
    assert_eq!(bytes.len(), LFO_SIZE);
    assert_eq!(bytes[1], 1);
    assert_eq!(bytes[4], 0);

    let back = Lfo::read(&mut Reader::from_byte_slice(bytes)).unwrap();
    assert!(back.is_key_sync());
    assert_eq!(back.shape(), LfoShape::Sine);
    assert_eq!(units::byte_from_lfo_rate(back.rate()), bytes[0]);
}

#[test]
fn random_shape_code() {
    assert_eq!(LfoShape::from(255), LfoShape::Random);
    assert_eq!(LfoShape::from(16), LfoShape::Unknown(16));
    assert_eq!(u8::from(LfoShape::Random), 255);
    assert_eq!(u8::from(LfoShape::Unknown(200)), 200);
    assert_eq!(LfoShape::default(), LfoShape::Triangle);
}

#[test]
fn setter_keeps_every_stored_rate() {
    for byte in 0..=units::MAX_LFO_BYTE {
        let decoded = units::lfo_rate_from_byte(byte);
        let lfo = Lfo::new(decoded, LfoShape::Triangle, 0.0, 0.0, false);
        let expected = if decoded > units::MAX_LFO_RATE {
            units::byte_from_lfo_rate(units::MAX_LFO_RATE)
        } else {
            byte
        };
        assert_eq!(units::byte_from_lfo_rate(lfo.rate()), expected);
    }
}
