#![doc = r#"
Modulation routings ("patch cords").

Polarity suffixes follow the front panel: `Pos` is unipolar positive (`+`),
`Center` is bipolar (`~`) and `Less` is unipolar negative (`<`).

Codes that are not listed here decode to `Unknown(code)` and are written back
unchanged.
"#]

use crate::{
    file::chunk::Chunk,
    reader::{ReadResult, Reader},
    units,
};
use num_enum::{FromPrimitive, IntoPrimitive};

/// Size of one cord record.
pub const CORD_SIZE: usize = 4;

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CordSource {
    Off = 0,
    XfadeRandom = 4,
    KeyPos = 8,
    KeyCenter = 9,
    VelocityPos = 10,
    VelocityCenter = 11,
    VelocityLess = 12,
    ReleaseVelocity = 13,
    Gate = 14,
    PitchWheel = 16,
    ModWheel = 17,
    Pressure = 18,
    Pedal = 19,
    MidiA = 20,
    MidiB = 21,
    Footswitch1 = 22,
    Footswitch2 = 23,
    Footswitch1FlipFlop = 24,
    Footswitch2FlipFlop = 25,
    MidiVolume = 26,
    MidiPan = 27,
    Expression = 28,
    MidiC = 32,
    MidiD = 33,
    MidiE = 34,
    MidiF = 35,
    MidiG = 36,
    MidiH = 37,
    ThresholdSwitch = 38,
    ThresholdSwitchFlipFlop = 39,
    MidiI = 40,
    MidiJ = 41,
    MidiK = 42,
    MidiL = 43,
    MidiM = 44,
    MidiN = 45,
    MidiO = 46,
    MidiP = 47,
    KeyGlide = 48,
    KeyCcWindow = 49,
    AmpEnvPos = 72,
    AmpEnvCenter = 73,
    AmpEnvLess = 74,
    FilterEnvPos = 80,
    FilterEnvCenter = 81,
    FilterEnvLess = 82,
    AuxEnvPos = 88,
    AuxEnvCenter = 89,
    AuxEnvLess = 90,
    Lfo1Center = 96,
    Lfo1Pos = 97,
    WhiteNoise = 98,
    PinkNoise = 99,
    KeyRandom1 = 100,
    KeyRandom2 = 101,
    Lfo2Center = 104,
    Lfo2Pos = 105,
    Lag1In = 106,
    Lag1 = 107,
    Lag2In = 108,
    Lag2 = 109,
    ChannelLag1 = 128,
    ChannelRamp = 129,
    ChannelLag2 = 130,
    PolyKeyTimer = 131,
    Clock2xWholeNote = 144,
    ClockWholeNote = 145,
    ClockHalfNote = 146,
    ClockQuarterNote = 147,
    Clock8thNote = 148,
    Clock16thNote = 149,
    Clock4xWholeNote = 150,
    Clock8xWholeNote = 151,
    DcOffset = 160,
    SummingAmp = 161,
    Switch = 162,
    AbsoluteValue = 163,
    Diode = 164,
    FlipFlop = 165,
    Quantizer = 166,
    Gain4x = 167,
    FuncGen1Pos = 208,
    FuncGen1Center = 209,
    FuncGen1Less = 210,
    FuncGen1Trigger = 211,
    FuncGen1Gate = 212,
    FuncGen2Pos = 213,
    FuncGen2Center = 214,
    FuncGen2Less = 215,
    FuncGen2Trigger = 216,
    FuncGen2Gate = 217,
    FuncGen3Pos = 218,
    FuncGen3Center = 219,
    FuncGen3Less = 220,
    FuncGen3Trigger = 221,
    FuncGen3Gate = 222,
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl Default for CordSource {
    fn default() -> Self {
        Self::Off
    }
}

#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CordDestination {
    Off = 0,
    KeySustain = 8,
    LoopSelectContinuous = 16,
    LoopSelectJump = 17,
    FinePitch = 47,
    Pitch = 48,
    GlideRate = 49,
    ChorusAmount = 50,
    ChorusInitial = 51,
    SampleStart = 52,
    SampleLoop = 53,
    SampleRetriggerNeg = 54,
    OscSpeed = 55,
    FilterFreq = 56,
    FilterRes = 57,
    RealtimeRes = 58,
    SampleRetriggerPos = 59,
    AmpVolume = 64,
    AmpPan = 65,
    AmpCrossfade = 66,
    SendMain = 68,
    SendAux1 = 69,
    SendAux2 = 70,
    SendAux3 = 71,
    AmpEnvRates = 72,
    AmpEnvAttack = 73,
    AmpEnvDecay = 74,
    AmpEnvRelease = 75,
    AmpEnvSustain = 76,
    FilterEnvRates = 80,
    FilterEnvAttack = 81,
    FilterEnvDecay = 82,
    FilterEnvRelease = 83,
    FilterEnvSustain = 84,
    FilterEnvTrigger = 86,
    AuxEnvRates = 88,
    AuxEnvAttack = 89,
    AuxEnvDecay = 90,
    AuxEnvRelease = 91,
    AuxEnvSustain = 92,
    AuxEnvTrigger = 94,
    Lfo1Freq = 96,
    Lfo1Trigger = 97,
    Lfo2Freq = 104,
    Lfo2Trigger = 105,
    Lag1In = 106,
    Lag2In = 108,
    Lag1Rate = 109,
    Lag2Rate = 110,
    FuncGen1Rate = 112,
    FuncGen1Retrigger = 113,
    FuncGen1Length = 114,
    FuncGen1Direction = 115,
    FuncGen2Rate = 117,
    FuncGen2Retrigger = 118,
    FuncGen2Length = 119,
    FuncGen2Direction = 120,
    FuncGen3Rate = 122,
    FuncGen3Retrigger = 123,
    FuncGen3Length = 124,
    FuncGen3Direction = 125,
    KeyTimerRate = 132,
    WetDryMix = 144,
    SummingAmp = 161,
    Switch = 162,
    AbsoluteValue = 163,
    Diode = 164,
    Quantizer = 165,
    FlipFlop = 166,
    Gain4x = 167,
    Cord1Amount = 168,
    Cord2Amount = 169,
    Cord3Amount = 170,
    Cord4Amount = 171,
    Cord5Amount = 172,
    Cord6Amount = 173,
    Cord7Amount = 174,
    Cord8Amount = 175,
    Cord9Amount = 176,
    Cord10Amount = 177,
    Cord11Amount = 178,
    Cord12Amount = 179,
    Cord13Amount = 180,
    Cord14Amount = 181,
    Cord15Amount = 182,
    Cord16Amount = 183,
    Cord17Amount = 184,
    Cord18Amount = 185,
    Cord19Amount = 186,
    Cord20Amount = 187,
    Cord21Amount = 188,
    Cord22Amount = 189,
    Cord23Amount = 190,
    Cord24Amount = 191,
    Cord25Amount = 192,
    Cord26Amount = 193,
    Cord27Amount = 194,
    Cord28Amount = 195,
    Cord29Amount = 196,
    Cord30Amount = 197,
    Cord31Amount = 198,
    Cord32Amount = 199,
    Cord33Amount = 200,
    Cord34Amount = 201,
    Cord35Amount = 202,
    Cord36Amount = 203,
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl Default for CordDestination {
    fn default() -> Self {
        Self::Off
    }
}

#[doc = r#"
A single modulation routing from a source to a destination.

The amount is a percentage in `[-100, 100]`, stored as a signed byte scaled by
`127/100`.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cord {
    source: CordSource,
    destination: CordDestination,
    amount: f32,
}

impl Cord {
    /// Create a cord. The amount is clamped to `[-100, 100]`.
    pub fn new(source: CordSource, destination: CordDestination, amount: f32) -> Self {
        Self {
            source,
            destination,
            amount: amount.clamp(-100.0, 100.0),
        }
    }

    /// A cord with both ends switched off
    pub fn off() -> Self {
        Self::default()
    }

    /// True if both ends are switched off.
    pub fn is_off(&self) -> bool {
        self.source == CordSource::Off && self.destination == CordDestination::Off
    }

    /// Modulation source
    pub fn source(&self) -> CordSource {
        self.source
    }

    /// Modulation destination
    pub fn destination(&self) -> CordDestination {
        self.destination
    }

    /// Amount, in percent
    pub fn amount(&self) -> f32 {
        self.amount
    }

    /// Set the source
    pub fn set_source(&mut self, source: CordSource) {
        self.source = source;
    }

    /// Set the destination
    pub fn set_destination(&mut self, destination: CordDestination) {
        self.destination = destination;
    }

    /// Set the amount, clamped to `[-100, 100]`.
    pub fn set_amount(&mut self, amount: f32) {
        self.amount = amount.clamp(-100.0, 100.0);
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let source = CordSource::from(reader.read_u8()?);
        let destination = CordDestination::from(reader.read_u8()?);
        let amount = units::percent_from_signed_byte(reader.read_i8()?);
        reader.skip(1)?;
        Ok(Self {
            source,
            destination,
            amount,
        })
    }

    pub(crate) fn write(&self, chunk: &mut Chunk) {
        chunk.append_u8(self.source.into());
        chunk.append_u8(self.destination.into());
        chunk.append_i8(units::signed_byte_from_percent(self.amount));
        chunk.reserve_zeroed(1);
    }
}

#[test]
fn unknown_codes_survive() {
    assert_eq!(CordSource::from(3), CordSource::Unknown(3));
    assert_eq!(u8::from(CordSource::Unknown(3)), 3);
    assert_eq!(CordSource::default(), CordSource::Off);
    assert_eq!(u8::from(CordDestination::default()), 0);
    assert_eq!(CordDestination::from(56), CordDestination::FilterFreq);
    assert_eq!(u8::from(CordDestination::Cord3Amount), 170);
}

#[test]
fn cord_record() {
    use crate::file::chunk::ChunkName;

    let cord = Cord::new(CordSource::ModWheel, CordDestination::Cord3Amount, 6.0);
    let mut chunk = Chunk::new(ChunkName::E4P1);
    cord.write(&mut chunk);
    assert_eq!(chunk.payload(), &[17, 170, 8, 0]);

    let mut reader = Reader::from_byte_slice(chunk.payload());
    let back = Cord::read(&mut reader).unwrap();
    assert_eq!(back.source(), CordSource::ModWheel);
    assert_eq!(back.destination(), CordDestination::Cord3Amount);
    assert_eq!(units::signed_byte_from_percent(back.amount()), 8);
    assert!(Cord::off().is_off());
}
