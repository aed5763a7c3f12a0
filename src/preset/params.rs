//! Closed sets of voice parameters.
//!
//! Each enum stores as one byte. Unlisted codes decode to `Unknown(code)`.

use num_enum::{FromPrimitive, IntoPrimitive};

/// Filter and effect types.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum FilterType {
    FourPoleLowpass = 0,
    TwoPoleLowpass = 1,
    SixPoleLowpass = 2,
    TwoPoleHighpass = 8,
    FourPoleHighpass = 9,
    ContraryBandpass = 18,
    SweptEq1Octave = 32,
    SweptEq2To1Octave = 33,
    SweptEq3To1Octave = 34,
    Phaser1 = 64,
    Phaser2 = 65,
    BatPhaser = 66,
    FlangerLite = 72,
    VocalAhAyEe = 80,
    VocalOoAh = 81,
    DualEqMorph = 96,
    DualEqLpMorph = 97,
    DualEqMorphExpression = 98,
    PeakShelfMorph = 104,
    MorphDesigner = 108,
    NoFilter = 127,
    AceOfBass = 131,
    MegaSweepz = 132,
    EarlyRizer = 133,
    Millennium = 134,
    MeatyGizmo = 135,
    KlubKlassik = 136,
    BassBox303 = 137,
    FuzziFace = 138,
    DeadRinger = 139,
    TbOrNotTb = 140,
    OohToEee = 141,
    BolandBass = 142,
    MultiQVox = 143,
    TalkingHedz = 144,
    ZoomPeaks = 145,
    DjAlkaline = 146,
    BassTracer = 147,
    RogueHertz = 148,
    RazorBlades = 149,
    RadioCraze = 150,
    EehToAah = 151,
    UbuOrator = 152,
    DeepBouche = 153,
    FreakShifta = 154,
    CruzPusher = 155,
    AngelzHairz = 156,
    DreamWeava = 157,
    AcidRavage = 158,
    BassOMatic = 159,
    LucifersQ = 160,
    ToothComb = 161,
    EarBender = 162,
    KlangKling = 163,
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl Default for FilterType {
    fn default() -> Self {
        Self::NoFilter
    }
}

/// Glide curves, from linear to logarithmic.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum GlideCurve {
    Linear = 0,
    LogLinear1 = 1,
    LogLinear2 = 2,
    LogLinear3 = 3,
    LogLinear4 = 4,
    LogLinear5 = 5,
    LogLinear6 = 6,
    LogLinear7 = 7,
    Logarithmic = 8,
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl Default for GlideCurve {
    fn default() -> Self {
        Self::Linear
    }
}

/// Polyphony groups a voice can be assigned to.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AssignGroup {
    PolyAll = 0,
    Poly16A = 1,
    Poly16B = 2,
    Poly8A = 3,
    Poly8B = 4,
    Poly8C = 5,
    Poly8D = 6,
    Poly4A = 7,
    Poly4B = 8,
    Poly4C = 9,
    Poly4D = 10,
    Poly2A = 11,
    Poly2B = 12,
    Poly2C = 13,
    Poly2D = 14,
    MonoA = 15,
    MonoB = 16,
    MonoC = 17,
    MonoD = 18,
    MonoE = 19,
    MonoF = 20,
    MonoG = 21,
    MonoH = 22,
    MonoI = 23,
    PolyKey8A = 24,
    PolyKey8B = 25,
    PolyKey8C = 26,
    PolyKey8D = 27,
    PolyKey6A = 28,
    PolyKey6B = 29,
    PolyKey6C = 30,
    PolyKey6D = 31,
    PolyKey5A = 32,
    PolyKey5B = 33,
    PolyKey5C = 34,
    PolyKey5D = 35,
    PolyKey4A = 36,
    PolyKey4B = 37,
    PolyKey4C = 38,
    PolyKey4D = 39,
    PolyKey3A = 40,
    PolyKey3B = 41,
    PolyKey3C = 42,
    PolyKey3D = 43,
    PolyKey2A = 44,
    PolyKey2B = 45,
    PolyKey2C = 46,
    PolyKey2D = 47,
    PolyKey1A = 48,
    PolyKey1B = 49,
    PolyKey1C = 50,
    PolyKey1D = 51,
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl Default for AssignGroup {
    fn default() -> Self {
        Self::PolyAll
    }
}

/// How a voice responds to overlapping and released keys.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum KeyMode {
    PolyNormal = 0,
    SoloMultiTrigger = 1,
    SoloMelodyLast = 2,
    SoloMelodyLow = 3,
    SoloMelodyHigh = 4,
    SoloSynthLast = 5,
    SoloSynthLow = 6,
    SoloSynthHigh = 7,
    SoloFingeredGlide = 8,
    PolyReleaseTriggerReleaseVelocity = 9,
    PolyReleaseTriggerNoteVelocity = 10,
    SoloReleaseTriggerReleaseVelocity = 11,
    SoloReleaseTriggerNoteVelocity = 12,
    PolyReleaseTriggerReleaseVelocity2 = 13,
    PolyReleaseTriggerNoteVelocity2 = 14,
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl Default for KeyMode {
    fn default() -> Self {
        Self::PolyNormal
    }
}

#[test]
fn filter_codes_are_not_contiguous() {
    assert_eq!(u8::from(FilterType::TwoPoleLowpass), 1);
    assert_eq!(u8::from(FilterType::FourPoleLowpass), 0);
    assert_eq!(FilterType::from(127), FilterType::NoFilter);
    assert_eq!(FilterType::from(3), FilterType::Unknown(3));
    assert_eq!(FilterType::default(), FilterType::NoFilter);
}

#[test]
fn last_assign_group_and_key_mode() {
    assert_eq!(AssignGroup::from(51), AssignGroup::PolyKey1D);
    assert_eq!(AssignGroup::from(52), AssignGroup::Unknown(52));
    assert_eq!(KeyMode::from(14), KeyMode::PolyReleaseTriggerNoteVelocity2);
    assert_eq!(GlideCurve::from(8), GlideCurve::Logarithmic);
    assert_eq!(AssignGroup::default(), AssignGroup::PolyAll);
    assert_eq!(KeyMode::default(), KeyMode::PolyNormal);
    assert_eq!(GlideCurve::default(), GlideCurve::Linear);
}
