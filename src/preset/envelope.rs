use crate::{
    file::chunk::Chunk,
    reader::{ReadResult, Reader},
};

/// Size of one envelope record.
pub const ENVELOPE_SIZE: usize = 12;

/// Level of a segment that has fully opened.
pub const FULL_LEVEL: i8 = 127;

/// One (time, level) pair of an [`Envelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvelopeSegment {
    /// Segment time, as stored
    pub time: u8,
    /// Target level, as stored
    pub level: i8,
}

impl EnvelopeSegment {
    /// Create a segment
    pub const fn new(time: u8, level: i8) -> Self {
        Self { time, level }
    }
}

#[doc = r#"
A six segment envelope, stored as twelve bytes.

Either attack segment may act as the attack: when the first attack reaches
full level it is the attack, otherwise the second one is (see
[`Envelope::effective_attack`]). The first decay is the hold, the second decay
sets the sustain level and the first release is the release.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    /// First attack segment
    pub attack1: EnvelopeSegment,
    /// Second attack segment
    pub attack2: EnvelopeSegment,
    /// Hold
    pub decay1: EnvelopeSegment,
    /// Decay and sustain
    pub decay2: EnvelopeSegment,
    /// Release
    pub release1: EnvelopeSegment,
    /// Second release segment
    pub release2: EnvelopeSegment,
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            attack1: EnvelopeSegment::new(0, 0),
            attack2: EnvelopeSegment::new(0, FULL_LEVEL),
            decay1: EnvelopeSegment::new(0, FULL_LEVEL),
            decay2: EnvelopeSegment::new(0, FULL_LEVEL),
            release1: EnvelopeSegment::new(0, 0),
            release2: EnvelopeSegment::new(0, 0),
        }
    }
}

impl Envelope {
    /// The segment acting as the attack.
    pub fn effective_attack(&self) -> EnvelopeSegment {
        if self.attack1.level >= FULL_LEVEL {
            self.attack1
        } else {
            self.attack2
        }
    }

    fn segments(&self) -> [EnvelopeSegment; 6] {
        [
            self.attack1,
            self.attack2,
            self.decay1,
            self.decay2,
            self.release1,
            self.release2,
        ]
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let mut segment = || -> ReadResult<EnvelopeSegment> {
            Ok(EnvelopeSegment::new(reader.read_u8()?, reader.read_i8()?))
        };
        Ok(Self {
            attack1: segment()?,
            attack2: segment()?,
            decay1: segment()?,
            decay2: segment()?,
            release1: segment()?,
            release2: segment()?,
        })
    }

    pub(crate) fn write(&self, chunk: &mut Chunk) {
        for segment in self.segments() {
            chunk.append_u8(segment.time);
            chunk.append_i8(segment.level);
        }
    }
}

#[test]
fn attack_selection() {
    let mut env = Envelope::default();
    assert_eq!(env.effective_attack(), env.attack2);

    env.attack1 = EnvelopeSegment::new(12, FULL_LEVEL);
    assert_eq!(env.effective_attack(), EnvelopeSegment::new(12, FULL_LEVEL));
}

#[test]
fn twelve_bytes_in_order() {
    use crate::file::chunk::ChunkName;

    let env = Envelope {
        release2: EnvelopeSegment::new(9, -3),
        ..Default::default()
    };
    let mut chunk = Chunk::new(ChunkName::E4P1);
    env.write(&mut chunk);
    assert_eq!(
        chunk.payload(),
        &[0, 0, 0, 127, 0, 127, 0, 127, 0, 0, 9, 0xfd]
    );
    let back = Envelope::read(&mut Reader::from_byte_slice(chunk.payload())).unwrap();
    assert_eq!(back, env);
}
