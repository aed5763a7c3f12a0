#![doc = r#"
A voice: one layer of a preset.

# Layout

A voice record is a 284 byte head followed by 22 bytes per zone. It opens with
its own size, which therefore always satisfies `size % 22 == 20`.

```text
  0 size(u16) zones(u8) group(u8) reserved(8)
 12 key range(4) velocity range(4) realtime range(4) reserved(1)
 25 assign group, key delay(u16), reserved(3)
 31 sample offset, transpose, coarse, fine, glide rate, fixed pitch,
    key mode, reserved(1), chorus width, chorus amount, reserved(1),
    chorus itd, reserved(5), key latch, reserved(2), glide curve,
    volume, pan, reserved(1), amp env dynamic range, filter type,
    reserved(1), filter frequency, filter resonance
 60 reserved(48)
108 amp env(12) reserved(2) filter env(12) reserved(2) aux env(12) reserved(2)
150 lfo 1(7) reserved(1) lfo 2(7) lag 1, reserved(1), lag 2
168 reserved(20)
188 cords(24 x 4)
284 zones(n x 22)
```
"#]

use super::{
    AssignGroup, Cord, CordDestination, CordSource, Envelope, FilterType, GlideCurve, KeyMode,
    Lfo, LfoShape, NoteRange, SampleZone, ZONE_SIZE,
    zone::{MAX_PAN, MAX_VOLUME, MIN_PAN, MIN_VOLUME},
};
use crate::{
    EncodeError, VoiceError,
    bank::{BankError, EntityKind},
    file::chunk::Chunk,
    reader::{ReadResult, Reader, inv_data},
    units,
};
use byteorder::BigEndian;

/// Size of a voice without zones.
pub const VOICE_HEAD_SIZE: usize = 284;
/// Number of cord slots in every voice.
pub const CORD_SLOTS: usize = 24;
/// Most zones a voice holds in memory.
pub const MAX_ZONES: usize = 256;
/// Most zones a voice record can declare.
pub const MAX_STORED_ZONES: usize = u8::MAX as usize;

/// Highest voice group.
pub const MAX_GROUP: u8 = 31;
/// Longest key delay, in milliseconds.
pub const MAX_KEY_DELAY: u16 = 10_000;
/// Transpose range, in semitones.
pub const TRANSPOSE_RANGE: (i8, i8) = (-36, 36);
/// Coarse tune range, in semitones.
pub const COARSE_TUNE_RANGE: (i8, i8) = (-72, 24);
/// Longest LFO lag.
pub const MAX_LFO_LAG: u8 = 10;

/// A layer of a preset with its own tone shaping and a list of zones.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voice {
    group: u8,
    key_range: NoteRange,
    velocity_range: NoteRange,
    realtime_range: NoteRange,
    assign_group: AssignGroup,
    key_delay: u16,
    sample_offset: f32,
    transpose: i8,
    coarse_tune: i8,
    fine_tune: f64,
    glide_rate: u8,
    fixed_pitch: bool,
    key_mode: KeyMode,
    chorus_width: f32,
    chorus_amount: f32,
    chorus_initial_itd: i8,
    key_latch: bool,
    glide_curve: GlideCurve,
    volume: i8,
    pan: i8,
    amp_env_dynamic_range: i8,
    filter_type: FilterType,
    filter_frequency: u16,
    filter_resonance: f32,
    amp_env: Envelope,
    filter_env: Envelope,
    aux_env: Envelope,
    lfo1: Lfo,
    lfo2: Lfo,
    lfo_lag1: u8,
    lfo_lag2: u8,
    cords: [Cord; CORD_SLOTS],
    zones: Vec<SampleZone>,
}

fn default_cords() -> [Cord; CORD_SLOTS] {
    use CordDestination as D;
    use CordSource as S;

    let mut cords = [Cord::off(); CORD_SLOTS];
    let defaults = [
        Cord::new(S::VelocityLess, D::AmpVolume, 0.0),
        Cord::new(S::PitchWheel, D::Pitch, 0.0),
        Cord::new(S::Lfo1Center, D::Pitch, 0.0),
        Cord::new(S::ModWheel, D::Cord3Amount, 6.0),
        Cord::new(S::VelocityLess, D::FilterFreq, 0.0),
        Cord::new(S::FilterEnvPos, D::FilterFreq, 0.0),
        Cord::new(S::KeyCenter, D::FilterFreq, 0.0),
        Cord::new(S::Footswitch1, D::KeySustain, 100.0),
    ];
    cords[..defaults.len()].copy_from_slice(&defaults);
    cords
}

impl Default for Voice {
    fn default() -> Self {
        let lfo = Lfo::new(5.79, LfoShape::Sine, 0.0, 0.0, true);
        Self {
            group: 0,
            key_range: NoteRange::default(),
            velocity_range: NoteRange::default(),
            realtime_range: NoteRange::default(),
            assign_group: AssignGroup::PolyAll,
            key_delay: 0,
            sample_offset: 0.0,
            transpose: 0,
            coarse_tune: 0,
            fine_tune: 0.0,
            glide_rate: 0,
            fixed_pitch: false,
            key_mode: KeyMode::PolyNormal,
            chorus_width: 100.0,
            chorus_amount: 0.0,
            chorus_initial_itd: 0,
            key_latch: false,
            glide_curve: GlideCurve::Linear,
            volume: 0,
            pan: 0,
            amp_env_dynamic_range: 0,
            filter_type: FilterType::NoFilter,
            filter_frequency: units::MAX_FILTER_FREQUENCY,
            filter_resonance: 0.0,
            amp_env: Envelope::default(),
            filter_env: Envelope::default(),
            aux_env: Envelope::default(),
            lfo1: lfo,
            lfo2: lfo,
            lfo_lag1: 0,
            lfo_lag2: 0,
            cords: default_cords(),
            zones: Vec::new(),
        }
    }
}

impl Voice {
    /// A default voice holding one zone.
    pub fn with_zone(zone: SampleZone) -> Self {
        Self {
            zones: vec![zone],
            ..Default::default()
        }
    }

    /// Voice group, `[0, 31]`
    pub fn group(&self) -> u8 {
        self.group
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
    /// Realtime controller span
    pub fn realtime_range(&self) -> &NoteRange {
        &self.realtime_range
    }
    /// Realtime controller span, for editing
    pub fn realtime_range_mut(&mut self) -> &mut NoteRange {
        &mut self.realtime_range
    }
    /// Polyphony group
    pub fn assign_group(&self) -> AssignGroup {
        self.assign_group
    }
    /// Key delay in milliseconds
    pub fn key_delay(&self) -> u16 {
        self.key_delay
    }
    /// Sample start offset in percent
    pub fn sample_offset(&self) -> f32 {
        self.sample_offset
    }
    /// Transpose in semitones
    pub fn transpose(&self) -> i8 {
        self.transpose
    }
    /// Coarse tune in semitones
    pub fn coarse_tune(&self) -> i8 {
        self.coarse_tune
    }
    /// Fine tune in cents
    pub fn fine_tune(&self) -> f64 {
        self.fine_tune
    }
    /// Glide rate, as stored
    pub fn glide_rate(&self) -> u8 {
        self.glide_rate
    }
    /// True if the voice ignores the key pitch
    pub fn is_fixed_pitch(&self) -> bool {
        self.fixed_pitch
    }
    /// Key trigger mode
    pub fn key_mode(&self) -> KeyMode {
        self.key_mode
    }
    /// Chorus width in percent
    pub fn chorus_width(&self) -> f32 {
        self.chorus_width
    }
    /// Chorus amount in percent
    pub fn chorus_amount(&self) -> f32 {
        self.chorus_amount
    }
    /// Chorus initial inter-aural time delay, as stored
    pub fn chorus_initial_itd(&self) -> i8 {
        self.chorus_initial_itd
    }
    /// True if keys latch
    pub fn is_key_latch(&self) -> bool {
        self.key_latch
    }
    /// Glide curve
    pub fn glide_curve(&self) -> GlideCurve {
        self.glide_curve
    }
    /// Volume in dB
    pub fn volume(&self) -> i8 {
        self.volume
    }
    /// Pan position
    pub fn pan(&self) -> i8 {
        self.pan
    }
    /// Amp envelope dynamic range, as stored
    pub fn amp_env_dynamic_range(&self) -> i8 {
        self.amp_env_dynamic_range
    }
    /// Filter type
    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }
    /// Filter cutoff in hertz
    pub fn filter_frequency(&self) -> u16 {
        self.filter_frequency
    }
    /// Filter resonance in percent
    pub fn filter_resonance(&self) -> f32 {
        self.filter_resonance
    }
    /// Amp envelope
    pub fn amp_env(&self) -> &Envelope {
        &self.amp_env
    }
    /// Amp envelope, for editing
    pub fn amp_env_mut(&mut self) -> &mut Envelope {
        &mut self.amp_env
    }
    /// Filter envelope
    pub fn filter_env(&self) -> &Envelope {
        &self.filter_env
    }
    /// Filter envelope, for editing
    pub fn filter_env_mut(&mut self) -> &mut Envelope {
        &mut self.filter_env
    }
    /// Auxiliary envelope
    pub fn aux_env(&self) -> &Envelope {
        &self.aux_env
    }
    /// Auxiliary envelope, for editing
    pub fn aux_env_mut(&mut self) -> &mut Envelope {
        &mut self.aux_env
    }
    /// First LFO
    pub fn lfo1(&self) -> &Lfo {
        &self.lfo1
    }
    /// First LFO, for editing
    pub fn lfo1_mut(&mut self) -> &mut Lfo {
        &mut self.lfo1
    }
    /// Second LFO
    pub fn lfo2(&self) -> &Lfo {
        &self.lfo2
    }
    /// Second LFO, for editing
    pub fn lfo2_mut(&mut self) -> &mut Lfo {
        &mut self.lfo2
    }
    /// First lag processor amount
    pub fn lfo_lag1(&self) -> u8 {
        self.lfo_lag1
    }
    /// Second lag processor amount
    pub fn lfo_lag2(&self) -> u8 {
        self.lfo_lag2
    }
    /// All 24 cord slots
    pub fn cords(&self) -> &[Cord; CORD_SLOTS] {
        &self.cords
    }
    /// All 24 cord slots, for editing
    pub fn cords_mut(&mut self) -> &mut [Cord; CORD_SLOTS] {
        &mut self.cords
    }
    /// The zones, in stored order
    pub fn zones(&self) -> &[SampleZone] {
        &self.zones
    }
    /// A zone by position
    pub fn zone_mut(&mut self, position: usize) -> Option<&mut SampleZone> {
        self.zones.get_mut(position)
    }

    /// Set the group, clamped to `[0, 31]`.
    pub fn set_group(&mut self, group: u8) {
        self.group = group.min(MAX_GROUP);
    }
    /// Set the polyphony group
    pub fn set_assign_group(&mut self, group: AssignGroup) {
        self.assign_group = group;
    }
    /// Set the key delay, clamped to `[0, 10000]` milliseconds.
    pub fn set_key_delay(&mut self, millis: u16) {
        self.key_delay = millis.min(MAX_KEY_DELAY);
    }
    /// Set the sample start offset, clamped to `[0, 100]` percent.
    pub fn set_sample_offset(&mut self, percent: f32) {
        self.sample_offset = percent.clamp(0.0, 100.0);
    }
    /// Set the transpose, clamped to `[-36, 36]`.
    pub fn set_transpose(&mut self, semitones: i8) {
        self.transpose = semitones.clamp(TRANSPOSE_RANGE.0, TRANSPOSE_RANGE.1);
    }
    /// Set the coarse tune, clamped to `[-72, 24]`.
    pub fn set_coarse_tune(&mut self, semitones: i8) {
        self.coarse_tune = semitones.clamp(COARSE_TUNE_RANGE.0, COARSE_TUNE_RANGE.1);
    }
    /// Set the fine tune, clamped to `[-100, 100]` cents.
    pub fn set_fine_tune(&mut self, cents: f64) {
        self.fine_tune = cents.clamp(-100.0, 100.0);
    }
    /// Set the glide rate
    pub fn set_glide_rate(&mut self, rate: u8) {
        self.glide_rate = rate;
    }
    /// Set fixed pitch
    pub fn set_fixed_pitch(&mut self, fixed: bool) {
        self.fixed_pitch = fixed;
    }
    /// Set the key mode
    pub fn set_key_mode(&mut self, mode: KeyMode) {
        self.key_mode = mode;
    }
    /// Set the chorus width, clamped to `[0, 100]` percent.
    pub fn set_chorus_width(&mut self, percent: f32) {
        self.chorus_width = percent.clamp(0.0, 100.0);
    }
    /// Set the chorus amount, clamped to `[0, 100]` percent.
    pub fn set_chorus_amount(&mut self, percent: f32) {
        self.chorus_amount = percent.clamp(0.0, 100.0);
    }
    /// Set the chorus initial time delay
    pub fn set_chorus_initial_itd(&mut self, itd: i8) {
        self.chorus_initial_itd = itd;
    }
    /// Set key latch
    pub fn set_key_latch(&mut self, latch: bool) {
        self.key_latch = latch;
    }
    /// Set the glide curve
    pub fn set_glide_curve(&mut self, curve: GlideCurve) {
        self.glide_curve = curve;
    }
    /// Set the volume, clamped to `[-96, 10]` dB.
    pub fn set_volume(&mut self, db: i8) {
        self.volume = db.clamp(MIN_VOLUME, MAX_VOLUME);
    }
    /// Set the pan, clamped to `[-64, 63]`.
    pub fn set_pan(&mut self, pan: i8) {
        self.pan = pan.clamp(MIN_PAN, MAX_PAN);
    }
    /// Set the amp envelope dynamic range
    pub fn set_amp_env_dynamic_range(&mut self, range: i8) {
        self.amp_env_dynamic_range = range;
    }
    /// Set the filter type
    pub fn set_filter_type(&mut self, filter: FilterType) {
        self.filter_type = filter;
    }
    /// Set the cutoff, clamped to `[57, 20000]` hertz.
    pub fn set_filter_frequency(&mut self, hertz: u16) {
        self.filter_frequency = hertz.clamp(units::MIN_FILTER_FREQUENCY, units::MAX_FILTER_FREQUENCY);
    }
    /// Set the resonance, clamped to `[0, 100]` percent.
    pub fn set_filter_resonance(&mut self, percent: f32) {
        self.filter_resonance = percent.clamp(0.0, 100.0);
    }
    /// Set the first lag, clamped to `[0, 10]`.
    pub fn set_lfo_lag1(&mut self, lag: u8) {
        self.lfo_lag1 = lag.min(MAX_LFO_LAG);
    }
    /// Set the second lag, clamped to `[0, 10]`.
    pub fn set_lfo_lag2(&mut self, lag: u8) {
        self.lfo_lag2 = lag.min(MAX_LFO_LAG);
    }

    /// Amount of the first cord routing `source` to `destination`.
    pub fn cord_amount(&self, source: CordSource, destination: CordDestination) -> Option<f32> {
        self.cords
            .iter()
            .find(|c| c.source() == source && c.destination() == destination)
            .map(Cord::amount)
    }

    /// True if any cord reads from `source`.
    pub fn has_cord_source(&self, source: CordSource) -> bool {
        self.cords.iter().any(|c| c.source() == source)
    }

    /// Update the amount of a cord with the same ends, or place `cord` in the
    /// first free slot.
    ///
    /// Returns `false` when neither is possible.
    pub fn replace_or_add_cord(&mut self, cord: Cord) -> bool {
        if let Some(existing) = self
            .cords
            .iter_mut()
            .find(|c| c.source() == cord.source() && c.destination() == cord.destination())
        {
            existing.set_amount(cord.amount());
            return true;
        }
        match self.cords.iter_mut().find(|c| c.is_off()) {
            Some(slot) => {
                *slot = cord;
                true
            }
            None => false,
        }
    }

    /// Switch a cord slot off, returning what it held.
    pub fn clear_cord(&mut self, slot: usize) -> Option<Cord> {
        let cord = self.cords.get_mut(slot)?;
        Some(core::mem::replace(cord, Cord::off()))
    }

    /// Append a zone.
    pub fn add_zone(&mut self, zone: SampleZone) -> Result<(), BankError> {
        if self.zones.len() >= MAX_ZONES {
            return Err(BankError::Capacity {
                kind: EntityKind::Zone,
                limit: MAX_ZONES,
            });
        }
        self.zones.push(zone);
        Ok(())
    }

    /// Remove the zone at `position`.
    pub fn remove_zone(&mut self, position: usize) -> Option<SampleZone> {
        (position < self.zones.len()).then(|| self.zones.remove(position))
    }

    /// Size of this voice's record.
    pub fn data_size(&self) -> usize {
        VOICE_HEAD_SIZE + ZONE_SIZE * self.zones.len()
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let start = reader.buffer_position();
        let size = reader.read_u16::<BigEndian>()?;
        if size as usize % ZONE_SIZE != VOICE_HEAD_SIZE % ZONE_SIZE {
            reader.set_position(start)?;
            return Err(inv_data(reader, VoiceError::DataSize(size)));
        }
        let zone_count = reader.read_u8()?;
        if zone_count == 0 {
            reader.set_position(start)?;
            return Err(inv_data(reader, VoiceError::NoZones));
        }

        let mut voice = Voice {
            group: reader.read_u8()?,
            ..Default::default()
        };
        reader.skip(8)?;
        voice.key_range = NoteRange::read(reader)?;
        voice.velocity_range = NoteRange::read(reader)?;
        voice.realtime_range = NoteRange::read(reader)?;
        reader.skip(1)?;
        voice.assign_group = AssignGroup::from(reader.read_u8()?);
        voice.key_delay = reader.read_u16::<BigEndian>()?;
        reader.skip(3)?;
        voice.sample_offset = units::percent_from_byte(reader.read_u8()?);
        voice.transpose = reader.read_i8()?;
        voice.coarse_tune = reader.read_i8()?;
        voice.fine_tune = units::fine_tune_from_byte(reader.read_i8()?);
        voice.glide_rate = reader.read_u8()?;
        voice.fixed_pitch = reader.read_bool()?;
        voice.key_mode = KeyMode::from(reader.read_u8()?);
        reader.skip(1)?;
        voice.chorus_width = units::chorus_width_from_byte(reader.read_i8()?);
        voice.chorus_amount = units::round_up_f32(units::percent_from_byte(reader.read_u8()?), 2);
        reader.skip(1)?;
        voice.chorus_initial_itd = reader.read_i8()?;
        reader.skip(5)?;
        voice.key_latch = reader.read_bool()?;
        reader.skip(2)?;
        voice.glide_curve = GlideCurve::from(reader.read_u8()?);
        voice.volume = reader.read_i8()?;
        voice.pan = reader.read_i8()?;
        reader.skip(1)?;
        voice.amp_env_dynamic_range = reader.read_i8()?;
        voice.filter_type = FilterType::from(reader.read_u8()?);
        reader.skip(1)?;
        voice.filter_frequency = units::filter_frequency_from_byte(reader.read_u8()?);
        voice.filter_resonance =
            units::round_up_f32(units::percent_from_byte(reader.read_u8()?), 1);
        reader.skip(48)?;

        voice.amp_env = Envelope::read(reader)?;
        reader.skip(2)?;
        voice.filter_env = Envelope::read(reader)?;
        reader.skip(2)?;
        voice.aux_env = Envelope::read(reader)?;
        reader.skip(2)?;

        voice.lfo1 = Lfo::read(reader)?;
        reader.skip(1)?;
        voice.lfo2 = Lfo::read(reader)?;
        voice.lfo_lag1 = reader.read_u8()?;
        reader.skip(1)?;
        voice.lfo_lag2 = reader.read_u8()?;
        reader.skip(20)?;

        for cord in voice.cords.iter_mut() {
            *cord = Cord::read(reader)?;
        }
        voice.zones = (0..zone_count)
            .map(|_| SampleZone::read(reader))
            .collect::<ReadResult<_>>()?;
        Ok(voice)
    }

    pub(crate) fn write(&self, chunk: &mut Chunk) -> Result<(), EncodeError> {
        if self.zones.len() > MAX_STORED_ZONES {
            return Err(EncodeError::ZoneCount(self.zones.len()));
        }
        if self.zones.is_empty() {
            log::warn!("writing a voice without zones, it will not load back");
        }

        chunk.append_u16::<BigEndian>(self.data_size() as u16);
        chunk.append_u8(self.zones.len() as u8);
        chunk.append_u8(self.group);
        chunk.reserve_zeroed(8);
        self.key_range.write(chunk);
        self.velocity_range.write(chunk);
        self.realtime_range.write(chunk);
        chunk.reserve_zeroed(1);
        chunk.append_u8(self.assign_group.into());
        chunk.append_u16::<BigEndian>(self.key_delay);
        chunk.reserve_zeroed(3);
        chunk.append_u8(units::byte_from_percent(self.sample_offset));
        chunk.append_i8(self.transpose);
        chunk.append_i8(self.coarse_tune);
        chunk.append_i8(units::byte_from_fine_tune(self.fine_tune));
        chunk.append_u8(self.glide_rate);
        chunk.append_bool(self.fixed_pitch);
        chunk.append_u8(self.key_mode.into());
        chunk.reserve_zeroed(1);
        chunk.append_i8(units::byte_from_chorus_width(self.chorus_width));
        chunk.append_u8(units::byte_from_percent(self.chorus_amount));
        chunk.reserve_zeroed(1);
        chunk.append_i8(self.chorus_initial_itd);
        chunk.reserve_zeroed(5);
        chunk.append_bool(self.key_latch);
        chunk.reserve_zeroed(2);
        chunk.append_u8(self.glide_curve.into());
        chunk.append_i8(self.volume);
        chunk.append_i8(self.pan);
        chunk.reserve_zeroed(1);
        chunk.append_i8(self.amp_env_dynamic_range);
        chunk.append_u8(self.filter_type.into());
        chunk.reserve_zeroed(1);
        chunk.append_u8(units::byte_from_filter_frequency(self.filter_frequency));
        chunk.append_u8(units::byte_from_percent(self.filter_resonance));
        chunk.reserve_zeroed(48);

        self.amp_env.write(chunk);
        chunk.reserve_zeroed(2);
        self.filter_env.write(chunk);
        chunk.reserve_zeroed(2);
        self.aux_env.write(chunk);
        chunk.reserve_zeroed(2);

        self.lfo1.write(chunk);
        chunk.reserve_zeroed(1);
        self.lfo2.write(chunk);
        chunk.append_u8(self.lfo_lag1);
        chunk.reserve_zeroed(1);
        chunk.append_u8(self.lfo_lag2);
        chunk.reserve_zeroed(20);

        for cord in &self.cords {
            cord.write(chunk);
        }
        for zone in &self.zones {
            zone.write(chunk);
        }
        Ok(())
    }
}

#[cfg(test)]
fn encode(voice: &Voice) -> Vec<u8> {
    use crate::file::chunk::ChunkName;
    let mut chunk = Chunk::new(ChunkName::E4P1);
    voice.write(&mut chunk).unwrap();
    chunk.payload().to_vec()
}

#[test]
fn record_size_matches_header() {
    let voice = Voice::with_zone(SampleZone::default());
    let bytes = encode(&voice);
    assert_eq!(bytes.len(), VOICE_HEAD_SIZE + ZONE_SIZE);
    assert_eq!(&bytes[..3], &[0x01, 0x32, 1]);
    // lfo 1 starts at 150, key sync stored inverted
    assert_eq!(bytes[151], u8::from(LfoShape::Sine));
    assert_eq!(bytes[154], 0);
    // first cord: velocity< to amp volume
    assert_eq!(&bytes[188..192], &[12, 64, 0, 0]);
}

#[test]
fn decodes_what_it_encodes() {
    use pretty_assertions::assert_eq;

    let mut voice = Voice::with_zone(SampleZone::new(3, crate::note::Note::from_byte(48)));
    voice.set_group(40);
    voice.set_transpose(-50);
    voice.set_coarse_tune(12);
    voice.set_key_delay(20_000);
    voice.set_filter_type(FilterType::TwoPoleLowpass);
    voice.set_filter_frequency(units::filter_frequency_from_byte(128));
    voice.set_chorus_width(50.0);
    voice.set_chorus_initial_itd(-12);
    voice.set_key_mode(KeyMode::SoloSynthLow);
    voice.set_lfo_lag2(200);
    voice.amp_env_mut().attack1.time = 42;

    let bytes = encode(&voice);
    let back = Voice::read(&mut Reader::from_byte_slice(&bytes)).unwrap();

    assert_eq!(back.group(), MAX_GROUP);
    assert_eq!(back.transpose(), -36);
    assert_eq!(back.coarse_tune(), 12);
    assert_eq!(back.key_delay(), MAX_KEY_DELAY);
    assert_eq!(back.filter_type(), FilterType::TwoPoleLowpass);
    assert_eq!(back.filter_frequency(), voice.filter_frequency());
    assert_eq!(back.chorus_width(), 50.0);
    assert_eq!(back.chorus_initial_itd(), -12);
    assert_eq!(back.key_mode(), KeyMode::SoloSynthLow);
    assert_eq!(back.lfo_lag2(), MAX_LFO_LAG);
    assert_eq!(back.amp_env().attack1.time, 42);
    for (decoded, original) in back.cords().iter().zip(voice.cords()) {
        assert_eq!(decoded.source(), original.source());
        assert_eq!(decoded.destination(), original.destination());
        assert_eq!(
            units::signed_byte_from_percent(decoded.amount()),
            units::signed_byte_from_percent(original.amount())
        );
    }
    assert_eq!(back.zones().len(), 1);
    assert_eq!(back.zones()[0].sample_index(), 3);
    assert_eq!(encode(&back), bytes);
}

#[test]
fn rejects_bad_size_and_empty_zone_list() {
    use crate::{ParseError, reader::ReaderErrorKind};

    let mut bytes = encode(&Voice::with_zone(SampleZone::default()));
    bytes[1] += 1;
    let err = Voice::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::ParseError(ParseError::Voice(VoiceError::DataSize(307)))
    ));

    let bytes = encode(&Voice::default());
    let err = Voice::read(&mut Reader::from_byte_slice(&bytes)).unwrap_err();
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::ParseError(ParseError::Voice(VoiceError::NoZones))
    ));
}

#[test]
fn cord_helpers() {
    let mut voice = Voice::default();
    assert_eq!(
        voice.cord_amount(CordSource::Footswitch1, CordDestination::KeySustain),
        Some(100.0)
    );
    assert!(voice.has_cord_source(CordSource::PitchWheel));
    assert!(!voice.has_cord_source(CordSource::Lag1));

    assert!(voice.replace_or_add_cord(Cord::new(CordSource::PitchWheel, CordDestination::Pitch, 50.0)));
    assert_eq!(voice.cord_amount(CordSource::PitchWheel, CordDestination::Pitch), Some(50.0));

    assert!(voice.replace_or_add_cord(Cord::new(CordSource::Lag1, CordDestination::AmpPan, -20.0)));
    assert_eq!(voice.cords()[8].source(), CordSource::Lag1);

    for i in 0..16 {
        voice.replace_or_add_cord(Cord::new(CordSource::Unknown(240 + i), CordDestination::AmpPan, 1.0));
    }
    assert!(!voice.replace_or_add_cord(Cord::new(CordSource::Gate, CordDestination::AmpPan, 1.0)));

    let cleared = voice.clear_cord(8).unwrap();
    assert_eq!(cleared.source(), CordSource::Lag1);
    assert!(voice.cords()[8].is_off());
    assert!(voice.clear_cord(CORD_SLOTS).is_none());
}

#[test]
fn zone_capacity() {
    let mut voice = Voice::default();
    for _ in 0..MAX_ZONES {
        voice.add_zone(SampleZone::default()).unwrap();
    }
    assert!(voice.add_zone(SampleZone::default()).is_err());
    assert_eq!(voice.zones().len(), MAX_ZONES);

    use crate::file::chunk::ChunkName;
    let mut chunk = Chunk::new(ChunkName::E4P1);
    assert!(matches!(
        voice.write(&mut chunk),
        Err(EncodeError::ZoneCount(256))
    ));

    assert!(voice.remove_zone(0).is_some());
    assert!(voice.remove_zone(MAX_ZONES).is_none());
}
