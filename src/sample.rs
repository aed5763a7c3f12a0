#![doc = r#"
Digital audio samples (`E3S1` blocks).

# Layout

```text
 0 index(u16 BE) name(16)
18 offset table, 9 x u32 LE:
   reserved, start L/R, end L/R, loop start L/R, loop end L/R
54 sample rate(u32 LE) format(u32 LE) extra parameters(8 x u32 LE)
94 PCM, i16 LE
```

The offset table holds byte positions measured from the name, so the first
frame of PCM sits at 92. Stereo PCM is planar: every left frame, then every
right frame. For mono samples the right hand fields repeat the left ones.

The offset table is derived from the PCM length and the loop points every
time a sample is written. Decoding keeps the loop points and drops the table.
"#]

use crate::{
    EncodeError, ParseError,
    bank::{AUTO_INDEX, MAX_SAMPLES},
    file::chunk::{Chunk, ChunkName},
    name::{self, NAME_LEN},
    reader::{ReadResult, Reader, inv_data},
};
use byteorder::{BigEndian, LittleEndian};

/// Size of a sample record without its PCM.
pub const SAMPLE_HEADER_SIZE: usize = 94;
/// Offset of the first PCM byte as seen from the offset table.
pub const SAMPLE_DATA_OFFSET: u32 = 92;
/// Number of opaque extra parameter words.
pub const EXTRA_PARAMETERS: usize = 8;

/// Lowest sample rate, in hertz.
pub const MIN_SAMPLE_RATE: u32 = 7_000;
/// Highest sample rate, in hertz.
pub const MAX_SAMPLE_RATE: u32 = 192_000;

/// Format flag of a mono sample on the left channel.
pub const FORMAT_MONO_LEFT: u32 = 0x0020_0000;
/// Format flag of a mono sample on the right channel.
pub const FORMAT_MONO_RIGHT: u32 = 0x0040_0000;
/// Format flags of a stereo sample.
pub const FORMAT_STEREO: u32 = 0x0060_0000;
/// Format flag set when the sample loops.
pub const FORMAT_LOOP: u32 = 0x0001_0000;
/// Format flag set when the loop keeps running after key release.
pub const FORMAT_LOOP_IN_RELEASE: u32 = 0x0008_0000;

const BYTES_PER_FRAME: u32 = 2;

/// Channel layout of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleChannels {
    /// One channel
    #[default]
    Mono,
    /// Two planar channels
    Stereo,
}

impl SampleChannels {
    /// 1 or 2
    pub const fn count(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }

    fn from_format(format: u32) -> Self {
        if format & FORMAT_STEREO == FORMAT_STEREO {
            Self::Stereo
        } else {
            Self::Mono
        }
    }
}

/// One channel of a sample's PCM, see [`Sample::channel_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleChannel {
    /// The left channel, or the only channel of a mono sample
    Left,
    /// The right channel
    Right,
}

/// Loop settings, in frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleLoop {
    /// The sample loops between `start` and `end`
    pub enabled: bool,
    /// The loop keeps playing after the key is released
    pub in_release: bool,
    /// First frame of the loop
    pub start: u32,
    /// Frame after the last frame of the loop
    pub end: u32,
}

impl SampleLoop {
    /// A loop over `start..end` that stops on release.
    pub const fn new(start: u32, end: u32) -> Self {
        Self {
            enabled: true,
            in_release: false,
            start,
            end,
        }
    }

    fn format_flags(&self) -> u32 {
        let mut flags = 0;
        if self.enabled {
            flags |= FORMAT_LOOP;
        }
        if self.in_release {
            flags |= FORMAT_LOOP_IN_RELEASE;
        }
        flags
    }
}

/// A named block of 16 bit PCM.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    index: u16,
    name: String,
    sample_rate: u32,
    channels: SampleChannels,
    sample_loop: SampleLoop,
    extra_parameters: [u32; EXTRA_PARAMETERS],
    data: Vec<i16>,
}

impl Sample {
    /// Create a sample. Stereo `data` is planar, left frames first.
    ///
    /// The index is assigned when the sample is added to a bank.
    pub fn new(
        name: &str,
        data: Vec<i16>,
        sample_rate: u32,
        channels: SampleChannels,
        sample_loop: SampleLoop,
    ) -> Self {
        Self {
            index: AUTO_INDEX,
            name: name::normalize(name),
            sample_rate: sample_rate.clamp(MIN_SAMPLE_RATE, MAX_SAMPLE_RATE),
            channels,
            sample_loop,
            extra_parameters: [0; EXTRA_PARAMETERS],
            data,
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
    /// Sample rate in hertz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
    /// Channel layout
    pub fn channels(&self) -> SampleChannels {
        self.channels
    }
    /// Loop settings
    pub fn sample_loop(&self) -> &SampleLoop {
        &self.sample_loop
    }
    /// Loop settings, for editing
    pub fn sample_loop_mut(&mut self) -> &mut SampleLoop {
        &mut self.sample_loop
    }
    /// The eight opaque extra parameter words
    pub fn extra_parameters(&self) -> &[u32; EXTRA_PARAMETERS] {
        &self.extra_parameters
    }
    /// All PCM, planar
    pub fn data(&self) -> &[i16] {
        &self.data
    }
    /// Frames per channel
    pub fn frames(&self) -> usize {
        self.data.len() / self.channels.count()
    }

    /// The PCM of one channel.
    ///
    /// Asking a mono sample for [`SampleChannel::Right`] yields the mono data.
    pub fn channel_data(&self, channel: SampleChannel) -> &[i16] {
        let frames = self.frames();
        match (channel, self.channels) {
            (SampleChannel::Right, SampleChannels::Stereo) => &self.data[frames..frames * 2],
            _ => &self.data[..frames],
        }
    }

    /// Set the bank index.
    ///
    /// [`AUTO_INDEX`] is kept as is, anything else is clamped below
    /// [`MAX_SAMPLES`].
    pub fn set_index(&mut self, index: u16) {
        self.index = if index == AUTO_INDEX {
            index
        } else {
            index.min(MAX_SAMPLES as u16 - 1)
        };
    }
    /// Set the name. It is padded or truncated to 16 characters.
    pub fn set_name(&mut self, name: &str) {
        self.name = name::normalize(name);
    }
    /// Set the sample rate, clamped to `[7000, 192000]` hertz.
    pub fn set_sample_rate(&mut self, hertz: u32) {
        self.sample_rate = hertz.clamp(MIN_SAMPLE_RATE, MAX_SAMPLE_RATE);
    }
    /// Set the channel layout
    pub fn set_channels(&mut self, channels: SampleChannels) {
        self.channels = channels;
    }
    /// Replace the PCM
    pub fn set_data(&mut self, data: Vec<i16>) {
        self.data = data;
    }

    /// Decode a record whose block holds `size` bytes.
    pub(crate) fn read(reader: &mut Reader<'_>, size: usize) -> ReadResult<Self> {
        if size < SAMPLE_HEADER_SIZE {
            return Err(inv_data(
                reader,
                ParseError::BlockTooSmall {
                    name: ChunkName::E3S1,
                    size,
                },
            ));
        }

        let index = reader.read_u16::<BigEndian>()?;
        let name = name::name_from_bytes(&reader.read_exact_size::<NAME_LEN>()?);

        // reserved, start L/R, end L/R
        reader.skip(5 * 4)?;
        let loop_start = reader.read_u32::<LittleEndian>()?;
        reader.skip(4)?;
        let loop_end = reader.read_u32::<LittleEndian>()?;
        reader.skip(4)?;

        let sample_rate = reader.read_u32::<LittleEndian>()?;
        let format = reader.read_u32::<LittleEndian>()?;
        let mut extra_parameters = [0; EXTRA_PARAMETERS];
        for word in extra_parameters.iter_mut() {
            *word = reader.read_u32::<LittleEndian>()?;
        }

        let count = (size - SAMPLE_HEADER_SIZE) / 2;
        let data = reader.read_i16s::<LittleEndian>(count)?;

        Ok(Self {
            index,
            name,
            sample_rate,
            channels: SampleChannels::from_format(format),
            sample_loop: SampleLoop {
                enabled: format & FORMAT_LOOP != 0,
                in_release: format & FORMAT_LOOP_IN_RELEASE != 0,
                start: loop_start.saturating_sub(SAMPLE_DATA_OFFSET) / BYTES_PER_FRAME,
                end: loop_end.saturating_sub(SAMPLE_DATA_OFFSET - BYTES_PER_FRAME)
                    / BYTES_PER_FRAME,
            },
            extra_parameters,
            data,
        })
    }

    pub(crate) fn write(&self, chunk: &mut Chunk) -> Result<(), EncodeError> {
        if self.data.is_empty() {
            return Err(EncodeError::EmptySample { index: self.index });
        }

        chunk.append_u16::<BigEndian>(self.index);
        chunk.append(&name::to_name_bytes(&self.name));
        for word in OffsetTable::new(self).words() {
            chunk.append_u32::<LittleEndian>(word);
        }
        chunk.append_u32::<LittleEndian>(self.sample_rate.clamp(MIN_SAMPLE_RATE, MAX_SAMPLE_RATE));

        let layout = match self.channels {
            SampleChannels::Mono => FORMAT_MONO_LEFT,
            SampleChannels::Stereo => FORMAT_STEREO,
        };
        chunk.append_u32::<LittleEndian>(layout | self.sample_loop.format_flags());

        for &word in &self.extra_parameters {
            chunk.append_u32::<LittleEndian>(word);
        }
        chunk.append_i16s::<LittleEndian>(&self.data);
        Ok(())
    }
}

/// Byte positions of a sample's PCM and loop, as stored.
#[derive(Debug, PartialEq, Eq)]
struct OffsetTable {
    start: [u32; 2],
    end: [u32; 2],
    loop_start: [u32; 2],
    loop_end: [u32; 2],
}

impl OffsetTable {
    fn new(sample: &Sample) -> Self {
        let frames = sample.frames() as u32;
        let stereo = sample.channels == SampleChannels::Stereo;
        let channel_bytes = frames * BYTES_PER_FRAME;

        let start_l = SAMPLE_DATA_OFFSET;
        let start_r = if stereo { start_l + channel_bytes } else { start_l };
        let end_l = start_l + channel_bytes - BYTES_PER_FRAME;
        let end_r = if stereo { start_r + channel_bytes - BYTES_PER_FRAME } else { end_l };

        let loop_start = sample.sample_loop.start.min(frames.saturating_sub(1)) * BYTES_PER_FRAME;
        let loop_end = sample.sample_loop.end.min(frames) * BYTES_PER_FRAME;

        Self {
            start: [start_l, start_r],
            end: [end_l, end_r],
            loop_start: [start_l + loop_start, start_r + loop_start],
            loop_end: [
                start_l + loop_end - BYTES_PER_FRAME,
                start_r + loop_end - BYTES_PER_FRAME,
            ],
        }
    }

    fn words(&self) -> [u32; 9] {
        [
            0,
            self.start[0],
            self.start[1],
            self.end[0],
            self.end[1],
            self.loop_start[0],
            self.loop_start[1],
            self.loop_end[0],
            self.loop_end[1],
        ]
    }
}

#[cfg(test)]
fn encode(sample: &Sample) -> Vec<u8> {
    let mut chunk = Chunk::new(ChunkName::E3S1);
    sample.write(&mut chunk).unwrap();
    chunk.payload().to_vec()
}

#[test]
fn mono_offsets() {
    let sample = Sample::new(
        "Kick",
        vec![1, 2, 3, 4],
        44_100,
        SampleChannels::Mono,
        SampleLoop::default(),
    );
    let table = OffsetTable::new(&sample);
    assert_eq!(
        table,
        OffsetTable {
            start: [92, 92],
            end: [98, 98],
            loop_start: [92, 92],
            loop_end: [90, 90],
        }
    );

    let bytes = encode(&sample);
    assert_eq!(bytes.len(), SAMPLE_HEADER_SIZE + 8);
    // 44100 little endian, then mono-left
    assert_eq!(&bytes[54..62], &[0x44, 0xac, 0, 0, 0, 0, 0x20, 0]);
    assert_eq!(&bytes[94..], &[1, 0, 2, 0, 3, 0, 4, 0]);
}

#[test]
fn stereo_offsets_and_loop() {
    let sample = Sample::new(
        "Pad",
        vec![10, 11, 12, 20, 21, 22],
        48_000,
        SampleChannels::Stereo,
        SampleLoop {
            enabled: true,
            in_release: true,
            start: 1,
            end: 9,
        },
    );
    assert_eq!(
        OffsetTable::new(&sample),
        OffsetTable {
            start: [92, 98],
            end: [96, 102],
            loop_start: [94, 100],
            loop_end: [96, 102],
        }
    );

    let bytes = encode(&sample);
    let back = Sample::read(&mut Reader::from_byte_slice(&bytes), bytes.len()).unwrap();
    assert_eq!(back.channels(), SampleChannels::Stereo);
    assert_eq!(back.channel_data(SampleChannel::Left), &[10, 11, 12]);
    assert_eq!(back.channel_data(SampleChannel::Right), &[20, 21, 22]);
    assert_eq!(
        back.sample_loop(),
        &SampleLoop {
            enabled: true,
            in_release: true,
            start: 1,
            end: 3,
        }
    );
}

#[test]
fn decodes_what_it_encodes() {
    use pretty_assertions::assert_eq;

    let mut sample = Sample::new(
        "Snare",
        (0..32).collect(),
        1_000_000,
        SampleChannels::Mono,
        SampleLoop::new(4, 20),
    );
    sample.set_index(3);
    assert_eq!(sample.sample_rate(), MAX_SAMPLE_RATE);

    let bytes = encode(&sample);
    let back = Sample::read(&mut Reader::from_byte_slice(&bytes), bytes.len()).unwrap();
    assert_eq!(back, sample);
    assert_eq!(back.name(), "Snare           ");
}

#[test]
fn empty_and_short_samples() {
    let sample = Sample::new("", Vec::new(), 44_100, SampleChannels::Mono, SampleLoop::default());
    let mut chunk = Chunk::new(ChunkName::E3S1);
    assert!(matches!(
        sample.write(&mut chunk),
        Err(EncodeError::EmptySample { index: AUTO_INDEX })
    ));

    let err = Sample::read(&mut Reader::from_byte_slice(&[0; 40]), 40).unwrap_err();
    assert!(!err.is_out_of_bounds());
}
