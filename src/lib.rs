#![warn(missing_docs)]
#![doc = r#"
Read and write E-mu EOS `.e4b` sampler banks.

A bank is a chunked binary container holding presets, 16 bit samples, MIDI
sequences and a startup state. This crate decodes a bank into a [`Bank`]
and encodes it back into bytes the sampler accepts.

# Reading

```rust,no_run
use e4bank::prelude::*;

let bank = Bank::read_file("library.e4b").unwrap();
for preset in bank.presets() {
    println!("{:>4} {}", preset.index(), preset.name());
}
```

# Building

```rust
use e4bank::prelude::*;

let mut bank = Bank::new();
let sample = bank
    .add_sample(Sample::new(
        "Sine",
        vec![0, 12_000, 0, -12_000],
        44_100,
        SampleChannels::Mono,
        SampleLoop::new(0, 4),
    ))
    .unwrap();

let zone = SampleZone::new(sample, note!(C, 3));
let preset = bank
    .add_preset(Preset::with_voices("Sine Lead", vec![Voice::with_zone(zone)]))
    .unwrap();
bank.set_startup_preset(preset).unwrap();

let bytes = bank.to_bytes().unwrap();
let decoded = Bank::parse(bytes).unwrap();
assert_eq!(decoded.preset(preset).unwrap().name(), "Sine Lead       ");
```

# Logging

Decoding and encoding report skipped blocks and rejected entities through the
[`log`] facade. No logger is installed by this crate.
"#]

pub mod bank;
pub mod file;
pub mod name;
pub mod note;
pub mod preset;
pub mod reader;
pub mod sample;
pub mod sequence;
pub mod startup;
pub mod units;

mod error;
pub use error::*;

pub use bank::Bank;

#[doc = r#"
Common re-exports
"#]
pub mod prelude {
    pub use crate::{
        bank::{AUTO_INDEX, Bank, BankError, EntityKind, NO_STARTUP_PRESET},
        error::*,
        file::{FileError, ReadStatus, chunk::ChunkName},
        note,
        note::{Key, Note, Octave},
        preset::{
            AssignGroup, Cord, CordDestination, CordSource, Envelope, EnvelopeSegment,
            FilterType, GlideCurve, KeyMode, Lfo, LfoShape, NoteRange, Preset, SampleZone, Voice,
        },
        reader::{ReadResult, ReaderError, ReaderErrorKind},
        sample::{Sample, SampleChannel, SampleChannels, SampleLoop},
        sequence::Sequence,
        startup::{MidiChannelSettings, StartupState},
    };
}
