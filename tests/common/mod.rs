use e4bank::prelude::*;

/// One preset with a single full range zone on sample 0, one four frame mono
/// sample, and the preset selected at startup.
pub fn scenario_bank() -> Bank {
    let mut bank = Bank::new();

    let zone = SampleZone::new(0, Note::default());
    let preset = Preset::with_voices("Test Preset", vec![Voice::with_zone(zone)]);
    let preset_index = bank.add_preset(preset).unwrap();

    let sample = Sample::new(
        "Test Sample",
        vec![100, -100, 2000, -2000],
        44_100,
        SampleChannels::Mono,
        SampleLoop::default(),
    );
    bank.add_sample(sample).unwrap();

    bank.set_startup_preset(preset_index).unwrap();
    bank
}

pub fn be_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}
