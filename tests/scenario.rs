mod common;

use common::{be_u32, scenario_bank};
use e4bank::{file::read_status, prelude::*};
use pretty_assertions::assert_eq;

#[test]
fn scenario_layout() {
    let bytes = scenario_bank().to_bytes().unwrap();

    assert_eq!(bytes.len(), 1966);
    assert_eq!(&bytes[0..4], b"FORM");
    assert_eq!(be_u32(&bytes, 4), 1958);
    assert_eq!(&bytes[8..12], b"E4B0");
    assert_eq!(&bytes[12..16], b"TOC1");
    assert_eq!(be_u32(&bytes, 16), 64);

    // preset entry
    assert_eq!(&bytes[20..24], b"E4P1");
    assert_eq!(be_u32(&bytes, 24), 388);
    assert_eq!(be_u32(&bytes, 28), 84);
    assert_eq!(&bytes[32..34], &[0, 0]);
    assert_eq!(&bytes[34..50], b"Test Preset     ");
    assert_eq!(&bytes[50..52], &[0, 0]);

    // sample entry
    assert_eq!(&bytes[52..56], b"E3S1");
    assert_eq!(be_u32(&bytes, 56), 100);
    assert_eq!(be_u32(&bytes, 60), 482);
    assert_eq!(&bytes[66..82], b"Test Sample     ");

    // the entries point at the blocks
    assert_eq!(&bytes[84..88], b"E4P1");
    assert_eq!(be_u32(&bytes, 88), 390);
    assert_eq!(&bytes[482..486], b"E3S1");
    assert_eq!(be_u32(&bytes, 486), 102);
    assert_eq!(&bytes[592..596], b"EMSt");
    assert_eq!(be_u32(&bytes, 596), 1366);
}

#[test]
fn scenario_decodes() {
    let bytes = scenario_bank().to_bytes().unwrap();
    let bank = Bank::parse(bytes).unwrap();

    assert_eq!(bank.presets().len(), 1);
    let preset = &bank.presets()[0];
    assert_eq!(preset.name(), "Test Preset     ");
    assert_eq!(preset.voices().len(), 1);
    assert_eq!(preset.voices()[0].zones()[0].sample_index(), 0);
    assert_eq!(preset.voices()[0].zones()[0].key_range(), &NoteRange::new(0, 127));

    assert_eq!(bank.samples().len(), 1);
    let sample = &bank.samples()[0];
    assert_eq!(sample.sample_rate(), 44_100);
    assert_eq!(sample.frames(), 4);
    assert_eq!(sample.channel_data(SampleChannel::Left), &[100, -100, 2000, -2000]);

    assert_eq!(bank.startup_preset(), preset.index());
    assert_eq!(bank.startup_state().name(), "Untitled MSetup ");
}

#[test]
fn encoding_a_decoded_bank_is_stable() {
    let first = scenario_bank().to_bytes().unwrap();
    let decoded = Bank::parse(first.as_slice()).unwrap();
    let second = decoded.to_bytes().unwrap();
    assert_eq!(first, second);
    assert_eq!(Bank::parse(second).unwrap(), decoded);
}

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario.E4B");

    let bank = scenario_bank();
    bank.write_file(&path).unwrap();

    let result = Bank::read_file(&path);
    assert_eq!(read_status(&result), ReadStatus::Success);
    let read = result.unwrap();
    assert_eq!(read.to_bytes().unwrap(), bank.to_bytes().unwrap());
}

#[test]
fn sequences_and_startup_state_survive() {
    let mut bank = scenario_bank();
    bank.add_sequence(Sequence::new("Groove", b"MThd\0\0\0\x06\0\0\0\x01\0\x60".to_vec()))
        .unwrap();
    bank.startup_state_mut().set_tempo(120);
    bank.startup_state_mut().channels_mut()[0].set_preset(Some(0));

    let decoded = Bank::parse(bank.to_bytes().unwrap()).unwrap();
    assert_eq!(decoded.sequences(), bank.sequences());
    assert_eq!(decoded.startup_state(), bank.startup_state());
}

#[test]
fn explicit_indices_are_kept() {
    let mut bank = Bank::new();
    for index in [12, 3, 999] {
        let mut preset = Preset::with_voices("p", vec![Voice::with_zone(SampleZone::default())]);
        preset.set_index(index);
        bank.add_preset(preset).unwrap();
    }
    bank.set_startup_preset(NO_STARTUP_PRESET).unwrap();

    let decoded = Bank::parse(bank.to_bytes().unwrap()).unwrap();
    let indices: Vec<u16> = decoded.presets().iter().map(Preset::index).collect();
    assert_eq!(indices, vec![12, 3, 999]);
    assert_eq!(decoded.startup_preset(), NO_STARTUP_PRESET);
}
