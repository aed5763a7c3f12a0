mod common;

use common::scenario_bank;
use e4bank::{file::read_status, prelude::*};

fn parse_error(bytes: &[u8]) -> ReaderError {
    Bank::parse(bytes).unwrap_err()
}

#[test]
fn unknown_block_tag() {
    let mut bytes = scenario_bank().to_bytes().unwrap();
    bytes[20..24].copy_from_slice(b"XXXX");

    let err = parse_error(&bytes);
    assert!(matches!(
        err.error_kind(),
        ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::UnknownSubBlock(name)))
            if name.as_bytes() == b"XXXX"
    ));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.e4b");
    std::fs::write(&path, &bytes).unwrap();
    assert_eq!(read_status(&Bank::read_file(&path)), ReadStatus::FileInvalid);
}

#[test]
fn wrong_magic() {
    let mut bytes = scenario_bank().to_bytes().unwrap();
    bytes[8..12].copy_from_slice(b"E4B1");
    assert!(matches!(
        parse_error(&bytes).error_kind(),
        ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::UnexpectedName { .. }))
    ));

    let mut bytes = scenario_bank().to_bytes().unwrap();
    bytes[12..16].copy_from_slice(b"TOC2");
    assert!(matches!(
        parse_error(&bytes).error_kind(),
        ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::UnexpectedName { .. }))
    ));
}

#[test]
fn empty_table_of_contents() {
    let bytes = b"FORM\0\0\0\x0cE4B0TOC1\0\0\0\0";
    assert!(matches!(
        parse_error(bytes).error_kind(),
        ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::EmptyToc))
    ));
}

#[test]
fn oversized_table_entry() {
    let mut bytes = scenario_bank().to_bytes().unwrap();
    bytes[56..60].copy_from_slice(&u32::MAX.to_be_bytes());
    assert!(parse_error(&bytes).is_out_of_bounds());

    bytes[52..56].copy_from_slice(b"E4Ma");
    let bank = Bank::parse(&bytes[..]).unwrap();
    assert_eq!(bank.presets().len(), 1);
    assert!(bank.samples().is_empty());
}

#[test]
fn truncated_block() {
    let bytes = scenario_bank().to_bytes().unwrap();
    assert!(parse_error(&bytes[..500]).is_out_of_bounds());
    assert!(parse_error(&bytes[..10]).is_out_of_bounds());
}

#[test]
fn missing_or_damaged_startup_state() {
    let bytes = scenario_bank().to_bytes().unwrap();

    let bank = Bank::parse(&bytes[..592]).unwrap();
    assert_eq!(bank.presets().len(), 1);

    let bank = Bank::parse(&bytes[..700]).unwrap();
    assert_eq!(bank.samples().len(), 1);
}

#[test]
fn voice_without_zones() {
    let mut bank = Bank::new();
    bank.add_preset(Preset::with_voices("Empty", vec![Voice::default()]))
        .unwrap();
    let bytes = bank.to_bytes().unwrap();

    assert!(matches!(
        parse_error(&bytes).error_kind(),
        ReaderErrorKind::ParseError(ParseError::Voice(VoiceError::NoZones))
    ));
}

#[test]
fn duplicate_entries_keep_the_first() {
    let mut bytes = scenario_bank().to_bytes().unwrap();
    // point the sample entry at the preset block
    bytes[52..56].copy_from_slice(b"E4P1");
    bytes[56..60].copy_from_slice(&388u32.to_be_bytes());
    bytes[60..64].copy_from_slice(&84u32.to_be_bytes());

    let bank = Bank::parse(bytes).unwrap();
    assert_eq!(bank.presets().len(), 1);
    assert!(bank.samples().is_empty());
}

#[test]
fn path_checks() {
    let dir = tempfile::tempdir().unwrap();

    let missing = Bank::read_file(dir.path().join("missing.e4b"));
    assert!(matches!(missing, Err(FileError::NotExist(_))));
    assert_eq!(read_status(&missing), ReadStatus::FileNotExist);

    let wrong = Bank::read_file(dir.path().join("bank.wav"));
    assert_eq!(read_status(&wrong), ReadStatus::FileInvalid);

    let target = dir.path().join("bank.wav");
    scenario_bank().write_file(&target).unwrap();
    assert!(!target.exists());
}
