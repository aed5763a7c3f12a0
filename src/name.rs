//! Fixed width names.
//!
//! Presets, samples, sequences and the startup state all store a 16 byte
//! name. On disk names are padded with spaces, never with NUL.

/// Width of every stored name.
pub const NAME_LEN: usize = 16;

/// Normalize `name` into its stored form.
///
/// Characters outside Latin-1 become `?`, NUL becomes a space, and the result
/// is truncated or space padded to [`NAME_LEN`] bytes.
pub fn to_name_bytes(name: &str) -> [u8; NAME_LEN] {
    let mut out = [b' '; NAME_LEN];
    for (slot, ch) in out.iter_mut().zip(name.chars()) {
        *slot = match u8::try_from(ch) {
            Ok(0) => b' ',
            Ok(byte) => byte,
            Err(_) => b'?',
        };
    }
    out
}

/// Decode a stored name. The result is always [`NAME_LEN`] characters long.
pub fn name_from_bytes(bytes: &[u8; NAME_LEN]) -> String {
    bytes
        .iter()
        .map(|&b| if b == 0 { ' ' } else { char::from(b) })
        .collect()
}

/// [`to_name_bytes`] followed by [`name_from_bytes`].
pub fn normalize(name: &str) -> String {
    name_from_bytes(&to_name_bytes(name))
}

#[test]
fn pads_and_truncates() {
    assert_eq!(normalize("Test Preset"), "Test Preset     ");
    assert_eq!(
        normalize("A name that is far too long"),
        "A name that is f"
    );
    assert_eq!(normalize(""), " ".repeat(NAME_LEN));
}

#[test]
fn replaces_nul_and_wide_chars() {
    let bytes = to_name_bytes("a\0b\u{263A}");
    assert_eq!(&bytes[..4], b"a b?");

    let mut stored = [0u8; NAME_LEN];
    stored[..3].copy_from_slice(b"Pad");
    assert_eq!(name_from_bytes(&stored), "Pad             ");
}
