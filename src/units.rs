#![doc = r#"
Conversions between the raw bytes stored in a bank and the units shown on the
front panel.

Every pair in here is idempotent over the bytes a device can store: decoding a
byte and encoding the result yields the same byte. Encoders clamp their input
to the documented range first, so out of range values saturate instead of
wrapping.
"#]

/// `ln(20000)`, the top of the filter frequency curve.
pub const FILTER_LN_MAX: f64 = 9.903_487_552_536_128;
/// `ln(57)`, the bottom of the filter frequency curve.
pub const FILTER_LN_MIN: f64 = 4.043_051_267_834_550;
/// Lowest filter frequency, in hertz.
pub const MIN_FILTER_FREQUENCY: u16 = 57;
/// Highest filter frequency, in hertz.
pub const MAX_FILTER_FREQUENCY: u16 = 20_000;

const FILTER_BYTE_MAX: f64 = 255.0;
const FINE_TUNE_STEP: f64 = 1.5625;
const FINE_TUNE_CENTER: f64 = 64.0;
const CHORUS_WIDTH_STEP: f32 = 0.78125;

const LFO_RATE_A: f64 = 1.64054;
const LFO_RATE_B: f64 = 1.01973;
const LFO_RATE_C: f64 = -1.57702;

const LFO_DELAY_A: f64 = 0.149998;
const LFO_DELAY_B: f64 = 1.04;
const LFO_DELAY_C: f64 = -0.150012;

/// Slowest LFO rate a voice accepts, in hertz.
pub const MIN_LFO_RATE: f64 = 0.08;
/// Rate stored as byte 0, just below [`MIN_LFO_RATE`].
pub const LFO_RATE_FLOOR: f64 = LFO_RATE_A + LFO_RATE_C;
/// Fastest LFO rate a voice accepts, in hertz.
pub const MAX_LFO_RATE: f64 = 18.01;
/// Longest LFO delay, in seconds.
pub const MAX_LFO_DELAY: f64 = 21.694;
/// Largest byte the LFO curves are defined for.
pub const MAX_LFO_BYTE: u8 = 127;

/// Round `value` up (towards positive infinity) to `places` decimal places.
pub fn round_up(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).ceil() / scale
}

/// [`round_up`] for single precision values.
pub fn round_up_f32(value: f32, places: u32) -> f32 {
    let scale = 10f32.powi(places as i32);
    (value * scale).ceil() / scale
}

/// `[0, 127]` to `[0%, 100%]`.
pub fn percent_from_byte(byte: u8) -> f32 {
    byte as f32 / 127.0 * 100.0
}

/// `[0%, 100%]` to `[0, 127]`.
pub fn byte_from_percent(percent: f32) -> u8 {
    (percent.clamp(0.0, 100.0) * 127.0 / 100.0).round() as u8
}

/// `[-127, 127]` to `[-100%, 100%]`.
pub fn percent_from_signed_byte(byte: i8) -> f32 {
    byte as f32 / 127.0 * 100.0
}

/// `[-100%, 100%]` to `[-127, 127]`.
pub fn signed_byte_from_percent(percent: f32) -> i8 {
    (percent.clamp(-100.0, 100.0) * 127.0 / 100.0).round() as i8
}

/// `[0, 255]` to `[57, 20000]` hertz on an exponential curve.
pub fn filter_frequency_from_byte(byte: u8) -> u16 {
    let t = byte as f64 / FILTER_BYTE_MAX;
    (t * (FILTER_LN_MAX - FILTER_LN_MIN) + FILTER_LN_MIN)
        .exp()
        .round() as u16
}

/// `[57, 20000]` hertz to `[0, 255]`.
pub fn byte_from_filter_frequency(hertz: u16) -> u8 {
    let hertz = hertz.clamp(MIN_FILTER_FREQUENCY, MAX_FILTER_FREQUENCY) as f64;
    ((hertz.ln() - FILTER_LN_MIN) / (FILTER_LN_MAX - FILTER_LN_MIN) * FILTER_BYTE_MAX).round() as u8
}

/// `[-64, 64]` to `[-100, 100]` cents, rounded up to two places.
pub fn fine_tune_from_byte(byte: i8) -> f64 {
    round_up(
        (byte as f64 - FINE_TUNE_CENTER) * FINE_TUNE_STEP + 100.0,
        2,
    )
}

/// `[-100, 100]` cents to `[-64, 64]`.
pub fn byte_from_fine_tune(cents: f64) -> i8 {
    ((cents.clamp(-100.0, 100.0) - 100.0) / FINE_TUNE_STEP + FINE_TUNE_CENTER).round() as i8
}

/// `[0, 127]` to roughly `[0.06, 18.04]` hertz.
pub fn lfo_rate_from_byte(byte: u8) -> f64 {
    LFO_RATE_A * LFO_RATE_B.powi(byte as i32) + LFO_RATE_C
}

/// Hertz to `[0, 127]`.
///
/// The lower clamp is [`LFO_RATE_FLOOR`] rather than [`MIN_LFO_RATE`], so
/// that the slowest stored rate survives a round trip.
pub fn byte_from_lfo_rate(hertz: f64) -> u8 {
    let hertz = hertz.clamp(LFO_RATE_FLOOR, MAX_LFO_RATE);
    let byte = (((hertz - LFO_RATE_C) / LFO_RATE_A).ln() / LFO_RATE_B.ln()).round();
    (byte as u8).min(MAX_LFO_BYTE)
}

/// `[0, 127]` to `[0, 21.694]` seconds.
pub fn lfo_delay_from_byte(byte: u8) -> f64 {
    (LFO_DELAY_A * LFO_DELAY_B.powi(byte as i32) + LFO_DELAY_C).max(0.0)
}

/// `[0, 21.694]` seconds to `[0, 127]`.
pub fn byte_from_lfo_delay(seconds: f64) -> u8 {
    let seconds = seconds.clamp(0.0, MAX_LFO_DELAY);
    let byte = (((seconds - LFO_DELAY_C) / LFO_DELAY_A).ln() / LFO_DELAY_B.ln()).round();
    (byte as u8).min(MAX_LFO_BYTE)
}

/// `[-128, 0]` to `[0%, 100%]`.
pub fn chorus_width_from_byte(byte: i8) -> f32 {
    round_up_f32(((byte as f32 + 128.0) * CHORUS_WIDTH_STEP).abs(), 2).clamp(0.0, 100.0)
}

/// `[0%, 100%]` to `[-128, 0]`.
pub fn byte_from_chorus_width(percent: f32) -> i8 {
    ((percent.clamp(0.0, 100.0) / CHORUS_WIDTH_STEP).round() - 128.0) as i8
}

#[test]
fn filter_frequency_endpoints() {
    assert_eq!(filter_frequency_from_byte(0), 57);
    assert_eq!(filter_frequency_from_byte(255), 20_000);
    assert_eq!(byte_from_filter_frequency(20_000), 255);
    assert_eq!(byte_from_filter_frequency(10), 0);
    assert_eq!(byte_from_filter_frequency(u16::MAX), 255);
}

#[test]
fn filter_frequency_is_idempotent() {
    for byte in 0..=u8::MAX {
        assert_eq!(
            byte_from_filter_frequency(filter_frequency_from_byte(byte)),
            byte
        );
    }
}

#[test]
fn fine_tune_is_idempotent() {
    assert_eq!(fine_tune_from_byte(0), 0.0);
    assert_eq!(fine_tune_from_byte(64), 100.0);
    assert_eq!(fine_tune_from_byte(-64), -100.0);
    for byte in -64..=64 {
        assert_eq!(byte_from_fine_tune(fine_tune_from_byte(byte)), byte);
    }
    assert_eq!(byte_from_fine_tune(250.0), 64);
}

#[test]
fn lfo_curves_are_idempotent() {
    for byte in 0..=MAX_LFO_BYTE {
        assert_eq!(byte_from_lfo_rate(lfo_rate_from_byte(byte)), byte);
        assert_eq!(byte_from_lfo_delay(lfo_delay_from_byte(byte)), byte);
    }
    assert_eq!(byte_from_lfo_rate(1000.0), MAX_LFO_BYTE);
    assert_eq!(byte_from_lfo_rate(-3.0), 0);
    assert_eq!(byte_from_lfo_delay(-1.0), 0);
}

#[test]
fn percent_is_idempotent() {
    for byte in 0..=127u8 {
        assert_eq!(byte_from_percent(percent_from_byte(byte)), byte);
        // resonance and chorus amount are rounded up before storage
        assert_eq!(
            byte_from_percent(round_up_f32(percent_from_byte(byte), 1)),
            byte
        );
    }
    for byte in -127..=127i8 {
        assert_eq!(signed_byte_from_percent(percent_from_signed_byte(byte)), byte);
    }
    assert_eq!(byte_from_percent(150.0), 127);
    assert_eq!(signed_byte_from_percent(-150.0), -127);
}

#[test]
fn chorus_width_is_idempotent() {
    assert_eq!(chorus_width_from_byte(0), 100.0);
    assert_eq!(chorus_width_from_byte(-128), 0.0);
    assert_eq!(byte_from_chorus_width(100.0), 0);
    for byte in -128..=0i8 {
        assert_eq!(byte_from_chorus_width(chorus_width_from_byte(byte)), byte);
    }
}
