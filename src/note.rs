#![doc = r#"
Note names for a zone's original key.

A stored key byte maps to a [`Key`] and an [`Octave`], where byte `60` is `C3`.
"#]

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

/// Highest storable note byte.
pub const MAX_NOTE_BYTE: u8 = 127;

#[doc = r#"
A MIDI style note number, as stored for a zone's original key.

Notes are interpreted as a 7-bit number. Each value corresponds to some
[`Key`] and [`Octave`] using the sampler's own convention, where byte `0`
is `C-2` and byte `60` is `C3`.

# Example
```rust
# use e4bank::prelude::*;

let note = Note::from_byte(63);

assert_eq!(note.key(), Key::DSharp);
assert_eq!(note.octave(), Octave::new(3));
```
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note(u8);

impl Default for Note {
    /// `C3`, the original key of a new zone.
    fn default() -> Self {
        Self::new(Key::C, Octave::new(3))
    }
}

impl Note {
    /// Create a note from a stored byte, clamping to [`MAX_NOTE_BYTE`].
    pub const fn from_byte(byte: u8) -> Self {
        if byte > MAX_NOTE_BYTE {
            Self(MAX_NOTE_BYTE)
        } else {
            Self(byte)
        }
    }

    /// Create all possible notes (128)
    pub fn all() -> [Note; 128] {
        core::array::from_fn(|i| Note(i as u8))
    }

    /// Create a note from a given key and octave.
    ///
    /// Combinations above `G8` clamp to `G8`.
    pub const fn new(key: Key, octave: Octave) -> Self {
        let octave_mult = (octave.value() + 2) as u8 * 12;
        Self::from_byte(octave_mult + key.get_mod_12())
    }

    /// Identifies the pitch class of the note
    #[inline]
    pub const fn key(&self) -> Key {
        Key::from_byte(self.0)
    }

    /// Returns true if the key of the note is sharp.
    #[inline]
    pub const fn is_sharp(&self) -> bool {
        self.key().is_sharp()
    }

    /// Identifies the octave of the note
    #[inline]
    pub const fn octave(&self) -> Octave {
        Octave::from_byte(self.0)
    }

    /// Returns the underlying byte of the note
    pub const fn byte(&self) -> u8 {
        self.0
    }
}

/// Efficiently make a note.
///
/// ## Example
/// ```rust
/// # use e4bank::prelude::*;
/// let my_note = e4bank::note!(C, 3);
/// assert_eq!(my_note, Note::from_byte(60));
/// ```
#[macro_export]
macro_rules! note {
    ($key:ident, $oct:literal) => {
        ::e4bank::prelude::Note::new(
            ::e4bank::prelude::Key::$key,
            ::e4bank::prelude::Octave::new($oct),
        )
    };
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.key(), self.octave())
    }
}

impl Add<u8> for Note {
    type Output = Note;
    fn add(self, rhs: u8) -> Self::Output {
        Self::from_byte(self.0.saturating_add(rhs))
    }
}

impl AddAssign<u8> for Note {
    fn add_assign(&mut self, rhs: u8) {
        *self = *self + rhs;
    }
}

impl Sub<u8> for Note {
    type Output = Note;
    fn sub(self, rhs: u8) -> Self::Output {
        Self(self.0.saturating_sub(rhs))
    }
}

impl SubAssign<u8> for Note {
    fn sub_assign(&mut self, rhs: u8) {
        self.0 = self.0.saturating_sub(rhs);
    }
}

#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[doc = r#"
The pitch class of a [`Note`]
"#]
pub enum Key {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl Key {
    /// Returns an array beginning with [`Key::C`] to [`Key::B`]
    pub fn all() -> [Key; 12] {
        use Key::*;
        [C, CSharp, D, DSharp, E, F, FSharp, G, GSharp, A, ASharp, B]
    }

    /// Returns true if the key is sharp.
    ///
    /// # Example
    /// ```rust
    /// # use e4bank::prelude::*;
    /// assert!(!Key::C.is_sharp());
    /// assert!(Key::FSharp.is_sharp());
    /// ```
    #[inline]
    pub const fn is_sharp(&self) -> bool {
        use Key::*;
        matches!(self, CSharp | DSharp | FSharp | GSharp | ASharp)
    }

    /// Identify the key from a note byte.
    #[inline]
    pub const fn from_byte(byte: u8) -> Self {
        use Key::*;
        match byte % 12 {
            0 => C,
            1 => CSharp,
            2 => D,
            3 => DSharp,
            4 => E,
            5 => F,
            6 => FSharp,
            7 => G,
            8 => GSharp,
            9 => A,
            10 => ASharp,
            _ => B,
        }
    }

    const fn get_mod_12(&self) -> u8 {
        *self as u8
    }

    /// Create a [`Note`] given this key and a provided [`Octave`]
    pub const fn with_octave(self, octave: Octave) -> Note {
        Note::new(self, octave)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Key::*;
        let name = match self {
            C => "C",
            CSharp => "C#",
            D => "D",
            DSharp => "D#",
            E => "E",
            F => "F",
            FSharp => "F#",
            G => "G",
            GSharp => "G#",
            A => "A",
            ASharp => "A#",
            B => "B",
        };
        f.write_str(name)
    }
}

#[doc = r#"
Identifies the octave for a [`Key`]. Values range from -2 to 8.

# Example

```rust
# use e4bank::prelude::*;

let octave = Octave::new(12); // clamps to 8

assert_eq!(octave.value(), 8);

let note = octave.with_key(Key::C);

assert_eq!(note.byte(), 120);
```
"#]
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Octave(i8);

impl Octave {
    /// Lowest octave.
    pub const MIN: i8 = -2;
    /// Highest octave.
    pub const MAX: i8 = 8;

    /// Identify an octave from a note byte.
    pub const fn from_byte(byte: u8) -> Self {
        Self::new((byte / 12) as i8 - 2)
    }

    /// Should be a value between [-2, 8]. Clamps between these two values.
    pub const fn new(mut octave: i8) -> Self {
        if octave < Self::MIN {
            octave = Self::MIN
        } else if octave > Self::MAX {
            octave = Self::MAX;
        }
        Self(octave)
    }

    /// The octave, from `[-2, 8]`
    pub const fn value(&self) -> i8 {
        self.0
    }

    /// Create a [`Note`] given this octave and a provided [`Key`]
    pub const fn with_key(self, key: Key) -> Note {
        Note::new(key, self)
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Add<i8> for Octave {
    type Output = Octave;
    fn add(self, rhs: i8) -> Self::Output {
        Self::new(self.0.saturating_add(rhs))
    }
}

impl Sub<i8> for Octave {
    type Output = Octave;
    fn sub(self, rhs: i8) -> Self::Output {
        Self::new(self.0.saturating_sub(rhs))
    }
}

#[test]
fn default_is_middle_c() {
    let note = Note::default();
    assert_eq!(note.byte(), 60);
    assert_eq!(note.to_string(), "C3");
}

#[test]
fn add_and_sub_saturate() {
    let mut note = Note::new(Key::C, Octave::new(8));
    note += 50;
    assert_eq!(note, Note::from_byte(127));
    assert_eq!(note.key(), Key::G);

    note -= 200;
    assert_eq!(note, Note::new(Key::C, Octave::new(-2)));
}

#[test]
fn clamps_past_the_top() {
    assert_eq!(Note::new(Key::B, Octave::new(8)).byte(), 127);
    assert_eq!(Note::from_byte(200).byte(), 127);
}

#[test]
fn note_from_key_octave_pairs() {
    for note in Note::all() {
        let made = Note::new(note.key(), note.octave());
        assert_eq!(made, note);
        assert_eq!(made.octave(), note.octave());
    }
}
