use crate::ChunkError;
use core::fmt;

#[doc = r#"
The four byte tag that opens every chunk.

# Example
```rust
# use e4bank::prelude::*;
let name = ChunkName::new("E4P1").unwrap();
assert_eq!(name, ChunkName::E4P1);

assert!(ChunkName::new("E4P").is_err());
```
"#]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkName([u8; 4]);

impl ChunkName {
    /// Outer container
    pub const FORM: Self = Self(*b"FORM");
    /// Bank format identifier, the first four payload bytes of `FORM`
    pub const E4B0: Self = Self(*b"E4B0");
    /// Table of contents
    pub const TOC1: Self = Self(*b"TOC1");
    /// Preset
    pub const E4P1: Self = Self(*b"E4P1");
    /// Sample
    pub const E3S1: Self = Self(*b"E3S1");
    /// Sequence
    pub const E4S1: Self = Self(*b"E4s1");
    /// Maintenance block, skipped
    pub const E4MA: Self = Self(*b"E4Ma");
    /// Multi setup, skipped
    pub const EMS0: Self = Self(*b"EMS0");
    /// Startup state
    pub const EMST: Self = Self(*b"EMSt");

    /// Create a name from a string, which must be exactly four bytes.
    pub fn new(name: &str) -> Result<Self, ChunkError> {
        let bytes: [u8; 4] = name
            .as_bytes()
            .try_into()
            .map_err(|_| ChunkError::NameLength(name.len()))?;
        Ok(Self(bytes))
    }

    /// Create a name from raw bytes
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// The raw tag
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Display for ChunkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ChunkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChunkName({self})")
    }
}

#[test]
fn display_escapes_binary() {
    assert_eq!(ChunkName::E4S1.to_string(), "E4s1");
    assert_eq!(ChunkName::from_bytes([b'A', 0, b'B', 0xff]).to_string(), "A\\x00B\\xff");
    assert_eq!(ChunkName::new("FORMS"), Err(ChunkError::NameLength(5)));
}
