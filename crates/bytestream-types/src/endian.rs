use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::sizes;

/// Byte order of a multi-byte integer on the wire.
///
/// There is no ambient byte order: every operation wider than one byte takes
/// an `Endianness` explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

impl Endianness {
    /// Short lowercase name (`"be"` / `"le"`).
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Big => "be",
            Self::Little => "le",
        }
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Big => write!(f, "big-endian"),
            Self::Little => write!(f, "little-endian"),
        }
    }
}

impl FromStr for Endianness {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "be" | "big" | "big-endian" => Ok(Self::Big),
            "le" | "little" | "little-endian" => Ok(Self::Little),
            _ => Err(TypeError::InvalidEndianness(s.to_string())),
        }
    }
}

/// Wire width of the "long" field.
///
/// Historically a long was as wide as the producing machine's word. The width
/// is fixed when a cursor or sink is constructed so that output does not
/// depend on the host architecture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LongWidth {
    /// 4-byte longs.
    Bits32,
    /// 8-byte longs.
    #[default]
    Bits64,
}

impl LongWidth {
    /// Number of bytes a long occupies on the wire.
    pub const fn size(&self) -> usize {
        match self {
            Self::Bits32 => sizes::INT32_SIZE,
            Self::Bits64 => sizes::LONG_SIZE,
        }
    }
}

impl fmt::Display for LongWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits32 => write!(f, "32-bit"),
            Self::Bits64 => write!(f, "64-bit"),
        }
    }
}

impl FromStr for LongWidth {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "32" | "bits32" | "32-bit" => Ok(Self::Bits32),
            "64" | "bits64" | "64-bit" => Ok(Self::Bits64),
            _ => Err(TypeError::InvalidLongWidth(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endianness_parses_aliases() {
        assert_eq!("be".parse::<Endianness>().unwrap(), Endianness::Big);
        assert_eq!("BIG".parse::<Endianness>().unwrap(), Endianness::Big);
        assert_eq!("le".parse::<Endianness>().unwrap(), Endianness::Little);
        assert_eq!("little-endian".parse::<Endianness>().unwrap(), Endianness::Little);
    }

    #[test]
    fn endianness_rejects_unknown() {
        let err = "middle".parse::<Endianness>().unwrap_err();
        assert_eq!(err, TypeError::InvalidEndianness("middle".into()));
    }

    #[test]
    fn endianness_has_no_implicit_value() {
        assert!("".parse::<Endianness>().is_err());
        assert!(serde_json::from_str::<Endianness>("null").is_err());
    }

    #[test]
    fn long_width_sizes() {
        assert_eq!(LongWidth::Bits32.size(), 4);
        assert_eq!(LongWidth::Bits64.size(), 8);
        assert_eq!(LongWidth::default(), LongWidth::Bits64);
    }

    #[test]
    fn long_width_parses() {
        assert_eq!("32".parse::<LongWidth>().unwrap(), LongWidth::Bits32);
        assert_eq!("64-bit".parse::<LongWidth>().unwrap(), LongWidth::Bits64);
        assert!("16".parse::<LongWidth>().is_err());
    }

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&Endianness::Little).unwrap(), "\"little\"");
        assert_eq!(serde_json::to_string(&LongWidth::Bits32).unwrap(), "\"bits32\"");
        let parsed: LongWidth = serde_json::from_str("\"bits64\"").unwrap();
        assert_eq!(parsed, LongWidth::Bits64);
    }
}
