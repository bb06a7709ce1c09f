use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A 64-bit identifier carried on the wire as two 32-bit words.
///
/// The low word is always written first. The display form `(low, high)` is the
/// descriptor reported next to a resolved tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LogicLong {
    pub low: u32,
    pub high: u32,
}

impl LogicLong {
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// Pack into a single `u64` with `high` in the upper half.
    pub const fn to_u64(&self) -> u64 {
        ((self.high as u64) << 32) | self.low as u64
    }

    /// Split a `u64` into its two words.
    pub const fn from_u64(value: u64) -> Self {
        Self {
            low: value as u32,
            high: (value >> 32) as u32,
        }
    }

    /// The `(low, high)` descriptor.
    pub fn descriptor(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LogicLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

impl FromStr for LogicLong {
    type Err = TypeError;

    /// Parses `"(low, high)"`, `"low,high"` or `"low high"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')');
        let mut parts = inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty());
        let (Some(low), Some(high), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(TypeError::InvalidLogicLong(s.to_string()));
        };
        let low = low
            .parse()
            .map_err(|_| TypeError::InvalidLogicLong(s.to_string()))?;
        let high = high
            .parse()
            .map_err(|_| TypeError::InvalidLogicLong(s.to_string()))?;
        Ok(Self { low, high })
    }
}

impl From<(u32, u32)> for LogicLong {
    fn from((low, high): (u32, u32)) -> Self {
        Self { low, high }
    }
}
