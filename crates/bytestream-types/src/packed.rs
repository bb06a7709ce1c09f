use serde::{Deserialize, Serialize};

/// Highest byte value that still decodes as `true`.
pub const MAX_TRUTHY_BYTE: u8 = 0x40;

/// A boolean byte that may carry a small count.
///
/// Bytes `0x01..=0x40` are truthy and their value is kept as `count`; `0x00`
/// and anything above `0x40` decode to `false` with a zero count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackedBool {
    pub value: bool,
    pub count: i8,
}

impl PackedBool {
    pub const FALSE: Self = Self { value: false, count: 0 };

    pub const fn new(value: bool, count: i8) -> Self {
        Self { value, count }
    }

    /// Decode a raw wire byte.
    pub const fn from_byte(byte: u8) -> Self {
        if byte == 0 || byte > MAX_TRUTHY_BYTE {
            Self::FALSE
        } else {
            Self {
                value: true,
                count: byte as i8,
            }
        }
    }

    /// The byte a writer emits: `0x00` when false, the truncated count otherwise.
    pub const fn to_byte(&self) -> u8 {
        if self.value {
            self.count as u8
        } else {
            0
        }
    }
}

impl From<PackedBool> for bool {
    fn from(packed: PackedBool) -> Self {
        packed.value
    }
}
