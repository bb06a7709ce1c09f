//! Wire widths, in bytes, shared by the reader and the writer.

pub const BYTE_SIZE: usize = 1;
pub const BOOL_SIZE: usize = BYTE_SIZE;
pub const INT8_SIZE: usize = BYTE_SIZE;
pub const INT16_SIZE: usize = INT8_SIZE * 2;
pub const INT24_SIZE: usize = INT16_SIZE + INT8_SIZE;
pub const INT32_SIZE: usize = INT16_SIZE * 2;
pub const INT64_SIZE: usize = INT32_SIZE * 2;

/// Width of a long with [`LongWidth::Bits64`](crate::LongWidth::Bits64).
pub const LONG_SIZE: usize = INT64_SIZE;
pub const LOGIC_LONG_SIZE: usize = INT32_SIZE * 2;
pub const LONG_LONG_SIZE: usize = INT64_SIZE;

/// Length prefix of plain and compressed strings.
pub const STRING_LENGTH_SIZE: usize = INT32_SIZE;

/// Maximum number of 7-bit groups in a 64-bit varint.
pub const MAX_VARINT_LEN_64: usize = 10;

/// Length value that marks an absent string.
pub const ABSENT_STRING_LENGTH: i32 = -1;
