//! Integers of any width from 1 to 8 bytes.
//!
//! The fixed 24-bit operations and the 40/48/56-bit extensions all go through
//! these helpers.

use bytestream_types::Endianness;

use crate::error::{CodecError, CodecResult};

pub const MAX_INT_WIDTH: usize = 8;

pub(crate) fn check_width(size: usize) -> CodecResult<()> {
    if size == 0 || size > MAX_INT_WIDTH {
        return Err(CodecError::InvalidArgument(format!(
            "integer width {size} (expected 1..={MAX_INT_WIDTH})"
        )));
    }
    Ok(())
}

/// Largest unsigned value of a `size`-byte field.
pub(crate) fn uint_max(size: usize) -> u64 {
    u64::MAX >> (64 - size * 8)
}

/// Signed range of a `size`-byte field.
pub(crate) fn int_range(size: usize) -> (i64, i64) {
    let max = (uint_max(size) >> 1) as i64;
    (-max - 1, max)
}

/// Zero-extended value of `bytes`.
pub(crate) fn decode_uint(bytes: &[u8], endianness: Endianness) -> u64 {
    let fold = |acc: u64, &b: &u8| (acc << 8) | u64::from(b);
    match endianness {
        Endianness::Big => bytes.iter().fold(0, fold),
        Endianness::Little => bytes.iter().rev().fold(0, fold),
    }
}

/// Sign-extend the low `size` bytes of `value`.
pub(crate) fn sign_extend(value: u64, size: usize) -> i64 {
    let shift = 64 - size * 8;
    ((value << shift) as i64) >> shift
}

/// Encode the low `size` bytes of `value`; only `buf[..size]` is meaningful.
pub(crate) fn encode_uint(value: u64, size: usize, endianness: Endianness) -> [u8; MAX_INT_WIDTH] {
    let mut buf = [0u8; MAX_INT_WIDTH];
    match endianness {
        Endianness::Big => buf[..size].copy_from_slice(&value.to_be_bytes()[MAX_INT_WIDTH - size..]),
        Endianness::Little => buf[..size].copy_from_slice(&value.to_le_bytes()[..size]),
    }
    buf
}

pub(crate) fn check_int(value: i64, size: usize, field: &str) -> CodecResult<()> {
    let (min, max) = int_range(size);
    if value < min || value > max {
        return Err(CodecError::Overflow(format!(
            "{field}: {value} outside [{min}, {max}]"
        )));
    }
    Ok(())
}

pub(crate) fn check_uint(value: u64, size: usize, field: &str) -> CodecResult<()> {
    let max = uint_max(size);
    if value > max {
        return Err(CodecError::Overflow(format!("{field}: {value} above {max}")));
    }
    Ok(())
}
