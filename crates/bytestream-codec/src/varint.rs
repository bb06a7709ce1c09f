//! LEB128 variable-length integers with zig-zag signed mapping.

use bytes::BufMut;
use bytestream_types::sizes::MAX_VARINT_LEN_64;

use crate::error::{CodecError, CodecResult};

/// Map a signed value so that small magnitudes stay small.
pub fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

pub fn zigzag_decode(raw: u64) -> i64 {
    ((raw >> 1) as i64) ^ -((raw & 1) as i64)
}

/// Number of bytes `value` occupies as a uvarint.
pub fn uvarint_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}

/// Append `value` as a uvarint. The caller guarantees `uvarint_len(value)`
/// bytes of capacity.
pub fn encode_uvarint<B: BufMut>(buf: &mut B, mut value: u64) {
    while value >= 0x80 {
        buf.put_u8((value as u8) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

/// Decode a uvarint from the front of `data`. Returns (value, bytes_consumed).
pub fn decode_uvarint(data: &[u8]) -> CodecResult<(u64, usize)> {
    let mut value: u64 = 0;
    let mut shift = 0;
    for (i, &byte) in data.iter().enumerate() {
        // the 10th group holds only the top bit and must end the varint
        if i == MAX_VARINT_LEN_64 - 1 && byte > 1 {
            return Err(CodecError::Overflow("varint exceeds 64 bits".into()));
        }
        if byte < 0x80 {
            return Ok((value | (u64::from(byte) << shift), i + 1));
        }
        value |= u64::from(byte & 0x7F) << shift;
        shift += 7;
    }
    Err(CodecError::ShortRead {
        needed: data.len() + 1,
        remaining: data.len(),
    })
}
