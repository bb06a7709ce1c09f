use std::fmt;

use bytes::Buf;
use bytestream_types::sizes::{INT16_SIZE, INT24_SIZE, INT32_SIZE, INT64_SIZE, LONG_LONG_SIZE};
use bytestream_types::{Endianness, LogicLong, LongWidth, PackedBool, TagBridge};
use tracing::trace;

use crate::compress::inflate;
use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use crate::varint::{decode_uvarint, zigzag_decode};
use crate::width::{check_width, decode_uint, sign_extend};

/// A logic long read from the wire together with its display tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLogicLong {
    pub id: LogicLong,
    pub tag: String,
}

impl ResolvedLogicLong {
    /// The `(low, high)` descriptor of the identifier.
    pub fn descriptor(&self) -> String {
        self.id.descriptor()
    }
}

impl fmt::Display for ResolvedLogicLong {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tag, self.id)
    }
}

/// Decodes primitives from a byte slice at a tracked offset.
///
/// Every read is atomic: on error the offset is left where it was before the
/// call, including for compound reads such as a length prefix followed by a
/// payload.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    config: CodecConfig,
}

impl<'a> ByteCursor<'a> {
    /// Cursor at offset 0 with the default configuration.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, CodecConfig::default())
    }

    /// Cursor at offset 0 reading longs per `config`.
    pub fn with_config(data: &'a [u8], config: CodecConfig) -> Self {
        Self {
            data,
            pos: 0,
            config,
        }
    }

    /// Configuration the cursor was built with.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Wire width used by [`read_long`](Self::read_long).
    pub fn long_width(&self) -> LongWidth {
        self.config.long_width
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The unread tail, consuming the cursor.
    pub fn into_remaining(self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Run `f`, rewinding to the current offset if it fails.
    fn atomic<T>(&mut self, f: impl FnOnce(&mut Self) -> CodecResult<T>) -> CodecResult<T> {
        let start = self.pos;
        let result = f(self);
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    fn take(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(CodecError::ShortRead {
                needed: n,
                remaining,
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// The next `n` bytes verbatim. Never returns a partial slice.
    pub fn read_bytes(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        self.take(n)
    }

    /// Advance past `n` bytes without decoding them.
    pub fn skip(&mut self, n: usize) -> CodecResult<()> {
        self.take(n).map(|_| ())
    }

    /// The next byte, without advancing.
    pub fn peek_uint8(&self) -> CodecResult<u8> {
        self.data.get(self.pos).copied().ok_or(CodecError::ShortRead {
            needed: 1,
            remaining: 0,
        })
    }

    /// A boolean byte with its embedded count; see [`PackedBool`].
    pub fn read_bool(&mut self) -> CodecResult<PackedBool> {
        Ok(PackedBool::from_byte(self.read_uint8()?))
    }

    /// One byte as a signed integer.
    pub fn read_int8(&mut self) -> CodecResult<i8> {
        Ok(self.read_uint8()? as i8)
    }

    /// One byte.
    pub fn read_uint8(&mut self) -> CodecResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Two bytes, two's complement.
    pub fn read_int16(&mut self, endianness: Endianness) -> CodecResult<i16> {
        let mut b = self.take(INT16_SIZE)?;
        Ok(match endianness {
            Endianness::Big => b.get_i16(),
            Endianness::Little => b.get_i16_le(),
        })
    }

    /// Two bytes.
    pub fn read_uint16(&mut self, endianness: Endianness) -> CodecResult<u16> {
        let mut b = self.take(INT16_SIZE)?;
        Ok(match endianness {
            Endianness::Big => b.get_u16(),
            Endianness::Little => b.get_u16_le(),
        })
    }

    /// Three bytes, sign-extended into an `i32`.
    pub fn read_int24(&mut self, endianness: Endianness) -> CodecResult<i32> {
        let raw = decode_uint(self.take(INT24_SIZE)?, endianness);
        Ok(sign_extend(raw, INT24_SIZE) as i32)
    }

    /// Three bytes, zero-extended into a `u32`.
    pub fn read_uint24(&mut self, endianness: Endianness) -> CodecResult<u32> {
        Ok(decode_uint(self.take(INT24_SIZE)?, endianness) as u32)
    }

    /// Four bytes, two's complement.
    pub fn read_int32(&mut self, endianness: Endianness) -> CodecResult<i32> {
        let mut b = self.take(INT32_SIZE)?;
        Ok(match endianness {
            Endianness::Big => b.get_i32(),
            Endianness::Little => b.get_i32_le(),
        })
    }

    /// Four bytes.
    pub fn read_uint32(&mut self, endianness: Endianness) -> CodecResult<u32> {
        let mut b = self.take(INT32_SIZE)?;
        Ok(match endianness {
            Endianness::Big => b.get_u32(),
            Endianness::Little => b.get_u32_le(),
        })
    }

    /// Eight bytes, two's complement.
    pub fn read_int64(&mut self, endianness: Endianness) -> CodecResult<i64> {
        let mut b = self.take(INT64_SIZE)?;
        Ok(match endianness {
            Endianness::Big => b.get_i64(),
            Endianness::Little => b.get_i64_le(),
        })
    }

    /// Eight bytes.
    pub fn read_uint64(&mut self, endianness: Endianness) -> CodecResult<u64> {
        let mut b = self.take(INT64_SIZE)?;
        Ok(match endianness {
            Endianness::Big => b.get_u64(),
            Endianness::Little => b.get_u64_le(),
        })
    }

    /// A signed integer of `size` bytes (1..=8), sign-extended from its top bit.
    pub fn read_int_size(&mut self, size: usize, endianness: Endianness) -> CodecResult<i64> {
        check_width(size)?;
        let raw = decode_uint(self.take(size)?, endianness);
        Ok(sign_extend(raw, size))
    }

    /// An unsigned integer of `size` bytes (1..=8).
    pub fn read_uint_size(&mut self, size: usize, endianness: Endianness) -> CodecResult<u64> {
        check_width(size)?;
        Ok(decode_uint(self.take(size)?, endianness))
    }

    /// A zig-zag encoded varint.
    pub fn read_varint(&mut self) -> CodecResult<i64> {
        self.read_uvarint().map(zigzag_decode)
    }

    /// An unsigned LEB128 varint of at most 10 bytes.
    pub fn read_uvarint(&mut self) -> CodecResult<u64> {
        let (value, consumed) = decode_uvarint(&self.data[self.pos..])?;
        self.pos += consumed;
        Ok(value)
    }

    /// A long of the configured [`LongWidth`], sign-extended to `i64`.
    pub fn read_long(&mut self, endianness: Endianness) -> CodecResult<i64> {
        match self.config.long_width {
            LongWidth::Bits64 => self.read_int64(endianness),
            LongWidth::Bits32 => self.read_int32(endianness).map(i64::from),
        }
    }

    /// An unsigned long of the configured [`LongWidth`].
    pub fn read_unsigned_long(&mut self, endianness: Endianness) -> CodecResult<u64> {
        match self.config.long_width {
            LongWidth::Bits64 => self.read_uint64(endianness),
            LongWidth::Bits32 => self.read_uint32(endianness).map(u64::from),
        }
    }

    /// Always 8 bytes, whatever the configured long width.
    pub fn read_longlong(&mut self, endianness: Endianness) -> CodecResult<i64> {
        let mut b = self.take(LONG_LONG_SIZE)?;
        Ok(match endianness {
            Endianness::Big => b.get_i64(),
            Endianness::Little => b.get_i64_le(),
        })
    }

    /// Always 8 bytes, whatever the configured long width.
    pub fn read_unsigned_longlong(&mut self, endianness: Endianness) -> CodecResult<u64> {
        let mut b = self.take(LONG_LONG_SIZE)?;
        Ok(match endianness {
            Endianness::Big => b.get_u64(),
            Endianness::Little => b.get_u64_le(),
        })
    }

    /// A string behind a 4-byte big-endian signed length. `-1` is an absent
    /// string and reads as empty.
    pub fn read_string(&mut self) -> CodecResult<String> {
        self.atomic(|c| {
            let len = c.read_int32(Endianness::Big)?;
            c.read_string_with_length(i64::from(len))
        })
    }

    /// A string whose length prefix is a big-endian signed integer of `width`
    /// bytes, as written by [`ByteSink::write_string_with_size`](crate::ByteSink::write_string_with_size).
    pub fn read_string_with_size(&mut self, width: usize) -> CodecResult<String> {
        self.atomic(|c| {
            let len = c.read_int_size(width, Endianness::Big)?;
            c.read_string_with_length(len)
        })
    }

    /// A string payload of caller-supplied length. `-1` reads as empty without
    /// consuming anything; other negative lengths are rejected.
    ///
    /// Bytes are not validated as UTF-8; invalid sequences are replaced.
    pub fn read_string_with_length(&mut self, len: i64) -> CodecResult<String> {
        let Some(len) = payload_length(len)? else {
            return Ok(String::new());
        };
        let bytes = self.take(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// A zlib-compressed string: BE compressed length, LE decompressed
    /// length, then the zlib stream.
    pub fn read_compressed_string(&mut self) -> CodecResult<String> {
        self.atomic(|c| {
            let compressed_len = c.read_int32(Endianness::Big)?;
            let Some(compressed_len) = payload_length(i64::from(compressed_len))? else {
                return Ok(String::new());
            };
            let decompressed_len = c.read_int32(Endianness::Little)?;
            if decompressed_len < 0
                || decompressed_len as usize > c.config.max_decompressed_len
            {
                return Err(CodecError::InvalidLength(i64::from(decompressed_len)));
            }
            let compressed = c.take(compressed_len)?;
            let text = inflate(compressed, decompressed_len as usize)?;
            trace!(compressed_len, decompressed_len, "compressed string read");
            Ok(String::from_utf8_lossy(&text).into_owned())
        })
    }

    /// Two 32-bit words (low, then high) resolved to a tag through `bridge`.
    pub fn read_logic_long<B>(
        &mut self,
        endianness: Endianness,
        bridge: &B,
    ) -> CodecResult<ResolvedLogicLong>
    where
        B: TagBridge + ?Sized,
    {
        self.atomic(|c| {
            let low = c.read_uint32(endianness)?;
            let high = c.read_uint32(endianness)?;
            let id = LogicLong::new(low, high);
            let tag = bridge.id_to_tag(id)?;
            Ok(ResolvedLogicLong { id, tag })
        })
    }
}

/// `None` for the absent-string sentinel, the byte count otherwise.
fn payload_length(len: i64) -> CodecResult<Option<usize>> {
    match len {
        -1 => Ok(None),
        n if n < 0 => Err(CodecError::InvalidLength(n)),
        n => usize::try_from(n)
            .map(Some)
            .map_err(|_| CodecError::InvalidLength(n)),
    }
}
