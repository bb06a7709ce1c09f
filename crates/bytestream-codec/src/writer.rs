use bytes::{BufMut, Bytes, BytesMut};
use bytestream_types::sizes::{
    ABSENT_STRING_LENGTH, INT16_SIZE, INT24_SIZE, INT32_SIZE, INT64_SIZE, LOGIC_LONG_SIZE,
    LONG_LONG_SIZE, STRING_LENGTH_SIZE,
};
use bytestream_types::{Endianness, LongWidth, PackedBool, TagBridge};
use tracing::trace;

use crate::compress::deflate;
use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use crate::varint::{encode_uvarint, uvarint_len, zigzag_encode};
use crate::width::{check_int, check_uint, check_width, encode_uint, uint_max};

/// Encodes primitives into a buffer.
///
/// The default buffer is a growable [`BytesMut`]. Any [`BufMut`] works; with a
/// bounded one (such as `&mut [u8]`) a write that does not fit fails with
/// [`CodecError::ShortWrite`]. Capacity and range checks run before the first
/// byte of a value is emitted, so a failed write leaves the buffer untouched.
#[derive(Debug)]
pub struct ByteSink<B = BytesMut> {
    buf: B,
    config: CodecConfig,
}

impl ByteSink<BytesMut> {
    /// Empty growable sink with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default())
    }

    /// Empty growable sink writing longs per `config`.
    pub fn with_config(config: CodecConfig) -> Self {
        Self::from_parts(BytesMut::new(), config)
    }

    /// Empty growable sink with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_parts(BytesMut::with_capacity(capacity), CodecConfig::default())
    }

    /// Bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The written bytes as an immutable [`Bytes`].
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Default for ByteSink<BytesMut> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: BufMut> ByteSink<B> {
    /// Sink appending to `buf`.
    pub fn from_parts(buf: B, config: CodecConfig) -> Self {
        Self { buf, config }
    }

    /// The underlying buffer.
    pub fn into_inner(self) -> B {
        self.buf
    }

    /// Configuration the sink was built with.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Wire width used by [`write_long`](Self::write_long).
    pub fn long_width(&self) -> LongWidth {
        self.config.long_width
    }

    /// Bytes that can still be written.
    pub fn remaining_capacity(&self) -> usize {
        self.buf.remaining_mut()
    }

    fn reserve(&self, needed: usize) -> CodecResult<()> {
        let available = self.buf.remaining_mut();
        if available < needed {
            return Err(CodecError::ShortWrite { needed, available });
        }
        Ok(())
    }

    /// Append `data` verbatim.
    pub fn write_bytes(&mut self, data: &[u8]) -> CodecResult<()> {
        self.reserve(data.len())?;
        self.buf.put_slice(data);
        Ok(())
    }

    /// `0x00` for false, otherwise `count` truncated to one byte. Counts outside
    /// `1..=64` are written as given but do not read back as true.
    pub fn write_bool(&mut self, value: bool, count: i8) -> CodecResult<()> {
        self.write_uint8(PackedBool::new(value, count).to_byte())
    }

    /// One byte, two's complement.
    pub fn write_int8(&mut self, value: i8) -> CodecResult<()> {
        self.reserve(1)?;
        self.buf.put_i8(value);
        Ok(())
    }

    /// One byte.
    pub fn write_uint8(&mut self, value: u8) -> CodecResult<()> {
        self.reserve(1)?;
        self.buf.put_u8(value);
        Ok(())
    }

    /// Two bytes, two's complement.
    pub fn write_int16(&mut self, value: i16, endianness: Endianness) -> CodecResult<()> {
        self.reserve(INT16_SIZE)?;
        match endianness {
            Endianness::Big => self.buf.put_i16(value),
            Endianness::Little => self.buf.put_i16_le(value),
        }
        Ok(())
    }

    /// Two bytes.
    pub fn write_uint16(&mut self, value: u16, endianness: Endianness) -> CodecResult<()> {
        self.reserve(INT16_SIZE)?;
        match endianness {
            Endianness::Big => self.buf.put_u16(value),
            Endianness::Little => self.buf.put_u16_le(value),
        }
        Ok(())
    }

    /// Three bytes; values outside `[-8388608, 8388607]` are an overflow.
    pub fn write_int24(&mut self, value: i32, endianness: Endianness) -> CodecResult<()> {
        check_int(i64::from(value), INT24_SIZE, "int24")?;
        self.put_uint(value as u64, INT24_SIZE, endianness)
    }

    /// Three bytes; values above `16777215` are an overflow.
    pub fn write_uint24(&mut self, value: u32, endianness: Endianness) -> CodecResult<()> {
        check_uint(u64::from(value), INT24_SIZE, "uint24")?;
        self.put_uint(u64::from(value), INT24_SIZE, endianness)
    }

    /// Four bytes, two's complement.
    pub fn write_int32(&mut self, value: i32, endianness: Endianness) -> CodecResult<()> {
        self.reserve(INT32_SIZE)?;
        match endianness {
            Endianness::Big => self.buf.put_i32(value),
            Endianness::Little => self.buf.put_i32_le(value),
        }
        Ok(())
    }

    /// Four bytes.
    pub fn write_uint32(&mut self, value: u32, endianness: Endianness) -> CodecResult<()> {
        self.reserve(INT32_SIZE)?;
        match endianness {
            Endianness::Big => self.buf.put_u32(value),
            Endianness::Little => self.buf.put_u32_le(value),
        }
        Ok(())
    }

    /// Eight bytes, two's complement.
    pub fn write_int64(&mut self, value: i64, endianness: Endianness) -> CodecResult<()> {
        self.reserve(INT64_SIZE)?;
        match endianness {
            Endianness::Big => self.buf.put_i64(value),
            Endianness::Little => self.buf.put_i64_le(value),
        }
        Ok(())
    }

    /// Eight bytes.
    pub fn write_uint64(&mut self, value: u64, endianness: Endianness) -> CodecResult<()> {
        self.reserve(INT64_SIZE)?;
        match endianness {
            Endianness::Big => self.buf.put_u64(value),
            Endianness::Little => self.buf.put_u64_le(value),
        }
        Ok(())
    }

    /// A signed integer in `size` bytes (1..=8), range-checked for that width.
    pub fn write_int_size(
        &mut self,
        value: i64,
        size: usize,
        endianness: Endianness,
    ) -> CodecResult<()> {
        check_width(size)?;
        check_int(value, size, "sized int")?;
        self.put_uint(value as u64, size, endianness)
    }

    /// An unsigned integer in `size` bytes (1..=8), range-checked for that width.
    pub fn write_uint_size(
        &mut self,
        value: u64,
        size: usize,
        endianness: Endianness,
    ) -> CodecResult<()> {
        check_width(size)?;
        check_uint(value, size, "sized uint")?;
        self.put_uint(value, size, endianness)
    }

    /// Low `size` bytes of `value`, already validated.
    fn put_uint(&mut self, value: u64, size: usize, endianness: Endianness) -> CodecResult<()> {
        self.reserve(size)?;
        let bytes = encode_uint(value & uint_max(size), size, endianness);
        self.buf.put_slice(&bytes[..size]);
        Ok(())
    }

    /// Zig-zag, then [`write_uvarint`](Self::write_uvarint).
    pub fn write_varint(&mut self, value: i64) -> CodecResult<()> {
        self.write_uvarint(zigzag_encode(value))
    }

    /// An unsigned LEB128 varint, least significant group first.
    pub fn write_uvarint(&mut self, value: u64) -> CodecResult<()> {
        self.reserve(uvarint_len(value))?;
        encode_uvarint(&mut self.buf, value);
        Ok(())
    }

    /// A long of the configured [`LongWidth`]; 32-bit longs keep the low word.
    pub fn write_long(&mut self, value: i64, endianness: Endianness) -> CodecResult<()> {
        match self.config.long_width {
            LongWidth::Bits64 => self.write_int64(value, endianness),
            LongWidth::Bits32 => self.write_int32(value as i32, endianness),
        }
    }

    /// An unsigned long of the configured [`LongWidth`]; 32-bit longs keep the low word.
    pub fn write_unsigned_long(&mut self, value: u64, endianness: Endianness) -> CodecResult<()> {
        match self.config.long_width {
            LongWidth::Bits64 => self.write_uint64(value, endianness),
            LongWidth::Bits32 => self.write_uint32(value as u32, endianness),
        }
    }

    /// Always 8 bytes, whatever the configured long width.
    pub fn write_longlong(&mut self, value: i64, endianness: Endianness) -> CodecResult<()> {
        self.reserve(LONG_LONG_SIZE)?;
        match endianness {
            Endianness::Big => self.buf.put_i64(value),
            Endianness::Little => self.buf.put_i64_le(value),
        }
        Ok(())
    }

    /// Always 8 bytes, whatever the configured long width.
    pub fn write_unsigned_longlong(
        &mut self,
        value: u64,
        endianness: Endianness,
    ) -> CodecResult<()> {
        self.reserve(LONG_LONG_SIZE)?;
        match endianness {
            Endianness::Big => self.buf.put_u64(value),
            Endianness::Little => self.buf.put_u64_le(value),
        }
        Ok(())
    }

    /// A 4-byte big-endian signed length, then the raw bytes.
    pub fn write_string(&mut self, data: &str) -> CodecResult<()> {
        let len = i32::try_from(data.len())
            .map_err(|_| CodecError::Overflow(format!("string length {}", data.len())))?;
        self.reserve(STRING_LENGTH_SIZE + data.len())?;
        self.buf.put_i32(len);
        self.buf.put_slice(data.as_bytes());
        Ok(())
    }

    /// The `-1` length that marks an absent string.
    pub fn write_absent_string(&mut self) -> CodecResult<()> {
        self.write_int32(ABSENT_STRING_LENGTH, Endianness::Big)
    }

    /// A big-endian signed length of `width` bytes (1, 2, 3, 4 or 8), then the
    /// raw bytes.
    pub fn write_string_with_size(&mut self, data: &str, width: usize) -> CodecResult<()> {
        let max = string_size_max(width)?;
        if data.len() as u64 > max {
            return Err(CodecError::Overflow(format!(
                "string length {} does not fit a {width}-byte size",
                data.len()
            )));
        }
        self.reserve(width + data.len())?;
        let prefix = encode_uint(data.len() as u64, width, Endianness::Big);
        self.buf.put_slice(&prefix[..width]);
        self.buf.put_slice(data.as_bytes());
        Ok(())
    }

    /// The `-1` length in `width` bytes (all `0xFF`), with no payload.
    pub fn write_absent_string_with_size(&mut self, width: usize) -> CodecResult<()> {
        string_size_max(width)?;
        self.put_uint(ABSENT_STRING_LENGTH as u64, width, Endianness::Big)
    }

    /// zlib-compress `data`, then write the compressed length (4-byte BE), the
    /// uncompressed length (4-byte LE) and the zlib stream.
    pub fn write_compressed_string(&mut self, data: &str) -> CodecResult<()> {
        let decompressed_len = i32::try_from(data.len())
            .map_err(|_| CodecError::Overflow(format!("string length {}", data.len())))?;
        let compressed = deflate(data.as_bytes(), self.config.compression_level)?;
        let compressed_len = i32::try_from(compressed.len())
            .map_err(|_| CodecError::Overflow(format!("compressed length {}", compressed.len())))?;

        self.reserve(2 * STRING_LENGTH_SIZE + compressed.len())?;
        self.buf.put_i32(compressed_len);
        self.buf.put_i32_le(decompressed_len);
        self.buf.put_slice(&compressed);
        trace!(compressed_len, decompressed_len, "compressed string written");
        Ok(())
    }

    /// Resolve `tag` through `bridge` and write the low then high word as
    /// 4-byte big-endian integers.
    pub fn write_logic_long<T>(&mut self, tag: &str, bridge: &T) -> CodecResult<()>
    where
        T: TagBridge + ?Sized,
    {
        let id = bridge.tag_to_id(tag)?;
        self.reserve(LOGIC_LONG_SIZE)?;
        self.buf.put_i32(id.low as i32);
        self.buf.put_i32(id.high as i32);
        Ok(())
    }
}

/// Largest length a `width`-byte signed size field can hold.
fn string_size_max(width: usize) -> CodecResult<u64> {
    match width {
        1 => Ok(0x7F),
        2 => Ok(0x7FFF),
        3 => Ok(0x7F_FFFF),
        4 => Ok(0x7FFF_FFFF),
        8 => Ok(i64::MAX as u64),
        _ => Err(CodecError::InvalidArgument(format!(
            "string size width {width} (expected 1, 2, 3, 4 or 8)"
        ))),
    }
}
