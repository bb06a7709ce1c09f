//! zlib (RFC 1950) framing for compressed strings.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::config::MAX_COMPRESSION_LEVEL;
use crate::error::{CodecError, CodecResult};

/// Compress `data` into a complete zlib stream. `level` runs from 0 to 9.
pub fn deflate(data: &[u8], level: u32) -> CodecResult<Vec<u8>> {
    if level > MAX_COMPRESSION_LEVEL {
        return Err(CodecError::InvalidArgument(format!(
            "compression level {level} (max {MAX_COMPRESSION_LEVEL})"
        )));
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(level));
    encoder
        .write_all(data)
        .map_err(|e| CodecError::CodecFailure(format!("compression failed: {e}")))?;
    encoder
        .finish()
        .map_err(|e| CodecError::CodecFailure(format!("compression failed: {e}")))
}

/// Inflate a zlib stream that must produce exactly `expected_len` bytes.
///
/// At most `expected_len + 1` bytes are ever produced, so an understated
/// length cannot make the decoder expand an arbitrarily large payload.
pub fn inflate(data: &[u8], expected_len: usize) -> CodecResult<Vec<u8>> {
    let mut out = Vec::with_capacity(expected_len);
    ZlibDecoder::new(data)
        .take(expected_len as u64 + 1)
        .read_to_end(&mut out)
        .map_err(|e| CodecError::CodecFailure(format!("decompression failed: {e}")))?;
    if out.len() != expected_len {
        return Err(CodecError::CodecFailure(format!(
            "decompressed length mismatch: declared {expected_len}, got {}",
            out.len()
        )));
    }
    Ok(out)
}
