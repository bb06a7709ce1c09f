//! Binary codec for bytestream.
//!
//! A [`ByteCursor`] decodes primitives from a byte slice and a [`ByteSink`]
//! encodes them into a buffer. Both sides speak the same wire formats:
//!
//! - **Fixed-width integers**: 8, 16, 24, 32 and 64 bits (plus any width from
//!   1 to 8 bytes), signed or unsigned, in either byte order
//! - **Longs**: 32 or 64 bits, per [`CodecConfig::long_width`]
//! - **Varints**: LEB128, zig-zag mapped when signed
//! - **Strings**: a signed length prefix (`-1` marks an absent string) and raw bytes
//! - **Compressed strings**: BE compressed length, LE decompressed length, zlib stream
//! - **Logic longs**: two 32-bit words resolved to a tag through a [`TagBridge`]
//!
//! Failed reads leave the cursor offset unchanged; failed writes emit nothing.

pub mod compress;
pub mod config;
pub mod error;
pub mod reader;
pub mod varint;
mod width;
pub mod writer;

pub use bytestream_types::{sizes, Endianness, LogicLong, LongWidth, PackedBool, TagBridge};
pub use config::CodecConfig;
pub use error::{CodecError, CodecResult};
pub use reader::{ByteCursor, ResolvedLogicLong};
pub use width::MAX_INT_WIDTH;
pub use writer::ByteSink;
