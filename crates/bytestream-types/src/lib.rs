//! Foundation types for bytestream.
//!
//! This crate holds the vocabulary shared by the reader and writer halves of
//! the codec and by tag bridge implementations. It has no codec logic of its
//! own.
//!
//! # Key Types
//!
//! - [`Endianness`]: Byte order passed to every multi-byte operation
//! - [`LongWidth`]: Wire width of the platform-dependent "long" field
//! - [`LogicLong`]: Two-word 64-bit identifier with a `(low, high)` display form
//! - [`PackedBool`]: Boolean byte that carries an embedded count
//! - [`TagBridge`]: Contract of the external identifier/tag authority
//! - [`sizes`]: Wire width table

pub mod bridge;
pub mod endian;
pub mod error;
pub mod logic_long;
pub mod packed;
pub mod sizes;

pub use bridge::TagBridge;
pub use endian::{Endianness, LongWidth};
pub use error::{BridgeError, TypeError};
pub use logic_long::LogicLong;
pub use packed::PackedBool;
