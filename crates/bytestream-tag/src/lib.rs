//! Tag bridges for bytestream.
//!
//! - [`HashtagBridge`]: the 14-symbol hashtag alphabet used by the identifier
//!   authority (`#2PP`, `#8GGL`, ...)
//! - [`StaticBridge`]: explicit tag/identifier table, for fixtures and tests

pub mod hashtag;
pub mod table;

pub use hashtag::{HashtagBridge, TAG_ALPHABET};
pub use table::StaticBridge;
