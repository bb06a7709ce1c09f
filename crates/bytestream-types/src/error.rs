use thiserror::Error;

/// Errors produced while parsing or validating foundation types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid endianness: {0}")]
    InvalidEndianness(String),

    #[error("invalid long width: {0}")]
    InvalidLongWidth(String),

    #[error("invalid logic long: {0}")]
    InvalidLogicLong(String),
}

/// Errors reported by a [`TagBridge`](crate::TagBridge) implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("empty tag")]
    EmptyTag,

    #[error("invalid tag character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("tag {0} does not fit a logic long")]
    TagOutOfRange(String),

    #[error("identifier ({low}, {high}) has no tag")]
    UnmappedId { low: u32, high: u32 },

    #[error("unknown tag: {0}")]
    UnknownTag(String),
}
