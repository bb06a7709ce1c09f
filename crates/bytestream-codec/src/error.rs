use bytestream_types::{BridgeError, TypeError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("short read: need {needed} bytes, {remaining} remaining")]
    ShortRead { needed: usize, remaining: usize },

    #[error("short write: need {needed} bytes, {available} available")]
    ShortWrite { needed: usize, available: usize },

    #[error("invalid length: {0}")]
    InvalidLength(i64),

    #[error("overflow: {0}")]
    Overflow(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("codec failure: {0}")]
    CodecFailure(String),

    #[error("tag bridge failure: {0}")]
    BridgeFailure(#[from] BridgeError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<TypeError> for CodecError {
    fn from(e: TypeError) -> Self {
        Self::InvalidArgument(e.to_string())
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
