use thiserror::Error;

/// Errors produced while encoding or decoding chunk keys.
#[derive(Debug, Error)]
pub enum Error {
    #[error("truncated key: needs {needed} bytes, got {available}")]
    Truncated { needed: usize, available: usize },

    #[error("{field} is not valid UTF-8")]
    InvalidUtf8 { field: &'static str },

    #[error("{field} is {len} bytes, longer than a u32 length prefix allows")]
    NameTooLong { field: &'static str, len: usize },

    #[error("{extra} trailing bytes after key")]
    TrailingBytes { extra: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for chunk key codec operations
pub type Result<T> = std::result::Result<T, Error>;
