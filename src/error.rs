//! Error types for the Thrift binary codec.

/// Errors that can occur while encoding or decoding Thrift values.
#[derive(Debug, thiserror::Error)]
pub enum ThriftError {
    /// Malformed or truncated input: an unknown type tag, an invalid
    /// boolean byte, a negative length or count, or input that ends before
    /// a value is complete.
    #[error("decode error: {0}")]
    Decode(String),

    /// A value that cannot be encoded as requested, such as a container
    /// element whose wire type contradicts the container header.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// An I/O error surfaced by an outer byte sink or source. The in-memory
    /// codec never produces this; it exists so streaming wrappers can pass
    /// their errors through unchanged.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ThriftError {
    /// Wraps a reason as a decode error.
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode(reason.into())
    }

    /// Wraps a reason as an invalid-value error.
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue(reason.into())
    }

    /// Returns `true` if this error was caused by malformed or truncated
    /// input, as opposed to a misuse of the encoder or an I/O failure.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
