//! Error types for framing and message parsing.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Errors raised while framing lines on a connection.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The line is not valid UTF-8.
    #[error("invalid utf-8 at byte {byte_pos}")]
    InvalidUtf8 {
        /// Offset of the first invalid byte.
        byte_pos: usize,
    },

    /// The line (or the buffered partial line) exceeds the configured limit.
    #[error("message too long: {actual} bytes (limit {limit})")]
    MessageTooLong {
        /// Bytes seen so far.
        actual: usize,
        /// Configured maximum, including the line terminator.
        limit: usize,
    },

    /// A NUL byte or bare carriage return inside the line.
    #[error("illegal control character {0:?}")]
    IllegalControlChar(char),
}

/// Errors raised while parsing a single line into a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// The line holds nothing but whitespace.
    #[error("empty message")]
    EmptyMessage,

    /// The command token is neither letters nor a three digit numeric.
    #[error("invalid command at position {position}")]
    InvalidCommand {
        /// Byte offset where parsing stopped.
        position: usize,
    },
}
