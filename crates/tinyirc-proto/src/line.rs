//! Line framing for tokio.
//!
//! Splits the byte stream on `\n`, strips the terminator (and a preceding
//! `\r`), and enforces a maximum line length. Outgoing lines are written as
//! given; [`crate::Message`]'s `Display` already ends them with `\r\n`.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::{ProtocolError, Result};

/// Conventional maximum line length, terminator included.
pub const DEFAULT_MAX_LEN: usize = 512;

/// Newline-delimited UTF-8 line codec.
#[derive(Debug, Clone)]
pub struct LineCodec {
    /// Index of the next byte to scan for `\n`.
    next_index: usize,
    max_len: usize,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl LineCodec {
    /// Codec with the conventional 512 byte limit.
    pub fn new() -> Self {
        Self::with_max_len(DEFAULT_MAX_LEN)
    }

    /// Codec with a custom limit.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
        }
    }

    /// Configured limit.
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

fn validate_line(line: &str) -> Result<()> {
    match line.chars().find(|c| matches!(c, '\0' | '\r')) {
        Some(c) => Err(ProtocolError::IllegalControlChar(c)),
        None => Ok(()),
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>> {
        let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
            self.next_index = src.len();
            if src.len() > self.max_len {
                return Err(ProtocolError::MessageTooLong {
                    actual: src.len(),
                    limit: self.max_len,
                });
            }
            return Ok(None);
        };

        let raw = src.split_to(self.next_index + offset + 1);
        self.next_index = 0;

        if raw.len() > self.max_len {
            return Err(ProtocolError::MessageTooLong {
                actual: raw.len(),
                limit: self.max_len,
            });
        }

        let mut body = &raw[..raw.len() - 1];
        if let Some(stripped) = body.strip_suffix(b"\r") {
            body = stripped;
        }

        let line = std::str::from_utf8(body).map_err(|e| ProtocolError::InvalidUtf8 {
            byte_pos: e.valid_up_to(),
        })?;
        validate_line(line)?;

        Ok(Some(line.to_string()))
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<()> {
        dst.extend_from_slice(line.as_bytes());
        Ok(())
    }
}
