//! Zero-copy view over a received line.

use smallvec::SmallVec;

use super::parser::{parse_line, Params, MAX_PARAMS};
use crate::error::MessageParseError;

/// A received message borrowing from the line buffer.
///
/// Handlers receive one of these per line; nothing is copied until a handler
/// decides to keep a parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRef<'a> {
    prefix: Option<&'a str>,
    command: &'a str,
    args: Params<'a>,
}

impl<'a> MessageRef<'a> {
    /// Parse a line, tolerating a trailing `\r\n` or `\n`.
    pub fn parse(line: &'a str) -> Result<Self, MessageParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }

        let parsed =
            parse_line(line).map_err(|position| MessageParseError::InvalidCommand { position })?;

        Ok(Self {
            prefix: parsed.prefix,
            command: parsed.command,
            args: parsed.params,
        })
    }

    /// Build a message directly from a command name and its parameters.
    ///
    /// Parameters beyond the protocol maximum are dropped, as the parser
    /// would.
    pub fn new(command: &'a str, args: &[&'a str]) -> Self {
        let args: SmallVec<[&'a str; MAX_PARAMS]> =
            args.iter().copied().take(MAX_PARAMS).collect();
        Self {
            prefix: None,
            command,
            args,
        }
    }

    /// The command name exactly as received.
    pub fn command_name(&self) -> &'a str {
        self.command
    }

    /// The raw prefix, if the sender supplied one.
    pub fn prefix(&self) -> Option<&'a str> {
        self.prefix
    }

    /// Parameter at `index`.
    pub fn arg(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    /// All parameters, the trailing one included.
    pub fn args(&self) -> &[&'a str] {
        &self.args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_line_terminator() {
        let msg = MessageRef::parse("JOIN #rust\r\n").unwrap();
        assert_eq!(msg.command_name(), "JOIN");
        assert_eq!(msg.args(), &["#rust"]);
    }

    #[test]
    fn blank_line_is_empty_message() {
        assert_eq!(
            MessageRef::parse("   \r\n"),
            Err(MessageParseError::EmptyMessage)
        );
    }

    #[test]
    fn bad_command_reports_position() {
        assert_eq!(
            MessageRef::parse(":alice 12"),
            Err(MessageParseError::InvalidCommand { position: 7 })
        );
    }

    #[test]
    fn built_messages_match_parsed_ones() {
        let built = MessageRef::new("KICK", &["#chan", "bob", "bye now"]);
        let parsed = MessageRef::parse("KICK #chan bob :bye now").unwrap();
        assert_eq!(built, parsed);
        assert_eq!(built.arg(2), Some("bye now"));
        assert_eq!(built.arg(3), None);
    }
}
