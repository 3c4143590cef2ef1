//! Per-connection limits configuration.

use serde::Deserialize;

/// Per-connection limits.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Longest accepted input line in bytes, terminator included (default: 512).
    /// Longer lines close the connection.
    #[serde(default = "default_max_line_len")]
    pub max_line_len: usize,
    /// Outbound queue capacity per connection, in lines (default: 256).
    /// A connection whose queue overflows is disconnected ("SendQ exceeded").
    #[serde(default = "default_sendq")]
    pub sendq: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_len: default_max_line_len(),
            sendq: default_sendq(),
        }
    }
}

fn default_max_line_len() -> usize {
    512
}

fn default_sendq() -> usize {
    256
}
