//! Channel name helpers.

/// Channel-name checks on string-like types.
pub trait ChannelExt {
    /// Returns true if this names a channel rather than a nickname.
    ///
    /// Only `#` channels exist on this network; anything else is routed as a
    /// nickname.
    fn is_channel_name(&self) -> bool;
}

impl ChannelExt for str {
    fn is_channel_name(&self) -> bool {
        self.len() > 1
            && self.starts_with('#')
            && !self.contains([' ', ',', '\x07', '\r', '\n', '\0'])
    }
}

impl ChannelExt for String {
    fn is_channel_name(&self) -> bool {
        self.as_str().is_channel_name()
    }
}
