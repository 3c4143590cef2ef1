//! Nickname validation.

/// Longest nickname the server accepts.
pub const MAX_NICK_LEN: usize = 30;

/// Nickname checks on string-like types.
pub trait NickExt {
    /// Returns true if this is an acceptable nickname.
    ///
    /// The first character must be a letter or one of ``[]\`_^{|}``; the
    /// rest may also contain digits and `-`.
    fn is_valid_nick(&self) -> bool;
}

fn is_special(c: char) -> bool {
    matches!(c, '[' | ']' | '\\' | '`' | '_' | '^' | '{' | '|' | '}')
}

impl NickExt for str {
    fn is_valid_nick(&self) -> bool {
        if self.is_empty() || self.len() > MAX_NICK_LEN {
            return false;
        }

        let mut chars = self.chars();
        let first_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || is_special(c));

        first_ok && chars.all(|c| c.is_ascii_alphanumeric() || is_special(c) || c == '-')
    }
}

impl NickExt for String {
    fn is_valid_nick(&self) -> bool {
        self.as_str().is_valid_nick()
    }
}
