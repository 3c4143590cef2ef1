//! IRC command handlers.
//!
//! Each command has a handler implementing [`Handler`]; the [`Registry`]
//! maps command names to handlers and turns returned errors into replies.

mod channel;
mod connection;
mod core;
mod helpers;
mod messaging;
mod mode;

#[cfg(test)]
pub(crate) mod test_support;

pub use self::core::{Context, Handler, Registry};
