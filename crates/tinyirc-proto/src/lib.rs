//! Wire protocol for the tinyircd chat server.
//!
//! This crate covers everything between raw bytes on a socket and the
//! command handlers:
//!
//! - [`MessageRef`]: zero-copy view over one received line
//! - [`Message`]: owned outgoing line with prefix, command and parameters
//! - [`Prefix`]: message origin (server name or `nick!user@host`)
//! - [`Response`]: numeric reply codes and their reply constructors
//! - [`LineCodec`]: `tokio-util` framing with a maximum line length
//!
//! # Example
//!
//! ```
//! use tinyirc_proto::{Message, MessageRef, Prefix};
//!
//! let msg = MessageRef::parse(":alice!alice@localhost PRIVMSG #rust :hello there").unwrap();
//! assert_eq!(msg.command_name(), "PRIVMSG");
//! assert_eq!(msg.arg(0), Some("#rust"));
//! assert_eq!(msg.arg(1), Some("hello there"));
//!
//! let reply = Message::privmsg("#rust", "hi alice")
//!     .with_prefix(Prefix::new("bob", "bob", "localhost"));
//! assert_eq!(reply.to_string(), ":bob!bob@localhost PRIVMSG #rust :hi alice\r\n");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod chan;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod nick;
pub mod prefix;
pub mod response;

pub use self::chan::ChannelExt;
pub use self::error::{MessageParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
pub use self::message::{Message, MessageRef};
pub use self::nick::NickExt;
pub use self::prefix::Prefix;
pub use self::response::Response;
