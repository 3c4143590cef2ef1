//! Connection and registration handlers.
//!
//! Handles PASS, NICK, USER, PING, PONG, QUIT and CAP.

mod cap;
mod nick;
mod pass;
mod ping;
mod quit;
mod user;
mod welcome;

pub use cap::CapHandler;
pub use nick::NickHandler;
pub use pass::PassHandler;
pub use ping::{PingHandler, PongHandler};
pub use quit::QuitHandler;
pub use user::UserHandler;
