//! State management module.
//!
//! Contains the Matrix (shared server state) and the entities it owns.

mod channel;
mod client;
mod managers;
mod matrix;
mod responder;
mod uid;

pub use channel::{Channel, ModeChange, ModeRequest};
pub use client::Client;
#[cfg(test)]
pub use client::RegistrationState;
pub use managers::user::NickChange;
pub use matrix::Matrix;
pub use responder::{Outbox, Responder};
pub use uid::Uid;
