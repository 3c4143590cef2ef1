//! Matrix operations, grouped by domain.
//!
//! Each submodule adds an `impl Matrix` block:
//! - [`user`]: nickname claims and peer lookup
//! - [`channel`]: join, part, kick, invite, topic, modes, message routing
//! - [`lifecycle`]: disconnect cleanup and client removal

pub mod channel;
pub mod lifecycle;
pub mod user;
