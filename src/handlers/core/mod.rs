//! Core handler infrastructure: context, trait and dispatch.

pub mod context;
pub mod registry;

pub use context::{Context, Handler};
pub use registry::Registry;
