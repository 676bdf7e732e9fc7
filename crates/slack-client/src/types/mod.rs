//! Slack payload types.

pub mod event;
pub mod send;

pub use event::*;
pub use send::*;
