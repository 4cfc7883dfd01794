//! Request authentication for the relay's inbound webhook.
pub mod slack;

pub use slack::*;
