//! Core logic including the conversation loop, tool dispatch, and the
//! content normalizer.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

pub mod chat;
pub mod content;
pub mod conversation;
mod gateway;
pub mod tool;

pub use chat::ChatLoop;
pub use gateway::{GatewayError, ModelGateway};
