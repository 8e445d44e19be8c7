//! An AI assistant service that answers chat messages with the help of
//! weather, web search and geocoding tools.
//!
//! The binary serves the HTTP surface; you can also use this crate as a
//! library to mount the router inside your own host app.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod server;
pub mod tools;
