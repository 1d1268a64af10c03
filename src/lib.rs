//! Serve one file, loaded into memory at startup, to every GET request.
//!
//! POST is answered with 450 and every other method with 451, both with a
//! fixed `Not implemented` body. The server runs until a shutdown signal.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod http;
pub mod lifecycle;
pub mod loader;
pub mod logger;
pub mod server;

pub use error::{Error, Result};
pub use lifecycle::Lifecycle;
