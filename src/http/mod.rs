//! HTTP protocol layer module
//!
//! Turns dispatch outcomes into hyper responses, decoupled from request routing.

pub mod response;

// Re-export commonly used types
pub use response::{build_outcome_response, ResponseBody};
