#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Wire model for the agent job API: job resources, request payloads and paths.

pub mod api;
pub mod model;

mod util;

pub use util::now_rfc3339;
