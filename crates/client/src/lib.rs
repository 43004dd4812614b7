#![forbid(unsafe_code)]

//! Client for the agent job API.
//!
//! ```no_run
//! # async fn demo() -> Result<(), agent_api_client::ApiError> {
//! use agent_api_client::{ClientConfig, JobClient};
//!
//! let client = JobClient::new(&ClientConfig::new("https://agent.example.com/v3"))?;
//! let (job, _resp) = client.acquire_job("0190f6a2").await?;
//! let (job, _resp) = client.accept_job(&job).await?;
//! # let _ = job;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod http;
mod jobs;
pub mod transport;

pub use agent_api_core::model::{Job, JobState};
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use error::{ApiError, BoxError};
pub use http::HttpTransport;
pub use jobs::JobClient;
pub use transport::{RawResponse, Request, Response, Transport};
