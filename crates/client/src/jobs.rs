use agent_api_core::api::{self, JobFinishRequest, JobStartRequest};
use agent_api_core::model::{Job, JobState};
use reqwest::Method;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpTransport;
use crate::transport::{do_request, do_request_empty, Request, Response, Transport};

/// Typed calls against the `jobs/{id}` resource.
///
/// Each call is one round trip. Errors from the transport are returned as-is;
/// whether a transition is legal is for the server to decide.
#[derive(Debug, Clone)]
pub struct JobClient<T = HttpTransport> {
    transport: T,
}

impl JobClient<HttpTransport> {
    /// Client over the default HTTP transport.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }
}

impl<T: Transport> JobClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET jobs/{id}`: current state only.
    pub async fn get_job_state(&self, id: &str) -> Result<(JobState, Response), ApiError> {
        let req = Request::new(Method::GET, api::job_path(id));
        do_request(&self.transport, req).await
    }

    /// `PUT jobs/{id}/acquire`: claims an unassigned job for this agent.
    pub async fn acquire_job(&self, id: &str) -> Result<(Job, Response), ApiError> {
        let req = Request::new(Method::PUT, api::acquire_path(id));
        do_request(&self.transport, req).await
    }

    /// `PUT jobs/{id}/accept`
    ///
    /// The returned job carries its final environment: the server merges the
    /// agent's environment into the job on accept.
    pub async fn accept_job(&self, job: &Job) -> Result<(Job, Response), ApiError> {
        let req = Request::new(Method::PUT, api::accept_path(job.id_or_empty()));
        do_request(&self.transport, req).await
    }

    /// `PUT jobs/{id}/start` with the job's `started_at`.
    pub async fn start_job(&self, job: &Job) -> Result<Response, ApiError> {
        let req = Request::with_json(
            Method::PUT,
            api::start_path(job.id_or_empty()),
            &JobStartRequest::from(job),
        )?;
        do_request_empty(&self.transport, req).await
    }

    /// `PUT jobs/{id}/finish` with exit details and the failed chunk count.
    pub async fn finish_job(&self, job: &Job) -> Result<Response, ApiError> {
        let req = Request::with_json(
            Method::PUT,
            api::finish_path(job.id_or_empty()),
            &JobFinishRequest::from(job),
        )?;
        do_request_empty(&self.transport, req).await
    }
}
