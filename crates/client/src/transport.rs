//! The request/response seam between [`JobClient`](crate::JobClient) and the network.
//!
//! A [`Transport`] only moves bytes. Status checking and JSON decoding live in
//! [`do_request`] / [`do_request_empty`] so every transport behaves the same.

use std::future::Future;
use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

/// An outgoing request, relative to the configured endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    /// Relative path such as `jobs/abc/start`.
    pub path: String,
    /// JSON-encoded body, if any.
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// Request without a body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Request with `body` encoded as JSON.
    pub fn with_json<B>(method: Method, path: impl Into<String>, body: &B) -> Result<Self, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body).map_err(ApiError::Encode)?;
        Ok(Self {
            method,
            path: path.into(),
            body: Some(body),
        })
    }
}

/// Response metadata returned alongside every result.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl Response {
    /// Header value as text. Non-UTF-8 values read as missing.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// What a [`Transport`] hands back: metadata plus the unread body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub meta: Response,
    pub body: Vec<u8>,
}

/// Executes requests against the agent API.
///
/// Implementations must not retry or interpret status codes.
pub trait Transport: Send + Sync {
    /// Sends `request` and returns whatever the server answered.
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<RawResponse, ApiError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn execute(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<RawResponse, ApiError>> + Send {
        (**self).execute(request)
    }
}

/// Executes `request` and decodes a JSON body into `R`.
pub async fn do_request<T, R>(transport: &T, request: Request) -> Result<(R, Response), ApiError>
where
    T: Transport,
    R: DeserializeOwned,
{
    let raw = execute_checked(transport, request).await?;
    match serde_json::from_slice(&raw.body) {
        Ok(value) => Ok((value, raw.meta)),
        Err(source) => Err(ApiError::Decode {
            response: raw.meta,
            source,
        }),
    }
}

/// Executes `request` and ignores the body.
pub async fn do_request_empty<T>(transport: &T, request: Request) -> Result<Response, ApiError>
where
    T: Transport,
{
    Ok(execute_checked(transport, request).await?.meta)
}

async fn execute_checked<T: Transport>(transport: &T, request: Request) -> Result<RawResponse, ApiError> {
    let raw = transport.execute(request).await?;
    if !raw.meta.status.is_success() {
        return Err(ApiError::Status {
            body: String::from_utf8_lossy(&raw.body).into_owned(),
            response: raw.meta,
        });
    }
    Ok(raw)
}
