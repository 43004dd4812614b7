use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{RawResponse, Request, Response, Transport};

/// Default [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::transport)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Resolves a relative API path against the endpoint.
    pub fn url_for(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}/{}", self.endpoint, path.trim_start_matches('/'));
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            reason: e.to_string(),
            url: raw,
        })
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: Request) -> Result<RawResponse, ApiError> {
        let url = self.url_for(&request.path)?;

        let mut builder = self
            .client
            .request(request.method.clone(), url.clone())
            .header(ACCEPT, "application/json");
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Token {token}"));
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        tracing::debug!(method = %request.method, %url, "sending request");
        let resp = builder.send().await.map_err(ApiError::transport)?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await.map_err(ApiError::transport)?.to_vec();
        tracing::debug!(method = %request.method, %url, %status, bytes = body.len(), "response");

        Ok(RawResponse {
            meta: Response { status, headers },
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_for_tolerates_slashes() {
        let t = HttpTransport::new(&ClientConfig::new("http://127.0.0.1:8080/v3/")).unwrap();
        assert_eq!(
            t.url_for("jobs/abc/start").unwrap().as_str(),
            "http://127.0.0.1:8080/v3/jobs/abc/start"
        );
        assert_eq!(
            t.url_for("/jobs/abc").unwrap().as_str(),
            "http://127.0.0.1:8080/v3/jobs/abc"
        );
    }

    #[test]
    fn url_for_rejects_bad_endpoint() {
        let t = HttpTransport::new(&ClientConfig::new("not a url")).unwrap();
        let err = t.url_for("jobs/abc").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }), "{err:?}");
        assert!(err.response().is_none());
    }
}
