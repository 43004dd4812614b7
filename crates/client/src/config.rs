use std::fmt;
use std::time::Duration;

/// Request timeout used unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection parameters for [`HttpTransport`](crate::HttpTransport).
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL, e.g. `https://agent.example.com/v3`.
    pub endpoint: String,
    /// Sent as `Authorization: Token <token>` when set.
    pub token: Option<String>,
    pub user_agent: String,
    /// `None` disables the per-request timeout.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            user_agent: default_user_agent(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn default_user_agent() -> String {
    format!("agent-api-client/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ClientConfig::new("http://localhost/v3");
        assert_eq!(cfg.token, None);
        assert_eq!(cfg.timeout, Some(DEFAULT_TIMEOUT));
        assert!(cfg.user_agent.starts_with("agent-api-client/"));
    }

    #[test]
    fn debug_hides_token() {
        let cfg = ClientConfig::new("http://localhost/v3").with_token("s3cret");
        let out = format!("{cfg:?}");
        assert!(!out.contains("s3cret"), "{out}");
        assert!(out.contains("<redacted>"));
    }
}
