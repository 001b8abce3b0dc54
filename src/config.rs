use std::env;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Authentication and transport settings for workspace API calls.
///
/// The workspace URL itself is part of the desired state, not configuration:
/// one handler process can serve resources on several workspaces.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bearer token attached to every request when set.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            token: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// Read settings from `DATABRICKS_TOKEN` and
    /// `DATABRICKS_REQUEST_TIMEOUT_SECS`, keeping defaults for anything
    /// unset or unparsable.
    pub fn from_env() -> Self {
        let token = env::var("DATABRICKS_TOKEN").ok().filter(|t| !t.is_empty());
        let timeout = env::var("DATABRICKS_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        Self { token, timeout }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}
