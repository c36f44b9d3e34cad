use std::{fmt::Display, str::FromStr, time::Duration};

use super::{ProviderError, StdResult};

/// The REST production endpoint for the GitHub API.
pub const GITHUB_API_ENDPOINT: &str = "https://api.github.com";

/// The production endpoint GitHub repositories are cloned from.
pub const GITHUB_CLONE_ENDPOINT: &str = "https://github.com";

const GITHUB_WAIT_API: Duration = Duration::from_secs(2);
const GITHUB_WAIT_CLONE: Duration = Duration::from_secs(60);

/// The set of supported Git hosting providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// The GitHub hosting service.
    Github,
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_lowercase().as_str() {
            "github" => Ok(Self::Github),
            _ => Err(ProviderError::Config(format!(
                "Unsupported Git provider: {name}"
            ))),
        }
    }
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Github => write!(f, "github"),
        }
    }
}

/// The configuration of a provider client, immutable once the client is
/// constructed.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// The provider the client talks to.
    provider: ProviderKind,

    /// The API token used for authenticated requests.
    api_token: String,

    /// The base URL of the provider REST API.
    base_url_api: String,

    /// The base URL repositories are cloned from.
    base_url_clone: String,

    /// The fixed pause inserted after every rate limit check.
    wait_api: Duration,

    /// The fixed pause between clone attempts and between clone tasks.
    wait_clone: Duration,
}

impl ProviderConfig {
    /// Creates the configuration for the named provider with its default
    /// endpoints and pauses.
    pub fn try_new(provider: &str, api_token: &str) -> StdResult<Self> {
        if api_token.is_empty() {
            return Err(
                ProviderError::Config("API token is required for Git provider".to_string()).into(),
            );
        }
        if provider.is_empty() {
            return Err(ProviderError::Config("Git provider is required".to_string()).into());
        }
        let provider = ProviderKind::from_str(provider)?;
        let (base_url_api, base_url_clone, wait_api, wait_clone) = match provider {
            ProviderKind::Github => (
                GITHUB_API_ENDPOINT,
                GITHUB_CLONE_ENDPOINT,
                GITHUB_WAIT_API,
                GITHUB_WAIT_CLONE,
            ),
        };

        Ok(Self {
            provider,
            api_token: api_token.to_string(),
            base_url_api: base_url_api.to_string(),
            base_url_clone: base_url_clone.to_string(),
            wait_api,
            wait_clone,
        })
    }

    /// Overrides the API endpoint, for self-hosted instances.
    pub fn with_base_url_api(mut self, base_url_api: &str) -> Self {
        self.base_url_api = base_url_api.to_string();
        self
    }

    /// Overrides the clone endpoint, for self-hosted instances.
    pub fn with_base_url_clone(mut self, base_url_clone: &str) -> Self {
        self.base_url_clone = base_url_clone.to_string();
        self
    }

    /// Overrides the throttle pauses.
    pub fn with_wait_intervals(mut self, wait_api: Duration, wait_clone: Duration) -> Self {
        self.wait_api = wait_api;
        self.wait_clone = wait_clone;
        self
    }

    /// Retrieves the provider kind.
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Retrieves the API token.
    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    /// Retrieves the base URL of the provider REST API.
    pub fn base_url_api(&self) -> &str {
        &self.base_url_api
    }

    /// Retrieves the base URL repositories are cloned from.
    pub fn base_url_clone(&self) -> &str {
        &self.base_url_clone
    }

    /// Retrieves the pause inserted after every rate limit check.
    pub fn wait_api(&self) -> Duration {
        self.wait_api
    }

    /// Retrieves the pause between clone attempts and tasks.
    pub fn wait_clone(&self) -> Duration {
        self.wait_clone
    }
}
