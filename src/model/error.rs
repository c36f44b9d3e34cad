use thiserror::Error;

/// The standard result type used throughout the application.
pub type StdResult<T> = Result<T, anyhow::Error>;

/// The errors raised by provider construction and data fetching.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider configuration is missing or invalid.
    #[error("Invalid provider configuration: {0}")]
    Config(String),

    /// The API returned a non-success response, with its body attached.
    #[error("API request failed: {0}")]
    Http(String),

    /// The dedicated rate limit query failed.
    #[error("Failed to get rate limit: {0}")]
    RateLimitQuery(String),
}
