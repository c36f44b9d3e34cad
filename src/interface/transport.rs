use crate::{ApiResponse, StdResult};

/// A trait for performing HTTP requests against a provider API.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ApiTransport: Sync + Send {
    /// Performs an authenticated GET request against the given URL.
    async fn get(&self, url: &str) -> StdResult<ApiResponse>;
}
