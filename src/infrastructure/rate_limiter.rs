use std::{collections::HashMap, sync::Arc, time::Duration};

use log::{debug, info};

use crate::{ApiTransport, ProviderError, RateLimitState, Sleeper, StdResult};

/// The remaining quota under which the limiter waits for the window reset.
const REMAINING_QUOTA_FLOOR: i64 = 2;

/// This struct keeps API calls under the host rate limit by blocking the
/// caller between requests.
pub struct RateLimiter {
    /// The transport used for dedicated quota status requests.
    transport: Arc<dyn ApiTransport>,

    /// The sleeper performing the blocking pauses.
    sleeper: Arc<dyn Sleeper>,

    /// The URL of the dedicated quota status endpoint.
    rate_limit_url: String,

    /// The fixed pause inserted after every check.
    wait_api: Duration,
}

impl RateLimiter {
    /// Creates a new `RateLimiter` instance.
    pub fn new(
        transport: Arc<dyn ApiTransport>,
        sleeper: Arc<dyn Sleeper>,
        rate_limit_url: &str,
        wait_api: Duration,
    ) -> Self {
        Self {
            transport,
            sleeper,
            rate_limit_url: rate_limit_url.to_string(),
            wait_api,
        }
    }

    /// Checks the current quota and blocks the caller long enough to stay
    /// under it.
    ///
    /// When no response headers are supplied, a dedicated quota status
    /// request is performed. The fixed base pause is always inserted; the
    /// reset delay is added when the remaining quota drops below 2.
    pub async fn check_and_throttle(
        &self,
        response_headers: Option<&HashMap<String, String>>,
    ) -> StdResult<()> {
        let state = match response_headers {
            Some(headers) => RateLimitState::from_headers(headers)?,
            None => {
                let response = self.transport.get(&self.rate_limit_url).await?;
                if !response.is_success() {
                    return Err(ProviderError::RateLimitQuery(response.body().to_string()).into());
                }
                RateLimitState::from_headers(response.headers())?
            }
        };
        let reset_in_secs = state.reset_in_secs();
        debug!(
            "Rate limits: {}/{}, Reset in {reset_in_secs} seconds",
            state.remaining, state.limit
        );

        self.sleeper.sleep(self.wait_api).await;

        if state.remaining < REMAINING_QUOTA_FLOOR {
            info!("Rate limit exceeded. Waiting for {reset_in_secs} seconds.");
            self.sleeper
                .sleep(Duration::from_secs(reset_in_secs))
                .await;
        }

        Ok(())
    }
}
