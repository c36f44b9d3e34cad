use std::{collections::HashMap, time::Duration};

use anyhow::Context;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};

use crate::{ApiResponse, ApiTransport, StdResult};

/// The fixed timeout applied to every API request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// An HTTP transport backed by a reqwest client, authenticating every request
/// with the provider token.
pub struct ReqwestTransport {
    /// The underlying HTTP client.
    client: reqwest::Client,

    /// The API token carried by the authorization header.
    api_token: String,
}

impl ReqwestTransport {
    /// Creates a new `ReqwestTransport` instance with the given API token.
    pub fn try_new(api_token: &str) -> StdResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build the HTTP client")?;

        Ok(Self {
            client,
            api_token: api_token.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl ApiTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> StdResult<ApiResponse> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("token {}", self.api_token))
            .header(USER_AGENT, "repo-harvester")
            .send()
            .await
            .with_context(|| format!("Request failed: GET {url}"))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect::<HashMap<_, _>>();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body: GET {url}"))?;

        Ok(ApiResponse::new(status, headers, body))
    }
}
