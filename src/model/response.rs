use std::collections::HashMap;

use serde_json::Value;

use super::ProviderKind;

/// A raw HTTP response received from a provider API.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub(crate) status: u16,

    /// The response headers, with lowercase names.
    pub(crate) headers: HashMap<String, String>,

    /// The response body.
    pub(crate) body: String,
}

impl ApiResponse {
    /// Creates a new `ApiResponse`, normalizing header names to lowercase.
    pub fn new(status: u16, headers: HashMap<String, String>, body: String) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, value)| (name.to_lowercase(), value))
            .collect();

        Self {
            status,
            headers,
            body,
        }
    }

    /// Whether the response carries a success status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Retrieves a header value by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Retrieves all response headers.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Retrieves the response body.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// The accumulated items of a full pagination traversal.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PageAccumulation {
    /// The total item count, provider-reported for count-driven traversals
    /// and accumulated for cursor-driven ones.
    pub(crate) total_count: u64,

    /// The raw items of every traversed page, in retrieval order.
    pub(crate) items: Vec<Value>,
}

impl PageAccumulation {
    /// Creates a new `PageAccumulation` instance.
    pub fn new(total_count: u64, items: Vec<Value>) -> Self {
        Self { total_count, items }
    }

    /// Retrieves the total item count.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Retrieves the accumulated items.
    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

/// A pagination result tagged with the provider that produced it.
#[derive(Debug, PartialEq, Eq)]
pub struct FetchResult {
    /// The provider the items were fetched from.
    provider: ProviderKind,

    /// The accumulated pages.
    pages: PageAccumulation,
}

impl FetchResult {
    /// Creates a new `FetchResult` instance.
    pub fn new(provider: ProviderKind, pages: PageAccumulation) -> Self {
        Self { provider, pages }
    }

    /// Retrieves the provider the items were fetched from.
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Retrieves the total item count.
    pub fn total_count(&self) -> u64 {
        self.pages.total_count
    }

    /// Retrieves the accumulated items.
    pub fn items(&self) -> &[Value] {
        self.pages.items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_header_lookup_is_case_insensitive() {
        let response = ApiResponse::new(
            200,
            HashMap::from([("X-RateLimit-Remaining".to_string(), "42".to_string())]),
            String::new(),
        );

        assert_eq!(Some("42"), response.header("x-ratelimit-remaining"));
        assert_eq!(Some("42"), response.header("X-RateLimit-Remaining"));
        assert_eq!(None, response.header("link"));
    }

    #[test]
    fn response_success_covers_2xx_statuses() {
        let headers = HashMap::new();

        assert!(ApiResponse::new(200, headers.clone(), String::new()).is_success());
        assert!(ApiResponse::new(204, headers.clone(), String::new()).is_success());
        assert!(!ApiResponse::new(301, headers.clone(), String::new()).is_success());
        assert!(!ApiResponse::new(403, headers, String::new()).is_success());
    }
}
