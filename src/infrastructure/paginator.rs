use std::{collections::HashMap, sync::Arc};

use anyhow::Context;
use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::{ApiTransport, PageAccumulation, ProviderError, RateLimiter, StdResult};

/// The maximum number of items fetched per page.
pub const PAGE_SIZE: u64 = 100;

/// A page of a count-driven endpoint, carrying the provider-reported total.
#[derive(Deserialize, Debug)]
struct CountedPage {
    total_count: u64,
    items: Vec<Value>,
}

/// Parses a link relation header into a map from relation name to URL.
///
/// Relation names are matched case-insensitively and stored lowercased.
pub fn parse_link_header(header: &str) -> HashMap<String, String> {
    let mut relations = HashMap::new();
    for entry in header.split(',') {
        let Some((url_part, params)) = entry.split_once(';') else {
            continue;
        };
        let url = url_part.trim().trim_start_matches('<').trim_end_matches('>');
        for param in params.split(';') {
            let Some((name, value)) = param.split_once('=') else {
                continue;
            };
            if name.trim().eq_ignore_ascii_case("rel") {
                relations.insert(value.trim().trim_matches('"').to_lowercase(), url.to_string());
            }
        }
    }

    relations
}

/// This struct drives repeated paged fetches against a provider endpoint,
/// accumulating items until the traversal is exhausted. Every page consumes
/// one rate limit check.
pub struct Paginator {
    /// The transport performing the page fetches.
    transport: Arc<dyn ApiTransport>,

    /// The rate limiter consulted after every page.
    rate_limiter: RateLimiter,
}

impl Paginator {
    /// Creates a new `Paginator` instance.
    pub fn new(transport: Arc<dyn ApiTransport>, rate_limiter: RateLimiter) -> Self {
        Self {
            transport,
            rate_limiter,
        }
    }

    /// Traverses a cursor-driven endpoint, following the "next" link relation
    /// of each response until a page is empty or no continuation is present.
    ///
    /// The first non-success response aborts the whole traversal with no
    /// partial accumulation.
    pub async fn fetch_by_cursor(&self, first_page_url: &str) -> StdResult<PageAccumulation> {
        let mut items: Vec<Value> = Vec::new();
        let mut current_page = 1u64;
        let mut request_url = first_page_url.to_string();

        loop {
            let response = self.transport.get(&request_url).await?;
            if !response.is_success() {
                return Err(ProviderError::Http(response.body().to_string()).into());
            }
            let page_items: Vec<Value> = serde_json::from_str(response.body())
                .with_context(|| format!("Failed to parse items of page {current_page}"))?;
            let next_link = response
                .header("link")
                .and_then(|header| parse_link_header(header).remove("next"));

            self.rate_limiter
                .check_and_throttle(Some(response.headers()))
                .await?;

            if page_items.is_empty() {
                break;
            }
            let page_count = page_items.len();
            items.extend(page_items);
            debug!(
                "Retrieved {page_count} items on page {current_page}, {} accumulated",
                items.len()
            );

            match next_link {
                Some(next_url) => {
                    current_page += 1;
                    request_url = next_url;
                }
                None => break,
            }
        }

        let total_count = items.len() as u64;
        Ok(PageAccumulation::new(total_count, items))
    }

    /// Traverses a count-driven endpoint, advancing the page number until the
    /// accumulated item count reaches the provider-reported total.
    ///
    /// The first non-success response aborts the whole traversal with no
    /// partial accumulation.
    pub async fn fetch_by_count<F>(&self, build_page_url: F) -> StdResult<PageAccumulation>
    where
        F: Fn(u64) -> String,
    {
        let mut items: Vec<Value> = Vec::new();
        let mut total_count = 0u64;
        let mut current_page = 1u64;

        loop {
            let response = self.transport.get(&build_page_url(current_page)).await?;
            if !response.is_success() {
                return Err(ProviderError::Http(response.body().to_string()).into());
            }
            let page: CountedPage = serde_json::from_str(response.body())
                .with_context(|| format!("Failed to parse items of page {current_page}"))?;
            total_count = page.total_count;
            let total_pages = total_count / PAGE_SIZE + 1;
            items.extend(page.items);
            debug!(
                "Page: {current_page}/{total_pages}, Item count: {}/{total_count}",
                items.len()
            );
            current_page += 1;

            self.rate_limiter
                .check_and_throttle(Some(response.headers()))
                .await?;

            if total_count == 0 || items.len() as u64 >= total_count {
                break;
            }
        }

        Ok(PageAccumulation::new(total_count, items))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use crate::{ApiResponse, MockApiTransport, MockSleeper};

    use super::*;

    const SERVER_DATE: &str = "Wed, 21 Oct 2015 07:28:00 GMT";

    fn quota_headers() -> HashMap<String, String> {
        HashMap::from([
            ("date".to_string(), SERVER_DATE.to_string()),
            ("x-ratelimit-limit".to_string(), "60".to_string()),
            ("x-ratelimit-remaining".to_string(), "59".to_string()),
            ("x-ratelimit-reset".to_string(), "1445412510".to_string()),
        ])
    }

    fn page_headers(next_url: Option<&str>) -> HashMap<String, String> {
        let mut headers = quota_headers();
        if let Some(next_url) = next_url {
            headers.insert("link".to_string(), format!("<{next_url}>; rel=\"next\""));
        }

        headers
    }

    fn counted_body(total_count: u64, item_count: usize) -> String {
        let items = (0..item_count).map(|id| json!({"id": id})).collect::<Vec<_>>();

        json!({"total_count": total_count, "items": items}).to_string()
    }

    fn items_body(item_count: usize) -> String {
        let items = (0..item_count).map(|id| json!({"id": id})).collect::<Vec<_>>();

        json!(items).to_string()
    }

    fn paginator_with_mocks(transport: MockApiTransport, total_throttles: usize) -> Paginator {
        let transport = Arc::new(transport);
        let sleeper = {
            let mut sleeper = MockSleeper::new();
            sleeper
                .expect_sleep()
                .returning(|_| ())
                .times(total_throttles);

            sleeper
        };
        let rate_limiter = RateLimiter::new(
            transport.clone(),
            Arc::new(sleeper),
            "http://localhost/rate_limit",
            Duration::ZERO,
        );

        Paginator::new(transport, rate_limiter)
    }

    #[tokio::test]
    async fn count_driven_fetches_three_pages_for_total_250() {
        let transport = {
            let mut transport = MockApiTransport::new();
            transport
                .expect_get()
                .withf(|url| url.ends_with("page=1"))
                .returning(|_| Ok(ApiResponse::new(200, quota_headers(), counted_body(250, 100))))
                .times(1);
            transport
                .expect_get()
                .withf(|url| url.ends_with("page=2"))
                .returning(|_| Ok(ApiResponse::new(200, quota_headers(), counted_body(250, 100))))
                .times(1);
            transport
                .expect_get()
                .withf(|url| url.ends_with("page=3"))
                .returning(|_| Ok(ApiResponse::new(200, quota_headers(), counted_body(250, 50))))
                .times(1);

            transport
        };
        let paginator = paginator_with_mocks(transport, 3);

        let pages = paginator
            .fetch_by_count(|page| format!("http://localhost/search?page={page}"))
            .await
            .unwrap();

        assert_eq!(250, pages.total_count());
        assert_eq!(250, pages.items().len());
    }

    #[tokio::test]
    async fn count_driven_terminates_on_zero_total() {
        let transport = {
            let mut transport = MockApiTransport::new();
            transport
                .expect_get()
                .returning(|_| Ok(ApiResponse::new(200, quota_headers(), counted_body(0, 0))))
                .times(1);

            transport
        };
        let paginator = paginator_with_mocks(transport, 1);

        let pages = paginator
            .fetch_by_count(|page| format!("http://localhost/search?page={page}"))
            .await
            .unwrap();

        assert_eq!(0, pages.total_count());
        assert!(pages.items().is_empty());
    }

    #[tokio::test]
    async fn count_driven_aborts_on_non_success_response() {
        let transport = {
            let mut transport = MockApiTransport::new();
            transport
                .expect_get()
                .returning(|_| Ok(ApiResponse::new(403, HashMap::new(), "rate limited".to_string())))
                .times(1);

            transport
        };
        let paginator = paginator_with_mocks(transport, 0);

        let error = paginator
            .fetch_by_count(|page| format!("http://localhost/search?page={page}"))
            .await
            .expect_err("Expected an HTTP error");

        assert!(matches!(
            error.downcast_ref::<ProviderError>(),
            Some(ProviderError::Http(body)) if body == "rate limited"
        ));
    }

    #[tokio::test]
    async fn cursor_driven_follows_next_link_until_absent() {
        let transport = {
            let mut transport = MockApiTransport::new();
            transport
                .expect_get()
                .withf(|url| url.ends_with("page=1"))
                .returning(|_| {
                    Ok(ApiResponse::new(
                        200,
                        page_headers(Some("http://localhost/issues?page=2")),
                        items_body(100),
                    ))
                })
                .times(1);
            transport
                .expect_get()
                .withf(|url| url.ends_with("page=2"))
                .returning(|_| Ok(ApiResponse::new(200, page_headers(None), items_body(40))))
                .times(1);

            transport
        };
        let paginator = paginator_with_mocks(transport, 2);

        let pages = paginator
            .fetch_by_cursor("http://localhost/issues?page=1")
            .await
            .unwrap();

        assert_eq!(140, pages.total_count());
        assert_eq!(140, pages.items().len());
    }

    #[tokio::test]
    async fn cursor_driven_terminates_on_empty_page() {
        let transport = {
            let mut transport = MockApiTransport::new();
            transport
                .expect_get()
                .returning(|_| {
                    Ok(ApiResponse::new(
                        200,
                        page_headers(Some("http://localhost/issues?page=2")),
                        items_body(0),
                    ))
                })
                .times(1);

            transport
        };
        let paginator = paginator_with_mocks(transport, 1);

        let pages = paginator
            .fetch_by_cursor("http://localhost/issues?page=1")
            .await
            .unwrap();

        assert_eq!(0, pages.total_count());
        assert!(pages.items().is_empty());
    }

    #[tokio::test]
    async fn cursor_driven_aborts_on_non_success_response() {
        let transport = {
            let mut transport = MockApiTransport::new();
            transport
                .expect_get()
                .returning(|_| Ok(ApiResponse::new(404, HashMap::new(), "not found".to_string())))
                .times(1);

            transport
        };
        let paginator = paginator_with_mocks(transport, 0);

        let error = paginator
            .fetch_by_cursor("http://localhost/issues?page=1")
            .await
            .expect_err("Expected an HTTP error");

        assert!(matches!(
            error.downcast_ref::<ProviderError>(),
            Some(ProviderError::Http(body)) if body == "not found"
        ));
    }

    #[test]
    fn link_header_parsing_extracts_relations() {
        let header = r#"<https://localhost/issues?page=2>; rel="next", <https://localhost/issues?page=5>; rel="last""#;

        let relations = parse_link_header(header);

        assert_eq!(
            Some(&"https://localhost/issues?page=2".to_string()),
            relations.get("next")
        );
        assert_eq!(
            Some(&"https://localhost/issues?page=5".to_string()),
            relations.get("last")
        );
    }

    #[test]
    fn link_header_parsing_matches_relations_case_insensitively() {
        let header = r#"<https://localhost/issues?page=2>; rel="Next""#;

        let relations = parse_link_header(header);

        assert_eq!(
            Some(&"https://localhost/issues?page=2".to_string()),
            relations.get("next")
        );
    }

    #[test]
    fn link_header_parsing_without_next_relation() {
        let header = r#"<https://localhost/issues?page=1>; rel="prev""#;

        let relations = parse_link_header(header);

        assert_eq!(None, relations.get("next"));
    }
}
