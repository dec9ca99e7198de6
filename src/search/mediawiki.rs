//! MediaWiki/CirrusSearch client
//!
//! Issues the combined query+search+imageinfo call against the two
//! configured backends and normalizes each response into an ordered result
//! list:
//!
//! 1. **generator=search** populates `query.pages` with page-level data
//!    (imageinfo with a width-capped thumbnail URL).
//! 2. **list=search** populates `query.search` with the ranked hit list
//!    (snippet, titlesnippet, categorysnippet).
//!
//! Normalization joins the two by title so each ranked hit carries its
//! thumbnail, in the order the upstream returned it.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::UpstreamConfig;
use crate::models::{ComparisonResponse, ImageInfo, SearchResult};

/// Errors that can occur during an upstream search call
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Client for the two fixed search backends
#[derive(Clone)]
pub struct MediaWikiClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl MediaWikiClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Run one comparison: query both upstreams in turn and pair up their
    /// normalized result lists.
    ///
    /// Never fails: a failed or malformed upstream degrades to an empty
    /// list for that side so one backend's trouble can't sink the whole
    /// comparison. `passthrough` tuning parameters go to the left upstream
    /// only.
    pub async fn compare(
        &self,
        query: &str,
        passthrough: &[(String, String)],
    ) -> ComparisonResponse {
        let left = self
            .fetch_side(&self.config.left_url, query, passthrough)
            .await
            .unwrap_or_else(|e| {
                warn!(side = "left", error = %e, "upstream search failed");
                Vec::new()
            });

        let right = self
            .fetch_side(&self.config.right_url, query, &[])
            .await
            .unwrap_or_else(|e| {
                warn!(side = "right", error = %e, "upstream search failed");
                Vec::new()
            });

        ComparisonResponse { left, right }
    }

    /// Query one upstream and normalize its response.
    async fn fetch_side(
        &self,
        base_url: &str,
        query: &str,
        passthrough: &[(String, String)],
    ) -> Result<Vec<SearchResult>, SearchError> {
        let limit = self.config.search_limit.to_string();
        let namespace = self.config.search_namespace.to_string();
        let thumb_width = self.config.thumb_width.to_string();
        let snippet_props = "snippet|categorysnippet|titlesnippet";

        let mut params: Vec<(&str, &str)> = vec![
            ("action", "query"),
            ("generator", "search"),
            ("gsrsearch", query),
            ("gsrnamespace", &namespace),
            ("gsrprop", snippet_props),
            ("gsrlimit", &limit),
            ("list", "search"),
            ("srsearch", query),
            ("srnamespace", &namespace),
            ("srprop", snippet_props),
            ("srlimit", &limit),
            ("prop", "imageinfo"),
            ("iiprop", "url"),
            ("iiurlwidth", &thumb_width),
            ("format", "json"),
            ("formatversion", "2"),
        ];
        for (k, v) in passthrough {
            params.push((k.as_str(), v.as_str()));
        }

        let response = self.http.get(base_url).query(&params).send().await?;
        if !response.status().is_success() {
            return Err(SearchError::Status(response.status()));
        }

        let body: Value = response.json().await?;
        debug!(url = base_url, "upstream response received");

        Ok(normalize(&body))
    }
}

/// Reshape one upstream response into an ordered result list.
///
/// Builds a title-to-page lookup from `query.pages`, then walks
/// `query.search` in upstream order, attaching each hit's imageinfo from
/// the lookup (empty when the page has none). An entirely absent `pages`
/// section yields an empty list, not an error.
fn normalize(body: &Value) -> Vec<SearchResult> {
    let Some(pages) = body.pointer("/query/pages").and_then(Value::as_array) else {
        return Vec::new();
    };
    let Some(search) = body.pointer("/query/search").and_then(Value::as_array) else {
        return Vec::new();
    };

    let by_title: HashMap<&str, &Value> = pages
        .iter()
        .filter_map(|p| p.get("title").and_then(Value::as_str).map(|t| (t, p)))
        .collect();

    let mut results = Vec::with_capacity(search.len());
    for entry in search {
        let Ok(mut result) = serde_json::from_value::<SearchResult>(entry.clone()) else {
            debug!("skipping malformed search entry");
            continue;
        };
        result.imageinfo = by_title
            .get(result.title.as_str())
            .and_then(|p| p.get("imageinfo"))
            .and_then(|ii| serde_json::from_value::<Vec<ImageInfo>>(ii.clone()).ok())
            .unwrap_or_default();
        results.push(result);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_config(left_url: String, right_url: String) -> UpstreamConfig {
        UpstreamConfig {
            left_url,
            right_url,
            search_limit: 20,
            search_namespace: 6,
            thumb_width: 600,
            timeout_secs: 5,
        }
    }

    fn cat_body() -> Value {
        json!({
            "query": {
                "pages": [
                    {
                        "pageid": 1,
                        "title": "File:Cat1.jpg",
                        "imageinfo": [{"thumburl": "https://example.org/thumb/Cat1.jpg"}]
                    },
                    {
                        "pageid": 2,
                        "title": "File:Cat2.jpg"
                    }
                ],
                "search": [
                    {"title": "File:Cat2.jpg", "snippet": "a <b>cat</b>", "titlesnippet": "Cat2"},
                    {"title": "File:Cat1.jpg", "snippet": "another <b>cat</b>", "titlesnippet": "Cat1"}
                ]
            }
        })
    }

    #[test]
    fn normalize_preserves_search_order_and_attaches_imageinfo() {
        let results = normalize(&cat_body());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "File:Cat2.jpg");
        assert!(results[0].imageinfo.is_empty());
        assert_eq!(results[1].title, "File:Cat1.jpg");
        assert_eq!(
            results[1].imageinfo[0].thumburl.as_deref(),
            Some("https://example.org/thumb/Cat1.jpg")
        );
    }

    #[test]
    fn normalize_missing_page_entry_yields_empty_imageinfo_not_drop() {
        let body = json!({
            "query": {
                "pages": [{"title": "File:Other.jpg"}],
                "search": [{"title": "File:Cat.jpg", "snippet": "", "titlesnippet": ""}]
            }
        });
        let results = normalize(&body);
        assert_eq!(results.len(), 1);
        assert!(results[0].imageinfo.is_empty());
    }

    #[test]
    fn normalize_absent_pages_section_is_empty_list() {
        let body = json!({"query": {"search": [{"title": "File:Cat.jpg"}]}});
        assert!(normalize(&body).is_empty());

        let body = json!({"batchcomplete": true});
        assert!(normalize(&body).is_empty());
    }

    #[test]
    fn normalize_passes_through_extra_fields() {
        let body = json!({
            "query": {
                "pages": [{"title": "File:Cat.jpg"}],
                "search": [{
                    "title": "File:Cat.jpg",
                    "snippet": "s",
                    "titlesnippet": "t",
                    "categorysnippet": "c",
                    "pageid": 42
                }]
            }
        });
        let results = normalize(&body);
        let serialized = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(serialized["categorysnippet"], "c");
        assert_eq!(serialized["pageid"], 42);
    }

    #[tokio::test]
    async fn passthrough_params_reach_left_upstream_only() {
        let mut server = mockito::Server::new_async().await;

        let left = server
            .mock("GET", "/left/api.php")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("srsearch".into(), "cat".into()),
                mockito::Matcher::UrlEncoded("cirrusQualW".into(), "2".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(cat_body().to_string())
            .expect(1)
            .create_async()
            .await;

        let right = server
            .mock("GET", "/right/api.php")
            .match_query(mockito::Matcher::UrlEncoded("srsearch".into(), "cat".into()))
            .with_header("content-type", "application/json")
            .with_body(cat_body().to_string())
            .expect(1)
            .create_async()
            .await;

        // Registered last so it takes precedence if the tuning parameter
        // ever leaks to the right side.
        let right_leak = server
            .mock("GET", "/right/api.php")
            .match_query(mockito::Matcher::UrlEncoded("cirrusQualW".into(), "2".into()))
            .expect(0)
            .create_async()
            .await;

        let client = MediaWikiClient::new(test_config(
            format!("{}/left/api.php", server.url()),
            format!("{}/right/api.php", server.url()),
        ))
        .unwrap();

        let passthrough = vec![("cirrusQualW".to_string(), "2".to_string())];
        let response = client.compare("cat", &passthrough).await;

        left.assert_async().await;
        right.assert_async().await;
        right_leak.assert_async().await;
        assert_eq!(response.left.len(), 2);
        assert_eq!(response.right.len(), 2);
    }

    #[tokio::test]
    async fn failed_upstream_degrades_to_empty_side() {
        let mut server = mockito::Server::new_async().await;

        let _left = server
            .mock("GET", "/left/api.php")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let _right = server
            .mock("GET", "/right/api.php")
            .match_query(mockito::Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(cat_body().to_string())
            .create_async()
            .await;

        let client = MediaWikiClient::new(test_config(
            format!("{}/left/api.php", server.url()),
            format!("{}/right/api.php", server.url()),
        ))
        .unwrap();

        let response = client.compare("cat", &[]).await;
        assert!(response.left.is_empty());
        assert_eq!(response.right.len(), 2);
    }

    #[tokio::test]
    async fn malformed_upstream_body_degrades_to_empty_side() {
        let mut server = mockito::Server::new_async().await;

        let _left = server
            .mock("GET", "/left/api.php")
            .match_query(mockito::Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body("<html>not json at all")
            .create_async()
            .await;

        let _right = server
            .mock("GET", "/right/api.php")
            .match_query(mockito::Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body("{\"query\": 7}")
            .create_async()
            .await;

        let client = MediaWikiClient::new(test_config(
            format!("{}/left/api.php", server.url()),
            format!("{}/right/api.php", server.url()),
        ))
        .unwrap();

        let response = client.compare("cat", &[]).await;
        assert!(response.left.is_empty());
        assert!(response.right.is_empty());
    }

    #[tokio::test]
    async fn empty_query_is_forwarded_as_given() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/api.php")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("srsearch".into(), "".into()),
                mockito::Matcher::UrlEncoded("gsrsearch".into(), "".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body("{\"query\": {\"pages\": [], \"search\": []}}")
            .expect(2)
            .create_async()
            .await;

        let client = MediaWikiClient::new(test_config(
            format!("{}/api.php", server.url()),
            format!("{}/api.php", server.url()),
        ))
        .unwrap();

        let response = client.compare("", &[]).await;
        mock.assert_async().await;
        assert!(response.left.is_empty());
        assert!(response.right.is_empty());
    }
}
