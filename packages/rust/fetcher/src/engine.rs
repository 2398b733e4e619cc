//! Concurrent page fetcher.
//!
//! Each URL is fetched in its own task; results come back in input order
//! once every task has settled. There is no retry: one attempt per URL,
//! bounded by the configured timeout.

use std::time::Duration;

use reqwest::Client;
use scraper::Html;
use tracing::{debug, info, instrument, warn};
use url::Url;

use profilegraph_shared::{FetchConfig, ProfileGraphError, Result};

use crate::extract::{page_title, visible_text};

// ---------------------------------------------------------------------------
// PageText
// ---------------------------------------------------------------------------

/// Visible content of a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Contents of `<title>`, if any.
    pub title: Option<String>,
    /// Visible body text, whitespace-collapsed.
    pub text: String,
}

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

/// HTTP page fetcher. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
    timeout: Duration,
}

impl PageFetcher {
    /// Create a fetcher with the given configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ProfileGraphError::Network(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }

    /// Fetch one page and extract its title and visible text.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn fetch_page(&self, url: &Url) -> Result<PageText> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ProfileGraphError::Network(format!(
                "{url}: unsupported scheme '{}'",
                url.scheme()
            )));
        }

        debug!(timeout_ms = self.timeout.as_millis() as u64, "fetching page");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| ProfileGraphError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProfileGraphError::Network(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProfileGraphError::Network(format!("{url}: body read failed: {e}")))?;

        let doc = Html::parse_document(&body);
        let page = PageText {
            title: page_title(&doc),
            text: visible_text(&doc),
        };

        info!(chars = page.text.chars().count(), "page fetched");
        Ok(page)
    }

    /// Fetch a page's visible text only.
    pub async fn fetch_text(&self, url: &Url) -> Result<String> {
        Ok(self.fetch_page(url).await?.text)
    }

    /// Fetch every URL concurrently. Results are positional.
    pub async fn fetch_all(&self, urls: &[Url]) -> Vec<Result<PageText>> {
        let handles: Vec<_> = urls
            .iter()
            .cloned()
            .map(|url| {
                let fetcher = self.clone();
                tokio::spawn(async move { fetcher.fetch_page(&url).await })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for (handle, url) in handles.into_iter().zip(urls) {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => Err(ProfileGraphError::Network(format!("{url}: fetch task failed: {e}"))),
            };
            results.push(result);
        }
        results
    }

    /// Fetch every URL concurrently; failures become empty text in place.
    pub async fn fetch_texts_or_empty(&self, urls: &[Url]) -> Vec<String> {
        self.fetch_all(urls)
            .await
            .into_iter()
            .map(|result| match result {
                Ok(page) => page.text,
                Err(e) => {
                    warn!(error = %e, "source fetch failed, using empty text");
                    String::new()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod fetcher_tests {
    use super::*;

    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> PageFetcher {
        PageFetcher::new(&FetchConfig::default()).unwrap()
    }

    fn fast_fetcher() -> PageFetcher {
        let config = FetchConfig {
            timeout: Duration::from_millis(200),
            ..FetchConfig::default()
        };
        PageFetcher::new(&config).unwrap()
    }

    fn html(title: &str, body: &str) -> String {
        format!("<html><head><title>{title}</title></head><body>{body}</body></html>")
    }

    #[tokio::test]
    async fn fetch_page_extracts_title_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/role"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html(
                "Role overview",
                "<h1>Sales Director</h1><script>var x = 1;</script><p>Quota planning</p>",
            )))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/role", server.uri())).unwrap();
        let page = fetcher().fetch_page(&url).await.unwrap();

        assert_eq!(page.title.as_deref(), Some("Role overview"));
        assert_eq!(page.text, "Sales Director Quota planning");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        let err = fetcher().fetch_text(&url).await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn unsupported_scheme_is_rejected() {
        let url = Url::parse("ftp://example.com/file.txt").unwrap();
        let err = fetcher().fetch_page(&url).await.unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }

    #[tokio::test]
    async fn fetch_all_keeps_positions_and_degrades_failures() {
        let server = MockServer::start().await;
        Mock::given(path("/a"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html("A", "alpha")))
            .mount(&server)
            .await;
        Mock::given(path("/b"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(path("/c"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(html("C", "gamma"))
                    .set_delay(Duration::from_millis(50)),
            )
            .mount(&server)
            .await;

        let urls: Vec<Url> = ["/a", "/b", "/c"]
            .iter()
            .map(|p| Url::parse(&format!("{}{p}", server.uri())).unwrap())
            .collect();

        let texts = fetcher().fetch_texts_or_empty(&urls).await;
        assert_eq!(texts, vec!["alpha".to_string(), String::new(), "gamma".to_string()]);
    }

    #[tokio::test]
    async fn slow_page_times_out() {
        let server = MockServer::start().await;
        Mock::given(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(html("Slow", "eventually"))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/slow", server.uri())).unwrap();
        let results = fast_fetcher().fetch_all(&[url]).await;
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
