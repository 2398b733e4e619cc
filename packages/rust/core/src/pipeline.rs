//! End-to-end workflows: `scrape` (URLs → text excerpts) and
//! `graph` (profile → search pages → knowledge graph).

use serde::Serialize;
use tracing::{info, instrument, warn};
use url::Url;

use profilegraph_fetcher::PageFetcher;
use profilegraph_shared::{KnowledgeGraph, ProfileGraphError, ProfileInput, Result};

use crate::generator::Generator;
use crate::sources::search_sources;

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called once all fetches have settled.
    fn fetched(&self, succeeded: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn fetched(&self, _succeeded: usize, _total: usize) {}
    fn done(&self) {}
}

// ---------------------------------------------------------------------------
// Scrape
// ---------------------------------------------------------------------------

/// Result of scraping one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOutcome {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub success: bool,
}

impl ScrapeOutcome {
    fn failed(url: &str, error: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            title: None,
            text_content: None,
            error: Some(error.into()),
            success: false,
        }
    }
}

/// Scrape every URL concurrently, reporting a title and the first
/// `excerpt_chars` characters of text (followed by `...`) per URL.
///
/// An empty list is a validation error; everything else is reported per URL.
#[instrument(skip_all, fields(urls = urls.len()))]
pub async fn scrape_urls(
    fetcher: &PageFetcher,
    urls: &[String],
    excerpt_chars: usize,
    progress: &dyn ProgressReporter,
) -> Result<Vec<ScrapeOutcome>> {
    if urls.is_empty() {
        return Err(ProfileGraphError::validation("Please provide an array of URLs"));
    }

    progress.phase("Fetching pages");

    let parsed: Vec<std::result::Result<Url, String>> = urls
        .iter()
        .map(|raw| Url::parse(raw.trim()).map_err(|e| format!("invalid URL: {e}")))
        .collect();
    let valid: Vec<Url> = parsed.iter().filter_map(|p| p.as_ref().ok().cloned()).collect();

    let mut fetched = fetcher.fetch_all(&valid).await.into_iter();

    let outcomes: Vec<ScrapeOutcome> = urls
        .iter()
        .zip(parsed)
        .map(|(raw, parsed)| match parsed {
            Err(e) => ScrapeOutcome::failed(raw, e),
            Ok(_) => match fetched.next() {
                Some(Ok(page)) => ScrapeOutcome {
                    url: raw.clone(),
                    title: Some(page.title.unwrap_or_default()),
                    text_content: Some(excerpt(&page.text, excerpt_chars)),
                    error: None,
                    success: true,
                },
                Some(Err(e)) => ScrapeOutcome::failed(raw, e.to_string()),
                None => ScrapeOutcome::failed(raw, "no fetch result"),
            },
        })
        .collect();

    let succeeded = outcomes.iter().filter(|o| o.success).count();
    progress.fetched(succeeded, outcomes.len());
    info!(succeeded, total = outcomes.len(), "scrape complete");
    progress.done();

    Ok(outcomes)
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

// ---------------------------------------------------------------------------
// Knowledge graph
// ---------------------------------------------------------------------------

/// Validate `profile`, gather search-page text, and generate its graph.
///
/// With `fetcher = None` the graph is generated from the profile alone.
/// The only error is an invalid profile; fetch and model failures degrade.
#[instrument(skip_all, fields(title = %profile.title))]
pub async fn build_knowledge_graph(
    profile: &ProfileInput,
    fetcher: Option<&PageFetcher>,
    generator: &Generator,
    progress: &dyn ProgressReporter,
) -> Result<KnowledgeGraph> {
    profile.validate()?;

    let source_texts = match fetcher {
        // Source text only feeds the model prompt.
        Some(fetcher) if generator.is_model_backed() => {
            progress.phase("Fetching source pages");
            let urls = search_sources(profile)?;
            let texts = fetcher.fetch_texts_or_empty(&urls).await;
            let succeeded = texts.iter().filter(|t| !t.is_empty()).count();
            progress.fetched(succeeded, texts.len());
            if succeeded == 0 {
                warn!("no source page yielded text");
            }
            texts
        }
        _ => Vec::new(),
    };

    progress.phase("Generating knowledge graph");
    info!(
        company = %profile.company,
        sources = source_texts.len(),
        "generating knowledge graph"
    );
    let graph = generator.generate(profile, &source_texts).await;

    progress.done();
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use profilegraph_shared::{CompletionConfig, CompletionSection, FetchConfig};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::templates::select_template;

    fn fetcher() -> PageFetcher {
        let config = FetchConfig {
            timeout: Duration::from_secs(2),
            ..FetchConfig::default()
        };
        PageFetcher::new(&config).unwrap()
    }

    fn profile(title: &str) -> ProfileInput {
        ProfileInput {
            title: title.into(),
            location: "NYC".into(),
            company: "Acme".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn scrape_rejects_empty_list() {
        let err = scrape_urls(&fetcher(), &[], 1000, &SilentProgress)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn scrape_reports_each_url_in_order() {
        let server = MockServer::start().await;
        Mock::given(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><head><title>Hello</title></head><body><p>0123456789abcdef</p></body></html>",
            ))
            .mount(&server)
            .await;
        Mock::given(path("/gone"))
            .respond_with(ResponseTemplate::new(410))
            .mount(&server)
            .await;

        let urls = vec![
            format!("{}/ok", server.uri()),
            "not a url".to_string(),
            format!("{}/gone", server.uri()),
        ];
        let outcomes = scrape_urls(&fetcher(), &urls, 10, &SilentProgress).await.unwrap();

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].success);
        assert_eq!(outcomes[0].title.as_deref(), Some("Hello"));
        assert_eq!(outcomes[0].text_content.as_deref(), Some("0123456789..."));

        assert!(!outcomes[1].success);
        assert_eq!(outcomes[1].url, "not a url");
        assert!(outcomes[1].error.as_deref().unwrap().contains("invalid URL"));

        assert!(!outcomes[2].success);
        assert!(outcomes[2].error.as_deref().unwrap().contains("410"));
    }

    #[test]
    fn scrape_outcome_serializes_like_the_api() {
        let ok = ScrapeOutcome {
            url: "https://example.com".into(),
            title: Some("Example".into()),
            text_content: Some("hi...".into()),
            error: None,
            success: true,
        };
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["textContent"], "hi...");
        assert!(json.get("error").is_none());

        let failed = serde_json::to_value(ScrapeOutcome::failed("x", "boom")).unwrap();
        assert_eq!(failed, json!({"url": "x", "error": "boom", "success": false}));
    }

    #[tokio::test]
    async fn graph_rejects_incomplete_profile() {
        let mut p = profile("Developer");
        p.location.clear();
        let err = build_knowledge_graph(&p, None, &Generator::template_only(), &SilentProgress)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn template_only_graph_skips_fetching() {
        let p = profile("Senior Product Manager");
        let graph = build_knowledge_graph(
            &p,
            Some(&fetcher()),
            &Generator::template_only(),
            &SilentProgress,
        )
        .await
        .unwrap();
        assert_eq!(graph, select_template(&p.title));
    }

    #[tokio::test]
    async fn model_backed_graph_without_sources() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("Title: Data Engineer"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content":
                    "{\"Education Level & Learning Approach\": \"Degree in statistics plus on-the-job learning\"}"
                }}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut config =
            CompletionConfig::new(&CompletionSection::default(), Some("sk-test".into()));
        config.endpoint = server.uri();
        let generator = Generator::new(config).unwrap();

        let p = profile("Data Engineer");
        let graph = build_knowledge_graph(&p, None, &generator, &SilentProgress)
            .await
            .unwrap();
        assert_eq!(
            graph.education_level_and_learning,
            "Degree in statistics plus on-the-job learning"
        );
        assert_eq!(graph.tools_used, select_template(&p.title).tools_used);
    }
}
