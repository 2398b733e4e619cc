//! Profile knowledge-graph generator.
//!
//! Calls the completion endpoint when a key is configured and repairs the
//! result with [`reconcile`]. Every failure falls back to the title's
//! template, so [`Generator::generate`] has no error path.

use serde_json::Value;
use tracing::{info, instrument, warn};

use profilegraph_shared::{CompletionConfig, KnowledgeGraph, ProfileGraphError, ProfileInput, Result};

use crate::completion::CompletionClient;
use crate::prompt::{SYSTEM_PROMPT, combine_sources, json_candidate, user_prompt};
use crate::reconcile::reconcile;
use crate::templates::select_template;

/// Produces a [`KnowledgeGraph`] for a profile.
#[derive(Debug, Clone)]
pub struct Generator {
    /// `None` when no usable key is configured.
    client: Option<CompletionClient>,
}

impl Generator {
    /// Build a generator. Without a usable key it only serves templates.
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let client = if config.usable_api_key().is_some() {
            Some(CompletionClient::new(config)?)
        } else {
            None
        };
        Ok(Self { client })
    }

    /// Generator that never contacts an endpoint.
    pub fn template_only() -> Self {
        Self { client: None }
    }

    /// True if a completion endpoint will be called.
    pub fn is_model_backed(&self) -> bool {
        self.client.is_some()
    }

    /// Generate a graph for `profile` from the fetched `source_texts`.
    #[instrument(skip_all, fields(title = %profile.title, company = %profile.company))]
    pub async fn generate(&self, profile: &ProfileInput, source_texts: &[String]) -> KnowledgeGraph {
        let Some(client) = &self.client else {
            info!("no completion key configured, using template");
            return select_template(&profile.title);
        };

        match generate_with_model(client, profile, source_texts).await {
            Ok(graph) => graph,
            Err(e) => {
                warn!(error = %e, "model generation failed, using template");
                select_template(&profile.title)
            }
        }
    }
}

async fn generate_with_model(
    client: &CompletionClient,
    profile: &ProfileInput,
    source_texts: &[String],
) -> Result<KnowledgeGraph> {
    let combined = combine_sources(source_texts);
    info!(
        source_chars = combined.chars().count(),
        model = %client.config().model,
        "prepared source text for generation"
    );

    let prompt = user_prompt(profile, &combined);
    let text = client.complete(SYSTEM_PROMPT, &prompt).await?;

    let raw: Value = serde_json::from_str(json_candidate(&text))
        .map_err(|e| ProfileGraphError::parse(format!("completion is not valid JSON: {e}")))?;

    Ok(reconcile(&raw, profile))
}
