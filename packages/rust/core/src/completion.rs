//! OpenAI-compatible chat-completion client (`/chat/completions`).
//!
//! One request per call, no retry. All wire types are private to this module.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use profilegraph_shared::{CompletionConfig, ProfileGraphError, Result};

/// Client for a single chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    client: Client,
    config: CompletionConfig,
}

impl CompletionClient {
    pub fn new(config: CompletionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ProfileGraphError::Completion(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Send a system + user message pair and return the first choice's text.
    ///
    /// A missing `content` yields an empty string; transport errors, timeouts,
    /// non-2xx statuses, and undecodable bodies are errors.
    #[instrument(skip_all, fields(model = %self.config.model))]
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let api_key = self
            .config
            .usable_api_key()
            .ok_or_else(|| ProfileGraphError::config("no completion API key configured"))?;

        let payload = ChatCompletionRequest {
            model: &self.config.model,
            messages: [
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(prompt_chars = user.chars().count(), "sending completion request");

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let kind = if e.is_timeout() { "timed out" } else { "request failed" };
                ProfileGraphError::Completion(format!("{kind}: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "completion endpoint returned an error status");
            let excerpt: String = body.chars().take(200).collect();
            return Err(ProfileGraphError::Completion(format!(
                "endpoint returned status {status}: {excerpt}"
            )));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            ProfileGraphError::Completion(format!("failed to parse response body: {e}"))
        })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        debug!(response_chars = text.chars().count(), "received completion");
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
