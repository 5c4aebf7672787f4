//! Gemini API interaction.
//!
//! One article is summarized with exactly one stateless `generateContent`
//! call. The HTML, the card instruction and the request line travel as three
//! text parts of a single user turn; no chat session is kept.
//!
//! # Architecture
//!
//! - [`AskAsync`]: Core trait defining async LLM interaction
//! - [`GeminiClient`]: Implementation backed by the Generative Language REST API

use crate::config::GenerationConfig;
use crate::error::{Error, Result};
use crate::models::NewsPage;
use crate::template::{REQUEST_LINE, fenced_html, news_prompt};
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Trait for async LLM interaction.
///
/// Implementors take a fetched page and return the model's raw reply. The
/// pipeline is generic over this trait so tests can drive it with a canned
/// reply.
pub trait AskAsync {
    /// The type of response returned by the LLM.
    type Response;

    /// Send the page to the LLM and receive a response.
    async fn ask(&self, page: &NewsPage) -> Result<Self::Response>;
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: Client,
    api_key: String,
    config: GenerationConfig,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.config.model)
            .field("endpoint", &self.config.endpoint)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(http: Client, api_key: impl Into<String>, config: GenerationConfig) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            config,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(&self, page: &NewsPage) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part {
                        text: fenced_html(&page.html),
                    },
                    Part {
                        text: news_prompt(&page.source),
                    },
                    Part {
                        text: REQUEST_LINE.to_string(),
                    },
                ],
            }],
            generation_config: GenerationParams {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                top_k: self.config.top_k,
                max_output_tokens: self.config.max_output_tokens,
                response_mime_type: self.config.response_mime_type.clone(),
            },
        }
    }
}

impl AskAsync for GeminiClient {
    type Response = String;

    #[instrument(level = "info", skip_all, fields(model = %self.config.model, source = %page.source))]
    async fn ask(&self, page: &NewsPage) -> Result<Self::Response> {
        let t0 = Instant::now();
        let request = self.build_request(page);

        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.config.timeout())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(unreadable body)".to_string());
            warn!(%status, elapsed_ms = t0.elapsed().as_millis(), "Gemini call failed");
            return Err(Error::Gemini(format!(
                "status {status}: {}",
                truncate_for_log(&body, 500)
            )));
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = body.into_text()?;
        info!(
            elapsed_ms = t0.elapsed().as_millis(),
            chars = text.chars().count(),
            "Gemini reply received"
        );
        debug!(reply = %truncate_for_log(&text, 300), "Reply preview");
        Ok(text)
    }
}

/// Summarize a page through any [`AskAsync`] backend.
#[instrument(level = "info", skip_all, fields(url = %page.url))]
pub async fn summarize<A>(client: &A, page: &NewsPage) -> Result<String>
where
    A: AskAsync<Response = String>,
{
    client.ask(page).await
}

// --- Generative Language API types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationParams,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationParams {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenate the text parts of the first candidate.
    fn into_text(self) -> Result<String> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(Error::Gemini(format!("empty response ({reason})")));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
            return Err(Error::Gemini(format!(
                "candidate has no text (finish reason {reason})"
            )));
        }
        Ok(text)
    }
}
