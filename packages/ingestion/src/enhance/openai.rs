//! OpenAI implementation of the Enhancer trait.
//!
//! ```rust,ignore
//! use ingestion::enhance::OpenAiEnhancer;
//!
//! let enhancer = OpenAiEnhancer::new("sk-...").with_model("gpt-4o-mini");
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Enhancement, Enhancer};
use crate::error::{IngestError, Result};
use crate::security::SecretString;
use crate::types::content::ExtractedContent;

/// Body text sent to the model is cut at this many characters.
const MAX_CONTENT_CHARS: usize = 12_000;

const SYSTEM_PROMPT: &str = "You are an editorial assistant for a foreign-policy analyst's portfolio. \
Given an article or video description, write 3 to 5 concise summary bullets (one sentence each, \
factual, no marketing language) and up to 6 topical tags (countries, regions, themes). \
Respond only with the requested JSON.";

/// Summaries and tags via OpenAI structured output.
#[derive(Clone)]
pub struct OpenAiEnhancer {
    client: Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl OpenAiEnhancer {
    /// Create a new enhancer with the given API key.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// JSON schema for `Enhancement` in the shape strict mode accepts.
    fn response_schema() -> serde_json::Value {
        let mut schema = serde_json::to_value(schemars::schema_for!(Enhancement))
            .unwrap_or_else(|_| serde_json::json!({ "type": "object" }));

        if let Some(obj) = schema.as_object_mut() {
            obj.remove("$schema");
            obj.remove("title");
            obj.insert("additionalProperties".to_string(), serde_json::Value::Bool(false));
        }
        schema
    }

    async fn generate_structured(&self, user: &str) -> Result<String> {
        let request = StructuredRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                format_type: "json_schema".to_string(),
                json_schema: JsonSchemaFormat {
                    name: "content_enhancement".to_string(),
                    strict: true,
                    schema: Self::response_schema(),
                },
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| IngestError::Enhancement(e.to_string().into()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(IngestError::Enhancement(
                format!("OpenAI structured output error: {}", error_text).into(),
            ));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| IngestError::Enhancement(e.to_string().into()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| IngestError::Enhancement("No response from OpenAI".into()))
    }
}

/// User prompt listing what was extracted.
fn format_enhance_prompt(content: &ExtractedContent) -> String {
    let body: String = content.body().chars().take(MAX_CONTENT_CHARS).collect();

    let mut prompt = format!("Source: {}\nTitle: {}\n", content.source, content.title);
    if let Some(excerpt) = &content.excerpt {
        prompt.push_str(&format!("Excerpt: {}\n", excerpt));
    }
    if !content.tags.is_empty() {
        prompt.push_str(&format!("Existing tags: {}\n", content.tags.join(", ")));
    }
    prompt.push_str(&format!("\nContent:\n{}", body));
    prompt
}

#[async_trait]
impl Enhancer for OpenAiEnhancer {
    async fn enhance(&self, content: &ExtractedContent) -> Result<Enhancement> {
        if !content.has_title() && content.body().is_empty() && content.excerpt.is_none() {
            return Ok(Enhancement::default());
        }

        debug!(url = %content.original_url, model = %self.model, "Requesting enhancement");
        let raw = self.generate_structured(&format_enhance_prompt(content)).await?;
        let enhancement: Enhancement = serde_json::from_str(&raw)?;
        Ok(enhancement)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[derive(Serialize)]
struct StructuredRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
    json_schema: JsonSchemaFormat,
}

#[derive(Serialize)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: serde_json::Value,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}
