/// LLM Client — the single point of entry for all Groq API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Groq API directly.
/// All text generation MUST go through the `TextGenerator` trait.
///
/// Model: llama-3.1-8b-instant (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "llama-3.1-8b-instant";

/// Prefix of the error-marker string returned when a generation call fails.
/// Callers that need structure parse the generated text as JSON; a marker
/// string naturally fails that parse and triggers their fixed fallbacks.
pub const ERROR_MARKER: &str = "LLM Error: ";

/// Default sampling used by the question/evaluation/competence call sites.
pub const DEFAULT_TEMPERATURE: f32 = 0.6;
pub const DEFAULT_MAX_TOKENS: u32 = 800;

#[derive(Debug, Error)]
enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct GroqApiError {
    error: GroqApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GroqApiErrorBody {
    message: String,
}

/// Text-generation gateway. Total by contract: implementations never return
/// an error — transport and API failures come back as a string starting with
/// [`ERROR_MARKER`], and downstream parsers fall back on their fixed defaults.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>` so the interview
/// pipeline is testable with a scripted fake.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, temperature: f32, max_tokens: u32) -> String;
}

/// The production gateway, backed by Groq's OpenAI-compatible chat API.
/// Single attempt per call — no retries, no streaming.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
}

impl GroqClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn call(
        &self,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, GatewayError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
            max_tokens,
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the structured error message
            let message = serde_json::from_str::<GroqApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(GatewayError::EmptyContent)?;

        debug!("LLM call succeeded: {} chars generated", content.len());

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    async fn generate(&self, prompt: &str, temperature: f32, max_tokens: u32) -> String {
        match self.call(prompt, temperature, max_tokens).await {
            Ok(text) => text,
            Err(e) => {
                warn!("LLM call failed: {e}");
                format!("{ERROR_MARKER}{e}")
            }
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
