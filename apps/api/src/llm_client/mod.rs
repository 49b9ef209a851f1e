/// LLM Client — the single point of entry for all chat-completion calls.
///
/// No other module talks to the LLM provider directly: callers depend on the
/// `TextBackend` trait and receive an `Arc<dyn TextBackend>` from `AppState`,
/// which lets tests replace the network with a scripted stub.
///
/// Every request is sent at temperature 0. Output is still not guaranteed to be
/// bit-for-bit reproducible, so callers must treat it as best-effort stable.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// Fixed sampling temperature for every backend call.
pub const TEMPERATURE: f32 = 0.0;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Narrow capability used by every LLM-backed stage: send a system
/// instruction plus a user payload, get the completion text back.
#[async_trait]
pub trait TextBackend: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError>;
}

/// Calls the backend and deserializes the completion as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn complete_json<T: DeserializeOwned>(
    backend: &dyn TextBackend,
    prompt: &str,
    system: &str,
) -> Result<T, LlmError> {
    let text = backend.complete(system, prompt).await?;
    serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the text content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client shared by all services.
/// Built once at startup and never mutated, so it is shared without locking.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
    max_attempts: u32,
}

impl LlmClient {
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
        max_attempts: u32,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url,
            api_key,
            model,
            max_attempts: max_attempts.max(1),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw chat-completion call, returning the full response object.
    /// 429 and 5xx responses are retried with exponential backoff while
    /// attempts remain; every other failure, transport errors included,
    /// returns immediately.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            temperature: TEMPERATURE,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let mut attempt: u32 = 1;
        loop {
            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await?;

            let status = response.status();

            if is_retryable(status) {
                let body = response.text().await.unwrap_or_default();
                if attempt >= self.max_attempts {
                    return Err(LlmError::Api {
                        status: status.as_u16(),
                        message: body,
                    });
                }

                let delay = backoff_delay(attempt);
                warn!(
                    "LLM API returned {} on attempt {}, retrying after {}ms: {}",
                    status,
                    attempt,
                    delay.as_millis(),
                    body
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat_response: ChatResponse = response.json().await?;

            if let Some(usage) = &chat_response.usage {
                debug!(
                    "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return Ok(chat_response);
        }
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Wait before retry number `attempt`: 1s, 2s, 4s, ... capped at 32s.
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(1000 * (1u64 << (attempt - 1).min(5)))
}

#[async_trait]
impl TextBackend for LlmClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(|s| s.trim())
                .unwrap_or(stripped)
        }
        None => text,
    }
}

/// Finds the first well-formed JSON array of strings in `text`.
///
/// Models sometimes wrap the array in prose or fences; every `[` is tried as a
/// starting point until one parses. Arrays holding anything other than
/// strings do not count.
pub fn parse_string_array(text: &str) -> Option<Vec<String>> {
    let text = strip_json_fences(text);
    if let Ok(items) = serde_json::from_str::<Vec<String>>(text) {
        return Some(items);
    }

    text.match_indices('[').find_map(|(start, _)| {
        serde_json::Deserializer::from_str(&text[start..])
            .into_iter::<Vec<String>>()
            .next()
            .and_then(Result::ok)
    })
}


#[cfg(test)]
mod tests {
    use super::testing::StubBackend;
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n[\"rust\"]\n```";
        assert_eq!(strip_json_fences(input), "[\"rust\"]");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"} ";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_string_array_plain() {
        let parsed = parse_string_array(r#"["Python", "AWS"]"#).unwrap();
        assert_eq!(parsed, vec!["Python", "AWS"]);
    }

    #[test]
    fn test_parse_string_array_surrounded_by_prose() {
        let text = "Here are the skills I found: [\"SCCM\", \"Microsoft SCCM\"]. Let me know!";
        let parsed = parse_string_array(text).unwrap();
        assert_eq!(parsed, vec!["SCCM", "Microsoft SCCM"]);
    }

    #[test]
    fn test_parse_string_array_skips_broken_leading_bracket() {
        let text = "Note [see below] ... [\"Jira\"]";
        assert_eq!(parse_string_array(text).unwrap(), vec!["Jira"]);
    }

    #[test]
    fn test_parse_string_array_rejects_wrong_shape() {
        assert!(parse_string_array(r#"{"skills": "python"}"#).is_none());
        assert!(parse_string_array("[1, 2, 3]").is_none());
        assert!(parse_string_array("no json here").is_none());
    }

    #[test]
    fn test_chat_response_text_ignores_blank_content() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "  "}}]}"#,
        )
        .unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_chat_request_carries_zero_temperature() {
        let request = ChatRequest {
            model: "gpt-4.1-mini",
            temperature: TEMPERATURE,
            messages: [
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "hi",
                },
            ],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["temperature"], 0.0);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["model"], "gpt-4.1-mini");
    }

    #[test]
    fn test_only_rate_limits_and_server_errors_are_retryable() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_retryable(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!is_retryable(StatusCode::BAD_REQUEST));
        assert!(!is_retryable(StatusCode::UNAUTHORIZED));
        assert!(!is_retryable(StatusCode::OK));
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        assert_eq!(backoff_delay(1), Duration::from_secs(1));
        assert_eq!(backoff_delay(2), Duration::from_secs(2));
        assert_eq!(backoff_delay(3), Duration::from_secs(4));
        assert_eq!(backoff_delay(40), Duration::from_secs(32));
    }

    #[tokio::test(start_paused = true)]
    async fn test_connection_error_is_not_retried() {
        let client = LlmClient::new(
            "http://127.0.0.1:1/v1/chat/completions".to_string(),
            "test-key".to_string(),
            "gpt-4.1-mini".to_string(),
            Duration::from_secs(30),
            3,
        )
        .unwrap();

        let start = tokio::time::Instant::now();
        let result = client.call("prompt", "system").await;

        assert!(matches!(result, Err(LlmError::Http(_))));
        assert!(start.elapsed() < backoff_delay(1));
    }

    #[tokio::test]
    async fn test_complete_json_strips_fences() {
        let stub = StubBackend::new().reply("```json\n{\"ok\": true}\n```");
        let value: serde_json::Value = complete_json(&stub, "prompt", "system").await.unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn test_complete_json_surfaces_parse_error() {
        let stub = StubBackend::new().reply("definitely not json");
        let result: Result<serde_json::Value, _> = complete_json(&stub, "prompt", "system").await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }
}
