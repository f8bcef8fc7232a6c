//! Spending advisor
//!
//! Posts the current item snapshot to a chat-completion endpoint and returns
//! the model's free-text advice. The call is one-shot with no retry and never
//! touches the ledger.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::settings::AdvisorSettings;
use crate::error::{MoneyTreeError, MoneyTreeResult};
use crate::models::MoneyItem;

const SYSTEM_PROMPT: &str = "You are a skilled household finance advisor.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<serde_json::Value>,
}

/// Client for the advisory endpoint
pub struct AdvisorClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl AdvisorClient {
    /// Create a client with an explicit key
    pub fn new(settings: &AdvisorSettings, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            api_key: api_key.into(),
        }
    }

    /// Create a client, reading the key from the configured environment variable
    pub fn from_settings(settings: &AdvisorSettings) -> MoneyTreeResult<Self> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                MoneyTreeError::Config(format!(
                    "Advisor API key is not set (expected in ${})",
                    settings.api_key_env
                ))
            })?;
        Ok(Self::new(settings, api_key))
    }

    /// Ask for advice on the given items
    pub fn advise(&self, items: &[MoneyItem]) -> MoneyTreeResult<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".into(),
                    content: SYSTEM_PROMPT.into(),
                },
                ChatMessage {
                    role: "user".into(),
                    content: build_prompt(items)?,
                },
            ],
            stream: false,
        };

        debug!(endpoint = %self.endpoint, items = items.len(), "requesting advice");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| MoneyTreeError::Advice(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| MoneyTreeError::Advice(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "advisor returned an error");
            return Err(MoneyTreeError::Advice(format!(
                "API error: {} - {}",
                status.as_u16(),
                error_message(&body)
            )));
        }

        extract_advice(&body)
    }
}

/// Build the user prompt embedding the item snapshot as pretty JSON
pub fn build_prompt(items: &[MoneyItem]) -> MoneyTreeResult<String> {
    let data = serde_json::to_string_pretty(items)?;
    Ok(format!(
        "Analyze the household money data below and give the user useful, concrete advice.\n\n\
         Money data:\n{}\n\nAnalysis and advice:",
        data
    ))
}

/// Pull the first choice's text out of a chat-completion response body
fn extract_advice(body: &str) -> MoneyTreeResult<String> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| MoneyTreeError::Advice(format!("Unexpected response: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .map(|c| c.message.content)
        .ok_or_else(|| MoneyTreeError::Advice("Response contained no advice".into()))
}

/// Best-effort description of an error body
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody {
            error: Some(serde_json::Value::Object(obj)),
            ..
        }) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| serde_json::Value::Object(obj.clone()).to_string()),
        _ => body.trim().to_string(),
    }
}
