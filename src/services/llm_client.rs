use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{ConfigError, RemoteError};
use crate::models::Role;
use crate::services::config_service::AppConfig;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// One piece of a turn: plain text or an inline, base64-encoded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    InlineData { mime_type: String, data: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user_text(text: &str) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::Text(text.to_string())],
        }
    }

    pub fn model_text(text: &str) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::Text(text.to_string())],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Option<String>,
}

impl GenerateRequest {
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content {
                role: Role::User,
                parts,
            }],
            system_instruction: None,
        }
    }
}

/// The remote generative capability. Everything that talks to the model goes
/// through this trait so a fake can stand in for the network.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate_content(&self, request: GenerateRequest) -> Result<String, RemoteError>;
}

// ============================================================================
// GEMINI REST CLIENT
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody {
    contents: Vec<ContentBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<ContentBody>,
}

#[derive(Debug, Serialize)]
struct ContentBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<PartBody>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum PartBody {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataBody,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataBody {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: &str, model: &str, timeout: Duration) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    /// Create a client from the app configuration. Fails when no API key is set.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Self::new(
            &config.base_url,
            api_key,
            &config.model,
            Duration::from_secs(config.request_timeout_secs),
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate_content(&self, request: GenerateRequest) -> Result<String, RemoteError> {
        let body = build_body(request);
        debug!(model = %self.model, turns = body.contents.len(), "sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(map_http_error(status, &error_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;

        extract_text(parsed)
    }
}

fn build_body(request: GenerateRequest) -> GenerateContentBody {
    let contents = request
        .contents
        .into_iter()
        .map(|content| ContentBody {
            role: Some(content.role.as_str()),
            parts: content.parts.into_iter().map(part_body).collect(),
        })
        .collect();

    let system_instruction = request.system_instruction.map(|text| ContentBody {
        role: None,
        parts: vec![PartBody::Text { text }],
    });

    GenerateContentBody {
        contents,
        system_instruction,
    }
}

fn part_body(part: Part) -> PartBody {
    match part {
        Part::Text(text) => PartBody::Text { text },
        Part::InlineData { mime_type, data } => PartBody::InlineData {
            inline_data: InlineDataBody { mime_type, data },
        },
    }
}

/// Concatenate every text part of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, RemoteError> {
    let text: String = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(RemoteError::EmptyResponse);
    }
    Ok(text)
}

fn map_http_error(status: StatusCode, body: &str) -> RemoteError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{}: {}", status_text, msg)
            }
        })
        .unwrap_or_else(|_| body.to_string());

    RemoteError::Api {
        status: status.as_u16(),
        message,
    }
}

// ============================================================================
// STATEFUL CONVERSATION
// ============================================================================

/// A chat context that keeps its own turns, so callers only send the new text.
/// A turn pair is recorded only when the remote call succeeds.
pub struct RemoteConversation {
    backend: Arc<dyn GenerativeBackend>,
    system_instruction: String,
    turns: Mutex<Vec<Content>>,
}

impl RemoteConversation {
    pub fn new(backend: Arc<dyn GenerativeBackend>, system_instruction: &str) -> Self {
        Self {
            backend,
            system_instruction: system_instruction.to_string(),
            turns: Mutex::new(Vec::new()),
        }
    }

    pub async fn send_message(&self, text: &str) -> Result<String, RemoteError> {
        let mut contents = self.turns.lock().await.clone();
        contents.push(Content::user_text(text));

        let reply = self
            .backend
            .generate_content(GenerateRequest {
                contents,
                system_instruction: Some(self.system_instruction.clone()),
            })
            .await?;

        let mut turns = self.turns.lock().await;
        turns.push(Content::user_text(text));
        turns.push(Content::model_text(&reply));
        Ok(reply)
    }

    #[cfg(test)]
    pub(crate) async fn turn_count(&self) -> usize {
        self.turns.lock().await.len()
    }
}
