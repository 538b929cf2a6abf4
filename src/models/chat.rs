use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub error: bool,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        Self::build(Role::User, text, false)
    }

    pub fn model(text: &str) -> Self {
        Self::build(Role::Model, text, false)
    }

    pub fn model_error(text: &str) -> Self {
        Self::build(Role::Model, text, true)
    }

    fn build(role: Role, text: &str, error: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.to_string(),
            timestamp: Utc::now(),
            error,
        }
    }
}

/// Per-session exchange state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChatState {
    #[default]
    Idle,
    Sending,
    Errored,
}

/// What became of a `send` or `retry` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SendOutcome {
    /// Dropped by a guard; nothing was appended and no remote call was made.
    Ignored,
    Replied,
    Failed,
}
