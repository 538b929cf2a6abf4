use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::error::RemoteError;
use crate::models::{ChatMessage, ChatState, Role, SendOutcome};
use crate::services::config_service::ChatContinuity;
use crate::services::llm_client::{Content, GenerateRequest, GenerativeBackend, RemoteConversation};

pub const GREETING: &str = "Hello! I am your AI assistant. How can I help you today?";
pub const SYSTEM_INSTRUCTION: &str = "You are a helpful AI assistant. You can answer questions about concepts from the summarized documents, explain terminology, or discuss the documents' content. Always provide information for educational purposes and not as professional advice.";
pub const SEND_FAILED_MESSAGE: &str =
    "Sorry, I encountered an error. Please check your connection and try again.";
pub const RETRY_FAILED_MESSAGE: &str = "The retry also failed. Please try again later.";

/// How conversation context reaches the model.
enum Channel {
    /// The conversation object keeps the turns.
    Remote(RemoteConversation),
    /// Every call replays the visible history through a stateless request.
    Local(Arc<dyn GenerativeBackend>),
}

struct SessionInner {
    messages: Vec<ChatMessage>,
    state: ChatState,
}

impl SessionInner {
    /// Successful turns after the greeting, excluding the last `skip_tail` messages.
    fn replay_history(&self, skip_tail: usize) -> Vec<Content> {
        let end = self.messages.len().saturating_sub(skip_tail);
        self.messages[..end]
            .iter()
            .skip(1)
            .filter(|m| !m.error)
            .map(|m| match m.role {
                Role::User => Content::user_text(&m.text),
                Role::Model => Content::model_text(&m.text),
            })
            .collect()
    }
}

/// One chat conversation: the visible message list plus a single-flight guard.
pub struct ChatSession {
    channel: Channel,
    inner: Mutex<SessionInner>,
}

impl ChatSession {
    /// Open a conversation and seed it with the greeting.
    pub fn initialize(backend: Arc<dyn GenerativeBackend>, continuity: ChatContinuity) -> Self {
        let channel = match continuity {
            ChatContinuity::Remote => Channel::Remote(RemoteConversation::new(backend, SYSTEM_INSTRUCTION)),
            ChatContinuity::Local => Channel::Local(backend),
        };
        info!(?continuity, "chat session created");

        Self {
            channel,
            inner: Mutex::new(SessionInner {
                messages: vec![ChatMessage::model(GREETING)],
                state: ChatState::Idle,
            }),
        }
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.inner.lock().await.messages.clone()
    }

    pub async fn state(&self) -> ChatState {
        self.inner.lock().await.state
    }

    /// Send a new user message. Ignored while a reply is pending, after an
    /// unretried failure, or when `text` is blank.
    pub async fn send(&self, text: &str) -> SendOutcome {
        let history = {
            let mut inner = self.inner.lock().await;
            if inner.state != ChatState::Idle || text.trim().is_empty() {
                debug!(state = ?inner.state, "chat send ignored");
                return SendOutcome::Ignored;
            }
            let history = inner.replay_history(0);
            inner.messages.push(ChatMessage::user(text));
            inner.state = ChatState::Sending;
            history
        };

        let result = self.dispatch(text, history).await;
        self.settle(result, SEND_FAILED_MESSAGE).await
    }

    /// Drop every error-flagged message and resend the most recent user message.
    pub async fn retry(&self) -> SendOutcome {
        let (text, history) = {
            let mut inner = self.inner.lock().await;
            if inner.state == ChatState::Sending {
                return SendOutcome::Ignored;
            }
            let Some(last_user) = inner.messages.iter().rev().find(|m| m.role == Role::User) else {
                return SendOutcome::Ignored;
            };
            let text = last_user.text.clone();

            inner.messages.retain(|m| !m.error);
            let tail = inner
                .messages
                .iter()
                .rev()
                .position(|m| m.role == Role::User)
                .map_or(0, |i| i + 1);
            let history = inner.replay_history(tail);
            inner.state = ChatState::Sending;
            (text, history)
        };

        info!("retrying last chat message");
        let result = self.dispatch(&text, history).await;
        self.settle(result, RETRY_FAILED_MESSAGE).await
    }

    async fn dispatch(&self, text: &str, history: Vec<Content>) -> Result<String, RemoteError> {
        match &self.channel {
            Channel::Remote(conversation) => conversation.send_message(text).await,
            Channel::Local(backend) => {
                let mut contents = history;
                contents.push(Content::user_text(text));
                backend
                    .generate_content(GenerateRequest {
                        contents,
                        system_instruction: Some(SYSTEM_INSTRUCTION.to_string()),
                    })
                    .await
            }
        }
    }

    async fn settle(&self, result: Result<String, RemoteError>, failure_text: &str) -> SendOutcome {
        let mut inner = self.inner.lock().await;
        match result {
            Ok(reply) => {
                inner.messages.push(ChatMessage::model(&reply));
                inner.state = ChatState::Idle;
                SendOutcome::Replied
            }
            Err(e) => {
                error!(error = %e, "chat exchange failed");
                inner.messages.push(ChatMessage::model_error(failure_text));
                inner.state = ChatState::Errored;
                SendOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::ScriptedBackend;

    fn summary(messages: &[ChatMessage]) -> Vec<(Role, String, bool)> {
        messages.iter().map(|m| (m.role, m.text.clone(), m.error)).collect()
    }

    #[tokio::test]
    async fn starts_with_greeting_and_idle() {
        let session = ChatSession::initialize(Arc::new(ScriptedBackend::new()), ChatContinuity::Remote);
        assert_eq!(summary(&session.messages().await), vec![(Role::Model, GREETING.to_string(), false)]);
        assert_eq!(session.state().await, ChatState::Idle);
    }

    #[tokio::test]
    async fn successful_send_appends_user_then_model() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_ok("A tort is a civil wrong.");
        let session = ChatSession::initialize(backend.clone(), ChatContinuity::Remote);

        assert_eq!(session.send("What is a tort?").await, SendOutcome::Replied);
        assert_eq!(
            summary(&session.messages().await)[1..],
            [
                (Role::User, "What is a tort?".to_string(), false),
                (Role::Model, "A tort is a civil wrong.".to_string(), false),
            ]
        );
        assert_eq!(session.state().await, ChatState::Idle);
    }

    #[tokio::test]
    async fn blank_text_is_ignored() {
        let backend = Arc::new(ScriptedBackend::new());
        let session = ChatSession::initialize(backend.clone(), ChatContinuity::Remote);
        assert_eq!(session.send("   \n").await, SendOutcome::Ignored);
        assert_eq!(session.messages().await.len(), 1);
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn failed_send_keeps_user_message_and_flags_error() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_err(RemoteError::Transport("offline".into()));
        let session = ChatSession::initialize(backend.clone(), ChatContinuity::Remote);

        assert_eq!(session.send("A").await, SendOutcome::Failed);
        assert_eq!(
            summary(&session.messages().await)[1..],
            [
                (Role::User, "A".to_string(), false),
                (Role::Model, SEND_FAILED_MESSAGE.to_string(), true),
            ]
        );
        assert_eq!(session.state().await, ChatState::Errored);
    }

    #[tokio::test]
    async fn failure_then_retry_leaves_clean_history() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_err(RemoteError::Transport("offline".into()));
        backend.push_ok("success");
        let session = ChatSession::initialize(backend.clone(), ChatContinuity::Remote);

        assert_eq!(session.send("A").await, SendOutcome::Failed);
        assert_eq!(session.send("B").await, SendOutcome::Ignored);
        assert_eq!(session.retry().await, SendOutcome::Replied);

        assert_eq!(
            summary(&session.messages().await),
            vec![
                (Role::Model, GREETING.to_string(), false),
                (Role::User, "A".to_string(), false),
                (Role::Model, "success".to_string(), false),
            ]
        );
        assert_eq!(backend.call_count(), 2);
        assert_eq!(backend.requests()[1].contents, vec![Content::user_text("A")]);
    }

    #[tokio::test]
    async fn failed_retry_uses_retry_message_and_can_retry_again() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_err(RemoteError::Transport("offline".into()));
        backend.push_err(RemoteError::Transport("still offline".into()));
        backend.push_ok("finally");
        let session = ChatSession::initialize(backend.clone(), ChatContinuity::Remote);

        session.send("A").await;
        assert_eq!(session.retry().await, SendOutcome::Failed);
        let messages = session.messages().await;
        assert_eq!(messages.iter().filter(|m| m.error).count(), 1);
        assert_eq!(messages.last().unwrap().text, RETRY_FAILED_MESSAGE);

        assert_eq!(session.retry().await, SendOutcome::Replied);
        assert!(session.messages().await.iter().all(|m| !m.error));
    }

    #[tokio::test]
    async fn retry_without_user_message_is_ignored() {
        let backend = Arc::new(ScriptedBackend::new());
        let session = ChatSession::initialize(backend.clone(), ChatContinuity::Remote);
        assert_eq!(session.retry().await, SendOutcome::Ignored);
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn second_send_while_in_flight_is_dropped() {
        let backend = Arc::new(ScriptedBackend::gated());
        backend.push_ok("first reply");
        let session = Arc::new(ChatSession::initialize(backend.clone(), ChatContinuity::Remote));

        let pending = tokio::spawn({
            let session = session.clone();
            async move { session.send("first").await }
        });
        backend.wait_started().await;

        assert_eq!(session.state().await, ChatState::Sending);
        assert_eq!(session.send("second").await, SendOutcome::Ignored);
        assert_eq!(session.retry().await, SendOutcome::Ignored);

        backend.release(1);
        assert_eq!(pending.await.unwrap(), SendOutcome::Replied);

        assert_eq!(backend.call_count(), 1);
        let users: Vec<_> = session
            .messages()
            .await
            .into_iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.text)
            .collect();
        assert_eq!(users, vec!["first"]);
    }

    #[tokio::test]
    async fn local_continuity_replays_visible_history() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_ok("one");
        backend.push_err(RemoteError::Transport("offline".into()));
        backend.push_ok("two");
        let session = ChatSession::initialize(backend.clone(), ChatContinuity::Local);

        session.send("first").await;
        session.send("second").await;
        session.retry().await;

        let requests = backend.requests();
        assert_eq!(requests.len(), 3);
        let expected = vec![
            Content::user_text("first"),
            Content::model_text("one"),
            Content::user_text("second"),
        ];
        assert_eq!(requests[1].contents, expected);
        assert_eq!(requests[2].contents, expected);
        assert_eq!(requests[2].system_instruction.as_deref(), Some(SYSTEM_INSTRUCTION));
    }
}
