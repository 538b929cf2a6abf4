use std::sync::Arc;
use tracing::info;

use super::AppState;
use crate::models::{ChatMessage, ChatState, SendOutcome};
use crate::services::chat_service::ChatSession;

/// Mount the chat view: a fresh session replaces any previous one.
pub async fn open_chat(state: &AppState) -> Vec<ChatMessage> {
    let session = Arc::new(ChatSession::initialize(
        state.backend.clone(),
        state.config.chat_continuity,
    ));
    let messages = session.messages().await;
    *state.chat.lock().await = Some(session);
    messages
}

/// Tear down the chat view. A reply still in flight lands on the dropped session.
pub async fn close_chat(state: &AppState) {
    if state.chat.lock().await.take().is_some() {
        info!("chat session closed");
    }
}

pub async fn send_chat_message(state: &AppState, message: String) -> (SendOutcome, Vec<ChatMessage>) {
    let Some(session) = state.current_chat().await else {
        return (SendOutcome::Ignored, Vec::new());
    };
    let outcome = session.send(&message).await;
    (outcome, session.messages().await)
}

pub async fn retry_chat_message(state: &AppState) -> (SendOutcome, Vec<ChatMessage>) {
    let Some(session) = state.current_chat().await else {
        return (SendOutcome::Ignored, Vec::new());
    };
    let outcome = session.retry().await;
    (outcome, session.messages().await)
}

pub async fn get_chat_messages(state: &AppState) -> Vec<ChatMessage> {
    match state.current_chat().await {
        Some(session) => session.messages().await,
        None => Vec::new(),
    }
}

pub async fn get_chat_state(state: &AppState) -> Option<ChatState> {
    match state.current_chat().await {
        Some(session) => Some(session.state().await),
        None => None,
    }
}
