//! Scripted stand-in for the remote backend, used by unit tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, Semaphore};

use crate::error::RemoteError;
use crate::services::llm_client::{GenerativeBackend, GenerateRequest};

pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, RemoteError>>>,
    requests: Mutex<Vec<GenerateRequest>>,
    gate: Option<Arc<Semaphore>>,
    started: Notify,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            gate: None,
            started: Notify::new(),
        }
    }

    /// Calls block until `release` hands out a permit.
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::new()
        }
    }

    pub fn push_ok(&self, text: &str) {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
    }

    pub fn push_err(&self, err: RemoteError) {
        self.replies.lock().unwrap().push_back(Err(err));
    }

    pub fn release(&self, calls: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(calls);
        }
    }

    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    async fn generate_content(&self, request: GenerateRequest) -> Result<String, RemoteError> {
        self.requests.lock().unwrap().push(request);
        self.started.notify_one();

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("ok".to_string()))
    }
}
