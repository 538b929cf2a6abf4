use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::models::{GenerateOutcome, SourceDocument, SummaryMode, SummaryView};
use crate::services::ingest_service::{combine_text, ingest_documents};
use crate::services::summarizer_service::SummarizationClient;

pub const MISSING_INPUT_MESSAGE: &str = "Please provide text or a supported document to summarize.";

#[derive(Default)]
struct WorkspaceInner {
    mode: SummaryMode,
    files: Vec<SourceDocument>,
    pasted_text: String,
    result: Option<String>,
    error: Option<String>,
    is_loading: bool,
    /// Bumped by `reset`; requests remember the epoch they started in.
    epoch: u64,
}

/// Inputs and output of the summarizer view, with a single-flight guard.
pub struct SummaryWorkspace {
    client: SummarizationClient,
    inner: Mutex<WorkspaceInner>,
}

impl SummaryWorkspace {
    pub fn new(client: SummarizationClient) -> Self {
        Self {
            client,
            inner: Mutex::new(WorkspaceInner::default()),
        }
    }

    pub async fn set_mode(&self, mode: SummaryMode) {
        self.inner.lock().await.mode = mode;
    }

    pub async fn add_file(&self, document: SourceDocument) {
        self.inner.lock().await.files.push(document);
    }

    pub async fn clear_files(&self) {
        self.inner.lock().await.files.clear();
    }

    pub async fn set_pasted_text(&self, text: &str) {
        self.inner.lock().await.pasted_text = text.to_string();
    }

    pub async fn view(&self) -> SummaryView {
        let inner = self.inner.lock().await;
        SummaryView {
            mode: inner.mode,
            file_names: inner.files.iter().map(|f| f.name.clone()).collect(),
            pasted_text: inner.pasted_text.clone(),
            result: inner.result.clone(),
            error: inner.error.clone(),
            is_loading: inner.is_loading,
        }
    }

    /// "Start Over". The selected mode survives. An in-flight request is not
    /// cancelled, but its result will be dropped when it arrives.
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        let epoch = inner.epoch + 1;
        *inner = WorkspaceInner {
            mode: inner.mode,
            epoch,
            ..WorkspaceInner::default()
        };
        info!(epoch, "summarizer reset");
    }

    /// Ingest the selected files, combine them with the pasted text and summarize.
    pub async fn generate(&self) -> GenerateOutcome {
        let (files, pasted_text, mode, epoch) = {
            let mut inner = self.inner.lock().await;
            if inner.is_loading {
                warn!("summarization already in flight; request dropped");
                return GenerateOutcome::Ignored;
            }
            inner.is_loading = true;
            inner.error = None;
            inner.result = None;
            (inner.files.clone(), inner.pasted_text.clone(), inner.mode, inner.epoch)
        };

        let blocks = match ingest_documents(&self.client, &files).await {
            Ok(blocks) => blocks,
            Err(e) => return self.finish(epoch, None, Some(e.to_string())).await,
        };

        let combined = combine_text(&blocks, &pasted_text);
        if combined.trim().is_empty() {
            return self.finish(epoch, None, Some(MISSING_INPUT_MESSAGE.to_string())).await;
        }

        let summary = self.client.generate_summaries(&combined, mode).await;
        self.finish(epoch, Some(summary), None).await
    }

    async fn finish(&self, epoch: u64, result: Option<String>, error: Option<String>) -> GenerateOutcome {
        let mut inner = self.inner.lock().await;
        if inner.epoch != epoch {
            warn!(started = epoch, current = inner.epoch, "discarding summary from before reset");
            return GenerateOutcome::Stale;
        }

        inner.is_loading = false;
        let outcome = if error.is_some() {
            GenerateOutcome::Rejected
        } else {
            GenerateOutcome::Completed
        };
        inner.result = result;
        inner.error = error;
        outcome
    }
}
