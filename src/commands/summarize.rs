use std::path::PathBuf;

use super::AppState;
use crate::models::{GenerateOutcome, SourceDocument, SummaryMode, SummaryView};
use crate::services::file_service;

pub async fn set_mode(state: &AppState, mode: String) -> Result<SummaryView, String> {
    let mode: SummaryMode = mode.parse()?;
    state.workspace.set_mode(mode).await;
    Ok(state.workspace.view().await)
}

pub async fn add_source_document(state: &AppState, document: SourceDocument) -> SummaryView {
    state.workspace.add_file(document).await;
    state.workspace.view().await
}

/// Queue a file from disk. The media type is the one the picker declared;
/// the extension is not consulted.
pub async fn add_source_document_from_path(
    state: &AppState,
    path: String,
    media_type: String,
) -> Result<SummaryView, String> {
    let path = PathBuf::from(path);
    let document = file_service::load_source_document(&path, &media_type)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    Ok(add_source_document(state, document).await)
}

pub async fn clear_source_documents(state: &AppState) -> SummaryView {
    state.workspace.clear_files().await;
    state.workspace.view().await
}

pub async fn set_pasted_text(state: &AppState, text: String) -> SummaryView {
    state.workspace.set_pasted_text(&text).await;
    state.workspace.view().await
}

/// Run one summarization. A call made while another is loading returns the
/// current view unchanged.
pub async fn generate_summaries(state: &AppState) -> (GenerateOutcome, SummaryView) {
    let outcome = state.workspace.generate().await;
    (outcome, state.workspace.view().await)
}

pub async fn reset_summarizer(state: &AppState) -> SummaryView {
    state.workspace.reset().await;
    state.workspace.view().await
}

pub async fn get_summary_view(state: &AppState) -> SummaryView {
    state.workspace.view().await
}
