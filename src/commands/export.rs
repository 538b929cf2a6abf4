use super::AppState;
use crate::models::ExportedFile;
use crate::services::export_service::{export_as_document, export_as_text};
use crate::services::file_service::{self, get_exports_dir as exports_dir};

async fn current_summary(state: &AppState) -> Result<String, String> {
    state
        .workspace
        .view()
        .await
        .result
        .filter(|r| !r.is_empty())
        .ok_or_else(|| "There is no summary to export".to_string())
}

pub async fn export_summary_text(state: &AppState) -> Result<ExportedFile, String> {
    let summary = current_summary(state).await?;
    export_as_text(&summary).map_err(|e| e.to_string())
}

pub async fn export_summary_pdf(state: &AppState) -> Result<ExportedFile, String> {
    let summary = current_summary(state).await?;
    tokio::task::spawn_blocking(move || export_as_document(&summary))
        .await
        .map_err(|e| format!("PDF export task failed: {}", e))?
        .map_err(|e| e.to_string())
}

/// Save an export into the app's exports directory and return its path.
pub fn save_export(file: ExportedFile) -> Result<String, String> {
    let dir = exports_dir().map_err(|e| format!("Failed to create exports directory: {}", e))?;
    let path = file_service::write_export(&file, &dir).map_err(|e| e.to_string())?;
    Ok(path.to_string_lossy().to_string())
}

pub fn get_exports_dir() -> Result<String, String> {
    let dir = exports_dir().map_err(|e| format!("Failed to create exports directory: {}", e))?;
    Ok(dir.to_string_lossy().to_string())
}
