use tracing::{info, warn};

use crate::error::IngestError;
use crate::models::SourceDocument;
use crate::services::summarizer_service::SummarizationClient;

pub const USER_TEXT_DELIMITER: &str = "--- USER TEXT ---";

pub fn wrap_plain_text(name: &str, text: &str) -> String {
    format!("--- START OF {name} ---\n{text}\n--- END OF {name} ---")
}

pub fn wrap_extracted_text(name: &str, text: &str) -> String {
    format!("--- START OF OCR'd {name} ---\n{text}\n--- END OF OCR'd {name} ---")
}

/// Turn each document into a wrapped text block, in input order.
///
/// Stops at the first unsupported or unreadable file; blocks gathered so far
/// are dropped with the error.
pub async fn ingest_documents(
    client: &SummarizationClient,
    documents: &[SourceDocument],
) -> Result<Vec<String>, IngestError> {
    let mut blocks = Vec::with_capacity(documents.len());

    for document in documents {
        let Some(kind) = document.kind() else {
            warn!(file = %document.name, media_type = %document.media_type, "rejecting unsupported file");
            return Err(IngestError::UnsupportedType {
                name: document.name.clone(),
                media_type: document.media_type.clone(),
            });
        };

        let block = if kind.needs_extraction() {
            let text = client.extract_text(document).await?;
            wrap_extracted_text(&document.name, &text)
        } else {
            let text = String::from_utf8_lossy(&document.bytes);
            wrap_plain_text(&document.name, &text)
        };
        blocks.push(block);
    }

    if !documents.is_empty() {
        info!(files = documents.len(), "ingested documents");
    }
    Ok(blocks)
}

/// Join file blocks and pasted text into the text that gets summarized.
pub fn combine_text(blocks: &[String], pasted_text: &str) -> String {
    let combined = blocks.join("\n\n");

    if pasted_text.trim().is_empty() {
        return combined;
    }
    if combined.is_empty() {
        return pasted_text.to_string();
    }
    format!("{combined}\n\n{USER_TEXT_DELIMITER}\n\n{pasted_text}")
}
