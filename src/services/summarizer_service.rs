use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use std::sync::Arc;
use tracing::{debug, error};

use crate::error::IngestError;
use crate::models::{SourceDocument, SummaryMode};
use crate::services::llm_client::{GenerateRequest, GenerativeBackend, Part};
use crate::services::prompt_service::build_prompt;

pub const EXTRACTION_INSTRUCTION: &str =
    "Extract all text from this document. Preserve formatting as much as possible.";
pub const EMPTY_DOCUMENT_MESSAGE: &str = "Please provide the document to summarize.";
pub const SUMMARY_FAILED_MESSAGE: &str =
    "An error occurred while generating the summaries. Please check the console for details.";

/// Fire-once calls to the backend for text extraction and summarization.
#[derive(Clone)]
pub struct SummarizationClient {
    backend: Arc<dyn GenerativeBackend>,
}

impl SummarizationClient {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    /// Ask the model to read a PDF or image. Failures propagate, naming the file.
    /// The payload carries the canonical MIME type, not the declared string.
    pub async fn extract_text(&self, document: &SourceDocument) -> Result<String, IngestError> {
        let kind = document.kind().ok_or_else(|| IngestError::UnsupportedType {
            name: document.name.clone(),
            media_type: document.media_type.clone(),
        })?;
        let data = BASE64_STANDARD.encode(&document.bytes);
        debug!(file = %document.name, bytes = document.bytes.len(), "extracting text");

        let request = GenerateRequest::from_parts(vec![
            Part::InlineData {
                mime_type: kind.as_mime().to_string(),
                data,
            },
            Part::Text(EXTRACTION_INSTRUCTION.to_string()),
        ]);

        self.backend.generate_content(request).await.map_err(|source| {
            error!(file = %document.name, error = %source, "text extraction failed");
            IngestError::Extraction {
                name: document.name.clone(),
                source,
            }
        })
    }

    /// Summarize the combined source text. Never fails: a remote error turns
    /// into a fixed message, and blank input is answered without a remote call.
    pub async fn generate_summaries(&self, combined_text: &str, mode: SummaryMode) -> String {
        if combined_text.trim().is_empty() {
            return EMPTY_DOCUMENT_MESSAGE.to_string();
        }

        let prompt = build_prompt(combined_text, mode);
        debug!(%mode, prompt_chars = prompt.len(), "generating summaries");

        match self
            .backend
            .generate_content(GenerateRequest::from_parts(vec![Part::Text(prompt)]))
            .await
        {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "error generating summaries");
                SUMMARY_FAILED_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteError;
    use crate::services::testing::ScriptedBackend;

    fn client(backend: &Arc<ScriptedBackend>) -> SummarizationClient {
        SummarizationClient::new(backend.clone())
    }

    #[tokio::test]
    async fn extraction_sends_inline_payload_then_instruction() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_ok("scanned text");
        let doc = SourceDocument::new("scan.png", "image/png", b"ABC".to_vec());

        let text = client(&backend).extract_text(&doc).await.unwrap();
        assert_eq!(text, "scanned text");

        let request = &backend.requests()[0];
        assert_eq!(
            request.contents[0].parts,
            vec![
                Part::InlineData {
                    mime_type: "image/png".into(),
                    data: "QUJD".into()
                },
                Part::Text(EXTRACTION_INSTRUCTION.into()),
            ]
        );
    }

    #[tokio::test]
    async fn extraction_sends_canonical_mime_type() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_ok("scanned text");
        let doc = SourceDocument::new("scan.png", "IMAGE/PNG; name=scan.png", b"ABC".to_vec());

        client(&backend).extract_text(&doc).await.unwrap();

        let parts = &backend.requests()[0].contents[0].parts;
        assert!(matches!(
            &parts[0],
            Part::InlineData { mime_type, .. } if mime_type == "image/png"
        ));
    }

    #[tokio::test]
    async fn extraction_of_undeclared_type_makes_no_remote_call() {
        let backend = Arc::new(ScriptedBackend::new());
        let doc = SourceDocument::new("memo.doc", "application/msword", vec![0]);

        let err = client(&backend).extract_text(&doc).await.unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedType { .. }));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn extraction_failure_names_the_file() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_err(RemoteError::Api {
            status: 400,
            message: "bad payload".into(),
        });
        let doc = SourceDocument::new("contract.pdf", "application/pdf", vec![1, 2, 3]);

        let err = client(&backend).extract_text(&doc).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to process file \"contract.pdf\". The file type may be unsupported or the file could be corrupt."
        );
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn blank_text_is_answered_locally() {
        let backend = Arc::new(ScriptedBackend::new());
        let out = client(&backend).generate_summaries("  \n\t", SummaryMode::Legal).await;
        assert_eq!(out, EMPTY_DOCUMENT_MESSAGE);
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn remote_failure_degrades_to_message() {
        let backend = Arc::new(ScriptedBackend::new());
        backend.push_err(RemoteError::Transport("timeout".into()));
        let out = client(&backend).generate_summaries("Revenue rose 4%.", SummaryMode::Financial).await;
        assert_eq!(out, SUMMARY_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn identical_inputs_send_identical_prompts() {
        let backend = Arc::new(ScriptedBackend::new());
        let summarizer = client(&backend);
        summarizer.generate_summaries("Same text", SummaryMode::Dual).await;
        summarizer.generate_summaries("Same text", SummaryMode::Dual).await;

        let requests = backend.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
        assert_eq!(
            requests[0].contents[0].parts,
            vec![Part::Text(build_prompt("Same text", SummaryMode::Dual))]
        );
    }
}
