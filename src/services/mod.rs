pub mod config_service;
pub mod file_service;
pub mod llm_client;
pub mod prompt_service;
pub mod summarizer_service;
pub mod ingest_service;
pub mod workspace_service;
pub mod chat_service;
pub mod export_service;

#[cfg(test)]
pub(crate) mod testing;
