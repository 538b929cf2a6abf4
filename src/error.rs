use thiserror::Error;

/// Failure talking to the generative backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("failed to parse response: {0}")]
    Decode(String),
    #[error("response contained no text")]
    EmptyResponse,
}

/// Failure turning uploaded files into source text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("File type for \"{name}\" is not supported. Please use .txt, .pdf, .jpg, or .png.")]
    UnsupportedType { name: String, media_type: String },
    #[error("Failed to process file \"{name}\". The file type may be unsupported or the file could be corrupt.")]
    Extraction {
        name: String,
        #[source]
        source: RemoteError,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("there is no summary to export")]
    EmptySummary,
    #[error("failed to render PDF: {0}")]
    Render(String),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No API key configured. Set GEMINI_API_KEY or add your API key in settings.")]
    MissingApiKey,
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
