use serde::{Deserialize, Serialize};

/// Upload types accepted by ingestion, matched on the declared media type.
pub const ACCEPTED_MEDIA_TYPES: [&str; 4] = ["text/plain", "application/pdf", "image/jpeg", "image/png"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    PlainText,
    Pdf,
    Jpeg,
    Png,
}

impl MediaType {
    /// Parse a declared MIME type. Parameters such as `;charset=utf-8` are ignored.
    pub fn from_declared(declared: &str) -> Option<Self> {
        let essence = declared.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "text/plain" => Some(Self::PlainText),
            "application/pdf" => Some(Self::Pdf),
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn as_mime(self) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// PDFs and images go through remote text extraction.
    pub fn needs_extraction(self) -> bool {
        !matches!(self, Self::PlainText)
    }
}

/// A user-selected file, consumed once by ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn kind(&self) -> Option<MediaType> {
        MediaType::from_declared(&self.media_type)
    }
}
