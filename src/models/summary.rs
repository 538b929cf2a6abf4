use serde::{Deserialize, Serialize};

use super::SummaryMode;

/// Snapshot of the summarizer view handed to the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub mode: SummaryMode,
    pub file_names: Vec<String>,
    pub pasted_text: String,
    pub result: Option<String>,
    pub error: Option<String>,
    pub is_loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenerateOutcome {
    /// Another request was already in flight.
    Ignored,
    Completed,
    Rejected,
    /// A reset happened while the request was in flight; its result was dropped.
    Stale,
}
