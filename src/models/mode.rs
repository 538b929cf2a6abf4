use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kind of document the summary should focus on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SummaryMode {
    #[default]
    Legal,
    Financial,
    Dual,
}

impl SummaryMode {
    pub const ALL: [SummaryMode; 3] = [SummaryMode::Legal, SummaryMode::Financial, SummaryMode::Dual];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Legal => "LEGAL",
            Self::Financial => "FINANCIAL",
            Self::Dual => "DUAL",
        }
    }
}

impl fmt::Display for SummaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LEGAL" => Ok(Self::Legal),
            "FINANCIAL" => Ok(Self::Financial),
            "DUAL" => Ok(Self::Dual),
            other => Err(format!("Unknown summary mode: {}", other)),
        }
    }
}
