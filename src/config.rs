//! Inspection configuration.

use serde::{Deserialize, Serialize};

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One line per record, readable in a terminal.
    #[default]
    Text,
    /// One JSON object per source, then a summary object (JSON Lines).
    Json,
}

/// Inspection configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectConfig {
    /// File extension that marks a chunk source in directory mode
    /// (default: "gz"). A leading dot is ignored.
    pub extension: String,

    /// Report output format.
    pub format: ReportFormat,

    /// Skip per-record lines and only report per-source counts.
    pub summary_only: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            extension: "gz".to_string(),
            format: ReportFormat::Text,
            summary_only: false,
        }
    }
}

impl InspectConfig {
    /// Create a new config with a custom source extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Create a new config with a custom output format.
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Create a new config that only reports per-source counts.
    pub fn with_summary_only(mut self, summary_only: bool) -> Self {
        self.summary_only = summary_only;
        self
    }
}
