//! CLI enum types for the conversion command.

use clap::ValueEnum;

/// Supported report formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    /// Single JSON document with counters and every outcome
    Json,
    /// One JSON object per outcome (newline-delimited)
    Jsonl,
}

impl From<ReportFormat> for whiteout_core::OutputFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Json => whiteout_core::OutputFormat::Json,
            ReportFormat::Jsonl => whiteout_core::OutputFormat::JsonLines,
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}
