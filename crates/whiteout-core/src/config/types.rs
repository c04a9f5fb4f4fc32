//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

use crate::classify::DEFAULT_THRESHOLD;

/// Default filename suffix for converted images.
pub const DEFAULT_SUFFIX: &str = "_transparent";

/// Default input extensions.
pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Conversion defaults, overridable per run from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// 0-255. Higher = more pixels become transparent
    pub threshold: u8,

    /// Suffix appended to the output file stem
    pub suffix: String,

    /// File extensions to process (case-insensitive, no leading dot)
    pub extensions: Vec<String>,

    /// Recurse into subfolders
    pub recursive: bool,

    /// Mirror the input subfolder structure inside the output dir
    pub keep_subdirs: bool,

    /// Replace existing output files
    pub overwrite: bool,

    /// Default output directory; empty means the input directory
    pub output_dir: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            suffix: DEFAULT_SUFFIX.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            recursive: false,
            keep_subdirs: false,
            overwrite: false,
            output_dir: String::new(),
        }
    }
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum image dimension (width or height)
    pub max_image_dimension: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 100,
            max_image_dimension: 20000,
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format ("json" or "jsonl")
    pub format: String,

    /// Pretty-print JSON reports
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
