//! Core data types for the Whiteout conversion pipeline.
//!
//! These types describe the work of a batch run (one [`FileTask`] per source
//! image) and what happened to each file ([`FileOutcome`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// One discovered source image paired with its computed destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    /// Absolute path to the source file
    pub source: PathBuf,

    /// Where the converted PNG is written
    pub destination: PathBuf,
}

/// Physical resolution carried by a source image, in dots per inch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub x_dpi: f64,
    pub y_dpi: f64,
}

impl Resolution {
    const METERS_PER_INCH: f64 = 0.0254;

    /// Build from PNG-style pixels per metre.
    pub fn from_pixels_per_meter(x: u32, y: u32) -> Self {
        Self {
            x_dpi: x as f64 * Self::METERS_PER_INCH,
            y_dpi: y as f64 * Self::METERS_PER_INCH,
        }
    }

    /// Build from dots per centimetre.
    pub fn from_dots_per_cm(x: f64, y: f64) -> Self {
        Self {
            x_dpi: x * 2.54,
            y_dpi: y * 2.54,
        }
    }

    /// Convert to PNG `pHYs` pixels per metre, rounded to the nearest integer.
    pub fn pixels_per_meter(&self) -> (u32, u32) {
        let to_ppm = |dpi: f64| (dpi / Self::METERS_PER_INCH).round().max(0.0) as u32;
        (to_ppm(self.x_dpi), to_ppm(self.y_dpi))
    }

    /// True when both axes carry a usable, positive density.
    pub fn is_valid(&self) -> bool {
        self.x_dpi.is_finite() && self.y_dpi.is_finite() && self.x_dpi > 0.0 && self.y_dpi > 0.0
    }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Converted and written
    Saved {
        destination: PathBuf,
        /// Pixels made transparent by this run
        cleared_pixels: u64,
        /// Resolution copied to the output, if the source had one
        #[serde(skip_serializing_if = "Option::is_none")]
        resolution: Option<Resolution>,
    },

    /// Not processed; destination left untouched
    Skipped { destination: PathBuf, reason: String },

    /// Processing failed; no output written
    Failed { error: String },
}

/// Result of processing a single source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Source image path
    pub source: PathBuf,

    #[serde(flatten)]
    pub kind: OutcomeKind,
}

impl FileOutcome {
    pub fn saved(task: &FileTask, cleared_pixels: u64, resolution: Option<Resolution>) -> Self {
        Self {
            source: task.source.clone(),
            kind: OutcomeKind::Saved {
                destination: task.destination.clone(),
                cleared_pixels,
                resolution,
            },
        }
    }

    pub fn skipped(task: &FileTask, reason: impl Into<String>) -> Self {
        Self {
            source: task.source.clone(),
            kind: OutcomeKind::Skipped {
                destination: task.destination.clone(),
                reason: reason.into(),
            },
        }
    }

    pub fn failed(task: &FileTask, error: impl fmt::Display) -> Self {
        Self {
            source: task.source.clone(),
            kind: OutcomeKind::Failed {
                error: error.to_string(),
            },
        }
    }
}

/// One report line per outcome.
impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            OutcomeKind::Saved { destination, .. } => {
                write!(f, "Saved: {}", destination.display())
            }
            OutcomeKind::Skipped {
                destination,
                reason,
            } => write!(f, "Skip ({}): {}", reason, destination.display()),
            OutcomeKind::Failed { error } => {
                write!(f, "Error processing {}: {}", self.source.display(), error)
            }
        }
    }
}

/// Aggregate of a batch run: every outcome in processing order plus counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
    pub saved: u64,
    pub skipped: u64,
    pub failed: u64,
    #[serde(with = "duration_ms", rename = "elapsed_ms")]
    pub elapsed: Duration,
}

impl BatchReport {
    /// Record an outcome and bump the matching counter.
    pub fn push(&mut self, outcome: FileOutcome) {
        match outcome.kind {
            OutcomeKind::Saved { .. } => self.saved += 1,
            OutcomeKind::Skipped { .. } => self.skipped += 1,
            OutcomeKind::Failed { .. } => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn total(&self) -> u64 {
        self.saved + self.skipped + self.failed
    }
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}
