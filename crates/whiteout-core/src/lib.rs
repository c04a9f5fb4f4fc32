//! Whiteout Core - Embeddable white-to-transparent image conversion.
//!
//! Whiteout turns near-white pixels of raster images transparent and saves the
//! result as PNG, one file at a time, across a folder of images.
//!
//! # Architecture
//!
//! ```text
//! Discover → Validate → Decode → Classify → Read DPI → Encode PNG → Write
//! ```
//!
//! The classifier ([`classify`]) is a pure function over an RGBA buffer. The
//! [`pipeline`] module owns everything that touches the filesystem.
//!
//! # Usage
//!
//! ```rust,ignore
//! use whiteout_core::{Batch, Config, ConvertOptions};
//!
//! fn main() -> whiteout_core::Result<()> {
//!     let config = Config::load()?;
//!     let options = ConvertOptions::from_config("./scans".into(), &config);
//!     let batch = Batch::new(options, config.limits.clone());
//!
//!     let files = batch.discover()?;
//!     let report = batch.run(files, |outcome| println!("{outcome}"));
//!     println!("saved {} file(s)", report.saved);
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

pub use classify::{classify_pixel, white_to_transparent};
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, Result, WhiteoutError};
pub use output::{OutputFormat, OutputWriter};
pub use pipeline::{Batch, ConvertOptions, ImageProcessor};
pub use types::{BatchReport, FileOutcome, FileTask, OutcomeKind, Resolution};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
