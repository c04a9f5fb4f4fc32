//! Single-file conversion - wires together the per-file stages.

use std::time::Instant;

use crate::classify::{count_whiteish, white_to_transparent};
use crate::config::LimitsConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::types::{FileTask, Resolution};

use super::decode::{format_to_string, ImageDecoder};
use super::encode::PngWriter;
use super::metadata::MetadataExtractor;
use super::validate::Validator;

/// What a successful conversion produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    /// Pixels whose alpha was cleared
    pub cleared_pixels: u64,
    /// Resolution written to the output, copied from the source
    pub resolution: Option<Resolution>,
}

/// Converts one source image into a transparent PNG.
pub struct ImageProcessor {
    validator: Validator,
    decoder: ImageDecoder,
    threshold: u8,
}

impl ImageProcessor {
    /// Create a new processor for the given threshold and limits.
    pub fn new(threshold: u8, limits: LimitsConfig) -> Self {
        Self {
            validator: Validator::new(limits.clone()),
            decoder: ImageDecoder::new(limits),
            threshold,
        }
    }

    /// Run validate → decode → classify → encode for one task.
    ///
    /// Writes `task.destination` unconditionally; the overwrite policy is the
    /// caller's decision.
    pub fn convert(&self, task: &FileTask) -> PipelineResult<Converted> {
        let start = Instant::now();
        let path = task.source.as_path();
        tracing::debug!("Processing: {:?}", path);

        self.validator.validate(path)?;

        let read_start = Instant::now();
        let bytes = std::fs::read(path).map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: format!("Cannot read file: {}", e),
        })?;
        tracing::trace!("  Read: {:?}", read_start.elapsed());

        let decode_start = Instant::now();
        let decoded = self.decoder.decode_bytes(&bytes, path)?;
        tracing::trace!("  Decode: {:?}", decode_start.elapsed());

        let resolution = MetadataExtractor::resolution(&bytes, decoded.format);
        drop(bytes);

        let classify_start = Instant::now();
        let rgba = decoded.image.to_rgba8();
        let cleared_pixels = count_whiteish(&rgba, self.threshold);
        let output = white_to_transparent(rgba, self.threshold);
        tracing::trace!("  Classify: {:?}", classify_start.elapsed());

        let save_start = Instant::now();
        PngWriter::save(&output, resolution, &task.destination)?;
        tracing::trace!("  Save: {:?}", save_start.elapsed());

        tracing::debug!(
            "Converted {:?} ({} {}x{}, {} pixel(s) cleared) in {:?}",
            path,
            format_to_string(decoded.format),
            decoded.width,
            decoded.height,
            cleared_pixels,
            start.elapsed()
        );

        Ok(Converted {
            cleared_pixels,
            resolution,
        })
    }
}
