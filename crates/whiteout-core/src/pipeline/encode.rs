//! PNG encoding with optional `pHYs` resolution.
//!
//! PNG is used for every output regardless of the source format: it is
//! lossless and always carries the alpha channel the classifier produced.

use image::RgbaImage;
use std::path::Path;

use crate::error::PipelineError;
use crate::types::Resolution;

/// Extension of every output file.
pub const OUTPUT_EXTENSION: &str = "png";

/// Encodes RGBA buffers to PNG and writes them to disk.
pub struct PngWriter;

impl PngWriter {
    /// Encode to an in-memory PNG.
    pub fn encode(
        image: &RgbaImage,
        resolution: Option<Resolution>,
    ) -> Result<Vec<u8>, png::EncodingError> {
        let (width, height) = image.dimensions();
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            if let Some(resolution) = resolution {
                let (xppu, yppu) = resolution.pixels_per_meter();
                encoder.set_pixel_dims(Some(png::PixelDimensions {
                    xppu,
                    yppu,
                    unit: png::Unit::Meter,
                }));
            }
            let mut writer = encoder.write_header()?;
            writer.write_image_data(image.as_raw())?;
            writer.finish()?;
        }
        Ok(bytes)
    }

    /// Encode and write to `destination`, creating parent directories.
    ///
    /// The PNG is fully encoded before the file is opened, so an encode
    /// failure never leaves a truncated output behind.
    pub fn save(
        image: &RgbaImage,
        resolution: Option<Resolution>,
        destination: &Path,
    ) -> Result<(), PipelineError> {
        let bytes = Self::encode(image, resolution).map_err(|e| PipelineError::Encode {
            path: destination.to_path_buf(),
            message: e.to_string(),
        })?;

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PipelineError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(destination, bytes).map_err(|source| PipelineError::Write {
            path: destination.to_path_buf(),
            source,
        })
    }
}
