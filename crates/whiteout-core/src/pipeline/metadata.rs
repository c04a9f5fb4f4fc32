//! Resolution (DPI) metadata extraction from source images.
//!
//! Only physical resolution is carried over to the output; everything else in
//! the source's metadata is dropped with the re-encode.

use exif::{In, Reader, Tag, Value};
use image::ImageFormat;
use std::io::Cursor;

use crate::types::Resolution;

const EXIF_UNIT_INCH: u32 = 2;
const EXIF_UNIT_CM: u32 = 3;

/// Extracts resolution metadata from encoded image bytes.
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Read the source resolution, if any.
    ///
    /// Container-native fields win over EXIF: PNG `pHYs` for PNG, the JFIF
    /// density for JPEG. EXIF `XResolution`/`YResolution` is the fallback for
    /// every format. Returns `None` when no usable density is stored.
    pub fn resolution(bytes: &[u8], format: ImageFormat) -> Option<Resolution> {
        let native = match format {
            ImageFormat::Png => Self::png_phys(bytes),
            ImageFormat::Jpeg => Self::jfif_density(bytes),
            _ => None,
        };
        native
            .or_else(|| Self::exif_resolution(bytes))
            .filter(Resolution::is_valid)
    }

    /// PNG `pHYs` chunk, only when the unit is metres.
    fn png_phys(bytes: &[u8]) -> Option<Resolution> {
        let reader = png::Decoder::new(Cursor::new(bytes)).read_info().ok()?;
        let dims = reader.info().pixel_dims?;
        match dims.unit {
            png::Unit::Meter => Some(Resolution::from_pixels_per_meter(dims.xppu, dims.yppu)),
            png::Unit::Unspecified => None,
        }
    }

    /// JFIF APP0 density. Units 1 = dots per inch, 2 = dots per cm.
    fn jfif_density(bytes: &[u8]) -> Option<Resolution> {
        if bytes.len() < 4 || bytes[0] != 0xFF || bytes[1] != 0xD8 {
            return None;
        }

        let mut pos = 2;
        while pos + 4 <= bytes.len() {
            if bytes[pos] != 0xFF {
                return None;
            }
            let marker = bytes[pos + 1];
            // Start of scan / end of image: no more header segments
            if marker == 0xDA || marker == 0xD9 {
                return None;
            }
            let len = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
            if len < 2 {
                return None;
            }
            let body = bytes.get(pos + 4..pos + 2 + len)?;

            if marker == 0xE0 && body.len() >= 12 && body.starts_with(b"JFIF\0") {
                let units = body[7];
                let x = u16::from_be_bytes([body[8], body[9]]) as f64;
                let y = u16::from_be_bytes([body[10], body[11]]) as f64;
                return match units {
                    1 => Some(Resolution { x_dpi: x, y_dpi: y }),
                    2 => Some(Resolution::from_dots_per_cm(x, y)),
                    _ => None,
                };
            }
            pos += 2 + len;
        }
        None
    }

    /// EXIF resolution from any container kamadak-exif understands.
    fn exif_resolution(bytes: &[u8]) -> Option<Resolution> {
        let exif = Reader::new()
            .read_from_container(&mut Cursor::new(bytes))
            .ok()?;

        let x = Self::get_rational(&exif, Tag::XResolution)?;
        let y = Self::get_rational(&exif, Tag::YResolution)?;
        match Self::get_u32(&exif, Tag::ResolutionUnit).unwrap_or(EXIF_UNIT_INCH) {
            EXIF_UNIT_INCH => Some(Resolution { x_dpi: x, y_dpi: y }),
            EXIF_UNIT_CM => Some(Resolution::from_dots_per_cm(x, y)),
            _ => None,
        }
    }

    fn get_rational(exif: &exif::Exif, tag: Tag) -> Option<f64> {
        exif.get_field(tag, In::PRIMARY)
            .and_then(|f| match &f.value {
                Value::Rational(v) => v.first().map(|r| r.to_f64()),
                _ => None,
            })
    }

    fn get_u32(exif: &exif::Exif, tag: Tag) -> Option<u32> {
        exif.get_field(tag, In::PRIMARY)
            .and_then(|f| match &f.value {
                Value::Short(v) => v.first().map(|&x| x as u32),
                Value::Long(v) => v.first().copied(),
                _ => None,
            })
    }
}
