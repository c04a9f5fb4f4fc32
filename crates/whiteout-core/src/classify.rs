//! White-to-transparent pixel classification.
//!
//! A pixel is "white-ish" when every colour channel is at or above the
//! threshold. White-ish pixels get alpha 0; their RGB values are kept so the
//! colour data survives for later inspection or re-processing. Pixels that are
//! already fully transparent are never reinterpreted by colour.

use image::{Rgba, RgbaImage};

/// Default threshold used when none is configured.
pub const DEFAULT_THRESHOLD: u8 = 240;

/// Classify a single pixel.
#[inline]
pub fn classify_pixel(pixel: Rgba<u8>, threshold: u8) -> Rgba<u8> {
    let [r, g, b, a] = pixel.0;
    if a == 0 {
        return pixel;
    }
    if is_whiteish(r, g, b, threshold) {
        Rgba([r, g, b, 0])
    } else {
        pixel
    }
}

#[inline]
fn is_whiteish(r: u8, g: u8, b: u8, threshold: u8) -> bool {
    r >= threshold && g >= threshold && b >= threshold
}

/// Make every white-ish pixel of `image` transparent.
///
/// Takes the buffer by value and rewrites alpha in place; dimensions and
/// channel layout are unchanged.
pub fn white_to_transparent(mut image: RgbaImage, threshold: u8) -> RgbaImage {
    for pixel in image.pixels_mut() {
        *pixel = classify_pixel(*pixel, threshold);
    }
    image
}

/// Count the pixels that [`white_to_transparent`] would make transparent.
pub fn count_whiteish(image: &RgbaImage, threshold: u8) -> u64 {
    image
        .pixels()
        .filter(|p| p.0[3] != 0 && is_whiteish(p.0[0], p.0[1], p.0[2], threshold))
        .count() as u64
}
