//! Batch conversion pipeline.
//!
//! This module contains all the stages a source image goes through:
//! - **discovery**: Find image files in the input directory
//! - **destination**: Derive output paths
//! - **validate**: Pre-decode checks (existence, size)
//! - **decode**: Load and decode images from various formats
//! - **metadata**: Read resolution (DPI) from the source
//! - **encode**: Write RGBA PNGs, with resolution when present
//! - **processor**: Converts a single file
//! - **batch**: Runs every file with skip/overwrite policy and error isolation

pub mod batch;
pub mod decode;
pub mod destination;
pub mod discovery;
pub mod encode;
pub mod metadata;
pub mod processor;
pub mod validate;

// Re-exports for convenient access
pub use batch::{absolutize, Batch, ConvertOptions, SKIP_EXISTS};
pub use decode::{DecodedImage, ImageDecoder};
pub use destination::DestinationPlanner;
pub use discovery::FileDiscovery;
pub use encode::{PngWriter, OUTPUT_EXTENSION};
pub use metadata::MetadataExtractor;
pub use processor::{Converted, ImageProcessor};
pub use validate::Validator;
