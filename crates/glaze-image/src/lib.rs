#![deny(missing_docs)]
//! Image types and traits for the glaze blur pipeline

/// image representation for raster processing purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
