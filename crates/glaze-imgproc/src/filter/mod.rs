//! Filter operations
//!
//! This module provides the Gaussian blur pipeline for image processing.

/// Filter kernels
pub mod kernels;

/// Dense 2D convolution
mod convolution;
pub use convolution::*;

/// Filter operations
mod ops;
pub use ops::*;
