//! Core domain types and models
//!
//! This module contains the detection data model shared by every layer:
//! the supported data types, individual detections, per-document detection
//! sets, per-document outcomes, and the error hierarchy.

pub mod errors;
pub mod types;

pub use errors::VeilleError;
pub use types::{DataType, DetectOutcome, Detection, DetectionSet, FileCategory};

/// Result type alias using [`VeilleError`]
pub type Result<T> = std::result::Result<T, VeilleError>;
