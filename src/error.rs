//! Error types for the hadley crate.
//!
//! This module defines a comprehensive error enum covering every fatal
//! condition in the scale synthesis pipeline. Degenerate-but-recoverable
//! conditions (negative-only data, sparse difference data) are not errors;
//! they are logged and auto-corrected by the scale classifier.

use thiserror::Error;

/// The main error type for hadley operations.
#[derive(Error, Debug)]
pub enum HadleyError {
    /// A vmin/vmax/neutral spec is not a valid number or percentage
    #[error("Invalid limit '{spec}': {message}")]
    InvalidLimit { spec: String, message: String },

    /// A cutoff-list entry is not numeric
    #[error("Invalid cutoff value '{value}' in cutoff list")]
    InvalidCutoff { value: String },

    /// An entry in an explicit color list is not a known name or hex code
    #[error("Invalid color: {name}")]
    InvalidColor { name: String },

    /// Referenced base color function name is unknown
    #[error("Colormap not found: {name}")]
    ColormapNotFound { name: String },

    /// The computed neutral band falls outside the normalized [0, 1] domain
    #[error("Neutral band [{low}, {high}] outside the scale of the plot")]
    NeutralOutOfRange { low: f64, high: f64 },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The data array is empty (or fully masked), so no limits can be resolved
    #[error("Empty data: {message}")]
    EmptyData { message: String },

    /// IO errors (report-max side file, config file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with HadleyError
pub type Result<T> = std::result::Result<T, HadleyError>;
