//! Defines [`SjoinError`], representing all errors returned by this crate.

use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SjoinError {
    /// A required input was missing or was not a feature collection.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An option had an unrecognized value or the wrong type.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A geometry was absent or degenerate where a bounding box was required.
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// [geojson::Error]
    #[error(transparent)]
    GeoJsonError(#[from] geojson::Error),

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, SjoinError>;
