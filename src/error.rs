//! Error taxonomy for region loading and row annotation.
//!
//! Every failure aborts the whole operation: there is no per-row
//! skip-and-continue and no partial output.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Geometry document path does not resolve to a readable file.
    #[error("geometry source not found: {}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid GeoJSON, or a feature geometry cannot be
    /// interpreted as a supported shape.
    #[error("malformed geometry source: {reason}")]
    MalformedGeometry { reason: String },

    /// Requested property is absent (or null) on one or more features.
    #[error("feature {feature} has no property {property:?}")]
    MissingAttribute { property: String, feature: usize },

    /// A row's coordinate field is absent, non-numeric or out of range.
    #[error("row {row}: invalid coordinate field {field:?}: {reason}")]
    InvalidCoordinate {
        row: usize,
        field: String,
        reason: String,
    },
}
