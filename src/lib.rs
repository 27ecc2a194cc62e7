//! Laurel - point-in-region annotation for tabular coordinate data.
//!
//! Loads a set of named regions from a GeoJSON FeatureCollection and labels
//! each (longitude, latitude) row with a chosen property of the first region
//! that contains its point, in feature order. Rows no region contains get the
//! sentinel label `"non_founded"`.

pub mod annotate;
pub mod error;
pub mod region;
pub mod row;

pub use annotate::{annotate, match_region, SENTINEL_LABEL};
pub use error::{Error, Result};
pub use region::{Region, RegionSet};
pub use row::Row;
