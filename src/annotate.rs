//! Point-in-region matching over tabular rows.

use geo::{Contains, Point};
use serde_json::Value as Json;
use tracing::info;

use crate::error::Result;
use crate::region::RegionSet;
use crate::row::{numeric_field, Row};

/// Label attached to rows that no region contains.
pub const SENTINEL_LABEL: &str = "non_founded";

/// Annotate each row with the label of the first region containing its
/// (longitude, latitude) point.
///
/// Returns a new row sequence, same length and order as the input, with the
/// label written under the field named after the property the region set was
/// loaded with. Rows contained by no region get [`SENTINEL_LABEL`]. Input
/// rows are never mutated.
///
/// Regions are tested in source order and the first hit wins, so overlap is
/// resolved by feature order in the geometry document. Containment is
/// interior containment (`geo::Contains`): a point exactly on a region's
/// boundary is inside no region, including where two regions share an edge.
///
/// Any row whose coordinate fields are missing, non-numeric or out of range
/// fails the whole call with no output produced.
pub fn annotate(
    rows: &[Row],
    longitude_field: &str,
    latitude_field: &str,
    regions: &RegionSet,
) -> Result<Vec<Row>> {
    let mut annotated = Vec::with_capacity(rows.len());
    let mut misses = 0usize;

    for (idx, row) in rows.iter().enumerate() {
        let lon = numeric_field(row, longitude_field, idx, -180.0..=180.0)?;
        let lat = numeric_field(row, latitude_field, idx, -90.0..=90.0)?;
        let point = Point::new(lon, lat);

        let label = match match_region(regions, &point) {
            Some(label) => label,
            None => {
                misses += 1;
                SENTINEL_LABEL
            }
        };

        let mut out = row.clone();
        out.insert(
            regions.property().to_string(),
            Json::String(label.to_string()),
        );
        annotated.push(out);
    }

    info!(
        "Annotated {} rows against {} regions ({} unmatched)",
        annotated.len(),
        regions.len(),
        misses
    );

    Ok(annotated)
}

/// First region in source order whose geometry contains the point.
pub fn match_region<'a>(regions: &'a RegionSet, point: &Point<f64>) -> Option<&'a str> {
    regions
        .iter()
        .find(|region| region.geometry.contains(point))
        .map(|region| region.label.as_str())
}
