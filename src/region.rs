//! Region loading from GeoJSON feature collections.

use std::fs;
use std::path::Path;

use geo::{coord, Coord, Geometry, LineString, MultiPolygon, Point, Polygon};
use geojson::{FeatureCollection, GeoJson};
use serde_json::Value as Json;
use tracing::info;

use crate::error::{Error, Result};

/// A named region: a geometric boundary paired with the label drawn from the
/// selected GeoJSON property.
#[derive(Debug, Clone)]
pub struct Region {
    pub geometry: Geometry<f64>,
    pub label: String,
}

/// Ordered collection of regions built from one GeoJSON document.
///
/// Feature order is preserved and significant: when regions overlap, the
/// earlier feature wins during matching.
#[derive(Debug, Clone)]
pub struct RegionSet {
    regions: Vec<Region>,
    property: String,
}

impl RegionSet {
    /// Load regions from a GeoJSON file on disk.
    ///
    /// The file is read once, in full, before any parsing; the handle is
    /// released on every exit path.
    pub fn from_file<P: AsRef<Path>>(path: P, property: &str) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| Error::SourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let geojson: GeoJson = raw
            .parse()
            .map_err(|e: geojson::Error| Error::MalformedGeometry {
                reason: e.to_string(),
            })?;

        let set = Self::from_geojson(geojson, property)?;
        info!("Loaded {} regions from {}", set.len(), path.display());
        Ok(set)
    }

    /// Build a region set from an already-parsed GeoJSON document.
    ///
    /// The document must be a FeatureCollection. Every feature must carry a
    /// geometry and a non-null `property` value; the value becomes the
    /// region's label (strings as-is, other scalars rendered as JSON text).
    pub fn from_geojson(geojson: GeoJson, property: &str) -> Result<Self> {
        let collection: FeatureCollection = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => {
                return Err(Error::MalformedGeometry {
                    reason: "top-level value is not a FeatureCollection".to_string(),
                })
            }
        };

        let mut regions = Vec::with_capacity(collection.features.len());

        for (idx, feature) in collection.features.iter().enumerate() {
            let geom = feature
                .geometry
                .as_ref()
                .ok_or_else(|| Error::MalformedGeometry {
                    reason: format!("feature {idx} has no geometry"),
                })?;
            let geometry = convert_geometry(geom, idx)?;

            let label = match feature.property(property) {
                None | Some(Json::Null) => {
                    return Err(Error::MissingAttribute {
                        property: property.to_string(),
                        feature: idx,
                    })
                }
                Some(Json::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            };

            regions.push(Region { geometry, label });
        }

        Ok(Self {
            regions,
            property: property.to_string(),
        })
    }

    /// Name of the GeoJSON property the labels were drawn from. Annotation
    /// writes the label under this field name.
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }
}

/// Convert a GeoJSON geometry into a geo shape.
///
/// Polygon and MultiPolygon are the shapes this is used for in practice;
/// Point and LineString are accepted for completeness. Everything else is
/// rejected as malformed input.
fn convert_geometry(geom: &geojson::Geometry, feature_idx: usize) -> Result<Geometry<f64>> {
    use geojson::Value;

    match &geom.value {
        Value::Point(pos) => {
            let (x, y) = position(pos, feature_idx)?;
            Ok(Geometry::Point(Point::new(x, y)))
        }
        Value::LineString(positions) => Ok(Geometry::LineString(ring(positions, feature_idx)?)),
        Value::Polygon(rings) => Ok(Geometry::Polygon(polygon(rings, feature_idx)?)),
        Value::MultiPolygon(polygons) => {
            let polygons = polygons
                .iter()
                .map(|rings| polygon(rings, feature_idx))
                .collect::<Result<Vec<_>>>()?;
            Ok(Geometry::MultiPolygon(MultiPolygon::new(polygons)))
        }
        Value::MultiPoint(_) => unsupported("MultiPoint", feature_idx),
        Value::MultiLineString(_) => unsupported("MultiLineString", feature_idx),
        Value::GeometryCollection(_) => unsupported("GeometryCollection", feature_idx),
    }
}

fn unsupported(kind: &str, feature_idx: usize) -> Result<Geometry<f64>> {
    Err(Error::MalformedGeometry {
        reason: format!("feature {feature_idx}: unsupported geometry type {kind}"),
    })
}

fn polygon(rings: &[Vec<Vec<f64>>], feature_idx: usize) -> Result<Polygon<f64>> {
    let mut iter = rings.iter();
    let exterior = match iter.next() {
        Some(positions) => ring(positions, feature_idx)?,
        None => {
            return Err(Error::MalformedGeometry {
                reason: format!("feature {feature_idx}: polygon with no rings"),
            })
        }
    };
    let interiors = iter
        .map(|positions| ring(positions, feature_idx))
        .collect::<Result<Vec<_>>>()?;

    // Polygon::new closes unclosed rings itself
    Ok(Polygon::new(exterior, interiors))
}

fn ring(positions: &[Vec<f64>], feature_idx: usize) -> Result<LineString<f64>> {
    let coords = positions
        .iter()
        .map(|pos| position(pos, feature_idx).map(|(x, y)| coord! { x: x, y: y }))
        .collect::<Result<Vec<Coord<f64>>>>()?;
    Ok(LineString::new(coords))
}

fn position(pos: &[f64], feature_idx: usize) -> Result<(f64, f64)> {
    if pos.len() < 2 {
        return Err(Error::MalformedGeometry {
            reason: format!("feature {feature_idx}: position with fewer than 2 ordinates"),
        });
    }
    Ok((pos[0], pos[1]))
}
