use geo::{Coord, Geometry, Polygon, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute key carrying a structure's height in meters.
pub const HEIGHT_ATTRIBUTE: &str = "height";

/// Rectangular viewport extent in WGS84 degrees.
///
/// Antimeridian wraparound is not supported: `west < east` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRegion {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl BoundingRegion {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Result<Self, RegionError> {
        if ![west, south, east, north].iter().all(|value| value.is_finite()) {
            return Err(RegionError::NonFinite);
        }
        if south >= north {
            return Err(RegionError::InvertedLatitude { south, north });
        }
        if west >= east {
            return Err(RegionError::InvertedLongitude { west, east });
        }

        Ok(Self {
            north,
            south,
            east,
            west,
        })
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    /// Closed rectangle polygon through the region's four corners.
    pub fn to_polygon(&self) -> Polygon<f64> {
        Rect::new(
            Coord {
                x: self.west,
                y: self.south,
            },
            Coord {
                x: self.east,
                y: self.north,
            },
        )
        .to_polygon()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegionError {
    #[error("bounding region coordinates must be finite")]
    NonFinite,
    #[error("bounding region south ({south}) must be below north ({north})")]
    InvertedLatitude { south: f64, north: f64 },
    #[error("bounding region west ({west}) must be left of east ({east})")]
    InvertedLongitude { west: f64, east: f64 },
}

/// Descriptive properties attached to a feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub category: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
}

impl FeatureProperties {
    pub fn with_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).copied()
    }

    pub fn height(&self) -> Option<f64> {
        self.attribute(HEIGHT_ATTRIBUTE)
    }
}

/// A classified geographic area drawn from one map source layer.
///
/// Geometry may be any GeoJSON geometry type; only well-formed `Polygon`
/// features take part in siting.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonFeature {
    pub geometry: Geometry<f64>,
    pub properties: FeatureProperties,
}

impl PolygonFeature {
    pub fn new(geometry: impl Into<Geometry<f64>>, properties: FeatureProperties) -> Self {
        Self {
            geometry: geometry.into(),
            properties,
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.properties.category.as_deref()
    }

    /// The geometry as a well-formed single polygon. Any other geometry
    /// type, MultiPolygon included, yields `None`.
    pub(crate) fn polygon(&self) -> Option<&Polygon<f64>> {
        match &self.geometry {
            Geometry::Polygon(polygon) if is_well_formed(polygon) => Some(polygon),
            _ => None,
        }
    }
}

fn is_well_formed(polygon: &Polygon<f64>) -> bool {
    let exterior = polygon.exterior();
    exterior.0.len() >= 4
        && exterior.is_closed()
        && std::iter::once(exterior)
            .chain(polygon.interiors())
            .flat_map(|ring| ring.0.iter())
            .all(is_wgs84)
}

fn is_wgs84(coord: &Coord<f64>) -> bool {
    coord.x.is_finite()
        && coord.y.is_finite()
        && (-180.0..=180.0).contains(&coord.x)
        && (-90.0..=90.0).contains(&coord.y)
}

/// Optimal site coordinate and the aggregate score that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteResult {
    /// Longitude in degrees.
    pub x: f64,
    /// Latitude in degrees.
    pub y: f64,
    pub score: f64,
}

/// Outcome of a siting run. `NoSite` is a normal result, not a failure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SiteOutcome {
    Site(SiteResult),
    NoSite,
}

impl SiteOutcome {
    pub fn site(&self) -> Option<&SiteResult> {
        match self {
            SiteOutcome::Site(result) => Some(result),
            SiteOutcome::NoSite => None,
        }
    }

    pub fn is_site(&self) -> bool {
        matches!(self, SiteOutcome::Site(_))
    }
}
