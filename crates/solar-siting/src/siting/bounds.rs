use super::domain::{BoundingRegion, PolygonFeature};
use geo::Intersects;

/// Narrows a feature collection to the polygons touching a viewport.
pub struct BoundsFilter;

impl BoundsFilter {
    /// Polygon features intersecting `region`, in input order.
    ///
    /// Intersection is tested against the region's rectangle polygon, so
    /// features straddling the viewport edge are kept. Every other geometry
    /// type (MultiPolygon included) and malformed polygons are dropped
    /// without error.
    pub fn filter<'a>(
        features: &'a [PolygonFeature],
        region: &BoundingRegion,
    ) -> Vec<&'a PolygonFeature> {
        Self::filter_indexed(features, region)
            .into_iter()
            .map(|(_, feature)| feature)
            .collect()
    }

    /// Like [`filter`](Self::filter), paired with each feature's input index.
    pub fn filter_indexed<'a>(
        features: &'a [PolygonFeature],
        region: &BoundingRegion,
    ) -> Vec<(usize, &'a PolygonFeature)> {
        let viewport = region.to_polygon();

        features
            .iter()
            .enumerate()
            .filter(|(_, feature)| {
                feature
                    .polygon()
                    .is_some_and(|polygon| polygon.intersects(&viewport))
            })
            .collect()
    }
}
