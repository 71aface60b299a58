use super::domain::{PolygonFeature, SiteOutcome, SiteResult};
use geo::{Centroid, Point, Polygon};

/// Minimum score a feature must strictly exceed to influence the site.
pub const ACCEPTANCE_THRESHOLD: f64 = 0.5;

/// A feature paired with the score it received.
#[derive(Debug, Clone, Copy)]
pub struct ScoredFeature<'a> {
    pub feature: &'a PolygonFeature,
    pub score: f64,
}

/// An accepted feature's contribution to the weighted centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub centroid: Point<f64>,
    pub score: f64,
}

/// Area-weighted centroid of the outer ring. Holes are ignored.
pub fn polygon_centroid(feature: &PolygonFeature) -> Option<Point<f64>> {
    let polygon = feature.polygon()?;
    Polygon::new(polygon.exterior().clone(), vec![]).centroid()
}

/// Folds scored features into a single score-weighted site.
pub struct CentroidAggregator;

impl CentroidAggregator {
    pub fn aggregate(scored: &[ScoredFeature<'_>], threshold: f64) -> SiteOutcome {
        let contributions = Self::contributions(scored, threshold);
        Self::combine(&contributions)
    }

    /// Per-feature contributions for features whose score exceeds `threshold`.
    ///
    /// Features at exactly the threshold are excluded, as are features with no
    /// polygonal centroid.
    pub fn contributions(scored: &[ScoredFeature<'_>], threshold: f64) -> Vec<Contribution> {
        scored
            .iter()
            .filter(|candidate| candidate.score > threshold)
            .filter_map(|candidate| {
                polygon_centroid(candidate.feature).map(|centroid| Contribution {
                    centroid,
                    score: candidate.score,
                })
            })
            .collect()
    }

    pub fn combine(contributions: &[Contribution]) -> SiteOutcome {
        let mut weighted_x = 0.0;
        let mut weighted_y = 0.0;
        let mut total_score = 0.0;

        for contribution in contributions {
            weighted_x += contribution.centroid.x() * contribution.score;
            weighted_y += contribution.centroid.y() * contribution.score;
            total_score += contribution.score;
        }

        if total_score == 0.0 {
            return SiteOutcome::NoSite;
        }

        SiteOutcome::Site(SiteResult {
            x: weighted_x / total_score,
            y: weighted_y / total_score,
            score: total_score,
        })
    }
}
