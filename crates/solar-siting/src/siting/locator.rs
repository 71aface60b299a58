use super::bounds::BoundsFilter;
use super::centroid::{polygon_centroid, CentroidAggregator, ScoredFeature, ACCEPTANCE_THRESHOLD};
use super::domain::{BoundingRegion, PolygonFeature, SiteOutcome, SiteResult};
use super::scoring::{ScoringMode, SuitabilityScorer};
use serde::Serialize;
use tracing::{debug, info};

/// End-to-end siting pipeline: bounds filter, scoring, weighted centroid.
///
/// The locator holds only configuration; every call is independent and the
/// same inputs always produce the same outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimalSiteLocator {
    scorer: SuitabilityScorer,
}

impl Default for OptimalSiteLocator {
    fn default() -> Self {
        Self::new(SuitabilityScorer::default())
    }
}

impl OptimalSiteLocator {
    pub fn new(scorer: SuitabilityScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &SuitabilityScorer {
        &self.scorer
    }

    pub fn locate(
        &self,
        region: &BoundingRegion,
        candidates: &[PolygonFeature],
        mode: ScoringMode,
    ) -> SiteOutcome {
        let in_bounds = BoundsFilter::filter(candidates, region);
        let scored = self.score_all(in_bounds.iter().copied(), mode);
        let outcome = CentroidAggregator::aggregate(&scored, ACCEPTANCE_THRESHOLD);

        log_outcome(candidates.len(), in_bounds.len(), mode, &outcome);
        outcome
    }

    /// Same as [`locate`](Self::locate), with a per-feature audit trail.
    pub fn locate_with_report(
        &self,
        region: &BoundingRegion,
        candidates: &[PolygonFeature],
        mode: ScoringMode,
    ) -> SiteReport {
        let in_bounds = BoundsFilter::filter_indexed(candidates, region);
        let scored = self.score_all(in_bounds.iter().map(|(_, feature)| *feature), mode);

        let mut breakdown = Vec::with_capacity(scored.len());
        for (&(index, _), candidate) in in_bounds.iter().zip(&scored) {
            let accepted = candidate.score > ACCEPTANCE_THRESHOLD;
            let centroid = polygon_centroid(candidate.feature).map(|point| CentroidView {
                x: point.x(),
                y: point.y(),
            });

            breakdown.push(FeatureScore {
                index,
                category: candidate.feature.category().map(str::to_string),
                score: candidate.score,
                accepted,
                centroid,
            });
        }

        let outcome = CentroidAggregator::aggregate(&scored, ACCEPTANCE_THRESHOLD);
        log_outcome(candidates.len(), in_bounds.len(), mode, &outcome);

        SiteReport {
            mode,
            threshold: ACCEPTANCE_THRESHOLD,
            candidates: candidates.len(),
            in_bounds: in_bounds.len(),
            accepted: breakdown.iter().filter(|entry| entry.accepted).count(),
            site: outcome.site().copied(),
            features: breakdown,
        }
    }

    fn score_all<'a>(
        &self,
        features: impl Iterator<Item = &'a PolygonFeature>,
        mode: ScoringMode,
    ) -> Vec<ScoredFeature<'a>> {
        features
            .map(|feature| ScoredFeature {
                feature,
                score: self.scorer.score(feature, mode),
            })
            .collect()
    }
}

fn log_outcome(candidates: usize, in_bounds: usize, mode: ScoringMode, outcome: &SiteOutcome) {
    debug!(candidates, in_bounds, mode = mode.label(), "scored features in viewport");

    match outcome {
        SiteOutcome::Site(site) => {
            info!(x = site.x, y = site.y, score = site.score, "optimal site located")
        }
        SiteOutcome::NoSite => info!(mode = mode.label(), "no feature met the threshold"),
    }
}

/// Audit view of a siting run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteReport {
    pub mode: ScoringMode,
    pub threshold: f64,
    pub candidates: usize,
    pub in_bounds: usize,
    pub accepted: usize,
    pub site: Option<SiteResult>,
    pub features: Vec<FeatureScore>,
}

impl SiteReport {
    pub fn outcome(&self) -> SiteOutcome {
        match self.site {
            Some(site) => SiteOutcome::Site(site),
            None => SiteOutcome::NoSite,
        }
    }
}

/// Score received by one in-bounds feature; `index` points into the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureScore {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub score: f64,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centroid: Option<CentroidView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CentroidView {
    pub x: f64,
    pub y: f64,
}
