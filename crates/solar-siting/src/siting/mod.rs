//! Suitability scoring and weighted-centroid site selection.
//!
//! Candidates flow through [`BoundsFilter`], [`SuitabilityScorer`] and
//! [`CentroidAggregator`]; [`OptimalSiteLocator`] wires the stages together.

mod bounds;
mod centroid;
pub mod domain;
mod import;
mod layer;
mod locator;
mod score_table;
mod scoring;

pub use bounds::BoundsFilter;
pub use centroid::{
    polygon_centroid, CentroidAggregator, Contribution, ScoredFeature, ACCEPTANCE_THRESHOLD,
};
pub use domain::{
    BoundingRegion, FeatureProperties, PolygonFeature, RegionError, SiteOutcome, SiteResult,
    HEIGHT_ATTRIBUTE,
};
pub use import::{FeatureCollectionImporter, ImportError};
pub use layer::SourceLayer;
pub use locator::{CentroidView, FeatureScore, OptimalSiteLocator, SiteReport};
pub use score_table::{ScoreTable, ScoreTableError, DEFAULT_CATEGORY};
pub use scoring::{
    footprint_area, magnitude_score, ScoringMode, SuitabilityScorer, MAGNITUDE_NORMALIZATION,
};
