use super::domain::PolygonFeature;
use super::score_table::ScoreTable;
use geo::ChamberlainDuquetteArea;
use serde::{Deserialize, Serialize};

/// Divisor applied to `area * height` in magnitude-adjusted scoring.
pub const MAGNITUDE_NORMALIZATION: f64 = 100_000.0;

/// Selects both the score table and the scoring formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Land-use zones, scored by category weight alone.
    Category,
    /// Building footprints, scored by category weight times footprint volume.
    MagnitudeAdjusted,
}

impl ScoringMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Category => "Land Use",
            Self::MagnitudeAdjusted => "Structures",
        }
    }
}

/// Assigns a non-negative suitability score to a single feature.
#[derive(Debug, Clone, PartialEq)]
pub struct SuitabilityScorer {
    land_use: ScoreTable,
    structure: ScoreTable,
    normalization: f64,
}

impl Default for SuitabilityScorer {
    fn default() -> Self {
        Self::new(ScoreTable::land_use(), ScoreTable::structure())
    }
}

impl SuitabilityScorer {
    pub fn new(land_use: ScoreTable, structure: ScoreTable) -> Self {
        Self {
            land_use,
            structure,
            normalization: MAGNITUDE_NORMALIZATION,
        }
    }

    /// Override the magnitude divisor. Non-positive or non-finite values are
    /// ignored.
    pub fn with_normalization(mut self, normalization: f64) -> Self {
        if normalization.is_finite() && normalization > 0.0 {
            self.normalization = normalization;
        }
        self
    }

    pub fn normalization(&self) -> f64 {
        self.normalization
    }

    pub fn table(&self, mode: ScoringMode) -> &ScoreTable {
        match mode {
            ScoringMode::Category => &self.land_use,
            ScoringMode::MagnitudeAdjusted => &self.structure,
        }
    }

    pub fn score(&self, feature: &PolygonFeature, mode: ScoringMode) -> f64 {
        let base = self.table(mode).lookup_optional(feature.category());

        match mode {
            ScoringMode::Category => base,
            ScoringMode::MagnitudeAdjusted => {
                let area = footprint_area(feature);
                let height = feature
                    .properties
                    .height()
                    .filter(|height| height.is_finite() && *height > 0.0)
                    .unwrap_or(0.0);
                magnitude_score(base, area, height, self.normalization)
            }
        }
    }
}

/// `base * (area * height) / normalization`, clamped at zero.
pub fn magnitude_score(base: f64, area_m2: f64, height_m: f64, normalization: f64) -> f64 {
    let score = base * (area_m2 * height_m) / normalization;
    if score.is_finite() && score > 0.0 {
        score
    } else {
        0.0
    }
}

/// Spherical footprint area in square meters; zero for anything but a polygon.
pub fn footprint_area(feature: &PolygonFeature) -> f64 {
    feature
        .polygon()
        .map_or(0.0, |polygon| polygon.chamberlain_duquette_unsigned_area())
}
