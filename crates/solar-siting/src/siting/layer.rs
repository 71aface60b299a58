use super::scoring::ScoringMode;
use serde::{Deserialize, Serialize};

/// Map source layer a feature collection was queried from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLayer {
    LandUse,
    Buildings,
}

impl SourceLayer {
    pub const fn ordered() -> [Self; 2] {
        [Self::LandUse, Self::Buildings]
    }

    /// Name of the layer inside the vector tile source.
    pub const fn source_layer(self) -> &'static str {
        match self {
            Self::LandUse => "landuse",
            Self::Buildings => "building",
        }
    }

    /// Feature property holding the category label.
    pub const fn category_property(self) -> &'static str {
        match self {
            Self::LandUse => "class",
            Self::Buildings => "type",
        }
    }

    pub const fn scoring_mode(self) -> ScoringMode {
        match self {
            Self::LandUse => ScoringMode::Category,
            Self::Buildings => ScoringMode::MagnitudeAdjusted,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LandUse => "Land Use",
            Self::Buildings => "3D Buildings",
        }
    }

    pub fn from_source_layer(name: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|layer| layer.source_layer().eq_ignore_ascii_case(name.trim()))
    }
}
