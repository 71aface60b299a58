//! Rendering configuration handed to the map client: which layers start
//! visible and the colour assigned to each category.

use serde::Serialize;
use solar_siting::siting::{ScoringMode, SourceLayer, DEFAULT_CATEGORY};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct LayerPresentation {
    pub(crate) layer: SourceLayer,
    pub(crate) source_layer: &'static str,
    pub(crate) category_property: &'static str,
    pub(crate) label: &'static str,
    pub(crate) scoring_mode: ScoringMode,
    pub(crate) visible: bool,
    pub(crate) opacity: f32,
    pub(crate) legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct LegendEntry {
    pub(crate) category: &'static str,
    pub(crate) label: &'static str,
    pub(crate) color: &'static str,
}

const LAND_USE_LEGEND: &[(&str, &str, &str)] = &[
    ("residential", "Residential", "#a8ddb5"),
    ("commercial", "Commercial", "#43a2ca"),
    ("industrial", "Industrial", "#f03b20"),
    ("agriculture", "Agriculture", "#fee391"),
    (DEFAULT_CATEGORY, "Default", "#ddd"),
];

const BUILDING_LEGEND: &[(&str, &str, &str)] = &[
    ("commercial", "Commercial", "#33c7ff"),
    ("train_station", "Train Station", "#FFCFEF"),
    ("apartments", "Apartments", "#00ff00"),
    ("residential", "Residential", "#00ff00"),
    ("school", "School", "#D3F1DF"),
    ("university", "University", "#D3F1DF"),
    ("hospital", "Hospital", "#FF7F3E"),
    ("sports_centre", "Sports Centre", "#0A97B0"),
    ("industrial", "Industrial", "#f03b20"),
    ("government", "Government", "#432E54"),
    ("public", "Public", "#432E54"),
    ("office", "Office", "#7E1891"),
    (DEFAULT_CATEGORY, "Default", "#aaa"),
];

pub(crate) fn layer_presentations() -> Vec<LayerPresentation> {
    SourceLayer::ordered()
        .into_iter()
        .map(layer_presentation)
        .collect()
}

pub(crate) fn layer_presentation(layer: SourceLayer) -> LayerPresentation {
    let (legend, opacity) = match layer {
        SourceLayer::LandUse => (LAND_USE_LEGEND, 0.25),
        SourceLayer::Buildings => (BUILDING_LEGEND, 0.8),
    };

    LayerPresentation {
        layer,
        source_layer: layer.source_layer(),
        category_property: layer.category_property(),
        label: layer.label(),
        scoring_mode: layer.scoring_mode(),
        visible: true,
        opacity,
        legend: legend
            .iter()
            .map(|&(category, label, color)| LegendEntry {
                category,
                label,
                color,
            })
            .collect(),
    }
}
