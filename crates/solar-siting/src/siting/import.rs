use super::domain::{FeatureProperties, PolygonFeature};
use super::layer::SourceLayer;
use geo::Geometry;
use geojson::{GeoJson, JsonObject};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read feature collection: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("expected a GeoJSON FeatureCollection, found a {0}")]
    NotFeatureCollection(&'static str),
}

/// Converts map source features (GeoJSON) into siting candidates.
///
/// Features without geometry, or whose geometry cannot be represented, are
/// skipped; heterogeneous collections are normal input.
pub struct FeatureCollectionImporter {
    layer: SourceLayer,
}

impl FeatureCollectionImporter {
    pub fn new(layer: SourceLayer) -> Self {
        Self { layer }
    }

    pub fn import_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<PolygonFeature>, ImportError> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    pub fn import_reader<R: Read>(&self, reader: R) -> Result<Vec<PolygonFeature>, ImportError> {
        let value: Value = serde_json::from_reader(reader)?;
        self.import_value(value)
    }

    pub fn import_value(&self, value: Value) -> Result<Vec<PolygonFeature>, ImportError> {
        let collection = match GeoJson::from_json_value(value)? {
            GeoJson::FeatureCollection(collection) => collection,
            GeoJson::Feature(_) => return Err(ImportError::NotFeatureCollection("Feature")),
            GeoJson::Geometry(_) => return Err(ImportError::NotFeatureCollection("Geometry")),
        };

        let total = collection.features.len();
        let features: Vec<PolygonFeature> = collection
            .features
            .into_iter()
            .filter_map(|feature| {
                let geometry = Geometry::<f64>::try_from(feature.geometry?.value).ok()?;
                let properties = self.properties(feature.properties.as_ref());
                Some(PolygonFeature::new(geometry, properties))
            })
            .collect();

        debug!(
            layer = self.layer.source_layer(),
            total,
            imported = features.len(),
            "imported source features"
        );

        Ok(features)
    }

    fn properties(&self, raw: Option<&JsonObject>) -> FeatureProperties {
        let Some(raw) = raw else {
            return FeatureProperties::default();
        };

        let category_key = self.layer.category_property();
        let category = raw
            .get(category_key)
            .and_then(Value::as_str)
            .map(str::to_string);

        let attributes: BTreeMap<String, f64> = raw
            .iter()
            .filter(|(key, _)| key.as_str() != category_key)
            .filter_map(|(key, value)| numeric(value).map(|number| (key.clone(), number)))
            .collect();

        FeatureProperties {
            category,
            attributes,
        }
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|number| number.is_finite())
}
