use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Category used when a feature's label is missing or unrecognized.
pub const DEFAULT_CATEGORY: &str = "default";

/// Immutable category → suitability weight mapping.
///
/// Every table carries a `default` entry; construction fails without one, so
/// lookups never do.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    weights: BTreeMap<String, f64>,
    default_weight: f64,
}

impl ScoreTable {
    pub fn new<I, K>(entries: I) -> Result<Self, ScoreTableError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut weights = BTreeMap::new();
        for (category, weight) in entries {
            let category = category.into();
            if !weight.is_finite() || weight < 0.0 {
                return Err(ScoreTableError::InvalidWeight { category, weight });
            }
            weights.insert(category, weight);
        }

        let default_weight = *weights
            .get(DEFAULT_CATEGORY)
            .ok_or(ScoreTableError::MissingDefault)?;

        Ok(Self {
            weights,
            default_weight,
        })
    }

    /// Solar suitability of land-use zones.
    pub fn land_use() -> Self {
        Self::standard(&[
            ("industrial", 1.5),
            ("commercial", 0.9),
            ("residential", 0.01),
            (DEFAULT_CATEGORY, 0.01),
        ])
    }

    /// Solar suitability of building footprints by building type.
    pub fn structure() -> Self {
        Self::standard(&[
            ("commercial", 1.0),
            ("industrial", 0.9),
            ("residential", 0.3),
            ("office", 0.7),
            ("government", 0.5),
            ("school", 0.6),
            ("hospital", 0.8),
            ("train_station", 0.85),
            ("apartments", 0.4),
            (DEFAULT_CATEGORY, 0.2),
        ])
    }

    fn standard(entries: &[(&str, f64)]) -> Self {
        let weights: BTreeMap<String, f64> = entries
            .iter()
            .map(|(category, weight)| (category.to_string(), *weight))
            .collect();
        let default_weight = weights.get(DEFAULT_CATEGORY).copied().unwrap_or(0.0);

        Self {
            weights,
            default_weight,
        }
    }

    /// Load a table from `category,weight` CSV rows with a header line.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, ScoreTableError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ScoreTableError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        for row in csv_reader.deserialize::<WeightRow>() {
            let row = row?;
            entries.push((row.category, row.weight));
        }

        Self::new(entries)
    }

    pub fn lookup(&self, category: &str) -> f64 {
        self.weights
            .get(category)
            .copied()
            .unwrap_or(self.default_weight)
    }

    /// Weight for an optional label; missing labels use the default.
    pub fn lookup_optional(&self, category: Option<&str>) -> f64 {
        category.map_or(self.default_weight, |category| self.lookup(category))
    }

    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights
            .iter()
            .map(|(category, weight)| (category.as_str(), *weight))
    }
}

#[derive(Debug, Deserialize)]
struct WeightRow {
    category: String,
    weight: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum ScoreTableError {
    #[error("score table must define a `default` entry")]
    MissingDefault,
    #[error("weight {weight} for category `{category}` must be finite and non-negative")]
    InvalidWeight { category: String, weight: f64 },
    #[error("failed to read score table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid score table CSV: {0}")]
    Csv(#[from] csv::Error),
}
