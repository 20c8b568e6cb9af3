use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analyzers::taxonomy::Taxonomy;

/// Administrative columns the source archive carries but scoring never reads.
const DROPPED_COLUMNS: &[&str] = &[
    "swissValorNumber",
    "ISIN_BC",
    "FISN",
    "fundManagerSIXCompanyKey",
    "fundManagerLEI",
    "fundManagerLongName",
    "companyDomicileISO",
    "issuerSIXCompanyKey",
    "LEI",
    "ESGFactorDate",
    "ESGDeliveryDate",
    "ESGFactor",
];

/// Header names of the five fields the pipeline reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceColumns {
    pub instrument_id: String,
    pub factor_provider_id: String,
    pub factor_amount_last_year: String,
    pub classification: String,
    pub class_symbol: String,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            instrument_id: "ISIN".to_string(),
            factor_provider_id: "ESGFactorProviderId".to_string(),
            factor_amount_last_year: "ESGFactorAmountLastYear".to_string(),
            classification: "ESGClassification".to_string(),
            class_symbol: "ESGClassSymbol".to_string(),
        }
    }
}

/// Provider ids used to resolve the product type.
///
/// `primary` is the SFDR article disclosure; a zero amount there falls back to
/// the `fallback` provider (products reported under MiFID).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub primary: String,
    pub fallback: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            primary: "20040".to_string(),
            fallback: "20050".to_string(),
        }
    }
}

/// Everything a cleaning run is parameterized by.
///
/// Stored as JSON on disk; omitted fields keep their defaults:
/// ```json
/// {
///   "dropped_columns": ["LEI", "FISN"],
///   "providers": { "primary": "20040", "fallback": "20050" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub dropped_columns: Vec<String>,
    pub columns: SourceColumns,
    pub providers: ProviderConfig,
    pub taxonomy: Taxonomy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dropped_columns: DROPPED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            columns: SourceColumns::default(),
            providers: ProviderConfig::default(),
            taxonomy: Taxonomy::default(),
        }
    }
}

impl PipelineConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{path}'"))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config in '{path}'"))?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise the built-in defaults.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
