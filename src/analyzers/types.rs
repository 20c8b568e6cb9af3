//! Data types used by the cleaning pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single disclosure row: one (instrument, provider, classification) fact.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDisclosureRecord {
    pub instrument_id: String,
    pub factor_provider_id: String,
    pub factor_amount_last_year: f64,
    pub classification: String,
    pub class_symbol: String,
}

impl RawDisclosureRecord {
    pub fn new(
        instrument_id: impl Into<String>,
        factor_provider_id: impl Into<String>,
        factor_amount_last_year: f64,
        classification: impl Into<String>,
        class_symbol: impl Into<String>,
    ) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            factor_provider_id: factor_provider_id.into(),
            factor_amount_last_year,
            classification: classification.into(),
            class_symbol: class_symbol.into(),
        }
    }

    /// True when the flag contains "yes", ignoring case.
    pub fn is_affirmative(&self) -> bool {
        self.class_symbol.to_lowercase().contains("yes")
    }
}

/// Normalized bucket scores for one instrument.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CategoryScores {
    pub environment: f64,
    pub social: f64,
    pub governance: f64,
}

/// One row of the pure dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentProductRecord {
    #[serde(rename = "ISIN")]
    pub instrument_id: String,
    #[serde(rename = "ProductType")]
    pub product_type: f64,
    #[serde(rename = "Environment")]
    pub environment: f64,
    #[serde(rename = "Social")]
    pub social: f64,
    #[serde(rename = "Governance")]
    pub governance: f64,
}

/// JSON envelope for a cleaned dataset.
#[derive(Debug, Serialize)]
pub struct PureDataset {
    pub generated_at: DateTime<Utc>,
    pub taxonomy_version: u32,
    pub instrument_count: usize,
    pub instruments: Vec<InstrumentProductRecord>,
}

impl PureDataset {
    pub fn new(instruments: Vec<InstrumentProductRecord>, taxonomy_version: u32) -> Self {
        Self {
            generated_at: Utc::now(),
            taxonomy_version,
            instrument_count: instruments.len(),
            instruments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative_is_case_insensitive_substring() {
        let yes = |s: &str| RawDisclosureRecord::new("A", "1", 0.0, "Water", s).is_affirmative();
        assert!(yes("Yes"));
        assert!(yes("YES"));
        assert!(yes("yes, partially"));
        assert!(!yes("no"));
        assert!(!yes(""));
        assert!(!yes("Y"));
    }

    #[test]
    fn test_dataset_counts_instruments() {
        let rows = vec![InstrumentProductRecord {
            instrument_id: "A".to_string(),
            product_type: 8.0,
            environment: 0.0,
            social: 1.0,
            governance: 0.0,
        }];
        let dataset = PureDataset::new(rows, 1);
        assert_eq!(dataset.instrument_count, 1);
        assert_eq!(dataset.taxonomy_version, 1);
    }
}
