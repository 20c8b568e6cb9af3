//! Output formatting and persistence for cleaned ESG datasets.
//!
//! Supports CSV and JSON files plus a logged run summary.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use tracing::{debug, info};

use crate::analyzers::types::{InstrumentProductRecord, PureDataset};
use crate::analyzers::utility::mean;

/// Serializes records as CSV with a header row.
pub fn to_csv_bytes(records: &[InstrumentProductRecord]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to finish CSV buffer: {}", e.error()))
}

/// Writes records to a CSV file, replacing any existing file.
pub fn write_csv(path: &str, records: &[InstrumentProductRecord]) -> Result<()> {
    let bytes = to_csv_bytes(records)?;
    std::fs::write(path, bytes).with_context(|| format!("failed to write '{path}'"))?;
    debug!(path, rows = records.len(), "Wrote CSV");
    Ok(())
}

/// Writes a dataset as pretty-printed JSON.
pub fn write_json(path: &str, dataset: &PureDataset) -> Result<()> {
    let json = serde_json::to_string_pretty(dataset)?;
    std::fs::write(path, json).with_context(|| format!("failed to write '{path}'"))?;
    debug!(path, instruments = dataset.instrument_count, "Wrote JSON");
    Ok(())
}

/// Mean bucket scores over a cleaned dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub instruments: usize,
    pub mean_environment: f64,
    pub mean_social: f64,
    pub mean_governance: f64,
}

/// Computes and logs the run summary.
pub fn summarize(records: &[InstrumentProductRecord]) -> Summary {
    let column = |f: fn(&InstrumentProductRecord) -> f64| records.iter().map(f).collect::<Vec<_>>();

    let summary = Summary {
        instruments: records.len(),
        mean_environment: mean(&column(|r| r.environment)),
        mean_social: mean(&column(|r| r.social)),
        mean_governance: mean(&column(|r| r.governance)),
    };

    info!(
        instruments = summary.instruments,
        environment = summary.mean_environment,
        social = summary.mean_social,
        governance = summary.mean_governance,
        "Dataset summary"
    );

    summary
}
