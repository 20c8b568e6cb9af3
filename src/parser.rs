//! CSV parser for raw ESG disclosure exports.

use csv::StringRecord;
use std::collections::HashMap;

use crate::analyzers::types::RawDisclosureRecord;
use crate::archive::csv_payload;
use crate::config::SourceColumns;
use crate::error::IngestError;

/// Header-addressed raw table, before any typing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisclosureTable {
    pub headers: Vec<String>,
    pub rows: Vec<StringRecord>,
}

impl DisclosureTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Extracts typed records using the configured column names.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::MissingColumn`] if any of the five required
    /// columns is absent from the header.
    pub fn records(&self, columns: &SourceColumns) -> Result<Vec<RawDisclosureRecord>, IngestError> {
        let index: HashMap<&str, usize> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), i))
            .collect();

        let require = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| IngestError::MissingColumn(name.to_string()))
        };

        let isin = require(columns.instrument_id.as_str())?;
        let provider = require(columns.factor_provider_id.as_str())?;
        let amount = require(columns.factor_amount_last_year.as_str())?;
        let classification = require(columns.classification.as_str())?;
        let symbol = require(columns.class_symbol.as_str())?;

        let cell = |row: &StringRecord, i: usize| row.get(i).unwrap_or("").trim().to_string();

        Ok(self
            .rows
            .iter()
            .map(|row| RawDisclosureRecord {
                instrument_id: cell(row, isin),
                factor_provider_id: cell(row, provider),
                factor_amount_last_year: parse_amount(row.get(amount).unwrap_or("")),
                classification: cell(row, classification),
                class_symbol: cell(row, symbol),
            })
            .collect())
    }
}

/// Parses an amount cell; empty or non-numeric cells read as NaN.
fn parse_amount(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Parses CSV bytes into a [`DisclosureTable`].
///
/// Headers are trimmed and a leading UTF-8 BOM is stripped. Rows may be
/// shorter or longer than the header.
pub fn parse_table(bytes: &[u8], delimiter: u8) -> Result<DisclosureTable, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        rows.push(result?);
    }

    Ok(DisclosureTable { headers, rows })
}

/// Parses a raw source, unpacking it first if it is a ZIP archive.
pub fn parse_source(bytes: Vec<u8>, delimiter: u8) -> Result<DisclosureTable, IngestError> {
    let csv = csv_payload(bytes)?;
    parse_table(&csv, delimiter)
}
