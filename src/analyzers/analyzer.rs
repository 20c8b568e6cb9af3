use tracing::{debug, info};

use crate::analyzers::aggregate::aggregate_scores;
use crate::analyzers::assemble::assemble;
use crate::analyzers::product_type::resolve_product_types;
use crate::analyzers::pruner::prune_columns;
use crate::analyzers::types::{InstrumentProductRecord, RawDisclosureRecord};
use crate::analyzers::utility::distinct_instruments;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::parser::DisclosureTable;

/// Prunes, types and cleans a raw disclosure table into one row per instrument.
#[tracing::instrument(skip_all, fields(rows = table.rows.len(), columns = table.headers.len()))]
pub fn clean_table(
    table: &DisclosureTable,
    config: &PipelineConfig,
) -> Result<Vec<InstrumentProductRecord>, PipelineError> {
    let pruned = prune_columns(table, &config.dropped_columns);
    debug!(
        dropped = table.headers.len() - pruned.headers.len(),
        remaining = pruned.headers.len(),
        "Columns pruned"
    );

    let records = pruned.records(&config.columns)?;
    let out = clean_records(&records, config)?;

    info!(instruments = out.len(), "Disclosure table cleaned");
    Ok(out)
}

/// Runs resolution, aggregation and the join over already-typed records.
pub fn clean_records(
    records: &[RawDisclosureRecord],
    config: &PipelineConfig,
) -> Result<Vec<InstrumentProductRecord>, PipelineError> {
    let order = distinct_instruments(records);
    debug!(records = records.len(), instruments = order.len(), "Grouped records");

    let product_types = resolve_product_types(records, &config.providers)?;
    let scores = aggregate_scores(records, &config.taxonomy);

    Ok(assemble(&order, &product_types, &scores)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_table;

    fn row(id: &str, provider: &str, amount: f64, class: &str, symbol: &str) -> RawDisclosureRecord {
        RawDisclosureRecord::new(id, provider, amount, class, symbol)
    }

    #[test]
    fn test_fallback_and_water_scenario() {
        let records = vec![
            row("A", "20040", 0.0, "Fossil fuels", "n/a"),
            row("A", "20050", 7.0, "Fossil fuels", "n/a"),
            row("A", "1", 0.0, "Water", "Yes"),
            row("A", "1", 0.0, "Water", "no"),
        ];
        let out = clean_records(&records, &PipelineConfig::default()).unwrap();

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].product_type, 7.0);
        assert_eq!(out[0].environment, 0.5 / 8.0);
        for v in [out[0].environment, out[0].social, out[0].governance] {
            assert!(!v.is_nan());
        }
    }

    #[test]
    fn test_one_record_per_instrument() {
        let records = vec![
            row("A", "20040", 8.0, "Water", "Yes"),
            row("B", "20040", 9.0, "Water", "no"),
            row("A", "20050", 1.0, "Social", "Yes"),
            row("C", "20040", 6.0, "Waste", "Yes"),
            row("B", "20050", 0.0, "Waste", "no"),
        ];
        let out = clean_records(&records, &PipelineConfig::default()).unwrap();
        let ids: Vec<&str> = out.iter().map(|r| r.instrument_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_resolution_error_aborts_batch() {
        let records = vec![
            row("A", "20040", 8.0, "Water", "Yes"),
            row("B", "20050", 9.0, "Water", "Yes"),
        ];
        let err = clean_records(&records, &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Resolution(e) if e.instrument == "B"));
    }

    #[test]
    fn test_is_deterministic() {
        let records = vec![
            row("A", "20040", 8.0, "Water", "Yes"),
            row("A", "20040", 8.0, "Social", "no"),
            row("B", "20040", 0.0, "Biodiversity", "yes"),
            row("B", "20050", 3.0, "Waste", "YES"),
        ];
        let config = PipelineConfig::default();
        let first = clean_records(&records, &config).unwrap();
        let second = clean_records(&records, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_clean_table_prunes_and_types() {
        let csv = "ISIN,LEI,ESGFactor,ESGFactorProviderId,ESGFactorAmountLastYear,ESGClassification,ESGClassSymbol\n\
A,x,f,20040,9,Social and employee matters,Yes\n\
A,x,f,20040,9,Social and employee matters,No\n";
        let table = parse_table(csv.as_bytes(), b',').unwrap();
        let out = clean_table(&table, &PipelineConfig::default()).unwrap();

        assert_eq!(out[0].product_type, 9.0);
        assert_eq!(out[0].social, 0.5);
        assert_eq!(out[0].governance, 0.0);
    }

    #[test]
    fn test_pruning_a_required_column_is_an_error() {
        let csv = "ISIN,ESGFactorProviderId,ESGFactorAmountLastYear,ESGClassification,ESGClassSymbol\nA,20040,1,Water,Yes\n";
        let table = parse_table(csv.as_bytes(), b',').unwrap();
        let mut config = PipelineConfig::default();
        config.dropped_columns.push("ESGClassSymbol".to_string());

        let err = clean_table(&table, &config).unwrap_err();
        assert!(matches!(err, PipelineError::Ingest(_)));
    }
}
