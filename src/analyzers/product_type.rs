//! Product-type resolution with provider fallback.

use std::collections::HashMap;
use tracing::debug;

use crate::analyzers::types::RawDisclosureRecord;
use crate::analyzers::utility::group_by_instrument;
use crate::config::ProviderConfig;
use crate::error::ResolutionError;

/// Resolves one product type per distinct instrument, in first-seen order.
///
/// The primary provider's first amount wins unless it is exactly zero, in
/// which case the fallback provider's first amount is used. The fallback is
/// only looked at when needed.
///
/// # Errors
///
/// Returns [`ResolutionError`] when an instrument has no primary record, or
/// has a zero primary amount and no fallback record.
pub fn resolve_product_types(
    records: &[RawDisclosureRecord],
    providers: &ProviderConfig,
) -> Result<Vec<(String, f64)>, ResolutionError> {
    let groups = group_by_instrument(records);
    let mut resolved = Vec::with_capacity(groups.len());

    for (instrument, rows) in groups {
        let mut amounts: HashMap<&str, f64> = HashMap::new();
        for row in rows {
            amounts
                .entry(row.factor_provider_id.as_str())
                .or_insert(row.factor_amount_last_year);
        }

        let missing = |provider: &str| ResolutionError {
            instrument: instrument.to_string(),
            provider: provider.to_string(),
        };

        let primary = *amounts
            .get(providers.primary.as_str())
            .ok_or_else(|| missing(&providers.primary))?;

        let product_type = if primary == 0.0 {
            let fallback = *amounts
                .get(providers.fallback.as_str())
                .ok_or_else(|| missing(&providers.fallback))?;
            debug!(instrument, fallback, "Primary amount is zero, using fallback provider");
            fallback
        } else {
            primary
        };

        resolved.push((instrument.to_string(), product_type));
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, provider: &str, amount: f64) -> RawDisclosureRecord {
        RawDisclosureRecord::new(id, provider, amount, "Water", "no")
    }

    #[test]
    fn test_primary_non_zero_wins() {
        let records = vec![row("A", "20040", 8.0), row("A", "20050", 3.0)];
        let resolved = resolve_product_types(&records, &ProviderConfig::default()).unwrap();
        assert_eq!(resolved, vec![("A".to_string(), 8.0)]);
    }

    #[test]
    fn test_zero_primary_falls_back() {
        let records = vec![row("A", "20040", 0.0), row("A", "20050", 7.0)];
        let resolved = resolve_product_types(&records, &ProviderConfig::default()).unwrap();
        assert_eq!(resolved, vec![("A".to_string(), 7.0)]);
    }

    #[test]
    fn test_fallback_not_consulted_when_primary_non_zero() {
        let records = vec![row("A", "20040", 9.0)];
        let resolved = resolve_product_types(&records, &ProviderConfig::default()).unwrap();
        assert_eq!(resolved[0].1, 9.0);
    }

    #[test]
    fn test_first_matching_row_is_used() {
        let records = vec![
            row("A", "20040", 6.0),
            row("A", "20040", 0.0),
            row("A", "20050", 1.0),
        ];
        let resolved = resolve_product_types(&records, &ProviderConfig::default()).unwrap();
        assert_eq!(resolved[0].1, 6.0);
    }

    #[test]
    fn test_missing_primary_fails() {
        let records = vec![row("A", "20050", 7.0)];
        let err = resolve_product_types(&records, &ProviderConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ResolutionError {
                instrument: "A".to_string(),
                provider: "20040".to_string(),
            }
        );
    }

    #[test]
    fn test_zero_primary_without_fallback_fails() {
        let records = vec![row("A", "20040", 0.0), row("A", "99999", 4.0)];
        let err = resolve_product_types(&records, &ProviderConfig::default()).unwrap_err();
        assert_eq!(err.provider, "20050");
        assert_eq!(err.instrument, "A");
    }

    #[test]
    fn test_order_is_first_seen() {
        let records = vec![
            row("B", "20040", 8.0),
            row("A", "20040", 9.0),
            row("B", "20050", 1.0),
        ];
        let resolved = resolve_product_types(&records, &ProviderConfig::default()).unwrap();
        let ids: Vec<&str> = resolved.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_custom_providers() {
        let providers = ProviderConfig {
            primary: "1".to_string(),
            fallback: "2".to_string(),
        };
        let records = vec![row("A", "1", 0.0), row("A", "2", 5.0)];
        let resolved = resolve_product_types(&records, &providers).unwrap();
        assert_eq!(resolved[0].1, 5.0);
    }
}
