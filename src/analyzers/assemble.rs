use std::collections::{HashMap, HashSet};

use crate::analyzers::types::{CategoryScores, InstrumentProductRecord};
use crate::error::JoinError;

/// Joins resolved product types and category scores on instrument id.
///
/// Output follows `order`. Every id in `order` must be present in both
/// mappings and neither mapping may hold an id outside `order`.
pub fn assemble(
    order: &[String],
    product_types: &[(String, f64)],
    scores: &[(String, CategoryScores)],
) -> Result<Vec<InstrumentProductRecord>, JoinError> {
    let types: HashMap<&str, f64> = product_types
        .iter()
        .map(|(id, v)| (id.as_str(), *v))
        .collect();
    let buckets: HashMap<&str, CategoryScores> =
        scores.iter().map(|(id, s)| (id.as_str(), *s)).collect();

    let mut out = Vec::with_capacity(order.len());
    for instrument in order {
        let missing = |missing_from: &'static str| JoinError {
            instrument: instrument.clone(),
            missing_from,
        };
        let product_type = *types
            .get(instrument.as_str())
            .ok_or_else(|| missing("product type"))?;
        let s = *buckets
            .get(instrument.as_str())
            .ok_or_else(|| missing("scores"))?;

        out.push(InstrumentProductRecord {
            instrument_id: instrument.clone(),
            product_type,
            environment: s.environment,
            social: s.social,
            governance: s.governance,
        });
    }

    let known: HashSet<&str> = order.iter().map(String::as_str).collect();
    let stray = product_types
        .iter()
        .map(|(id, _)| id)
        .chain(scores.iter().map(|(id, _)| id))
        .find(|id| !known.contains(id.as_str()));
    if let Some(id) = stray {
        return Err(JoinError {
            instrument: id.clone(),
            missing_from: "instrument list",
        });
    }

    Ok(out)
}
