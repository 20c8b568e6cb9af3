use std::collections::HashMap;

use crate::analyzers::types::RawDisclosureRecord;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Maps NaN to 0.0 and leaves every other value untouched.
pub fn nan_to_zero(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value }
}

/// `part / total` as a share, NaN when `total` is zero.
pub fn share(part: usize, total: usize) -> f64 {
    if total == 0 {
        f64::NAN
    } else {
        part as f64 / total as f64
    }
}

/// Groups records by instrument id in one pass, preserving first-seen order.
pub fn group_by_instrument(
    records: &[RawDisclosureRecord],
) -> Vec<(&str, Vec<&RawDisclosureRecord>)> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&RawDisclosureRecord>)> = Vec::new();

    for record in records {
        let id = record.instrument_id.as_str();
        let slot = *position.entry(id).or_insert_with(|| {
            groups.push((id, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(record);
    }

    groups
}

/// Distinct instrument ids in first-seen order.
pub fn distinct_instruments(records: &[RawDisclosureRecord]) -> Vec<String> {
    group_by_instrument(records)
        .into_iter()
        .map(|(id, _)| id.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str) -> RawDisclosureRecord {
        RawDisclosureRecord::new(id, "20040", 1.0, "Water", "Yes")
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 0.0, 0.5]), 0.5);
    }

    #[test]
    fn test_nan_to_zero() {
        assert_eq!(nan_to_zero(f64::NAN), 0.0);
        assert_eq!(nan_to_zero(0.25), 0.25);
    }

    #[test]
    fn test_share() {
        assert!(share(0, 0).is_nan());
        assert_eq!(share(1, 2), 0.5);
        assert_eq!(share(0, 3), 0.0);
    }

    #[test]
    fn test_group_preserves_first_seen_order() {
        let records = vec![row("B"), row("A"), row("B"), row("C"), row("A")];
        let groups = group_by_instrument(&records);

        let ids: Vec<&str> = groups.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].1.len(), 2);
        assert_eq!(groups[2].1.len(), 1);
    }

    #[test]
    fn test_distinct_instruments() {
        let records = vec![row("X"), row("X"), row("Y")];
        assert_eq!(distinct_instruments(&records), vec!["X", "Y"]);
    }
}
