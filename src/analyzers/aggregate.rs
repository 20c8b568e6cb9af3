use std::collections::HashMap;

use crate::analyzers::taxonomy::{Bucket, FoldStrategy, Taxonomy};
use crate::analyzers::types::{CategoryScores, RawDisclosureRecord};
use crate::analyzers::utility::{group_by_instrument, nan_to_zero, share};

/// Affirmative and total row counts for one (instrument, classification).
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    affirmative: usize,
    total: usize,
}

/// Running value of one bucket while labels are folded in.
#[derive(Debug, Clone, Copy)]
struct Accumulator {
    fold: FoldStrategy,
    value: f64,
}

impl Accumulator {
    fn new(fold: FoldStrategy) -> Self {
        Self { fold, value: 0.0 }
    }

    fn fold(&mut self, percentage: f64) {
        match self.fold {
            FoldStrategy::Sum => {
                if !percentage.is_nan() {
                    self.value += percentage;
                }
            }
            FoldStrategy::LastWrite => self.value = percentage,
        }
    }
}

/// Computes Environment/Social/Governance scores per instrument.
///
/// Rows are tallied once per (instrument, classification). Each taxonomy label
/// yields the share of affirmative rows, NaN when the instrument has no rows
/// under it. Shares are folded into every bucket the label belongs to, divided
/// by the bucket size, and any remaining NaN becomes 0.
pub fn aggregate_scores(
    records: &[RawDisclosureRecord],
    taxonomy: &Taxonomy,
) -> Vec<(String, CategoryScores)> {
    // Bucket lookups do not depend on the instrument.
    let label_buckets: Vec<(&str, Vec<Bucket>)> = taxonomy
        .all_classifications()
        .iter()
        .map(|label| (label.as_str(), taxonomy.bucket_of(label)))
        .collect();

    group_by_instrument(records)
        .into_iter()
        .map(|(instrument, rows)| {
            let mut tallies: HashMap<&str, Tally> = HashMap::new();
            for row in rows {
                let tally = tallies.entry(row.classification.as_str()).or_default();
                tally.total += 1;
                if row.is_affirmative() {
                    tally.affirmative += 1;
                }
            }

            let scores = score_instrument(&tallies, &label_buckets, taxonomy);
            (instrument.to_string(), scores)
        })
        .collect()
}

fn score_instrument(
    tallies: &HashMap<&str, Tally>,
    label_buckets: &[(&str, Vec<Bucket>)],
    taxonomy: &Taxonomy,
) -> CategoryScores {
    let mut environment = Accumulator::new(taxonomy.fold_of(Bucket::Environment));
    let mut social = Accumulator::new(taxonomy.fold_of(Bucket::Social));
    let mut governance = Accumulator::new(taxonomy.fold_of(Bucket::Governance));

    for (label, buckets) in label_buckets {
        let tally = tallies.get(label).copied().unwrap_or_default();
        let percentage = share(tally.affirmative, tally.total);

        for bucket in buckets {
            match bucket {
                Bucket::Environment => environment.fold(percentage),
                Bucket::Social => social.fold(percentage),
                Bucket::Governance => governance.fold(percentage),
            }
        }
    }

    let normalize = |acc: Accumulator, bucket: Bucket| {
        // A zero-sized bucket divides to NaN (or inf), never a score.
        let averaged = acc.value / taxonomy.bucket_size(bucket) as f64;
        nan_to_zero(if averaged.is_finite() { averaged } else { f64::NAN })
    };

    CategoryScores {
        environment: normalize(environment, Bucket::Environment),
        social: normalize(social, Bucket::Social),
        governance: normalize(governance, Bucket::Governance),
    }
}
