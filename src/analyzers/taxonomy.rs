//! Classification labels and their ESG bucket memberships.

use serde::{Deserialize, Serialize};

/// One of the three aggregate ESG categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Environment,
    Social,
    Governance,
}

/// How label percentages combine inside a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldStrategy {
    /// Defined percentages are added to a running sum.
    Sum,
    /// Each percentage, defined or not, replaces the running value.
    LastWrite,
}

/// Membership list and fold rule for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketConfig {
    pub bucket: Bucket,
    pub fold: FoldStrategy,
    /// Labels in this bucket. Duplicates are allowed and count toward the
    /// averaging denominator.
    pub members: Vec<String>,
}

/// Versioned set of scored classification labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub version: u32,
    pub classifications: Vec<String>,
    pub buckets: Vec<BucketConfig>,
}

fn owned(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            version: 1,
            classifications: owned(&[
                "Greenhouse gas emissions",
                "Biodiversity",
                "Water",
                "Waste",
                "Social and employee matters",
                "Environmental",
                "Social",
                "Fossil fuels",
                "Energy efficiency",
                "Emissions",
                "Human rights",
                "Anti-corruption and anti-bribery",
            ]),
            buckets: vec![
                BucketConfig {
                    bucket: Bucket::Environment,
                    fold: FoldStrategy::Sum,
                    members: owned(&[
                        "Greenhouse gas emissions",
                        "Biodiversity",
                        "Water",
                        "Waste",
                        "Environmental",
                        "Fossil fuels",
                        "Energy efficiency",
                        "Energy efficiency",
                    ]),
                },
                BucketConfig {
                    bucket: Bucket::Social,
                    fold: FoldStrategy::LastWrite,
                    members: owned(&["Social and employee matters"]),
                },
                BucketConfig {
                    bucket: Bucket::Governance,
                    fold: FoldStrategy::LastWrite,
                    members: owned(&["Social"]),
                },
            ],
        }
    }
}

impl Taxonomy {
    /// Scored labels, in evaluation order.
    pub fn all_classifications(&self) -> &[String] {
        &self.classifications
    }

    /// Buckets whose membership list contains `label`, each reported once.
    pub fn bucket_of(&self, label: &str) -> Vec<Bucket> {
        let mut found = Vec::new();
        for config in &self.buckets {
            if config.members.iter().any(|m| m == label) && !found.contains(&config.bucket) {
                found.push(config.bucket);
            }
        }
        found
    }

    /// Averaging denominator: the length of the bucket's membership list.
    pub fn bucket_size(&self, bucket: Bucket) -> usize {
        self.config(bucket).map_or(0, |c| c.members.len())
    }

    /// Fold rule for `bucket`; unconfigured buckets sum.
    pub fn fold_of(&self, bucket: Bucket) -> FoldStrategy {
        self.config(bucket).map_or(FoldStrategy::Sum, |c| c.fold)
    }

    fn config(&self, bucket: Bucket) -> Option<&BucketConfig> {
        self.buckets.iter().find(|c| c.bucket == bucket)
    }
}
