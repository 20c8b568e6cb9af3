//! ESG disclosure cleaning and scoring.
//!
//! This module prunes administrative columns, resolves a product type per
//! instrument with provider fallback, folds per-classification affirmative
//! shares into Environment/Social/Governance buckets, and joins the results
//! into one record per instrument.

pub mod aggregate;
pub mod analyzer;
pub mod assemble;
pub mod product_type;
pub mod pruner;
pub mod taxonomy;
pub mod types;
pub mod utility;
