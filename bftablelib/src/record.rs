//! Comparison records: the raw data one table is built from.
//!
//! Each rendered table is backed by a JSON array of records, one per
//! candidate model, with Bayes factors stored on the natural-log scale
//! against a fixed baseline. Records are decoded once and never mutated;
//! everything displayed is derived from them on each rebuild.

use serde::{Deserialize, Serialize};

use crate::Result;

/// One model comparison against the fixed baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Model label (e.g. a formula like `"Intercept + Slope"`)
    pub row: String,
    /// Natural-log Bayes factor versus the baseline
    pub bf: f64,
    /// Proportional numerical error estimate, 0..1
    pub error: f64,
    /// Stable positional identity, assigned at decode time
    #[serde(default)]
    pub index: usize,
}

impl Comparison {
    /// Create a record directly (tests and embedding callers).
    pub fn new(row: impl Into<String>, bf: f64, error: f64, index: usize) -> Self {
        Self {
            row: row.into(),
            bf,
            error,
            index,
        }
    }
}

/// Decode a JSON array of comparison records.
///
/// The `index` field is positional and assigned here, overwriting
/// whatever the input carried, so identities stay stable regardless of
/// how the blob was produced.
pub fn decode_comparisons(json: &str) -> Result<Vec<Comparison>> {
    let mut records: Vec<Comparison> = serde_json::from_str(json)?;
    for (i, record) in records.iter_mut().enumerate() {
        record.index = i;
    }
    Ok(records)
}
