//! Error types for bftablelib

use thiserror::Error;

/// Errors that can occur while building or interacting with a comparison table
#[derive(Error, Debug)]
pub enum BfTableError {
    /// Denominator index does not refer to a loaded record
    #[error("denominator index {index} out of range for {len} records")]
    DenominatorOutOfRange { index: usize, len: usize },

    /// A table needs at least one comparison record
    #[error("no comparison records to build a table from")]
    EmptyComparisons,

    /// '#' search terms match term counts, which this model type does not carry
    #[error("'#' term filters are not supported for model type '{model_type}'")]
    TermFilterUnsupported { model_type: String },

    /// Sorting by term count requires a model type that carries term counts
    #[error("term-count sorting is not supported for model type '{model_type}'")]
    TermSortUnsupported { model_type: String },

    /// Failed to decode the embedded record array
    #[error("failed to decode comparison records: {0}")]
    RecordDecode(#[from] serde_json::Error),
}
