//! Derived comparison tables.
//!
//! A `BfTable` expresses every loaded record relative to one chosen
//! denominator model: the denominator leaves the row set and becomes the
//! "currently dividing by" label, and each remaining record gets a
//! relative log Bayes factor, a root-sum-square combined error, and a
//! sign class. Building is pure and idempotent — the same records and
//! denominator always produce the same table.

use serde::{Deserialize, Serialize};

use crate::error::BfTableError;
use crate::format::{exp_string, percent_string, FormatOptions};
use crate::model::{ModelType, TermCountRules};
use crate::record::Comparison;
use crate::Result;

/// Sign class of a relative Bayes factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sign {
    /// Evidence favors the row model over the denominator
    Positive,
    /// Evidence favors the denominator; display flips the ratio
    Negative,
    /// Equal evidence
    Neutral,
}

impl Sign {
    fn of(relative_log_bf: f64) -> Self {
        if relative_log_bf > 0.0 {
            Sign::Positive
        } else if relative_log_bf < 0.0 {
            Sign::Negative
        } else {
            Sign::Neutral
        }
    }

    /// CSS class used by the report stylesheet.
    pub fn css_class(&self) -> &'static str {
        match self {
            Sign::Positive => "bfpos",
            Sign::Negative => "bfneg",
            Sign::Neutral => "bfneut",
        }
    }
}

/// One derived row: a record expressed relative to the denominator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BfRow {
    /// Model label
    pub label: String,
    /// Original record index (stable across denominator changes)
    pub index: usize,
    /// `bf - denominator.bf`, natural-log scale
    pub relative_log_bf: f64,
    /// `sqrt(error² + denominator.error²)`
    pub combined_error: f64,
    /// Sign class of `relative_log_bf`
    pub sign: Sign,
    /// Additive term count of the label, when the model type carries one
    pub nterms: Option<u32>,
    /// Formatted Bayes factor, `"1 / x"` for negative rows
    pub bf_display: String,
    /// Formatted combined error percentage
    pub error_display: String,
    /// Whether the row passes the current search filter
    pub visible: bool,
}

/// A comparison table derived against one denominator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BfTable {
    /// Label of the current denominator model
    pub denominator_label: String,
    /// Original index of the denominator record
    pub denominator_index: usize,
    /// Derived rows in record insertion order
    pub rows: Vec<BfRow>,
}

impl BfTable {
    /// Build a table from records against the record at `denominator`.
    ///
    /// The denominator record is removed from the row set; every other
    /// record becomes one row. Rows keep insertion order — sorting is a
    /// separate step.
    pub fn build(
        records: &[Comparison],
        denominator: usize,
        model_type: &ModelType,
        rules: &TermCountRules,
        fmt: &FormatOptions,
    ) -> Result<BfTable> {
        if records.is_empty() {
            return Err(BfTableError::EmptyComparisons);
        }
        let denom = records
            .iter()
            .find(|r| r.index == denominator)
            .ok_or(BfTableError::DenominatorOutOfRange {
                index: denominator,
                len: records.len(),
            })?;

        let rows = records
            .iter()
            .filter(|r| r.index != denominator)
            .map(|r| derive_row(r, denom, model_type, rules, fmt))
            .collect();

        Ok(BfTable {
            denominator_label: denom.row.clone(),
            denominator_index: denom.index,
            rows,
        })
    }
}

/// Derive one row relative to the denominator.
fn derive_row(
    record: &Comparison,
    denom: &Comparison,
    model_type: &ModelType,
    rules: &TermCountRules,
    fmt: &FormatOptions,
) -> BfRow {
    let relative_log_bf = record.bf - denom.bf;
    let combined_error = (record.error * record.error + denom.error * denom.error).sqrt();
    let sign = Sign::of(relative_log_bf);

    let bf_display = match sign {
        Sign::Negative => format!("1 / {}", exp_string(-relative_log_bf, fmt)),
        _ => exp_string(relative_log_bf, fmt),
    };

    BfRow {
        label: record.row.clone(),
        index: record.index,
        relative_log_bf,
        combined_error,
        sign,
        nterms: rules.term_count(&record.row, model_type),
        bf_display,
        error_display: percent_string(combined_error),
        visible: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Comparison;

    fn sample_records() -> Vec<Comparison> {
        vec![
            Comparison::new("A", 0.0, 0.01, 0),
            Comparison::new("B", 2.0, 0.02, 1),
        ]
    }

    fn build(records: &[Comparison], denominator: usize) -> BfTable {
        BfTable::build(
            records,
            denominator,
            &ModelType::linear_model(),
            &TermCountRules::default(),
            &FormatOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_relative_bf_and_combined_error() {
        let table = build(&sample_records(), 0);
        assert_eq!(table.denominator_label, "A");
        assert_eq!(table.rows.len(), 1);

        let row = &table.rows[0];
        assert_eq!(row.label, "B");
        assert_eq!(row.sign, Sign::Positive);
        assert_eq!(row.relative_log_bf, 2.0);
        let expected = (0.01f64 * 0.01 + 0.02 * 0.02).sqrt();
        assert_eq!(row.combined_error, expected);
    }

    #[test]
    fn test_negative_rows_flip_the_ratio() {
        let table = build(&sample_records(), 1);
        let row = &table.rows[0];
        assert_eq!(row.sign, Sign::Negative);
        assert_eq!(row.relative_log_bf, -2.0);
        assert!(row.bf_display.starts_with("1 / 7.38"), "{}", row.bf_display);
    }

    #[test]
    fn test_equal_bf_renders_neutral_one() {
        let records = vec![
            Comparison::new("A", 1.5, 0.0, 0),
            Comparison::new("B", 1.5, 0.0, 1),
        ];
        let table = build(&records, 0);
        let row = &table.rows[0];
        assert_eq!(row.sign, Sign::Neutral);
        assert_eq!(row.bf_display, "1");
        assert_eq!(row.error_display, "0%");
    }

    #[test]
    fn test_build_is_idempotent() {
        let records = vec![
            Comparison::new("Intercept only", 0.0, 0.0, 0),
            Comparison::new("Slope", 2.5, 0.01, 1),
            Comparison::new("Intercept + Slope", 4.1, 0.02, 2),
        ];
        let first = build(&records, 1);
        let second = build(&records, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_denominator_out_of_range() {
        let err = BfTable::build(
            &sample_records(),
            7,
            &ModelType::linear_model(),
            &TermCountRules::default(),
            &FormatOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BfTableError::DenominatorOutOfRange { index: 7, len: 2 }
        ));
    }

    #[test]
    fn test_empty_records() {
        let err = BfTable::build(
            &[],
            0,
            &ModelType::linear_model(),
            &TermCountRules::default(),
            &FormatOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, BfTableError::EmptyComparisons));
    }

    #[test]
    fn test_term_counts_follow_rules() {
        let records = vec![
            Comparison::new("Intercept only", 0.0, 0.0, 0),
            Comparison::new("Slope", 1.0, 0.0, 1),
            Comparison::new("Intercept + Slope", 2.0, 0.0, 2),
        ];
        let table = build(&records, 1);
        let by_label = |l: &str| table.rows.iter().find(|r| r.label == l).unwrap().nterms;
        assert_eq!(by_label("Intercept only"), Some(0));
        assert_eq!(by_label("Intercept + Slope"), Some(2));
    }

    #[test]
    fn test_unsupported_type_has_no_term_counts() {
        let table = BfTable::build(
            &sample_records(),
            0,
            &ModelType::new("BFproportion"),
            &TermCountRules::default(),
            &FormatOptions::default(),
        )
        .unwrap();
        assert_eq!(table.rows[0].nterms, None);
    }
}
