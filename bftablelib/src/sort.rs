//! Column sorting for comparison tables.
//!
//! One column is sorted at a time. Clicking the active column toggles
//! its direction; clicking a different column clears the previous
//! indicator and starts ascending. Sorting is a stable
//! decorate-sort-undecorate over an explicit key per column, so rows
//! with equal keys keep their insertion order.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::table::BfRow;

/// Sortable column of a comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortColumn {
    /// Model label, lexicographic
    Label,
    /// Signed relative log Bayes factor
    Value,
    /// Combined error
    Error,
    /// Term count; rows without one sort last
    Terms,
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "label" | "model" => Ok(SortColumn::Label),
            "value" | "bf" => Ok(SortColumn::Value),
            "error" => Ok(SortColumn::Error),
            "terms" | "nterms" => Ok(SortColumn::Terms),
            _ => Err(format!("Unknown sort column: {}", s)),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Which column is sorted, if any. At most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    /// Active column and its direction
    pub active: Option<(SortColumn, SortDirection)>,
}

impl SortState {
    /// No column sorted.
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Header click: toggle direction on the active column, or switch
    /// to a new column ascending (clearing the previous one).
    pub fn toggle(&mut self, column: SortColumn) {
        self.active = match self.active {
            Some((active, SortDirection::Ascending)) if active == column => {
                Some((column, SortDirection::Descending))
            }
            Some((active, SortDirection::Descending)) if active == column => {
                Some((column, SortDirection::Ascending))
            }
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    /// Clear the sort indicator.
    pub fn clear(&mut self) {
        self.active = None;
    }
}

/// Stable sort of derived rows by the given column.
///
/// Decorate with the key and original position, sort ascending, then
/// reverse for descending (matching how a header click flips an
/// already-sorted column).
pub fn sort_rows(rows: &mut Vec<BfRow>, column: SortColumn, direction: SortDirection) {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| compare_rows(&rows[a], &rows[b], column));
    if direction == SortDirection::Descending {
        order.reverse();
    }
    let sorted: Vec<BfRow> = order.into_iter().map(|i| rows[i].clone()).collect();
    *rows = sorted;
}

fn compare_rows(a: &BfRow, b: &BfRow, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Label => a.label.cmp(&b.label),
        SortColumn::Value => a.relative_log_bf.total_cmp(&b.relative_log_bf),
        SortColumn::Error => a.combined_error.total_cmp(&b.combined_error),
        SortColumn::Terms => match (a.nterms, b.nterms) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatOptions;
    use crate::model::{ModelType, TermCountRules};
    use crate::record::Comparison;
    use crate::table::BfTable;

    fn sample_rows() -> Vec<BfRow> {
        let records = vec![
            Comparison::new("Intercept only", 0.0, 0.0, 0),
            Comparison::new("Slope", 2.5, 0.03, 1),
            Comparison::new("Intercept + Slope", 4.1, 0.01, 2),
            Comparison::new("Accel", -1.0, 0.02, 3),
        ];
        BfTable::build(
            &records,
            0,
            &ModelType::linear_model(),
            &TermCountRules::default(),
            &FormatOptions::default(),
        )
        .unwrap()
        .rows
    }

    fn labels(rows: &[BfRow]) -> Vec<&str> {
        rows.iter().map(|r| r.label.as_str()).collect()
    }

    #[test]
    fn test_sort_by_label() {
        let mut rows = sample_rows();
        sort_rows(&mut rows, SortColumn::Label, SortDirection::Ascending);
        assert_eq!(labels(&rows), ["Accel", "Intercept + Slope", "Slope"]);
    }

    #[test]
    fn test_sort_by_value_descending() {
        let mut rows = sample_rows();
        sort_rows(&mut rows, SortColumn::Value, SortDirection::Descending);
        assert_eq!(labels(&rows), ["Intercept + Slope", "Slope", "Accel"]);
    }

    #[test]
    fn test_sort_by_error() {
        let mut rows = sample_rows();
        sort_rows(&mut rows, SortColumn::Error, SortDirection::Ascending);
        assert_eq!(labels(&rows), ["Intercept + Slope", "Accel", "Slope"]);
    }

    #[test]
    fn test_sort_is_stable_on_equal_keys() {
        let records = vec![
            Comparison::new("base", 0.0, 0.0, 0),
            Comparison::new("x", 1.0, 0.0, 1),
            Comparison::new("y", 1.0, 0.0, 2),
            Comparison::new("z", 1.0, 0.0, 3),
        ];
        let mut rows = BfTable::build(
            &records,
            0,
            &ModelType::linear_model(),
            &TermCountRules::default(),
            &FormatOptions::default(),
        )
        .unwrap()
        .rows;
        sort_rows(&mut rows, SortColumn::Value, SortDirection::Ascending);
        assert_eq!(labels(&rows), ["x", "y", "z"]);
    }

    #[test]
    fn test_missing_term_counts_sort_last() {
        let mut rows = sample_rows();
        rows[1].nterms = None;
        let moved = rows[1].label.clone();
        sort_rows(&mut rows, SortColumn::Terms, SortDirection::Ascending);
        assert_eq!(rows.last().unwrap().label, moved);
    }

    #[test]
    fn test_toggle_same_column_flips_direction() {
        let mut state = SortState::unsorted();
        state.toggle(SortColumn::Value);
        assert_eq!(
            state.active,
            Some((SortColumn::Value, SortDirection::Ascending))
        );
        state.toggle(SortColumn::Value);
        assert_eq!(
            state.active,
            Some((SortColumn::Value, SortDirection::Descending))
        );
        state.toggle(SortColumn::Value);
        assert_eq!(
            state.active,
            Some((SortColumn::Value, SortDirection::Ascending))
        );
    }

    #[test]
    fn test_toggle_new_column_clears_previous() {
        let mut state = SortState::unsorted();
        state.toggle(SortColumn::Value);
        state.toggle(SortColumn::Value);
        state.toggle(SortColumn::Error);
        assert_eq!(
            state.active,
            Some((SortColumn::Error, SortDirection::Ascending))
        );
    }

    #[test]
    fn test_sort_column_from_str() {
        assert_eq!(SortColumn::from_str("label").unwrap(), SortColumn::Label);
        assert_eq!(SortColumn::from_str("Model").unwrap(), SortColumn::Label);
        assert_eq!(SortColumn::from_str("bf").unwrap(), SortColumn::Value);
        assert_eq!(SortColumn::from_str("error").unwrap(), SortColumn::Error);
        assert_eq!(SortColumn::from_str("terms").unwrap(), SortColumn::Terms);
        assert!(SortColumn::from_str("bogus").is_err());
    }
}
