//! Per-table widget state.
//!
//! A `TableView` is the single-threaded analogue of one rendered table
//! instance: it owns the immutable record set and the three pieces of
//! interaction state (denominator, sort, search). Every `render` call
//! rebuilds the derived rows from scratch, so repeated renders with the
//! same state are byte-identical and rapid re-triggering is safe.

use crate::format::FormatOptions;
use crate::model::{ModelType, TermCountRules};
use crate::record::Comparison;
use crate::search::SearchQuery;
use crate::sort::{sort_rows, SortColumn, SortState};
use crate::table::BfTable;
use crate::{BfTableError, Result};

/// Interaction state for one comparison table.
#[derive(Debug, Clone)]
pub struct TableView {
    records: Vec<Comparison>,
    model_type: ModelType,
    rules: TermCountRules,
    format: FormatOptions,
    denominator: usize,
    sort: SortState,
    query: SearchQuery,
    search_valid: bool,
}

impl TableView {
    /// Create a view over a decoded record set. The first record starts
    /// as the denominator.
    pub fn new(records: Vec<Comparison>, model_type: ModelType) -> Result<Self> {
        if records.is_empty() {
            return Err(BfTableError::EmptyComparisons);
        }
        Ok(Self {
            records,
            model_type,
            rules: TermCountRules::default(),
            format: FormatOptions::default(),
            denominator: 0,
            sort: SortState::unsorted(),
            query: SearchQuery::default(),
            search_valid: true,
        })
    }

    /// Builder: replace the term-counting rules.
    pub fn rules(mut self, rules: TermCountRules) -> Self {
        self.rules = rules;
        self
    }

    /// Builder: replace the format options.
    pub fn format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    /// Current denominator record index.
    pub fn denominator(&self) -> usize {
        self.denominator
    }

    pub fn model_type(&self) -> &ModelType {
        &self.model_type
    }

    /// Whether the model type carries term counts.
    pub fn terms_supported(&self) -> bool {
        self.rules.supports(&self.model_type)
    }

    /// Row click: promote a record to be the new denominator. The next
    /// render re-derives every row against it.
    pub fn select_denominator(&mut self, index: usize) -> Result<()> {
        if !self.records.iter().any(|r| r.index == index) {
            return Err(BfTableError::DenominatorOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        self.denominator = index;
        Ok(())
    }

    /// Header click: toggle sorting on a column.
    ///
    /// The term-count column is refused for model types without term
    /// counts; other columns always succeed.
    pub fn toggle_sort(&mut self, column: SortColumn) -> Result<()> {
        if column == SortColumn::Terms && !self.terms_supported() {
            return Err(BfTableError::TermSortUnsupported {
                model_type: self.model_type.as_str().to_string(),
            });
        }
        self.sort.toggle(column);
        Ok(())
    }

    /// Current sort state.
    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Search-box input: replace the row filter.
    ///
    /// Invalid input (a `#` filter on a model type without term counts)
    /// keeps the previous query and visibility untouched and marks the
    /// view invalid; the caller shows the marker instead of an error.
    /// Returns whether the input was accepted.
    pub fn set_search(&mut self, input: &str) -> bool {
        match SearchQuery::parse(input, &self.model_type, self.terms_supported()) {
            Ok(query) => {
                self.query = query;
                self.search_valid = true;
            }
            Err(_) => {
                self.search_valid = false;
            }
        }
        self.search_valid
    }

    /// Whether the last search input parsed cleanly.
    pub fn search_valid(&self) -> bool {
        self.search_valid
    }

    /// Rebuild the table: derive rows against the denominator, apply
    /// the active sort, then mark visibility from the search query.
    pub fn render(&self) -> Result<BfTable> {
        let mut table = BfTable::build(
            &self.records,
            self.denominator,
            &self.model_type,
            &self.rules,
            &self.format,
        )?;
        if let Some((column, direction)) = self.sort.active {
            sort_rows(&mut table.rows, column, direction);
        }
        self.query.apply(&mut table.rows);
        Ok(table)
    }
}
