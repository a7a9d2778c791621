//! # bftablelib
//!
//! Bayes-factor comparison tables for statistical reports: interactive
//! denominator re-selection, text/hash search, single-column sorting,
//! exponent-safe numeric formatting, and HTML output.
//!
//! ## Overview
//!
//! A report embeds one JSON array of model comparisons per table, each
//! record holding a natural-log Bayes factor against a fixed baseline.
//! This library derives the displayed table: every row is expressed
//! relative to a chosen denominator model (`bf - denominator.bf`, errors
//! combined root-sum-square), classified by sign, formatted with
//! overflow-safe scientific notation, and filtered/sorted on demand.
//!
//! - **Pure data types**: records in, table out, no I/O side effects
//! - **Idempotent rebuilds**: the same state always renders the same table
//! - **Degrade, never panic**: bad numbers become `"NA"`, bad search
//!   input becomes a no-op with an invalid marker
//!
//! ## Example
//!
//! ```rust
//! use bftablelib::{decode_comparisons, ModelType, SortColumn, TableView};
//!
//! let records = decode_comparisons(
//!     r#"[
//!         {"row": "Intercept only", "bf": 0.0, "error": 0.0},
//!         {"row": "Slope", "bf": 2.1, "error": 0.01},
//!         {"row": "Intercept + Slope", "bf": 4.8, "error": 0.02}
//!     ]"#,
//! )
//! .unwrap();
//!
//! let mut view = TableView::new(records, ModelType::linear_model()).unwrap();
//! view.toggle_sort(SortColumn::Value).unwrap();
//! view.set_search("+Slope");
//!
//! let table = view.render().unwrap();
//! assert_eq!(table.denominator_label, "Intercept only");
//! assert!(table.rows.iter().all(|r| r.visible));
//!
//! // clicking a row promotes it to denominator
//! view.select_denominator(2).unwrap();
//! assert_eq!(view.render().unwrap().denominator_label, "Intercept + Slope");
//! ```

pub mod diagnostics;
pub mod error;
pub mod format;
pub mod html;
pub mod model;
pub mod record;
pub mod search;
pub mod selector;
pub mod sort;
pub mod table;
pub mod view;

pub use diagnostics::{histogram, kernel_density, silverman_bandwidth, Histogram, Kernel};
pub use error::BfTableError;
pub use format::{exp_string, percent_string, pretty, FormatOptions};
pub use html::{render_document, render_fragment};
pub use model::{ModelType, TermCountRules, LINEAR_MODEL};
pub use record::{decode_comparisons, Comparison};
pub use search::SearchQuery;
pub use selector::FilteredSelect;
pub use sort::{sort_rows, SortColumn, SortDirection, SortState};
pub use table::{BfRow, BfTable, Sign};
pub use view::TableView;

/// Result type for bftablelib operations
pub type Result<T> = std::result::Result<T, BfTableError>;
