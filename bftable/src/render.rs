//! Template context building and theming for CLI output

use bftablelib::{BfRow, BfTable, SortColumn, SortDirection, SortState};
use console::Style;
use outstanding::Theme;
use serde::Serialize;

/// Row data for template rendering (pre-formatted)
#[derive(Debug, Serialize)]
pub struct TemplateRow {
    /// Pre-padded model label (left-aligned)
    pub label: String,
    /// Pre-padded Bayes factor cell (right-aligned)
    pub bf: String,
    /// Pre-padded error cell (right-aligned)
    pub error: String,
    /// Sign class name (bfpos/bfneg/bfneut)
    pub sign: String,
    /// Whether the row passed the search filter
    pub shown: bool,
}

/// Data context for the comparison table template
#[derive(Debug, Serialize)]
pub struct BfTableContext {
    pub model_type: String,
    pub denominator: String,
    /// Pre-padded column headers
    pub label_header: String,
    pub bf_header: String,
    pub error_header: String,
    /// Separator line (dashes)
    pub separator: String,
    pub rows: Vec<TemplateRow>,
    /// Rows passing the filter
    pub shown: usize,
    pub total: usize,
}

const LABEL_WIDTH: usize = 40;
const CELL_WIDTH: usize = 18;

/// Truncate a label to fit within max_len, adding ".." suffix if needed
fn truncate_label(label: &str, max_len: usize) -> String {
    if label.chars().count() > max_len {
        let kept: String = label.chars().take(max_len - 2).collect();
        format!("{}..", kept)
    } else {
        label.to_string()
    }
}

/// Convert a derived row to a pre-padded template row
fn to_template_row(row: &BfRow) -> TemplateRow {
    let truncated = truncate_label(&row.label, LABEL_WIDTH - 2);
    TemplateRow {
        label: format!("{:<width$}", truncated, width = LABEL_WIDTH),
        bf: format!("{:>width$}", row.bf_display, width = CELL_WIDTH),
        error: format!(
            "{:>width$}",
            format!("\u{b1}{}", row.error_display),
            width = CELL_WIDTH
        ),
        sign: row.sign.css_class().to_string(),
        shown: row.visible,
    }
}

/// Header title for a column, with the sort indicator when active
fn header_title(base: &str, column: SortColumn, sort: &SortState) -> String {
    match sort.active {
        Some((active, direction)) if active == column => {
            let arrow = match direction {
                SortDirection::Ascending => "\u{2191}",
                SortDirection::Descending => "\u{2193}",
            };
            format!("{} {}", base, arrow)
        }
        _ => base.to_string(),
    }
}

/// Build the template context from a derived table
pub fn build_table_context(table: &BfTable, model_type: &str, sort: &SortState) -> BfTableContext {
    let rows: Vec<TemplateRow> = table.rows.iter().map(to_template_row).collect();
    let shown = table.rows.iter().filter(|r| r.visible).count();

    BfTableContext {
        model_type: model_type.to_string(),
        denominator: table.denominator_label.clone(),
        label_header: format!(
            "{:<width$}",
            header_title("Model", SortColumn::Label, sort),
            width = LABEL_WIDTH
        ),
        bf_header: format!(
            "{:>width$}",
            header_title("Bayes factor", SortColumn::Value, sort),
            width = CELL_WIDTH
        ),
        error_header: format!(
            "{:>width$}",
            header_title("Error", SortColumn::Error, sort),
            width = CELL_WIDTH
        ),
        separator: "-".repeat(LABEL_WIDTH + (CELL_WIDTH + 1) * 2),
        rows,
        shown,
        total: table.rows.len(),
    }
}

/// Create the theme with styles
pub fn create_theme() -> Theme {
    Theme::new()
        .add("denominator", Style::new().bold())
        .add("positive", Style::new().green())
        .add("negative", Style::new().red())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bftablelib::{Comparison, FormatOptions, ModelType, TermCountRules};

    fn sample_table() -> BfTable {
        let records = vec![
            Comparison::new("Intercept only", 0.0, 0.01, 0),
            Comparison::new("Slope", 2.0, 0.02, 1),
        ];
        BfTable::build(
            &records,
            0,
            &ModelType::linear_model(),
            &TermCountRules::default(),
            &FormatOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_context_counts_and_padding() {
        let ctx = build_table_context(&sample_table(), "BFlinearModel", &SortState::unsorted());
        assert_eq!(ctx.total, 1);
        assert_eq!(ctx.shown, 1);
        assert_eq!(ctx.denominator, "Intercept only");
        assert_eq!(ctx.rows[0].label.len(), LABEL_WIDTH);
        assert!(ctx.rows[0].bf.trim_start().starts_with("7.38"));
    }

    #[test]
    fn test_header_indicator_follows_sort_state() {
        let mut sort = SortState::unsorted();
        sort.toggle(SortColumn::Value);
        let ctx = build_table_context(&sample_table(), "BFlinearModel", &sort);
        assert!(ctx.bf_header.contains('\u{2191}'));
        assert!(!ctx.label_header.contains('\u{2191}'));

        sort.toggle(SortColumn::Value);
        let ctx = build_table_context(&sample_table(), "BFlinearModel", &sort);
        assert!(ctx.bf_header.contains('\u{2193}'));
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 10), "short");
        let long = "a".repeat(50);
        let truncated = truncate_label(&long, 10);
        assert_eq!(truncated.len(), 10);
        assert!(truncated.ends_with(".."));
    }
}
