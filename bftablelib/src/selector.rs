//! Filterable option lists.
//!
//! The model behind a parameter-selection box: a fixed option list, a
//! text pattern narrowing it, and one selected option. Filtering keeps
//! the previous selection when it survives the filter, otherwise the
//! first visible option is selected. The pattern is a case-insensitive
//! regular expression; a pattern that fails to compile degrades to
//! literal substring matching rather than erroring.

use regex::RegexBuilder;

/// A select list filtered by a text pattern.
#[derive(Debug, Clone)]
pub struct FilteredSelect {
    options: Vec<String>,
    visible: Vec<usize>,
    selected: Option<usize>,
}

impl FilteredSelect {
    /// Create a select over the given options, all visible, with the
    /// first option selected.
    pub fn new(options: Vec<String>) -> Self {
        let visible = (0..options.len()).collect();
        let selected = if options.is_empty() { None } else { Some(0) };
        Self {
            options,
            visible,
            selected,
        }
    }

    /// All options, filtered or not.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Currently visible options in list order.
    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(|&i| self.options[i].as_str())
    }

    /// The selected option, if any survives the current filter.
    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|i| self.options[i].as_str())
    }

    /// Index of the selected option within the full list.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Select an option by its index in the full list. Out-of-range or
    /// filtered-out indices are ignored.
    pub fn select(&mut self, index: usize) {
        if self.visible.contains(&index) {
            self.selected = Some(index);
        }
    }

    /// Narrow the list to options matching the pattern.
    ///
    /// A previous selection that still matches is kept; otherwise the
    /// first visible option becomes selected (or none, when the filter
    /// empties the list).
    pub fn filter(&mut self, pattern: &str) {
        let matcher = Pattern::compile(pattern);
        self.visible = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, opt)| matcher.matches(opt))
            .map(|(i, _)| i)
            .collect();

        let still_selected = self
            .selected
            .is_some_and(|sel| self.visible.contains(&sel));
        if !still_selected {
            self.selected = self.visible.first().copied();
        }
    }
}

/// Compiled filter pattern: regex when valid, literal otherwise.
enum Pattern {
    Regex(regex::Regex),
    Literal(String),
}

impl Pattern {
    fn compile(pattern: &str) -> Self {
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(re) => Pattern::Regex(re),
            Err(_) => Pattern::Literal(pattern.to_lowercase()),
        }
    }

    fn matches(&self, text: &str) -> bool {
        match self {
            Pattern::Regex(re) => re.is_match(text),
            Pattern::Literal(needle) => text.to_lowercase().contains(needle),
        }
    }
}
