//! Model types and term counting.
//!
//! Each table carries a plain-text model-type tag next to its data blob.
//! For linear models the number of additive terms in a formula label is
//! a filterable and sortable facet; other model types have no meaningful
//! term count and the features depending on it are disabled.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Model type tag for linear models, the one type with countable terms.
pub const LINEAR_MODEL: &str = "BFlinearModel";

/// Plain-text model-type tag carried alongside a table's data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelType(String);

impl ModelType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The linear-model type, which supports term counting.
    pub fn linear_model() -> Self {
        Self(LINEAR_MODEL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Term-counting configuration.
///
/// Maps each model type that supports term counting to the labels that
/// count as zero terms (e.g. an intercept-only baseline whose label has
/// no `" + "` separators but should still count as zero, not one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCountRules {
    zero_term_labels: HashMap<String, Vec<String>>,
}

impl Default for TermCountRules {
    fn default() -> Self {
        let mut zero_term_labels = HashMap::new();
        zero_term_labels.insert(
            LINEAR_MODEL.to_string(),
            vec!["Intercept only".to_string()],
        );
        Self { zero_term_labels }
    }
}

impl TermCountRules {
    /// Rules with no counting model types (for building up).
    pub fn none() -> Self {
        Self {
            zero_term_labels: HashMap::new(),
        }
    }

    /// Builder: register a zero-term label for a model type, enabling
    /// term counting for that type.
    pub fn with_zero_term_label(
        mut self,
        model_type: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.zero_term_labels
            .entry(model_type.into())
            .or_default()
            .push(label.into());
        self
    }

    /// Whether this model type carries term counts at all.
    pub fn supports(&self, model_type: &ModelType) -> bool {
        self.zero_term_labels.contains_key(model_type.as_str())
    }

    /// Count the additive terms in a model label.
    ///
    /// Returns `None` for model types without term counting, `Some(0)`
    /// for a configured zero-term label, and otherwise the number of
    /// `" + "`-separated components.
    pub fn term_count(&self, label: &str, model_type: &ModelType) -> Option<u32> {
        let zero_labels = self.zero_term_labels.get(model_type.as_str())?;
        if zero_labels.iter().any(|z| z == label) {
            return Some(0);
        }
        Some(label.split(" + ").count() as u32)
    }
}
