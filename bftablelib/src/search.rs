//! Text search over comparison rows.
//!
//! A query is whitespace-separated terms classified by leading sigil:
//! `+term` is required (AND), `-term` is excluded (AND of negation), and
//! a bare `term` is sufficient (OR across all bare terms; vacuously
//! satisfied when none exist). A term whose body starts with `#` matches
//! the term-count field instead of the label: `#2` matches rows with
//! exactly two terms, a bare `#` matches any row with a defined count.
//!
//! `#` terms are rejected at parse time when the table's model type does
//! not carry term counts, leaving prior row visibility unchanged.

use serde::{Deserialize, Serialize};

use crate::error::BfTableError;
use crate::model::ModelType;
use crate::table::BfRow;
use crate::Result;

/// What one search term matches against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum Matcher {
    /// Case-insensitive substring of the model label (stored lowercased)
    Label(String),
    /// Exact term count
    TermsExact(u32),
    /// Any row with a defined term count
    TermsAny,
}

impl Matcher {
    fn matches(&self, row: &BfRow) -> bool {
        match self {
            Matcher::Label(needle) => row.label.to_lowercase().contains(needle),
            Matcher::TermsExact(n) => row.nterms == Some(*n),
            Matcher::TermsAny => row.nterms.is_some(),
        }
    }
}

/// A parsed search query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    required: Vec<Matcher>,
    excluded: Vec<Matcher>,
    sufficient: Vec<Matcher>,
}

impl SearchQuery {
    /// Parse a query string against a table's model type.
    ///
    /// Fails with `TermFilterUnsupported` if any `#` term appears and
    /// the model type has no term counts.
    pub fn parse(input: &str, model_type: &ModelType, terms_supported: bool) -> Result<Self> {
        let mut query = SearchQuery::default();

        for token in input.split_whitespace() {
            let (body, bucket) = if let Some(rest) = token.strip_prefix('+') {
                (rest, Bucket::Required)
            } else if let Some(rest) = token.strip_prefix('-') {
                (rest, Bucket::Excluded)
            } else {
                (token, Bucket::Sufficient)
            };
            if body.is_empty() {
                continue;
            }

            let matcher = if let Some(count) = body.strip_prefix('#') {
                if !terms_supported {
                    return Err(BfTableError::TermFilterUnsupported {
                        model_type: model_type.as_str().to_string(),
                    });
                }
                match count.parse::<u32>() {
                    Ok(n) => Matcher::TermsExact(n),
                    Err(_) => Matcher::TermsAny,
                }
            } else {
                Matcher::Label(body.to_lowercase())
            };

            match bucket {
                Bucket::Required => query.required.push(matcher),
                Bucket::Excluded => query.excluded.push(matcher),
                Bucket::Sufficient => query.sufficient.push(matcher),
            }
        }

        Ok(query)
    }

    /// Whether the query filters anything at all.
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.excluded.is_empty() && self.sufficient.is_empty()
    }

    /// Whether a row should stay visible under this query.
    pub fn matches(&self, row: &BfRow) -> bool {
        let sufficient =
            self.sufficient.is_empty() || self.sufficient.iter().any(|m| m.matches(row));
        let required = self.required.iter().all(|m| m.matches(row));
        let excluded = self.excluded.iter().any(|m| m.matches(row));
        sufficient && required && !excluded
    }

    /// Set every row's visibility flag from this query.
    pub fn apply(&self, rows: &mut [BfRow]) {
        for row in rows {
            row.visible = self.matches(row);
        }
    }
}

#[derive(Clone, Copy)]
enum Bucket {
    Required,
    Excluded,
    Sufficient,
}
