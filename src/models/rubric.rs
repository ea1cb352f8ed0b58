//! Rubric data model
//!
//! Every value here is derived from a single lab document. Blocks come from the
//! loader, lines from the flattener, and the tables from the tally aggregator.

use serde::{Serialize, Serializer};
use std::fmt;

/// Share of the final grade carried by the required rubric points.
///
/// The remaining 5% is left for mechanics, which are graded separately.
pub const REQUIRED_WEIGHT: f64 = 0.95;

/// One markdown unit of a lab (a notebook cell, or the text between code chunks)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// 1-based position among the markdown blocks of the document
    pub index: usize,

    /// Raw text, may contain line breaks and literal `<br>` / `<hr>` markup
    pub text: &'a str,
}

impl<'a> Block<'a> {
    /// Number a sequence of raw block strings starting from 1
    pub fn numbered<S: AsRef<str>>(sources: &'a [S]) -> impl Iterator<Item = Block<'a>> + 'a {
        sources.iter().enumerate().map(|(i, text)| Block {
            index: i + 1,
            text: text.as_ref(),
        })
    }
}

/// A single trimmed, non-empty row of flattened markdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Index of the block this line came from
    pub block_index: usize,

    pub text: String,
}

impl Line {
    pub fn new(block_index: usize, text: impl Into<String>) -> Self {
        Self {
            block_index,
            text: text.into(),
        }
    }
}

/// Whether a rubric counts towards the required point base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    #[serde(rename = "Non-Optional")]
    NonOptional,
    #[serde(rename = "Optional")]
    Optional,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::NonOptional => "Non-Optional",
            Category::Optional => "Optional",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the detail table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RubricEntry {
    /// Block the rubric tag was found in
    pub block: usize,

    /// Header text without the leading `#`s
    pub header: String,

    /// Criterion labels in the order they appear in the tag
    pub criteria: Vec<String>,

    /// Point values in the order they appear in the tag
    pub points: Vec<u64>,

    pub total: u64,

    /// Share of the final grade, `total * 0.95 / required points`
    pub proportion: f64,

    pub category: Category,
}

/// Per-rubric table in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DetailTable {
    pub entries: Vec<RubricEntry>,
}

impl DetailTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RubricEntry> {
        self.entries.iter()
    }

    /// Sum of all rubric totals regardless of category
    pub fn total(&self) -> u64 {
        self.entries.iter().fold(0, |acc, e| acc.saturating_add(e.total))
    }
}

/// Row key of the summary table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKey {
    Category(Category),
    /// Margin row aggregating every category
    All,
}

impl SummaryKey {
    pub fn name(&self) -> &'static str {
        match self {
            SummaryKey::Category(category) => category.name(),
            SummaryKey::All => "All",
        }
    }
}

impl fmt::Display for SummaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for SummaryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub category: SummaryKey,
    pub total: u64,
    pub proportion: f64,
}

/// Cross-tabulation of rubric points by category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,

    /// Grade weight of a single point
    pub one_point_worth: f64,
}

impl SummaryTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, key: SummaryKey) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.category == key)
    }

    pub fn margin(&self) -> Option<&SummaryRow> {
        self.row(SummaryKey::All)
    }

    /// Sum of the category rows, excluding the margin
    pub fn category_total(&self) -> u64 {
        self.rows
            .iter()
            .filter(|r| r.category != SummaryKey::All)
            .fold(0, |acc, r| acc.saturating_add(r.total))
    }
}
