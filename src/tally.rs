//! Rubric point tally
//!
//! Turns the markdown blocks of a lab into a per-rubric detail table and a
//! required/optional summary, weighting every point so that the required
//! points together make up [`REQUIRED_WEIGHT`] of the grade.

use crate::models::{
    Category, DetailTable, Line, RubricEntry, SummaryKey, SummaryRow, SummaryTable,
    REQUIRED_WEIGHT,
};
use crate::parser::{extract_rubrics, flatten, ParsedRubric};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TallyError {
    #[error("rubric tag must immediately follow a markdown header (block {block}: '{text}')")]
    Structure { block: usize, text: String },

    #[error("malformed rubric: {reason} (block {block}: '{text}')")]
    Parse {
        block: usize,
        text: String,
        reason: String,
    },

    #[error("cannot weight points: the lab has no non-optional rubric points")]
    Division,
}

/// Tally the rubric points of a lab given its markdown blocks.
///
/// # Example
/// ```
/// use labzen::tally::tally;
/// let (detail, summary) = tally(&["# Q1", "rubric={accuracy:3,reasoning:2}"], true).unwrap();
/// assert_eq!(detail.entries[0].total, 5);
/// assert_eq!(summary.len(), 2);
/// ```
pub fn tally<S: AsRef<str>>(
    blocks: &[S],
    include_margin: bool,
) -> Result<(DetailTable, SummaryTable), TallyError> {
    let lines: Vec<Line> = flatten(blocks).collect();
    tally_lines(&lines, include_margin)
}

/// Tally an already flattened document
pub fn tally_lines(
    lines: &[Line],
    include_margin: bool,
) -> Result<(DetailTable, SummaryTable), TallyError> {
    let rubrics = extract_rubrics(lines)?;
    aggregate(rubrics, include_margin)
}

fn aggregate(
    rubrics: Vec<ParsedRubric>,
    include_margin: bool,
) -> Result<(DetailTable, SummaryTable), TallyError> {
    let category_total = |category: Category| -> u64 {
        rubrics
            .iter()
            .filter(|r| r.category == category)
            .fold(0, |acc, r| acc.saturating_add(r.total))
    };
    let required = category_total(Category::NonOptional);
    let optional = category_total(Category::Optional);

    if required == 0 {
        return Err(TallyError::Division);
    }
    let one_point_worth = REQUIRED_WEIGHT / required as f64;
    let weigh = |total: u64| total as f64 * one_point_worth;

    let has_optional = rubrics.iter().any(|r| r.category == Category::Optional);

    let entries: Vec<RubricEntry> = rubrics
        .into_iter()
        .map(|r| RubricEntry {
            proportion: weigh(r.total),
            block: r.block,
            header: r.header,
            criteria: r.criteria,
            points: r.points,
            total: r.total,
            category: r.category,
        })
        .collect();

    let mut rows = vec![SummaryRow {
        category: SummaryKey::Category(Category::NonOptional),
        total: required,
        proportion: weigh(required),
    }];
    if has_optional {
        rows.push(SummaryRow {
            category: SummaryKey::Category(Category::Optional),
            total: optional,
            proportion: weigh(optional),
        });
    }
    if include_margin {
        let all = required.saturating_add(optional);
        rows.push(SummaryRow {
            category: SummaryKey::All,
            total: all,
            proportion: weigh(all),
        });
    }

    tracing::info!(
        rubrics = entries.len(),
        required,
        optional,
        "tallied rubric points"
    );

    Ok((
        DetailTable { entries },
        SummaryTable {
            rows,
            one_point_worth,
        },
    ))
}
