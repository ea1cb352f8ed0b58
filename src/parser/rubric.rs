//! Rubric tag classification and extraction
//!
//! A rubric tag is a line of the form `rubric={label:points,...}` placed
//! directly under the markdown header of the question it grades. Whether the
//! points are required or optional is decided by that header.

use crate::models::{Category, Line};
use crate::tally::TallyError;
use regex::Regex;
use std::sync::OnceLock;

const RUBRIC_PREFIX: &str = "rubric={";

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#{1,6}\s").expect("header pattern is valid"))
}

fn points_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").expect("points pattern is valid"))
}

fn criteria_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-z]+):[0-9]").expect("criteria pattern is valid"))
}

/// True for markdown ATX headers: one to six `#` followed by whitespace
pub fn is_header(text: &str) -> bool {
    header_regex().is_match(text)
}

pub fn is_rubric_tag(text: &str) -> bool {
    text.starts_with(RUBRIC_PREFIX)
}

/// A header marks its section optional when it mentions "optional" or "bonus"
/// anywhere, in any case.
pub fn is_optional(header: &str) -> bool {
    let lower = header.to_lowercase();
    lower.contains("optional") || lower.contains("bonus")
}

/// Header text without the leading `#`s and surrounding whitespace
pub fn strip_header(text: &str) -> &str {
    text.trim_start_matches('#').trim()
}

/// A line together with the line right before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    pub line: &'a Line,

    /// The previous line in the flattened sequence, `None` for the first line
    pub header: Option<&'a Line>,

    pub is_header: bool,
    pub is_rubric_tag: bool,

    /// Whether the preceding line marks the section optional
    pub is_optional: bool,
}

impl<'a> ClassifiedLine<'a> {
    /// Whether the preceding line is a markdown header
    pub fn follows_header(&self) -> bool {
        self.header.is_some_and(|h| is_header(&h.text))
    }

    pub fn category(&self) -> Category {
        if self.is_optional {
            Category::Optional
        } else {
            Category::NonOptional
        }
    }
}

/// Pairs every line with its predecessor and classifies it
pub fn classify(lines: &[Line]) -> impl Iterator<Item = ClassifiedLine<'_>> + '_ {
    lines.iter().enumerate().map(move |(i, line)| {
        let header = i.checked_sub(1).map(|prev| &lines[prev]);
        ClassifiedLine {
            line,
            header,
            is_header: is_header(&line.text),
            is_rubric_tag: is_rubric_tag(&line.text),
            is_optional: header.is_some_and(|h| is_optional(&h.text)),
        }
    })
}

/// A rubric tag with its values pulled out, before weighting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRubric {
    pub block: usize,
    pub header: String,
    pub criteria: Vec<String>,
    pub points: Vec<u64>,
    pub total: u64,
    pub category: Category,
}

/// Every maximal run of digits, left to right
pub fn extract_points(text: &str) -> Result<Vec<u64>, std::num::ParseIntError> {
    points_regex()
        .find_iter(text)
        .map(|m| m.as_str().parse::<u64>())
        .collect()
}

/// Lowercase labels that are immediately followed by `:` and a digit
pub fn extract_criteria(text: &str) -> Vec<String> {
    criteria_regex()
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Extract all rubric tags from a flattened document.
///
/// Every tag must sit directly under a header. The adjacency check runs over
/// the whole document before any tag is parsed, so a misplaced tag is reported
/// even when an earlier tag is malformed.
pub fn extract_rubrics(lines: &[Line]) -> Result<Vec<ParsedRubric>, TallyError> {
    let tags: Vec<ClassifiedLine> = classify(lines).filter(|c| c.is_rubric_tag).collect();

    if let Some(orphan) = tags.iter().find(|c| !c.follows_header()) {
        return Err(TallyError::Structure {
            block: orphan.line.block_index,
            text: orphan.line.text.clone(),
        });
    }

    tags.iter().map(parse_tag).collect()
}

fn parse_tag(tag: &ClassifiedLine<'_>) -> Result<ParsedRubric, TallyError> {
    let line = tag.line;
    let malformed = |reason: &str| TallyError::Parse {
        block: line.block_index,
        text: line.text.clone(),
        reason: reason.to_string(),
    };

    let points = extract_points(&line.text).map_err(|_| malformed("point value out of range"))?;
    if points.is_empty() {
        return Err(malformed("no numeric points found"));
    }
    let total = points
        .iter()
        .try_fold(0u64, |acc, p| acc.checked_add(*p))
        .ok_or_else(|| malformed("point total out of range"))?;

    let header = tag.header.map(|h| strip_header(&h.text)).unwrap_or_default();
    tracing::debug!(block = line.block_index, header, total, "parsed rubric tag");

    Ok(ParsedRubric {
        block: line.block_index,
        header: header.to_string(),
        criteria: extract_criteria(&line.text),
        points,
        total,
        category: tag.category(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<Line> {
        texts.iter().map(|t| Line::new(1, *t)).collect()
    }

    #[test]
    fn test_is_header() {
        assert!(is_header("# Title"));
        assert!(is_header("###### Deep"));
        assert!(is_header("##\tTabbed"));
        assert!(!is_header("####### Too deep"));
        assert!(!is_header("#NoSpace"));
        assert!(!is_header("Not # a header"));
    }

    #[test]
    fn test_is_rubric_tag_requires_prefix_at_start() {
        assert!(is_rubric_tag("rubric={accuracy:3}"));
        assert!(!is_rubric_tag("see rubric={accuracy:3}"));
        assert!(!is_rubric_tag("rubric = {accuracy:3}"));
    }

    #[test]
    fn test_is_optional_substring_match() {
        assert!(is_optional("## Optional exercise"));
        assert!(is_optional("### BONUS"));
        assert!(is_optional("# Nonoptional"));
        assert!(!is_optional("# Exercise 1"));
    }

    #[test]
    fn test_strip_header() {
        assert_eq!(strip_header("### Question 2  "), "Question 2");
    }

    #[test]
    fn test_extract_points_and_criteria() {
        let text = "rubric={accuracy:3,reasoning:12,viz:0}";
        assert_eq!(extract_points(text).unwrap(), vec![3, 12, 0]);
        assert_eq!(extract_criteria(text), vec!["accuracy", "reasoning", "viz"]);
    }

    #[test]
    fn test_extract_criteria_independent_of_points() {
        // Labels without a numeric value are not criteria, but digits still count
        let text = "rubric={mechanics:5, Quality:2, writing}";
        assert_eq!(extract_criteria(text), vec!["mechanics", "uality"]);
        assert_eq!(extract_points(text).unwrap(), vec![5, 2]);
    }

    #[test]
    fn test_classify_pairs_with_previous_line() {
        let doc = lines(&["## Bonus", "rubric={a:1}", "text"]);
        let classified: Vec<ClassifiedLine> = classify(&doc).collect();

        assert!(classified[0].header.is_none());
        assert!(classified[0].is_header);
        assert!(classified[1].is_rubric_tag);
        assert!(classified[1].is_optional);
        assert!(classified[1].follows_header());
        assert!(!classified[2].follows_header());
    }

    #[test]
    fn test_extract_rubrics() {
        let doc = lines(&["# Q1", "rubric={accuracy:3,reasoning:2}", "Answer here"]);
        let rubrics = extract_rubrics(&doc).unwrap();

        assert_eq!(rubrics.len(), 1);
        assert_eq!(rubrics[0].header, "Q1");
        assert_eq!(rubrics[0].points, vec![3, 2]);
        assert_eq!(rubrics[0].total, 5);
        assert_eq!(rubrics[0].category, Category::NonOptional);
    }

    #[test]
    fn test_rubric_first_line_is_structure_error() {
        let doc = lines(&["rubric={a:1}", "# Q1"]);
        assert!(matches!(
            extract_rubrics(&doc),
            Err(TallyError::Structure { .. })
        ));
    }

    #[test]
    fn test_rubric_after_body_text_is_structure_error() {
        let doc = lines(&["# Q1", "Some prose", "rubric={a:1}"]);
        assert!(matches!(
            extract_rubrics(&doc),
            Err(TallyError::Structure { .. })
        ));
    }

    #[test]
    fn test_structure_error_wins_over_parse_error() {
        let doc = lines(&["# Q1", "rubric={}", "prose", "rubric={a:1}"]);
        assert!(matches!(
            extract_rubrics(&doc),
            Err(TallyError::Structure { .. })
        ));
    }

    #[test]
    fn test_rubric_without_points_is_parse_error() {
        let doc = lines(&["# Q1", "rubric={}"]);
        match extract_rubrics(&doc) {
            Err(TallyError::Parse { reason, .. }) => assert_eq!(reason, "no numeric points found"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_long_digit_runs_are_points() {
        let doc = lines(&["# Q1", "rubric={a:20201015, b:99999999999}"]);
        let rubrics = extract_rubrics(&doc).unwrap();
        assert_eq!(rubrics[0].points, vec![20201015, 99999999999]);
        assert_eq!(rubrics[0].total, 100020201014);
    }

    #[test]
    fn test_oversized_points_is_parse_error() {
        let doc = lines(&["# Q1", "rubric={a:123456789012345678901234567890}"]);
        match extract_rubrics(&doc) {
            Err(TallyError::Parse { reason, .. }) => assert_eq!(reason, "point value out of range"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_total_is_parse_error() {
        let doc = lines(&["# Q1", "rubric={a:18446744073709551615, b:1}"]);
        match extract_rubrics(&doc) {
            Err(TallyError::Parse { reason, .. }) => assert_eq!(reason, "point total out of range"),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
