use crate::models::{Block, Line};

/// Flattens markdown blocks into trimmed, non-empty lines.
///
/// Literal `<br>` markup counts as a line break and `<hr>` rules are dropped.
/// Lines keep the index of the block they came from, while the sequence itself
/// runs on across block boundaries.
///
/// # Example
/// ```
/// use labzen::parser::flatten;
/// let blocks = ["# Q1<br>rubric={accuracy:3}", "  <hr>  \n\nSome text"];
/// let lines: Vec<_> = flatten(&blocks).map(|l| l.text).collect();
/// assert_eq!(lines, ["# Q1", "rubric={accuracy:3}", "Some text"]);
/// ```
pub fn flatten<S: AsRef<str>>(blocks: &[S]) -> impl Iterator<Item = Line> + '_ {
    Block::numbered(blocks).flat_map(split_block)
}

fn split_block(block: Block<'_>) -> Vec<Line> {
    block
        .text
        .replace("<br>", "\n")
        .split('\n')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty() && *fragment != "<hr>")
        .map(|fragment| Line::new(block.index, fragment))
        .collect()
}
