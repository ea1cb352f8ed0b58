//! count-points command

use super::select::resolve_lab;
use crate::loader::load_blocks;
use crate::models::{Category, DetailTable, LabzenConfig, SummaryKey, SummaryTable};
use crate::parser::flatten;
use crate::tally::tally_lines;
use crate::Result;
use anyhow::Context;
use colored::Colorize;
use std::env;

pub fn run(file: Option<&str>, no_margins: bool, json: bool) -> Result<()> {
    let project_root = env::current_dir()?;
    let config = LabzenConfig::load(&project_root)?;
    let lab = resolve_lab(file, &project_root)?;

    let blocks = load_blocks(&lab)?;
    let lines: Vec<_> = flatten(&blocks).collect();
    let include_margin = config.tally.margins && !no_margins;
    let (detail, summary) = tally_lines(&lines, include_margin)
        .with_context(|| format!("Cannot tally points in {}", lab.display()))?;

    if json {
        let output = serde_json::json!({
            "file": lab.display().to_string(),
            "rubrics": detail,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", format!("📊 Rubric points: {}", lab.display()).cyan().bold());
    println!();
    print!("{}", render_detail(&detail));
    println!();
    print!("{}", render_summary(&summary));
    Ok(())
}

/// Detail table as aligned text, one rubric per line
pub fn render_detail(detail: &DetailTable) -> String {
    let header_width = detail
        .iter()
        .map(|e| e.header.chars().count())
        .max()
        .unwrap_or(0)
        .max("Header".len());

    let mut out = format!(
        "{:>5}  {:<hw$}  {:<12}  {:>5}  {:>10}  {:<12}  {}\n",
        "Block",
        "Header",
        "Category",
        "Total",
        "Proportion",
        "Points",
        "Criteria",
        hw = header_width
    );
    for entry in detail.iter() {
        let points = entry
            .points
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join("+");
        out.push_str(&format!(
            "{:>5}  {:<hw$}  {:<12}  {:>5}  {:>9.2}%  {:<12}  {}\n",
            entry.block,
            entry.header,
            entry.category.name(),
            entry.total,
            entry.proportion * 100.0,
            points,
            entry.criteria.join(", "),
            hw = header_width
        ));
    }
    out
}

/// Summary table as aligned text
pub fn render_summary(summary: &SummaryTable) -> String {
    let mut out = format!("{:<12}  {:>5}  {:>10}\n", "Category", "Total", "Proportion");
    for row in &summary.rows {
        let label = format!("{:<12}", row.category.name());
        let label = match row.category {
            SummaryKey::Category(Category::NonOptional) => label.normal(),
            SummaryKey::Category(Category::Optional) => label.yellow(),
            SummaryKey::All => label.bold(),
        };
        out.push_str(&format!(
            "{}  {:>5}  {:>9.2}%\n",
            label,
            row.total,
            row.proportion * 100.0
        ));
    }
    out
}
