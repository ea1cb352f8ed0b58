//! check-mechanics command

use super::select::{resolve_credential, resolve_lab};
use crate::loader::load_blocks;
use crate::mechanics::{GitHubClient, MechanicsChecker};
use crate::models::{CheckOutcome, LabzenConfig, MechanicsReport};
use crate::parser::flatten;
use crate::Result;
use colored::Colorize;
use std::env;
use std::path::Path;

pub async fn run(
    file: Option<&str>,
    token: Option<&str>,
    branch: Option<String>,
    json: bool,
) -> Result<()> {
    let project_root = env::current_dir()?;
    let mut config = LabzenConfig::load(&project_root)?;
    if branch.is_some() {
        config.mechanics.branch = branch;
    }

    let lab = resolve_lab(file, &project_root)?;
    let blocks = load_blocks(&lab)?;
    let lines: Vec<_> = flatten(&blocks).collect();
    let credential = resolve_credential(token, &config.mechanics)?;

    let lab_dir = lab
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let client = GitHubClient::new(&config.mechanics.api_base);
    let checker = MechanicsChecker::new(&config.mechanics, &client);
    let report = checker.run(&lines, lab_dir, credential.as_ref()).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", format!("🔍 Mechanics: {}", lab.display()).cyan().bold());
        println!();
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &MechanicsReport) {
    for (name, outcome) in report.checks() {
        let detail = match outcome {
            CheckOutcome::Passed(d) => d.green(),
            CheckOutcome::Failed(d) => d.red(),
            CheckOutcome::Errored(d) => d.yellow(),
        };
        println!("   {} {:<24} {}", outcome.symbol(), name, detail);
    }
    println!();

    if report.all_passed() {
        println!("{}", "✅ All mechanics checks passed".green());
    } else {
        println!(
            "{}",
            "💡 Fix the items above before submitting your lab.".yellow()
        );
    }
}
