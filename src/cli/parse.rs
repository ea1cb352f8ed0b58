//! parse command: show the markdown blocks of a lab

use super::select::resolve_lab;
use crate::loader::load_blocks;
use crate::Result;
use colored::Colorize;
use std::env;

pub fn run(file: Option<&str>, json: bool) -> Result<()> {
    let project_root = env::current_dir()?;
    let lab = resolve_lab(file, &project_root)?;
    let blocks = load_blocks(&lab)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&blocks)?);
        return Ok(());
    }

    println!(
        "{}",
        format!("📄 {} markdown blocks in {}", blocks.len(), lab.display())
            .cyan()
            .bold()
    );
    for (i, block) in blocks.iter().enumerate() {
        println!();
        println!("{}", format!("── block {} ──", i + 1).bright_black());
        println!("{}", block.trim_end());
    }
    Ok(())
}
