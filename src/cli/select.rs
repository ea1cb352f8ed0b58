//! Interactive lab and token selection

use crate::loader::discover_labs;
use crate::mechanics::Credential;
use crate::models::MechanicsConfig;
use crate::Result;
use colored::Colorize;
use dialoguer::{Confirm, Password, Select};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Resolve the lab to work on.
///
/// An explicit path wins. Otherwise the labs under `project_root` are listed
/// and the user picks one; a single lab is picked without asking.
pub fn resolve_lab(file: Option<&str>, project_root: &Path) -> Result<PathBuf> {
    if let Some(file) = file {
        return Ok(PathBuf::from(file));
    }

    let labs = discover_labs(project_root);
    match labs.len() {
        0 => anyhow::bail!(
            "No .ipynb or .Rmd files found under {}",
            project_root.display()
        ),
        1 => {
            println!(
                "{}",
                format!("Using {}", display_relative(&labs[0], project_root)).bright_black()
            );
            Ok(labs[0].clone())
        }
        _ => {
            if !std::io::stdin().is_terminal() {
                anyhow::bail!("Several labs found; pass the file to use as an argument");
            }
            let items: Vec<String> = labs
                .iter()
                .map(|lab| display_relative(lab, project_root))
                .collect();
            let selection = Select::new()
                .with_prompt("Which lab?")
                .items(&items)
                .default(0)
                .interact_opt()?;

            match selection {
                Some(idx) => Ok(labs[idx].clone()),
                None => anyhow::bail!("No lab selected"),
            }
        }
    }
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Resolve the access token for the remote version check.
///
/// Order: `--token` (which clap also fills from `GITHUB_TOKEN`), then an
/// interactive prompt offering to open the token page first. Returns `None` when no token is available,
/// which leaves the remote check unperformed.
pub fn resolve_credential(token: Option<&str>, config: &MechanicsConfig) -> Result<Option<Credential>> {
    if let Some(credential) = token.and_then(Credential::new) {
        return Ok(Some(credential));
    }
    if !std::io::stdin().is_terminal() {
        return Ok(None);
    }

    let open_page = Confirm::new()
        .with_prompt("No access token found. Open the token page in your browser?")
        .default(false)
        .interact()?;
    if open_page {
        if let Err(e) = open::that(&config.token_url) {
            eprintln!(
                "{}",
                format!("⚠ Could not open {}: {}", config.token_url, e).yellow()
            );
        }
    }

    let token = Password::new()
        .with_prompt("Access token (leave empty to skip)")
        .allow_empty_password(true)
        .interact()?;
    Ok(Credential::new(token))
}
