//! Lab document loading
//!
//! Reads a lab from disk and returns its markdown blocks in document order.
//! Jupyter notebooks contribute one block per markdown cell, R Markdown files
//! one block per text run between code chunks.

pub mod notebook;
pub mod rmd;

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Unsupported lab format '{0}': expected a Jupyter notebook (.ipynb) or R Markdown (.Rmd) file")]
    UnsupportedFormat(String),

    #[error("Invalid lab reference: {0}")]
    InvalidReference(String),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse notebook '{path}': {source}")]
    Notebook {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The two lab document kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabFormat {
    Notebook,
    RMarkdown,
}

impl LabFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        if extension.eq_ignore_ascii_case("ipynb") {
            Ok(LabFormat::Notebook)
        } else if extension.eq_ignore_ascii_case("rmd") {
            Ok(LabFormat::RMarkdown)
        } else {
            Err(LoadError::UnsupportedFormat(path.display().to_string()))
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LabFormat::Notebook => "Jupyter notebook",
            LabFormat::RMarkdown => "R Markdown",
        }
    }
}

/// Load the markdown blocks of a lab
pub fn load_blocks(path: &Path) -> Result<Vec<String>, LoadError> {
    if path.as_os_str().is_empty() || path.file_name().is_none() {
        return Err(LoadError::InvalidReference(format!(
            "'{}' does not name a file",
            path.display()
        )));
    }

    let format = LabFormat::from_path(path)?;

    if !path.is_file() {
        return Err(LoadError::InvalidReference(format!(
            "'{}' does not exist",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let blocks = match format {
        LabFormat::Notebook => {
            notebook::markdown_cells(&content).map_err(|source| LoadError::Notebook {
                path: path.to_path_buf(),
                source,
            })?
        }
        LabFormat::RMarkdown => rmd::markdown_chunks(&content),
    };

    tracing::debug!(
        path = %path.display(),
        format = format.name(),
        blocks = blocks.len(),
        "loaded lab"
    );
    Ok(blocks)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

/// Recursively find lab documents under `root`, sorted by path.
///
/// Hidden directories (including `.ipynb_checkpoints`) are not searched.
pub fn discover_labs(root: &Path) -> Vec<PathBuf> {
    let mut labs: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| LabFormat::from_path(e.path()).is_ok())
        .map(|e| e.into_path())
        .collect();
    labs.sort();
    labs
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            LabFormat::from_path(Path::new("lab1.ipynb")).unwrap(),
            LabFormat::Notebook
        );
        assert_eq!(
            LabFormat::from_path(Path::new("lab1.Rmd")).unwrap(),
            LabFormat::RMarkdown
        );
        assert!(matches!(
            LabFormat::from_path(Path::new("lab1.md")),
            Err(LoadError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            LabFormat::from_path(Path::new("lab1")),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_blocks_empty_path() {
        assert!(matches!(
            load_blocks(Path::new("")),
            Err(LoadError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_load_blocks_missing_file() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            load_blocks(&temp.path().join("missing.ipynb")),
            Err(LoadError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_load_blocks_unsupported_before_existence() {
        assert!(matches!(
            load_blocks(Path::new("nowhere/lab.txt")),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_blocks_rmd() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lab.Rmd");
        std::fs::write(&path, "# Q1\nrubric={a:2}\n```{r}\n1 + 1\n```\n").unwrap();

        let blocks = load_blocks(&path).unwrap();
        assert_eq!(blocks, vec!["# Q1\nrubric={a:2}\n", "\n"]);
    }

    #[test]
    fn test_load_blocks_bad_notebook() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lab.ipynb");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_blocks(&path), Err(LoadError::Notebook { .. })));
    }

    #[test]
    fn test_discover_labs_skips_hidden_dirs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir_all(root.join("labs/lab1")).unwrap();
        std::fs::create_dir_all(root.join(".ipynb_checkpoints")).unwrap();
        std::fs::write(root.join("labs/lab1/lab1.ipynb"), "{}").unwrap();
        std::fs::write(root.join("lab2.Rmd"), "").unwrap();
        std::fs::write(root.join("notes.md"), "").unwrap();
        std::fs::write(root.join(".ipynb_checkpoints/lab1-checkpoint.ipynb"), "{}").unwrap();

        let labs = discover_labs(root);
        assert_eq!(
            labs,
            vec![root.join("lab2.Rmd"), root.join("labs/lab1/lab1.ipynb")]
        );
    }
}
