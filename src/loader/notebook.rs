//! Jupyter notebook reader
//!
//! Only the parts of the nbformat JSON needed to recover markdown cells are
//! modelled; everything else in the document is ignored.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Notebook {
    #[serde(default)]
    cells: Vec<Cell>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    cell_type: String,
    #[serde(default)]
    source: CellSource,
}

/// nbformat stores cell source either as one string or as a list of lines
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl Default for CellSource {
    fn default() -> Self {
        CellSource::Text(String::new())
    }
}

impl CellSource {
    fn into_text(self) -> String {
        match self {
            CellSource::Text(text) => text,
            CellSource::Lines(lines) => lines.concat(),
        }
    }
}

/// Source text of every markdown cell, in notebook order
pub fn markdown_cells(content: &str) -> Result<Vec<String>, serde_json::Error> {
    let notebook: Notebook = serde_json::from_str(content)?;
    Ok(notebook
        .cells
        .into_iter()
        .filter(|cell| cell.cell_type == "markdown")
        .map(|cell| cell.source.into_text())
        .collect())
}
