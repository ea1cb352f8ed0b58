/// Code chunk headers that mark a fenced piece as executable code
const CODE_CHUNK_PREFIXES: [&str; 2] = ["{r", "{python"];

/// Split an R Markdown document into the markdown runs between code chunks.
///
/// The document is cut at every code fence. Pieces that open with an
/// executable chunk header such as `{r setup}` or `{python}` are dropped, and
/// every other piece is kept as a markdown block, empty ones included.
pub fn markdown_chunks(content: &str) -> Vec<String> {
    content
        .split("```")
        .filter(|piece| !CODE_CHUNK_PREFIXES.iter().any(|p| piece.starts_with(p)))
        .map(str::to_string)
        .collect()
}
