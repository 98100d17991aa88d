//! ipynb (nbformat 4) document model and file I/O.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::info;

use cellmate_markdown::Segment;

/// An ordered list of cells plus notebook-level metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotebookDocument {
    pub cells: Vec<NotebookCell>,
    pub metadata: Value,
    pub nbformat: u32,
    pub nbformat_minor: u32,
}

/// One notebook cell, tagged by type as in the nbformat schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum NotebookCell {
    Markdown {
        metadata: Value,
        source: Vec<String>,
    },
    Code {
        metadata: Value,
        source: Vec<String>,
        execution_count: Option<u64>,
        outputs: Vec<Value>,
    },
}

/// nbformat stores cell sources as a list of lines, each keeping its
/// trailing newline except the last.
fn source_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

impl NotebookCell {
    pub fn markdown(text: &str) -> Self {
        NotebookCell::Markdown {
            metadata: Value::Object(Default::default()),
            source: source_lines(text),
        }
    }

    pub fn code(source: &str) -> Self {
        NotebookCell::Code {
            metadata: Value::Object(Default::default()),
            source: source_lines(source),
            execution_count: None,
            outputs: Vec::new(),
        }
    }

    /// The cell source as one string.
    pub fn source_text(&self) -> String {
        match self {
            NotebookCell::Markdown { source, .. } | NotebookCell::Code { source, .. } => {
                source.concat()
            }
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, NotebookCell::Code { .. })
    }
}

impl NotebookDocument {
    pub fn new(cells: Vec<NotebookCell>) -> Self {
        Self {
            cells,
            metadata: serde_json::json!({
                "language_info": { "name": "python" }
            }),
            nbformat: 4,
            nbformat_minor: 5,
        }
    }

    /// Build a notebook from a segmented model reply: prose becomes markdown
    /// cells, code blocks become code cells, in document order.
    pub fn from_segments(segments: &[Segment]) -> Self {
        let cells = segments
            .iter()
            .map(|segment| match segment {
                Segment::Prose(text) => NotebookCell::markdown(text),
                Segment::Code { source, .. } => NotebookCell::code(source),
            })
            .collect();
        Self::new(cells)
    }
}

/// Read and parse a notebook file.
pub async fn read_notebook(path: &Path) -> Result<NotebookDocument> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read notebook: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse notebook JSON: {}", path.display()))
}

/// Write a notebook file (pretty-printed JSON).
pub async fn write_notebook(document: &NotebookDocument, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create notebook directory: {}", parent.display())
            })?;
        }
    }
    let json = serde_json::to_string_pretty(document)
        .context("Failed to serialize notebook")?;
    fs::write(path, json.as_bytes())
        .await
        .with_context(|| format!("Failed to write notebook: {}", path.display()))?;
    info!(path = %path.display(), cells = document.cells.len(), "Wrote notebook");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_map_to_cells_in_order() {
        let segments = vec![
            Segment::Prose("# Walkthrough".into()),
            Segment::Code { lang: "python".into(), source: "x = 1\ny = 2".into() },
            Segment::Prose("Done.".into()),
        ];
        let doc = NotebookDocument::from_segments(&segments);
        assert_eq!(doc.cells.len(), 3);
        assert!(!doc.cells[0].is_code());
        assert!(doc.cells[1].is_code());
        assert_eq!(doc.cells[1].source_text(), "x = 1\ny = 2");
        assert_eq!(doc.nbformat, 4);
    }

    #[test]
    fn cell_type_tag_matches_nbformat() {
        let doc = NotebookDocument::new(vec![NotebookCell::code("pass")]);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["cells"][0]["cell_type"], "code");
        assert!(json["cells"][0]["outputs"].as_array().unwrap().is_empty());
    }

    #[test]
    fn multiline_source_keeps_inner_newlines() {
        let cell = NotebookCell::code("a = 1\nb = 2");
        let json = serde_json::to_value(&cell).unwrap();
        let lines = json["source"].as_array().unwrap();
        assert_eq!(lines[0], "a = 1\n");
        assert_eq!(lines[1], "b = 2");
    }

    #[tokio::test]
    async fn notebook_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.ipynb");
        let doc = NotebookDocument::new(vec![
            NotebookCell::markdown("## Intro"),
            NotebookCell::code("print('hi')"),
        ]);
        write_notebook(&doc, &path).await.unwrap();
        let loaded = read_notebook(&path).await.unwrap();
        assert_eq!(loaded, doc);
    }
}
