//! Host environment seam.
//!
//! Everything the assistant needs from the surrounding notebook runtime is
//! behind this trait: writing the next editable cell, executing code,
//! showing output, and reading the live variable namespace. The assistant
//! never talks to a concrete runtime directly.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use cellmate_core::NamespaceValue;

#[async_trait]
pub trait NotebookHost: Send + Sync {
    /// Write `source` into the next editable cell. With `replace` the
    /// invoking cell's content is overwritten; otherwise a new cell is
    /// inserted below.
    fn set_next_cell(&self, source: &str, replace: bool);

    /// Execute a cell's code in the host runtime.
    async fn run_cell(&self, source: &str) -> Result<()>;

    /// Display plain text output.
    fn display_text(&self, text: &str);

    /// Display HTML output; hosts without HTML rendering fall back to text.
    fn display_html(&self, html: &str) {
        self.display_text(html);
    }

    /// Snapshot of the host's live variable bindings.
    fn namespace(&self) -> Result<HashMap<String, NamespaceValue>>;
}

/// A cell written through the host, as observed by tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenCell {
    pub source: String,
    pub replace: bool,
}

/// Test host that records everything the assistant does to it.
#[derive(Default)]
pub struct RecordingHost {
    pub cells: Mutex<Vec<WrittenCell>>,
    pub executed: Mutex<Vec<String>>,
    pub displayed: Mutex<Vec<String>>,
    pub variables: Mutex<HashMap<String, NamespaceValue>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variable(self, name: impl Into<String>, value: NamespaceValue) -> Self {
        self.variables.lock().unwrap().insert(name.into(), value);
        self
    }

    pub fn written_cells(&self) -> Vec<WrittenCell> {
        self.cells.lock().unwrap().clone()
    }

    pub fn executed_cells(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn displayed_output(&self) -> Vec<String> {
        self.displayed.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotebookHost for RecordingHost {
    fn set_next_cell(&self, source: &str, replace: bool) {
        self.cells.lock().unwrap().push(WrittenCell { source: source.to_string(), replace });
    }

    async fn run_cell(&self, source: &str) -> Result<()> {
        self.executed.lock().unwrap().push(source.to_string());
        Ok(())
    }

    fn display_text(&self, text: &str) {
        self.displayed.lock().unwrap().push(text.to_string());
    }

    fn namespace(&self) -> Result<HashMap<String, NamespaceValue>> {
        Ok(self.variables.lock().unwrap().clone())
    }
}
