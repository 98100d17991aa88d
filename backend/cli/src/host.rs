//! Terminal implementation of the notebook host seam.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tracing::warn;

use cellmate_core::NamespaceValue;
use cellmate_notebook::NotebookHost;

/// A host that renders "cells" to stdout. A terminal has no kernel, so
/// execution requests are logged and skipped, and the namespace is empty.
pub struct TerminalHost;

#[async_trait]
impl NotebookHost for TerminalHost {
    fn set_next_cell(&self, source: &str, replace: bool) {
        let label = if replace { "current cell (replaced)" } else { "next cell" };
        println!("--- {label} ---");
        println!("{source}");
        println!("---");
    }

    async fn run_cell(&self, _source: &str) -> Result<()> {
        warn!("Terminal host cannot execute notebook code; cell not run");
        Ok(())
    }

    fn display_text(&self, text: &str) {
        println!("{text}");
    }

    fn namespace(&self) -> Result<HashMap<String, NamespaceValue>> {
        Ok(HashMap::new())
    }
}
