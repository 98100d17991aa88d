//! `cellmate-notebook` — the notebook side of the assistant.
//!
//! Defines the host seam the assistant talks through (cell injection,
//! execution, display, namespace access), the on-disk ipynb document model,
//! and the LLM-backed notebook generator.

pub mod document;
pub mod generate;
pub mod host;

pub use document::{read_notebook, write_notebook, NotebookCell, NotebookDocument};
pub use generate::{LlmNotebookGenerator, NotebookGenerator};
pub use host::{NotebookHost, RecordingHost, WrittenCell};
