//! `cellmate-config` — persisted assistant configuration.
//!
//! A small YAML document holding the active model pair, stored at a
//! version-scoped path so library upgrades start from fresh defaults.

pub mod io;
pub mod schema;

pub use io::{config_dir, config_file_path, load_config, resolve, write_config};
pub use schema::{AssistantConfig, DEFAULT_MODEL, DEFAULT_VISION_MODEL};
