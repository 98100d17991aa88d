//! Config file read/write and override merging.

use crate::schema::AssistantConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Resolve the Cellmate config directory.
/// Priority: `CELLMATE_CONFIG_DIR` env > `~/.cache/cellmate/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CELLMATE_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".cache").join("cellmate");
    }
    PathBuf::from(".cellmate")
}

/// Full path of the config document within a config directory.
///
/// The filename carries the crate version, so upgrading the library starts
/// over with fresh defaults instead of reading a stale document.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(format!("config_cellmate_{}.yaml", env!("CARGO_PKG_VERSION")))
}

/// Load and parse the config from disk.
///
/// Returns hardcoded defaults if the file doesn't exist (first run).
pub async fn load_config(path: &Path) -> Result<AssistantConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(AssistantConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: AssistantConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Write config to disk atomically (write to temp file, rename).
pub async fn write_config(config: &AssistantConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    let yaml = serde_yaml::to_string(config)
        .with_context(|| "Failed to serialize config to YAML")?;

    let tmp_path = path.with_extension("yaml.tmp");
    fs::write(&tmp_path, yaml.as_bytes())
        .await
        .with_context(|| format!("Failed to write temp config: {}", tmp_path.display()))?;

    fs::rename(&tmp_path, path).await.with_context(|| {
        format!("Failed to rename temp config to: {}", path.display())
    })?;

    info!(path = %path.display(), "Wrote config");
    Ok(())
}

/// Load the persisted document, apply explicit overrides, and persist the
/// merged result. The on-disk document always reflects the most recently
/// resolved model pair; re-running with identical inputs leaves the same
/// bytes on disk.
pub async fn resolve(
    path: &Path,
    model: Option<String>,
    vision_model: Option<String>,
) -> Result<AssistantConfig> {
    let mut config = load_config(path).await?;
    if let Some(model) = model {
        config.model = model;
    }
    if let Some(vision_model) = vision_model {
        config.vision_model = vision_model;
    }
    write_config(&config, path).await?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        let config = load_config(&path).await.unwrap();
        assert_eq!(config, AssistantConfig::default());
    }

    #[tokio::test]
    async fn resolve_persists_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());

        let first = resolve(&path, Some("model-x".into()), None).await.unwrap();
        assert_eq!(first.model, "model-x");
        assert_eq!(first.vision_model, crate::schema::DEFAULT_VISION_MODEL);

        // A later resolve with no override must pick up the stored model.
        let second = resolve(&path, None, None).await.unwrap();
        assert_eq!(second.model, "model-x");

        let on_disk = load_config(&path).await.unwrap();
        assert_eq!(on_disk, second);
    }

    #[tokio::test]
    async fn resolve_is_idempotent_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());

        resolve(&path, Some("model-x".into()), Some("vision-y".into())).await.unwrap();
        let bytes_a = tokio::fs::read(&path).await.unwrap();
        resolve(&path, Some("model-x".into()), Some("vision-y".into())).await.unwrap();
        let bytes_b = tokio::fs::read(&path).await.unwrap();
        assert_eq!(bytes_a, bytes_b);
    }

    #[test]
    fn config_path_is_version_scoped() {
        let path = config_file_path(Path::new("/tmp/x"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("config_cellmate_"));
        assert!(name.contains(env!("CARGO_PKG_VERSION")));
        assert!(name.ends_with(".yaml"));
    }
}
