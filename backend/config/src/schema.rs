use serde::{Deserialize, Serialize};

/// Model used when nothing is configured on disk or passed explicitly.
pub const DEFAULT_MODEL: &str = "gpt-4o-2024-05-13";
/// Vision model default; the same multimodal model by default.
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o-2024-05-13";

/// The persisted configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    pub model: String,
    pub vision_model: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
        }
    }
}
