pub mod error;
pub mod message;
pub mod task;
pub mod traits;
pub mod types;

pub use error::AssistantError;
pub use message::{ChatMessage, Role};
pub use task::TaskKind;
pub use traits::{LlmProvider, LlmRequest, LlmResponse};
pub use types::{ImageAttachment, NamespaceValue};
