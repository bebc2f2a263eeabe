//! Configuration module for Asana.
//!
//! Handles loading and managing application settings, prompt templates,
//! and required environment credentials.

mod prompts;
mod settings;

pub use prompts::{CannedReplies, Prompts, RagPrompts};
pub use settings::{
    ChatSettings, Credentials, EmbeddingSettings, GeneralSettings, PromptSettings, RagSettings,
    Settings, VectorStoreSettings,
};
