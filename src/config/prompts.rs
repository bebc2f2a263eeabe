//! Prompt templates and canned replies for Asana.
//!
//! Prompts can be customized by placing TOML files in a custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates and canned reply texts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub rag: RagPrompts,
    pub replies: CannedReplies,
}

/// Prompts for RAG response generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagPrompts {
    /// System message template. `{{context}}` is replaced with the
    /// assembled retrieval context.
    pub system: String,
}

impl Default for RagPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a professional Yoga AI Assistant for certified yoga institutes. Your role is to provide accurate, helpful, and professional information.

IMPORTANT INSTRUCTIONS:
1. Answer questions ONLY about the specific institute mentioned in the user's query
2. Use ONLY the information provided in the context below
3. Be professional, clear, and concise
4. If the context doesn't contain information about the specific institute asked, politely say so
5. Format pricing and schedules clearly
6. Always maintain a helpful and welcoming tone
7. Remember the conversation history and provide contextual responses

Context from database:
{{context}}"#
                .to_string(),
        }
    }
}

/// Fixed reply texts for the non-RAG paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CannedReplies {
    /// Reply to a greeting on the first turn of a session.
    pub welcome: String,
    /// Reply when retrieval produced no usable context.
    pub no_context: String,
    /// Reply when the institute listing came back empty.
    pub no_institutes: String,
    /// Reply shown alongside an error so no request goes unanswered.
    pub failure: String,
    /// Text preceding the formatted institute listing.
    pub list_header: String,
    /// Text following the formatted institute listing.
    pub list_footer: String,
}

impl Default for CannedReplies {
    fn default() -> Self {
        Self {
            welcome: r#"Welcome to the Yoga AI Assistant!

I'm here to help you find information about yoga institutes, their classes, subscriptions, schedules, and more.

You can ask me about:
- Specific yoga institutes and their offerings
- Class schedules and timings
- Subscription plans and pricing
- Location details
- Special programs and workshops

Feel free to ask me anything about our certified yoga institutes, or simply ask "What institutes are available?" to see the full list.

How may I assist you today?"#
                .to_string(),

            no_context: r#"I don't have specific information about that in my database.

I can help you with information about our certified yoga institutes, including:
- Class schedules and timings
- Subscription plans and pricing
- Location details
- Special programs

You can ask "What institutes are available?" to see all certified institutes, or ask me about a specific institute you're interested in."#
                .to_string(),

            no_institutes: "I'm currently updating our institute database. Please try again in a moment, or ask me about a specific institute you're interested in."
                .to_string(),

            failure: "I couldn't process that request right now. Please try again in a moment."
                .to_string(),

            list_header: "Here are the certified and verified yoga institutes in our database:"
                .to_string(),

            list_footer: r#"These institutes are verified and offer professional yoga instruction. You can ask me specific questions about any of these institutes, such as their class schedules, subscription plans, or special programs.

Which institute would you like to know more about?"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from defaults, overridden by TOML files in `custom_dir`.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let rag_path = custom_path.join("rag.toml");
            if rag_path.exists() {
                let content = std::fs::read_to_string(&rag_path)?;
                prompts.rag = toml::from_str(&content)?;
            }

            let replies_path = custom_path.join("replies.toml");
            if replies_path.exists() {
                let content = std::fs::read_to_string(&replies_path)?;
                prompts.replies = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.rag.system.contains("{{context}}"));
        assert!(!prompts.replies.welcome.is_empty());
    }

    #[test]
    fn test_render_template() {
        let template = "Context from database:\n{{context}}";
        let mut vars = std::collections::HashMap::new();
        vars.insert("context".to_string(), "Institute Name: Niramaya".to_string());

        let result = Prompts::render(template, &vars);
        assert!(result.ends_with("Institute Name: Niramaya"));
    }
}
