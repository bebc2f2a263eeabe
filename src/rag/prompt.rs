//! Prompt construction for content queries.
//!
//! The neutral `ChatTurn` history type is translated to the provider's
//! message schema only here; nothing outside this module depends on
//! async-openai message types.

use crate::config::Prompts;
use crate::error::{AsanaError, Result};
use crate::session::{ChatTurn, Role};
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use std::collections::HashMap;

/// Number of most recent history turns carried into the prompt. Older turns
/// are dropped, not summarized; this caps token growth from long sessions.
pub const HISTORY_WINDOW: usize = 10;

/// Build the message sequence for one completion call.
///
/// Produces: one system message (behavioral instructions + assembled
/// context), at most the last [`HISTORY_WINDOW`] history turns oldest-first
/// with their original roles, and the current query as the final user
/// message. Deterministic for identical inputs.
pub fn build_messages(
    prompts: &Prompts,
    context: &str,
    history: &[ChatTurn],
    query: &str,
) -> Result<Vec<ChatCompletionRequestMessage>> {
    let mut vars = HashMap::new();
    vars.insert("context".to_string(), context.to_string());
    let system_text = Prompts::render(&prompts.rag.system, &vars);

    let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(history.len() + 2);

    messages.push(
        ChatCompletionRequestSystemMessageArgs::default()
            .content(system_text)
            .build()
            .map_err(|e| AsanaError::Rag(e.to_string()))?
            .into(),
    );

    let start = history.len().saturating_sub(HISTORY_WINDOW);
    for turn in &history[start..] {
        let message: ChatCompletionRequestMessage = match turn.role {
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(turn.text.clone())
                .build()
                .map_err(|e| AsanaError::Rag(e.to_string()))?
                .into(),
            Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(turn.text.clone())
                .build()
                .map_err(|e| AsanaError::Rag(e.to_string()))?
                .into(),
        };
        messages.push(message);
    }

    messages.push(
        ChatCompletionRequestUserMessageArgs::default()
            .content(query)
            .build()
            .map_err(|e| AsanaError::Rag(e.to_string()))?
            .into(),
    );

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(role: Role, text: &str) -> ChatTurn {
        match role {
            Role::User => ChatTurn::user(text),
            Role::Assistant => ChatTurn::assistant(text, None, None),
        }
    }

    fn system_content(message: &ChatCompletionRequestMessage) -> String {
        match message {
            ChatCompletionRequestMessage::System(m) => match &m.content {
                async_openai::types::ChatCompletionRequestSystemMessageContent::Text(t) => {
                    t.clone()
                }
                _ => panic!("expected text content"),
            },
            _ => panic!("expected system message"),
        }
    }

    fn user_content(message: &ChatCompletionRequestMessage) -> String {
        match message {
            ChatCompletionRequestMessage::User(m) => match &m.content {
                async_openai::types::ChatCompletionRequestUserMessageContent::Text(t) => t.clone(),
                _ => panic!("expected text content"),
            },
            _ => panic!("expected user message"),
        }
    }

    #[test]
    fn test_history_window_caps_at_ten_turns() {
        let prompts = Prompts::default();
        let history: Vec<ChatTurn> = (0..15)
            .map(|i| {
                if i % 2 == 0 {
                    turn(Role::User, &format!("question {}", i))
                } else {
                    turn(Role::Assistant, &format!("answer {}", i))
                }
            })
            .collect();

        let messages = build_messages(&prompts, "some context", &history, "final question").unwrap();

        // 1 system + 10 history + 1 query
        assert_eq!(messages.len(), 12);

        // Oldest of the surviving window is turn 5; turns 0-4 were dropped.
        match &messages[1] {
            ChatCompletionRequestMessage::Assistant(m) => {
                let content = m.content.as_ref().expect("assistant content");
                match content {
                    async_openai::types::ChatCompletionRequestAssistantMessageContent::Text(t) => {
                        assert_eq!(t, "answer 5");
                    }
                    _ => panic!("expected text content"),
                }
            }
            _ => panic!("expected assistant message for turn 5"),
        }

        assert_eq!(user_content(&messages[11]), "final question");
    }

    #[test]
    fn test_short_history_is_kept_whole() {
        let prompts = Prompts::default();
        let history = vec![
            turn(Role::User, "Hello"),
            turn(Role::Assistant, "Welcome!"),
        ];

        let messages = build_messages(&prompts, "", &history, "What about Athayog?").unwrap();
        assert_eq!(messages.len(), 4);
        assert_eq!(user_content(&messages[1]), "Hello");
    }

    #[test]
    fn test_context_is_embedded_verbatim_in_system_message() {
        let prompts = Prompts::default();
        let context = "Institute Name: Niramaya\nValidity: May, 2026\n";

        let messages = build_messages(
            &prompts,
            context,
            &[],
            "What is the validity of Niramaya's certification?",
        )
        .unwrap();

        let system = system_content(&messages[0]);
        assert!(system.contains("May, 2026"));
        assert!(system.contains("Context from database:"));
    }

    #[test]
    fn test_deterministic_for_identical_inputs() {
        let prompts = Prompts::default();
        let history = vec![turn(Role::User, "Hi"), turn(Role::Assistant, "Welcome!")];

        let a = build_messages(&prompts, "ctx", &history, "q").unwrap();
        let b = build_messages(&prompts, "ctx", &history, "q").unwrap();
        assert_eq!(format!("{:?}", a), format!("{:?}", b));
    }
}
