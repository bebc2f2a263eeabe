//! Chat sessions and the in-memory session store.
//!
//! The session manager is an explicit object owned by the caller and passed
//! where needed; there is no ambient global state. The manager guarantees it
//! always holds at least one session and that the active pointer references a
//! session it owns.

use crate::error::{AsanaError, Result};
use crate::rag::{CostBreakdown, TokenUsage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum preview length for a session title.
const PREVIEW_LEN: usize = 40;

/// Role of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in a conversation.
///
/// Usage and cost are attached only to assistant turns that invoked the
/// completion provider; they are present together or absent together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
    pub usage: Option<TokenUsage>,
    pub cost: Option<CostBreakdown>,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    /// Create a user turn.
    pub fn user(text: &str) -> Self {
        Self {
            role: Role::User,
            text: text.to_string(),
            usage: None,
            cost: None,
            created_at: Utc::now(),
        }
    }

    /// Create an assistant turn, optionally carrying usage and cost.
    pub fn assistant(text: &str, usage: Option<TokenUsage>, cost: Option<CostBreakdown>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.to_string(),
            usage,
            cost,
            created_at: Utc::now(),
        }
    }
}

/// An ordered conversation with running token and cost totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub name: String,
    pub turns: Vec<ChatTurn>,
    pub created_at: DateTime<Utc>,
    pub total_tokens: u64,
    pub total_cost: f64,
}

impl ChatSession {
    fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            turns: Vec::new(),
            created_at: Utc::now(),
            total_tokens: 0,
            total_cost: 0.0,
        }
    }

    /// Short preview text: the first user message, truncated.
    pub fn preview(&self) -> String {
        let first_user = self
            .turns
            .iter()
            .find(|t| t.role == Role::User)
            .map(|t| t.text.as_str())
            .unwrap_or("New chat");

        if first_user.chars().count() > PREVIEW_LEN {
            let truncated: String = first_user.chars().take(PREVIEW_LEN).collect();
            format!("{}...", truncated)
        } else {
            first_user.to_string()
        }
    }
}

/// Session totals (tokens and cost).
#[derive(Debug, Clone, Copy, Default)]
pub struct Totals {
    pub tokens: u64,
    pub cost: f64,
}

/// In-memory store of chat sessions with an active-session pointer.
pub struct SessionManager {
    sessions: Vec<ChatSession>,
    active: Uuid,
    created_count: usize,
}

impl SessionManager {
    /// Create a manager holding one fresh session.
    pub fn new() -> Self {
        let session = ChatSession::new("Chat 1".to_string());
        let active = session.id;
        Self {
            sessions: vec![session],
            active,
            created_count: 1,
        }
    }

    /// Create a new session, make it active, and return its ID.
    ///
    /// New sessions are inserted at the front of the list.
    pub fn create_session(&mut self) -> Uuid {
        self.created_count += 1;
        let session = ChatSession::new(format!("Chat {}", self.created_count));
        let id = session.id;
        self.sessions.insert(0, session);
        self.active = id;
        id
    }

    /// Delete a session.
    ///
    /// The store never becomes empty: deleting the last remaining session
    /// replaces it with a fresh default one. If the active session is
    /// deleted, the pointer moves to the first remaining session.
    pub fn delete_session(&mut self, id: Uuid) -> Result<()> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AsanaError::Session(format!("No session with ID {}", id)))?;

        self.sessions.remove(index);

        if self.sessions.is_empty() {
            self.created_count += 1;
            let session = ChatSession::new(format!("Chat {}", self.created_count));
            self.active = session.id;
            self.sessions.push(session);
        } else if self.active == id {
            self.active = self.sessions[0].id;
        }

        Ok(())
    }

    /// Make a session active.
    pub fn set_active(&mut self, id: Uuid) -> Result<()> {
        if !self.sessions.iter().any(|s| s.id == id) {
            return Err(AsanaError::Session(format!("No session with ID {}", id)));
        }
        self.active = id;
        Ok(())
    }

    /// The active session.
    pub fn active(&self) -> &ChatSession {
        self.sessions
            .iter()
            .find(|s| s.id == self.active)
            .expect("active pointer references an owned session")
    }

    /// All sessions, most recently created first.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    /// Append a turn to the active session, updating running totals.
    pub fn append_turn(&mut self, turn: ChatTurn) {
        let active = self.active;
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == active)
            .expect("active pointer references an owned session");

        if let Some(usage) = &turn.usage {
            session.total_tokens += u64::from(usage.total_tokens);
        }
        if let Some(cost) = &turn.cost {
            session.total_cost += cost.total_cost;
        }
        session.turns.push(turn);
    }

    /// Totals for the active session.
    pub fn totals(&self) -> Totals {
        let session = self.active();
        Totals {
            tokens: session.total_tokens,
            cost: session.total_cost,
        }
    }

    /// Totals across all sessions.
    pub fn aggregate_totals(&self) -> Totals {
        Totals {
            tokens: self.sessions.iter().map(|s| s.total_tokens).sum(),
            cost: self.sessions.iter().map(|s| s.total_cost).sum(),
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::cost;

    #[test]
    fn test_manager_starts_with_one_session() {
        let manager = SessionManager::new();
        assert_eq!(manager.sessions().len(), 1);
        assert_eq!(manager.active().name, "Chat 1");
    }

    #[test]
    fn test_create_session_becomes_active() {
        let mut manager = SessionManager::new();
        let id = manager.create_session();
        assert_eq!(manager.active().id, id);
        assert_eq!(manager.sessions().len(), 2);
        // Newest first
        assert_eq!(manager.sessions()[0].id, id);
    }

    #[test]
    fn test_delete_active_reassigns_pointer() {
        let mut manager = SessionManager::new();
        let first = manager.active().id;
        let second = manager.create_session();

        manager.delete_session(second).unwrap();
        assert_eq!(manager.active().id, first);
    }

    #[test]
    fn test_delete_last_session_creates_fresh_one() {
        let mut manager = SessionManager::new();
        let second = manager.create_session();
        let first = manager.sessions()[1].id;

        manager.delete_session(first).unwrap();
        manager.delete_session(second).unwrap();

        // Never empty; a fresh default session takes over.
        assert_eq!(manager.sessions().len(), 1);
        assert_eq!(manager.active().id, manager.sessions()[0].id);
        assert!(manager.active().turns.is_empty());
    }

    #[test]
    fn test_delete_unknown_session_fails() {
        let mut manager = SessionManager::new();
        assert!(manager.delete_session(Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_append_turn_updates_totals() {
        let mut manager = SessionManager::new();
        manager.append_turn(ChatTurn::user("What is Athayog?"));

        let usage = TokenUsage {
            prompt_tokens: 700,
            completion_tokens: 300,
            total_tokens: 1000,
        };
        let breakdown = cost::calculate(&usage);
        manager.append_turn(ChatTurn::assistant("Athayog is...", Some(usage), Some(breakdown)));

        let totals = manager.totals();
        assert_eq!(totals.tokens, 1000);
        assert!((totals.cost - breakdown.total_cost).abs() < 1e-12);

        // Turns without usage leave totals unchanged.
        manager.append_turn(ChatTurn::assistant("Welcome!", None, None));
        assert_eq!(manager.totals().tokens, 1000);
    }

    #[test]
    fn test_aggregate_totals_span_sessions() {
        let mut manager = SessionManager::new();
        let usage = TokenUsage {
            prompt_tokens: 100,
            completion_tokens: 100,
            total_tokens: 200,
        };
        manager.append_turn(ChatTurn::assistant("a", Some(usage), Some(cost::calculate(&usage))));

        manager.create_session();
        manager.append_turn(ChatTurn::assistant("b", Some(usage), Some(cost::calculate(&usage))));

        assert_eq!(manager.totals().tokens, 200);
        assert_eq!(manager.aggregate_totals().tokens, 400);
    }

    #[test]
    fn test_session_preview() {
        let mut manager = SessionManager::new();
        assert_eq!(manager.active().preview(), "New chat");

        manager.append_turn(ChatTurn::user("Hi"));
        assert_eq!(manager.active().preview(), "Hi");

        let mut manager = SessionManager::new();
        let long = "What is the Group Classes Subscription for Indiranagar?";
        manager.append_turn(ChatTurn::user(long));
        let preview = manager.active().preview();
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 43);
    }
}
