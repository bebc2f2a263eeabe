//! RAG (Retrieval-Augmented Generation) core for the institute assistant.
//!
//! Routes each query through intent classification, retrieval, context
//! assembly, prompt construction, completion, and cost accounting.

pub mod context;
pub mod cost;
mod engine;
pub mod intent;
pub mod prompt;

pub use engine::{ChatOutcome, RagEngine};
pub use intent::Intent;

use serde::{Deserialize, Serialize};

/// Token counts reported by the completion provider for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Monetary cost estimate derived from token usage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
}

/// One distinct institute in the "list all" reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstituteSummary {
    pub name: String,
    pub city: String,
    pub state: String,
    pub code: String,
    pub website: String,
}
