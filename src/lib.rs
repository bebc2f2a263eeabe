//! Asana - Yoga Institute Assistant
//!
//! A retrieval-augmented chat assistant for a small catalog of certified
//! yoga institutes. Queries are classified by intent, grounded with records
//! retrieved from a vector store, and answered by a language model, with
//! token usage and cost tracked per session.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Settings, prompts, and environment credentials
//! - `embedding` - Embedding generation
//! - `vector_store` - Vector database abstraction (Qdrant, in-memory)
//! - `rag` - Intent classification, retrieval, prompting, and cost accounting
//! - `session` - Chat sessions and running totals
//! - `seed` - One-shot catalog seeding
//!
//! # Example
//!
//! ```rust,no_run
//! use asana::embedding::OpenAIEmbedder;
//! use asana::rag::RagEngine;
//! use asana::vector_store::QdrantVectorStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = Arc::new(QdrantVectorStore::new(
//!         "https://qdrant.example:6333",
//!         "api-key",
//!         "Institutes",
//!     )?);
//!     let embedder = Arc::new(OpenAIEmbedder::new());
//!
//!     let engine = RagEngine::new(store, embedder, "gpt-4o-mini", 4);
//!     let outcome = engine.ask("What institutes are available?", &[]).await?;
//!     println!("{}", outcome.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod openai;
pub mod rag;
pub mod seed;
pub mod session;
pub mod vector_store;

pub use error::{AsanaError, Result};
