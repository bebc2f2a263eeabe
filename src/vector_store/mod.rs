//! Vector store abstraction for Asana.
//!
//! Provides a trait-based interface for different vector database backends.

mod memory;
mod qdrant;

pub use memory::MemoryVectorStore;
pub use qdrant::QdrantVectorStore;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload attached to an institute point in the vector store.
///
/// Matches the schema written by the seeding job. All descriptive fields are
/// optional because the store treats payloads as opaque maps; retrieval-side
/// code must tolerate partially populated records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstitutePayload {
    /// Institute name, unique within the corpus.
    pub institute_name: Option<String>,
    /// Certification code (e.g. "YC23099").
    pub code: Option<String>,
    /// Certification identifier.
    pub certification: Option<String>,
    /// Validity period, loosely formatted, may be "N/A".
    pub validity: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub website: Option<String>,
    /// Denormalized text blob used verbatim as retrieval context.
    pub content: Option<String>,
    /// Discriminator tag ("institute_metadata").
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl InstitutePayload {
    /// Return a descriptive field, or "N/A" when absent.
    pub fn field_or_na(field: &Option<String>) -> &str {
        field.as_deref().unwrap_or("N/A")
    }
}

/// An institute point as stored in the vector database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstitutePoint {
    /// Point ID. The seeding job derives this deterministically from the
    /// institute code so re-seeding overwrites rather than duplicates.
    pub id: Uuid,
    /// Embedding vector.
    pub embedding: Vec<f32>,
    /// Institute metadata payload.
    pub payload: InstitutePayload,
}

/// A similarity-search hit, most relevant first in the returned sequence.
#[derive(Debug, Clone)]
pub struct RetrievedInstitute {
    /// The matched payload.
    pub payload: InstitutePayload,
    /// Similarity score (higher is better).
    pub score: f32,
}

/// Trait for vector store implementations.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the collection if it does not exist yet.
    async fn ensure_collection(&self, dimensions: usize) -> Result<()>;

    /// Store institute points, overwriting points with the same ID.
    async fn upsert_batch(&self, points: &[InstitutePoint]) -> Result<usize>;

    /// Search for the closest stored points, ordered by descending
    /// similarity, at most `limit` results. Never mutates the store.
    async fn search(&self, query_embedding: &[f32], limit: usize)
        -> Result<Vec<RetrievedInstitute>>;

    /// Get total stored point count.
    async fn count(&self) -> Result<usize>;
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
