//! In-memory vector store implementation.
//!
//! Useful for testing and local experiments.

use super::{cosine_similarity, InstitutePoint, RetrievedInstitute, VectorStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory vector store.
pub struct MemoryVectorStore {
    points: RwLock<HashMap<Uuid, InstitutePoint>>,
}

impl MemoryVectorStore {
    /// Create a new in-memory vector store.
    pub fn new() -> Self {
        Self {
            points: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn ensure_collection(&self, _dimensions: usize) -> Result<()> {
        Ok(())
    }

    async fn upsert_batch(&self, points: &[InstitutePoint]) -> Result<usize> {
        let mut store = self.points.write().unwrap();
        for point in points {
            store.insert(point.id, point.clone());
        }
        Ok(points.len())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<RetrievedInstitute>> {
        let points = self.points.read().unwrap();

        let mut results: Vec<RetrievedInstitute> = points
            .values()
            .map(|point| RetrievedInstitute {
                payload: point.payload.clone(),
                score: cosine_similarity(query_embedding, &point.embedding),
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(limit);

        Ok(results)
    }

    async fn count(&self) -> Result<usize> {
        let points = self.points.read().unwrap();
        Ok(points.len())
    }
}
