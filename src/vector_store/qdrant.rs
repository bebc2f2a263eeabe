//! Qdrant vector store implementation.
//!
//! Talks to the Qdrant REST API directly. Only the small surface the
//! assistant needs is covered: collection creation, point upsert, similarity
//! query, and point count.

use super::{InstitutePayload, InstitutePoint, RetrievedInstitute, VectorStore};
use crate::error::{AsanaError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default timeout for Qdrant API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Qdrant-backed vector store.
pub struct QdrantVectorStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    collection: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    result: QueryResult,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    points: Vec<ScoredPoint>,
}

#[derive(Debug, Deserialize)]
struct ScoredPoint {
    score: f32,
    #[serde(default)]
    payload: Option<InstitutePayload>,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    result: CountResult,
}

#[derive(Debug, Deserialize)]
struct CountResult {
    count: usize,
}

impl QdrantVectorStore {
    /// Create a new Qdrant vector store client.
    pub fn new(url: &str, api_key: &str, collection: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| AsanaError::VectorStore(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            collection: collection.to_string(),
        })
    }

    fn collection_url(&self, suffix: &str) -> String {
        format!("{}/collections/{}{}", self.base_url, self.collection, suffix)
    }

    async fn check_status(&self, response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AsanaError::VectorStore(format!(
            "{} failed with status {}: {}",
            action, status, body
        )))
    }

    /// Check whether the collection exists.
    pub async fn collection_exists(&self) -> Result<bool> {
        let response = self
            .http
            .get(self.collection_url(""))
            .header("api-key", &self.api_key)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AsanaError::VectorStore(format!(
                    "Collection check failed with status {}: {}",
                    status, body
                )))
            }
        }
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    #[instrument(skip(self))]
    async fn ensure_collection(&self, dimensions: usize) -> Result<()> {
        if self.collection_exists().await? {
            debug!("Collection '{}' already exists", self.collection);
            return Ok(());
        }

        let body = json!({
            "vectors": {
                "size": dimensions,
                "distance": "Cosine",
            }
        });

        let response = self
            .http
            .put(self.collection_url(""))
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        self.check_status(response, "Collection create").await?;

        debug!("Created collection '{}'", self.collection);
        Ok(())
    }

    #[instrument(skip(self, points), fields(count = points.len()))]
    async fn upsert_batch(&self, points: &[InstitutePoint]) -> Result<usize> {
        if points.is_empty() {
            return Ok(0);
        }

        let body = json!({
            "points": points
                .iter()
                .map(|p| {
                    json!({
                        "id": p.id.to_string(),
                        "vector": p.embedding,
                        "payload": p.payload,
                    })
                })
                .collect::<Vec<_>>(),
        });

        let response = self
            .http
            .put(self.collection_url("/points?wait=true"))
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        self.check_status(response, "Point upsert").await?;

        Ok(points.len())
    }

    #[instrument(skip(self, query_embedding))]
    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<RetrievedInstitute>> {
        let body = json!({
            "query": query_embedding,
            "limit": limit,
            "with_payload": true,
        });

        let response = self
            .http
            .post(self.collection_url("/points/query"))
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = self.check_status(response, "Similarity query").await?;

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| AsanaError::VectorStore(format!("Invalid query response: {}", e)))?;

        debug!("Query returned {} points", parsed.result.points.len());

        Ok(parsed
            .result
            .points
            .into_iter()
            .map(|p| RetrievedInstitute {
                payload: p.payload.unwrap_or_default(),
                score: p.score,
            })
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        let response = self
            .http
            .post(self.collection_url("/points/count"))
            .header("api-key", &self.api_key)
            .json(&json!({ "exact": true }))
            .send()
            .await?;
        let response = self.check_status(response, "Point count").await?;

        let parsed: CountResponse = response
            .json()
            .await
            .map_err(|e| AsanaError::VectorStore(format!("Invalid count response: {}", e)))?;

        Ok(parsed.result.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_url() {
        let store = QdrantVectorStore::new("https://qdrant.example:6333/", "key", "Institutes")
            .unwrap();
        assert_eq!(
            store.collection_url("/points/query"),
            "https://qdrant.example:6333/collections/Institutes/points/query"
        );
    }

    #[test]
    fn test_query_response_parsing() {
        let json = r#"{
            "result": {
                "points": [
                    {"id": "a", "score": 0.91, "payload": {"institute_name": "Niramaya", "content": "Validity: May, 2026"}},
                    {"id": "b", "score": 0.55, "payload": null}
                ]
            },
            "status": "ok",
            "time": 0.002
        }"#;

        let parsed: QueryResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.result.points.len(), 2);
        assert_eq!(
            parsed.result.points[0]
                .payload
                .as_ref()
                .unwrap()
                .institute_name
                .as_deref(),
            Some("Niramaya")
        );
        assert!(parsed.result.points[1].payload.is_none());
    }
}
