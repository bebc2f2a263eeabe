//! RAG orchestration engine.
//!
//! One entry point per user interaction: classify the query, then either
//! answer from a canned reply, build the institute listing, or run the full
//! retrieve-assemble-complete pipeline.

use super::context::assemble_context;
use super::prompt::build_messages;
use super::{cost, intent, CostBreakdown, InstituteSummary, Intent, TokenUsage};
use crate::config::Prompts;
use crate::embedding::Embedder;
use crate::error::{AsanaError, Result};
use crate::openai::create_client;
use crate::session::ChatTurn;
use crate::vector_store::{InstitutePayload, VectorStore};
use async_openai::types::{ChatCompletionRequestMessage, CreateChatCompletionRequestArgs};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Generic probe query used to approximate "list all" over a similarity
/// index, which has no enumeration primitive. Every institute must land in
/// the top results of this query for the listing to be complete.
const LIST_PROBE_QUERY: &str = "list all certified yoga institutes with locations";

/// The outcome of one user interaction.
///
/// Usage and cost are present together when the completion provider was
/// invoked, absent together otherwise.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub answer: String,
    pub usage: Option<TokenUsage>,
    pub cost: Option<CostBreakdown>,
}

impl ChatOutcome {
    fn canned(answer: String) -> Self {
        Self {
            answer,
            usage: None,
            cost: None,
        }
    }
}

/// RAG engine for the institute assistant.
pub struct RagEngine {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    vector_store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    prompts: Prompts,
    top_k: usize,
    list_probe_limit: usize,
}

impl RagEngine {
    /// Create a new RAG engine.
    pub fn new(
        vector_store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
        model: &str,
        top_k: usize,
    ) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            vector_store,
            embedder,
            prompts: Prompts::default(),
            top_k,
            list_probe_limit: 100,
        }
    }

    /// Set custom prompts and canned replies.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set the result limit for the "list all" probe query.
    pub fn with_list_probe_limit(mut self, limit: usize) -> Self {
        self.list_probe_limit = limit;
        self
    }

    /// Answer one query given the conversation so far.
    ///
    /// The caller owns the session log; this method never mutates state and
    /// resolves fully or fails fatally for the request.
    #[instrument(skip(self, history), fields(turns = history.len()))]
    pub async fn ask(&self, query: &str, history: &[ChatTurn]) -> Result<ChatOutcome> {
        match intent::classify(query, history.is_empty()) {
            Intent::Greeting => {
                info!("Greeting on first turn, returning welcome reply");
                Ok(ChatOutcome::canned(self.prompts.replies.welcome.clone()))
            }

            Intent::ListRequest => {
                info!("List request, enumerating institutes");
                let institutes = self.list_institutes().await?;
                if institutes.is_empty() {
                    Ok(ChatOutcome::canned(self.prompts.replies.no_institutes.clone()))
                } else {
                    Ok(ChatOutcome::canned(self.format_institute_list(&institutes)))
                }
            }

            Intent::ContentQuery => self.answer_with_context(query, history).await,
        }
    }

    /// The full retrieval pipeline for a content query.
    async fn answer_with_context(&self, query: &str, history: &[ChatTurn]) -> Result<ChatOutcome> {
        let query_embedding = self.embedder.embed(query).await?;
        let records = self.vector_store.search(&query_embedding, self.top_k).await?;

        debug!("Retrieved {} records", records.len());

        let context = assemble_context(&records);
        if context.trim().is_empty() {
            info!("No usable context retrieved, returning fallback reply");
            return Ok(ChatOutcome::canned(self.prompts.replies.no_context.clone()));
        }

        let messages = build_messages(&self.prompts, &context, history, query)?;
        let (answer, usage) = self.complete(messages).await?;
        let cost = usage.as_ref().map(cost::calculate);

        Ok(ChatOutcome { answer, usage, cost })
    }

    /// Invoke the completion provider once, non-streaming.
    async fn complete(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<(String, Option<TokenUsage>)> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .build()
            .map_err(|e| AsanaError::Rag(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AsanaError::OpenAI(format!("Failed to generate response: {}", e)))?;

        let answer = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| AsanaError::Rag("Empty response from LLM".to_string()))?
            .clone();

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok((answer, usage))
    }

    /// Enumerate distinct institutes via a broad similarity probe.
    ///
    /// Deduplicates by institute name, keeping the first occurrence and its
    /// order. Hits without a name are skipped.
    #[instrument(skip(self))]
    pub async fn list_institutes(&self) -> Result<Vec<InstituteSummary>> {
        let probe_embedding = self.embedder.embed(LIST_PROBE_QUERY).await?;
        let records = self
            .vector_store
            .search(&probe_embedding, self.list_probe_limit)
            .await?;

        let mut seen = HashSet::new();
        let mut institutes = Vec::new();

        for record in records {
            let Some(name) = record.payload.institute_name.clone() else {
                continue;
            };
            if !seen.insert(name.clone()) {
                continue;
            }

            let payload = &record.payload;
            institutes.push(InstituteSummary {
                name,
                city: InstitutePayload::field_or_na(&payload.city).to_string(),
                state: InstitutePayload::field_or_na(&payload.state).to_string(),
                code: InstitutePayload::field_or_na(&payload.code).to_string(),
                website: InstitutePayload::field_or_na(&payload.website).to_string(),
            });
        }

        debug!("Deduplicated to {} institutes", institutes.len());
        Ok(institutes)
    }

    /// Render the institute listing reply text.
    fn format_institute_list(&self, institutes: &[InstituteSummary]) -> String {
        let mut listing = String::new();
        for inst in institutes {
            listing.push_str(&format!("\n{}\n", inst.name));
            listing.push_str(&format!("  Location: {}, {}\n", inst.city, inst.state));
            listing.push_str(&format!("  Code: {}\n", inst.code));
            listing.push_str(&format!("  Website: {}\n", inst.website));
        }

        format!(
            "{}\n{}\n\n{}",
            self.prompts.replies.list_header, listing, self.prompts.replies.list_footer
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_store::{InstitutePoint, MemoryVectorStore};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    /// Embedder that returns a fixed vector and counts invocations.
    struct MockEmbedder {
        calls: AtomicUsize,
    }

    impl MockEmbedder {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Embedder for MockEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1.0, 0.0, 0.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            self.calls.fetch_add(texts.len(), Ordering::SeqCst);
            Ok(texts.iter().map(|_| vec![1.0, 0.0, 0.0]).collect())
        }

        fn dimensions(&self) -> usize {
            3
        }
    }

    fn point(name: &str, content: Option<&str>) -> InstitutePoint {
        InstitutePoint {
            id: Uuid::new_v4(),
            embedding: vec![1.0, 0.0, 0.0],
            payload: InstitutePayload {
                institute_name: Some(name.to_string()),
                city: Some("Cachar".to_string()),
                state: Some("Assam".to_string()),
                code: Some("YC23099".to_string()),
                website: Some("www.niramayayoga.org".to_string()),
                content: content.map(|c| c.to_string()),
                ..Default::default()
            },
        }
    }

    fn engine_with(
        store: Arc<MemoryVectorStore>,
        embedder: Arc<MockEmbedder>,
    ) -> RagEngine {
        RagEngine::new(store, embedder, "gpt-4o-mini", 4)
    }

    #[tokio::test]
    async fn test_greeting_first_turn_makes_no_external_calls() {
        let store = Arc::new(MemoryVectorStore::new());
        let embedder = Arc::new(MockEmbedder::new());
        let engine = engine_with(store, embedder.clone());

        let outcome = engine.ask("Hello", &[]).await.unwrap();

        assert_eq!(outcome.answer, Prompts::default().replies.welcome);
        assert!(outcome.usage.is_none());
        assert!(outcome.cost.is_none());
        assert_eq!(embedder.call_count(), 0);
    }

    #[tokio::test]
    async fn test_list_request_deduplicates_by_name() {
        let store = Arc::new(MemoryVectorStore::new());
        store
            .upsert_batch(&[
                point("Niramaya", Some("Niramaya content")),
                point("Niramaya", Some("Niramaya duplicate")),
                point("Athayog", Some("Athayog content")),
            ])
            .await
            .unwrap();

        let embedder = Arc::new(MockEmbedder::new());
        let engine = engine_with(store, embedder.clone());

        let institutes = engine.list_institutes().await.unwrap();
        assert_eq!(institutes.len(), 2);
        assert_eq!(embedder.call_count(), 1);

        let outcome = engine.ask("What institutes are available?", &[]).await.unwrap();
        assert!(outcome.usage.is_none());
        assert_eq!(outcome.answer.matches("Niramaya\n").count(), 1);
        assert!(outcome.answer.contains("Athayog"));
        assert!(outcome.answer.contains("Location: Cachar, Assam"));
    }

    #[tokio::test]
    async fn test_list_request_with_empty_store_uses_fallback() {
        let store = Arc::new(MemoryVectorStore::new());
        let embedder = Arc::new(MockEmbedder::new());
        let engine = engine_with(store, embedder);

        let outcome = engine.ask("show institutes", &[]).await.unwrap();
        assert_eq!(outcome.answer, Prompts::default().replies.no_institutes);
        assert!(outcome.usage.is_none());
    }

    #[tokio::test]
    async fn test_content_query_without_context_uses_fallback() {
        let store = Arc::new(MemoryVectorStore::new());
        // A record exists but carries no content field.
        store
            .upsert_batch(&[point("Niramaya", None)])
            .await
            .unwrap();

        let embedder = Arc::new(MockEmbedder::new());
        let engine = engine_with(store, embedder.clone());

        let outcome = engine
            .ask("What is the validity of Niramaya's certification?", &[])
            .await
            .unwrap();

        assert_eq!(outcome.answer, Prompts::default().replies.no_context);
        assert!(outcome.usage.is_none());
        // Retrieval still happened.
        assert_eq!(embedder.call_count(), 1);
    }

    #[tokio::test]
    async fn test_greeting_with_history_reaches_retrieval() {
        let store = Arc::new(MemoryVectorStore::new());
        let embedder = Arc::new(MockEmbedder::new());
        let engine = engine_with(store, embedder.clone());

        let history = vec![ChatTurn::user("earlier question")];
        // Empty store means the content path ends at the no-context fallback
        // instead of calling the completion provider.
        let outcome = engine.ask("Hello", &history).await.unwrap();

        assert_eq!(outcome.answer, Prompts::default().replies.no_context);
        assert_eq!(embedder.call_count(), 1);
    }
}
