//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod doctor;
mod list;
mod seed;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use doctor::run_doctor;
pub use list::run_list;
pub use seed::run_seed;

use crate::cli::preflight;
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::Result;
use crate::rag::RagEngine;
use crate::vector_store::{QdrantVectorStore, VectorStore};
use std::sync::Arc;

/// The wired adapter pair shared by every command.
pub(crate) struct Adapters {
    pub vector_store: Arc<dyn VectorStore>,
    pub embedder: Arc<dyn Embedder>,
}

/// Run pre-flight checks and construct the external-service adapters.
pub(crate) fn build_adapters(settings: &Settings) -> Result<Adapters> {
    let credentials = preflight::check()?;

    let vector_store = Arc::new(QdrantVectorStore::new(
        &credentials.qdrant_url,
        &credentials.qdrant_api_key,
        &settings.vector_store.collection,
    )?);

    let embedder = Arc::new(OpenAIEmbedder::with_config(
        &settings.embedding.model,
        settings.embedding.dimensions as usize,
    ));

    Ok(Adapters {
        vector_store,
        embedder,
    })
}

/// Construct the RAG engine from settings, with an optional model override.
pub(crate) fn build_engine(settings: &Settings, model: Option<String>) -> Result<RagEngine> {
    let adapters = build_adapters(settings)?;
    let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
    let model = model.unwrap_or_else(|| settings.rag.model.clone());

    Ok(RagEngine::new(
        adapters.vector_store,
        adapters.embedder,
        &model,
        settings.rag.top_k as usize,
    )
    .with_prompts(prompts)
    .with_list_probe_limit(settings.rag.list_probe_limit as usize))
}
