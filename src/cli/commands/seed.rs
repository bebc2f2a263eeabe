//! Seed command implementation.

use super::build_adapters;
use crate::cli::Output;
use crate::config::Settings;
use crate::seed;
use anyhow::Result;

/// Run the seed command: embed the institute catalog and upsert it.
pub async fn run_seed(settings: Settings) -> Result<()> {
    let adapters = match build_adapters(&settings) {
        Ok(adapters) => adapters,
        Err(e) => {
            Output::error(&format!("{}", e));
            Output::info("Run 'asana doctor' for detailed diagnostics.");
            return Err(e.into());
        }
    };

    let spinner = Output::spinner("Seeding institute catalog...");

    match seed::run(adapters.vector_store.as_ref(), adapters.embedder.as_ref()).await {
        Ok(count) => {
            spinner.finish_and_clear();
            Output::success(&format!(
                "Seeded {} institutes into collection '{}'.",
                count, settings.vector_store.collection
            ));
            for record in seed::catalog() {
                Output::list_item(&format!("{} - {}, {}", record.name, record.city, record.state));
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Seeding failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
