//! List command implementation.

use super::build_engine;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the list command: enumerate the certified institutes.
pub async fn run_list(settings: Settings) -> Result<()> {
    let engine = build_engine(&settings, None)?;

    let spinner = Output::spinner("Fetching institutes...");

    match engine.list_institutes().await {
        Ok(institutes) => {
            spinner.finish_and_clear();

            if institutes.is_empty() {
                Output::info("No institutes found. Use 'asana seed' to populate the database.");
            } else {
                Output::header(&format!("Certified Institutes ({})", institutes.len()));
                println!();

                for inst in &institutes {
                    Output::institute(&inst.name, &inst.city, &inst.state, &inst.code, &inst.website);
                }
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to list institutes: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
