//! Ask command implementation.

use super::build_engine;
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the ask command: a one-shot question with no conversation history.
pub async fn run_ask(question: &str, model: Option<String>, settings: Settings) -> Result<()> {
    let engine = match build_engine(&settings, model) {
        Ok(engine) => engine,
        Err(e) => {
            Output::error(&format!("{}", e));
            Output::info("Run 'asana doctor' for detailed diagnostics.");
            return Err(e.into());
        }
    };

    let spinner = Output::spinner("Thinking...");

    match engine.ask(question, &[]).await {
        Ok(outcome) => {
            spinner.finish_and_clear();
            println!("\n{}\n", outcome.answer);

            if let Some(usage) = &outcome.usage {
                Output::usage(usage, outcome.cost.as_ref());
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
