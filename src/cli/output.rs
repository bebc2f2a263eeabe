//! CLI output formatting utilities.

use crate::rag::{CostBreakdown, TokenUsage};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print one institute row of the listing.
    pub fn institute(name: &str, city: &str, state: &str, code: &str, website: &str) {
        println!("  {} {}", style("*").cyan(), style(name).bold());
        println!("      Location: {}, {}", city, state);
        println!("      Code: {}", code);
        println!("      Website: {}", style(website).dim());
    }

    /// Print the token usage and cost of one assistant turn.
    pub fn usage(usage: &TokenUsage, cost: Option<&CostBreakdown>) {
        println!(
            "{}",
            style(format!(
                "  [tokens: {} in / {} out / {} total]",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            ))
            .dim()
        );
        if let Some(cost) = cost {
            println!("{}", style(format!("  [cost: ${:.6}]", cost.total_cost)).dim());
        }
    }

    /// Print session totals.
    pub fn totals(label: &str, tokens: u64, cost: f64) {
        println!("  {}: {} tokens, ${:.6}", style(label).dim(), tokens, cost);
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}
