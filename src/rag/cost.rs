//! Cost estimation from token usage.

use super::{CostBreakdown, TokenUsage};

/// GPT-4o-mini input price, USD per million tokens.
pub const INPUT_PRICE_PER_MILLION: f64 = 0.150;

/// GPT-4o-mini output price, USD per million tokens.
pub const OUTPUT_PRICE_PER_MILLION: f64 = 0.600;

/// Derive a cost estimate from token usage.
///
/// The rates are tied to GPT-4o-mini pricing and must stay exact for
/// numeric compatibility with recorded session totals.
pub fn calculate(usage: &TokenUsage) -> CostBreakdown {
    let input_cost = f64::from(usage.prompt_tokens) / 1_000_000.0 * INPUT_PRICE_PER_MILLION;
    let output_cost = f64::from(usage.completion_tokens) / 1_000_000.0 * OUTPUT_PRICE_PER_MILLION;

    CostBreakdown {
        input_cost,
        output_cost,
        total_cost: input_cost + output_cost,
    }
}
