//! Interactive chat command with session management.

use super::build_engine;
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::rag::RagEngine;
use crate::session::{ChatTurn, SessionManager};
use console::style;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Run the interactive chat command.
pub async fn run_chat(model: Option<String>, single: bool, settings: Settings) -> Result<()> {
    let engine = match build_engine(&settings, model) {
        Ok(engine) => engine,
        Err(e) => {
            Output::error(&format!("{}", e));
            Output::info("Run 'asana doctor' for detailed diagnostics.");
            return Err(e);
        }
    };

    let multi_session = settings.chat.multi_session && !single;
    let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
    let mut manager = SessionManager::new();

    println!("\n{}", style("Asana Chat").bold().cyan());
    if multi_session {
        println!(
            "{}\n",
            style("Ask about yoga institutes. Commands: 'new', 'sessions', 'switch <n>', 'delete <n>', 'stats', 'exit'.")
                .dim()
        );
    } else {
        println!(
            "{}\n",
            style("Ask about yoga institutes. Commands: 'clear', 'stats', 'exit'.").dim()
        );
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("stats") {
            print_stats(&manager, multi_session);
            continue;
        }

        if multi_session {
            if handle_session_command(&mut manager, input)? {
                continue;
            }
        } else if input.eq_ignore_ascii_case("clear") {
            let old = manager.active().id;
            manager.create_session();
            manager.delete_session(old)?;
            Output::info("Conversation cleared.");
            continue;
        }

        send_message(&engine, &mut manager, &prompts, input).await;
    }

    Ok(())
}

/// Handle a multi-session command. Returns true if the input was consumed.
fn handle_session_command(manager: &mut SessionManager, input: &str) -> Result<bool> {
    if input.eq_ignore_ascii_case("new") {
        manager.create_session();
        Output::info(&format!("Started {}.", manager.active().name));
        return Ok(true);
    }

    if input.eq_ignore_ascii_case("sessions") {
        print_sessions(manager);
        return Ok(true);
    }

    if let Some(arg) = input.strip_prefix("switch ") {
        match session_at(manager, arg) {
            Some(id) => {
                manager.set_active(id)?;
                Output::info(&format!("Switched to {}.", manager.active().name));
            }
            None => Output::warning("Usage: switch <n> (see 'sessions')"),
        }
        return Ok(true);
    }

    if let Some(arg) = input.strip_prefix("delete ") {
        match session_at(manager, arg) {
            Some(id) => {
                manager.delete_session(id)?;
                Output::info(&format!("Deleted. Active session is now {}.", manager.active().name));
            }
            None => Output::warning("Usage: delete <n> (see 'sessions')"),
        }
        return Ok(true);
    }

    Ok(false)
}

/// Resolve a 1-based session index as displayed by 'sessions'.
fn session_at(manager: &SessionManager, arg: &str) -> Option<uuid::Uuid> {
    let index: usize = arg.trim().parse().ok()?;
    manager.sessions().get(index.checked_sub(1)?).map(|s| s.id)
}

fn print_sessions(manager: &SessionManager) {
    Output::header("Sessions");
    let active_id = manager.active().id;
    for (i, session) in manager.sessions().iter().enumerate() {
        let marker = if session.id == active_id { "*" } else { " " };
        println!(
            "  {} {} {} - {}",
            marker,
            style(format!("[{}]", i + 1)).dim(),
            style(&session.name).bold(),
            session.preview()
        );
    }
}

fn print_stats(manager: &SessionManager, multi_session: bool) {
    Output::header("Statistics");
    let totals = manager.totals();
    Output::totals("This session", totals.tokens, totals.cost);

    if multi_session {
        let aggregate = manager.aggregate_totals();
        Output::totals("All sessions", aggregate.tokens, aggregate.cost);
    }
    println!(
        "{}",
        style("  GPT-4o-mini: $0.150/1M input, $0.600/1M output").dim()
    );
}

/// Send one message through the engine and record the turn.
async fn send_message(
    engine: &RagEngine,
    manager: &mut SessionManager,
    prompts: &Prompts,
    input: &str,
) {
    let history = manager.active().turns.clone();
    debug!("Sending message with {} history turns", history.len());

    let spinner = Output::spinner("Thinking...");

    match engine.ask(input, &history).await {
        Ok(outcome) => {
            spinner.finish_and_clear();

            println!("\n{} {}\n", style("Asana:").cyan().bold(), outcome.answer);
            if let Some(usage) = &outcome.usage {
                Output::usage(usage, outcome.cost.as_ref());
            }

            manager.append_turn(ChatTurn::user(input));
            manager.append_turn(ChatTurn::assistant(
                &outcome.answer,
                outcome.usage,
                outcome.cost,
            ));
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Error: {}", e));
            // Every request still gets a textual reply.
            println!("\n{} {}\n", style("Asana:").cyan().bold(), prompts.replies.failure);
        }
    }
}
