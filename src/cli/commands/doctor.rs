//! Doctor command - verify credentials, configuration, and connectivity.

use crate::cli::Output;
use crate::config::{Credentials, Settings};
use crate::vector_store::QdrantVectorStore;
use console::style;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Asana Doctor");
    println!();
    println!("Checking credentials and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("Credentials").bold());
    checks.push(check_env_key("OPENAI_API_KEY"));
    checks.push(check_env_key("QDRANT_URL"));
    checks.push(check_env_key("QDRANT_API_KEY"));
    for check in &checks {
        check.print();
    }

    println!();

    println!("{}", style("Vector Store").bold());
    let store_check = check_qdrant(settings).await;
    store_check.print();
    checks.push(store_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Asana.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Asana is ready to use.");
    }

    Ok(())
}

/// Check a single required environment variable.
fn check_env_key(name: &str) -> CheckResult {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            let masked = if value.len() > 12 {
                format!("{}...{}", &value[..6], &value[value.len() - 4..])
            } else {
                "configured".to_string()
            };
            CheckResult::ok(name, &format!("configured ({})", masked))
        }
        Ok(_) => CheckResult::error(
            name,
            "empty",
            &format!("Set with: export {}='...'", name),
        ),
        Err(_) => CheckResult::error(
            name,
            "not set",
            &format!("Set with: export {}='...'", name),
        ),
    }
}

/// Check Qdrant reachability and collection state.
async fn check_qdrant(settings: &Settings) -> CheckResult {
    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(_) => {
            return CheckResult::warning(
                "Qdrant",
                "skipped (credentials missing)",
                "Set QDRANT_URL and QDRANT_API_KEY first",
            );
        }
    };

    let store = match QdrantVectorStore::new(
        &credentials.qdrant_url,
        &credentials.qdrant_api_key,
        &settings.vector_store.collection,
    ) {
        Ok(s) => s,
        Err(e) => return CheckResult::error("Qdrant", &format!("{}", e), "Check QDRANT_URL"),
    };

    match store.collection_exists().await {
        Ok(true) => {
            use crate::vector_store::VectorStore;
            match store.count().await {
                Ok(count) => CheckResult::ok(
                    "Qdrant",
                    &format!(
                        "collection '{}' reachable ({} points)",
                        settings.vector_store.collection, count
                    ),
                ),
                Err(e) => CheckResult::error("Qdrant", &format!("{}", e), "Check QDRANT_API_KEY"),
            }
        }
        Ok(false) => CheckResult::warning(
            "Qdrant",
            &format!("collection '{}' missing", settings.vector_store.collection),
            "Populate with: asana seed",
        ),
        Err(e) => CheckResult::error("Qdrant", &format!("{}", e), "Check QDRANT_URL and QDRANT_API_KEY"),
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: asana config edit",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }
}
