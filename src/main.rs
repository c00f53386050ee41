//! crash-context - inspect the context snapshot left by the previous run.
//!
//! Loads the stored snapshot, decodes it and prints it in normalized form.
//! Exits with status 2 on configuration errors and 1 when the store cannot
//! be read. An unreadable snapshot is reported and treated as absent.

use crash_context::adapters::storage::FileContextStore;
use crash_context::config::{AppConfig, LoggingConfig};
use crash_context::domain::snapshot::ContextSnapshot;
use crash_context::ports::ContextStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    if logging.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn main() {
    let config = match AppConfig::load().map_err(|e| e.to_string()).and_then(|config| {
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("crash-context: {err}");
            std::process::exit(2);
        }
    };

    init_tracing(&config.logging);

    let store = FileContextStore::new(&config.storage.directory, config.storage.file_name.clone());
    let bytes = match store.load() {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            info!(path = %store.file_path().display(), "No prior context");
            return;
        }
        Err(e) => {
            eprintln!("crash-context: {e}");
            std::process::exit(1);
        }
    };

    let snapshot = match ContextSnapshot::decode(&bytes) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "Stored snapshot is unreadable, treating as no prior context");
            return;
        }
    };

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("crash-context: {e}");
            std::process::exit(1);
        }
    }
}
