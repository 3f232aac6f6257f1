//! CLI command implementations
//!
//! `init` writes a default config file and an empty data file. `start`
//! follows a strict boot sequence: load config, open store, build the
//! server, serve. Any boot failure propagates to main, which exits 1.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::http::{AppState, HttpServer};
use crate::observability::{log_event, log_event_with_fields, Event};
use crate::store::Store;

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config),
        Command::Start { config } => start(&config),
    }
}

/// Write a default config file and an empty data file
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::AlreadyInitialized(config_path.to_path_buf()));
    }

    let config = Config::default();
    let content = serde_json::to_string_pretty(&config).map_err(|e| {
        CliError::io(
            "failed to encode default config",
            std::io::Error::other(e),
        )
    })?;
    fs::write(config_path, content)
        .map_err(|e| CliError::io(format!("failed to write {:?}", config_path), e))?;

    // Create the data file so the first boot starts from a valid snapshot
    let store = Store::open(&config.data_path)?;
    store.flush()?;

    log_event_with_fields(
        Event::InitComplete,
        &[
            ("config", &config_path.display().to_string()),
            ("data", &config.data_path.display().to_string()),
        ],
    );
    Ok(())
}

/// Boot the service and serve until the process is stopped
pub fn start(config_path: &Path) -> CliResult<()> {
    log_event(Event::BootStart);

    let config = Config::load(config_path)?;
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("path", &config_path.display().to_string()),
            ("variant", &format!("{:?}", config.read_variant)),
        ],
    );

    let store = Store::open(&config.data_path)?;
    log_event_with_fields(
        Event::StoreOpened,
        &[("path", &config.data_path.display().to_string())],
    );

    let state = Arc::new(AppState::new(store, config.read_variant));
    let server = HttpServer::new(config, state);

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::io("failed to start runtime", e))?;
    runtime
        .block_on(server.start())
        .map_err(|e| CliError::io("server error", e))
}
