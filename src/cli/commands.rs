//! CLI command implementations

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::json;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_candidate, write_json};
use crate::http_server::HttpServer;
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::service::RecordService;
use crate::store::open_store;
use crate::validation::{validate_for_create, validate_for_update, FieldDefect};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Check { file, update } => check(file.as_deref(), update),
        Command::InitConfig { config } => init_config(&config),
    }
}

/// Open the configured store and serve HTTP until interrupted.
///
/// 1. Load and validate configuration
/// 2. Open the store
/// 3. Run the axum server on a tokio runtime
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }
    Logger::set_min_severity(config.logging.level);

    let storage = config.storage.describe();
    let addr = config
        .http
        .listen_addr()
        .map_err(|e| CliError::config_error(e.to_string()))?
        .to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("addr", addr.as_str()), ("storage", storage.as_str())],
    );

    let store = open_store(&config.storage)?;
    log_event_with_fields(Event::StoreOpened, &[("storage", storage.as_str())]);

    let service = RecordService::new(store);
    let server = HttpServer::with_config(config.http, service);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    log_event_with_fields(Event::ServerStarting, &[("addr", addr.as_str())]);
    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Validate one candidate without touching any store.
///
/// Prints `{"status":"ok","data":..}` or `{"status":"invalid","defects":[..]}`;
/// the latter also fails the command.
pub fn check(file: Option<&Path>, update: bool) -> CliResult<()> {
    let candidate = read_candidate(file)?;

    if update {
        report(validate_for_update(&candidate))
    } else {
        report(validate_for_create(&candidate))
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum CheckReport<'a, T> {
    Ok { data: T },
    Invalid { defects: &'a [FieldDefect] },
}

fn report<T: Serialize>(outcome: Result<T, Vec<FieldDefect>>) -> CliResult<()> {
    match outcome {
        Ok(data) => write_json(&CheckReport::Ok { data }),
        Err(defects) => {
            let invalid: CheckReport<'_, T> = CheckReport::Invalid { defects: &defects };
            write_json(&invalid)?;
            Err(CliError::validation_failed(defects.len()))
        }
    }
}

/// Write the default configuration to `path`. Refuses to overwrite.
pub fn init_config(path: &Path) -> CliResult<()> {
    if path.exists() {
        return Err(CliError::config_error(format!(
            "{} already exists",
            path.display()
        )));
    }

    let text = serde_json::to_string_pretty(&Config::default())?;
    fs::write(path, text + "\n")
        .map_err(|e| CliError::io_error(format!("Failed to write {}: {}", path.display(), e)))?;

    write_json(&json!({"status": "ok", "config": path.display().to_string()}))
}
