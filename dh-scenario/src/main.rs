use dh_scenario::{Result as ScenarioErrorResult, ScenarioError, ScenarioReport, logger};

use dh_config::Config;

use std::process::ExitCode;

use log::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(report) => {
            info!(
                "Scenario passed: session {} disconnected once ({} attempt(s)) on {}",
                report.session_id, report.attempts, report.url
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Scenario failed: {e}");
            eprintln!("{}: {e}", e.kind());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ScenarioErrorResult<ScenarioReport> {
    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Ensure the log directory exists when logging to a file
    let log_file_path = config.log_file_path()?;
    if let Some(dir) = log_file_path.as_ref().and_then(|path| path.parent()) {
        std::fs::create_dir_all(dir).map_err(|source| ScenarioError::LogDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting dh-scenario v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    dh_scenario::run(&config).await
}
