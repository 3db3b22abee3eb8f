//! Khabari - Main Entry Point

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use khabari::{App, AppResult, Cli};
use khabari_application::WorkbenchStore;
use khabari_application::ports::Clock;
use khabari_infrastructure::{
    AppConfig, FileStateRepository, JsonBodyFormatter, ReqwestDispatcher, SystemClock,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &AppConfig) -> AppResult<()> {
    let repository = match cli.storage_dir.or_else(|| config.storage_dir()) {
        Some(dir) => FileStateRepository::in_dir(dir),
        None => FileStateRepository::new(),
    };
    tracing::debug!(path = ?repository.path(), "opening workbench");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::new());
    let store = WorkbenchStore::open(Arc::new(repository), Arc::clone(&clock)).await?;
    let dispatcher = Arc::new(ReqwestDispatcher::from_config(config)?);

    let app = App::new(
        store,
        dispatcher,
        JsonBodyFormatter,
        clock,
        config.export_dir.clone(),
    );

    let mut stdout = std::io::stdout().lock();
    app.execute(cli.command, &mut stdout).await?;
    stdout.flush()?;
    Ok(())
}
