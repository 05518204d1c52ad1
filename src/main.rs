use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

use city_data_server::cli::Cli;
use city_data_server::config::{self, AppState, ServerConfig};
use city_data_server::error::StartupError;
use city_data_server::{logger, server};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), StartupError> {
    let cfg = config::Config::load(cli)?;
    logger::init(&cfg).map_err(StartupError::Logger)?;
    let server_cfg = cfg.server_config()?;

    // Tokio runtime; thread count from `server.workers` or the CPU count
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers.get());
    }
    let runtime = runtime_builder.build().map_err(StartupError::Runtime)?;

    let result = runtime.block_on(async_main(cfg, server_cfg));

    // In-flight requests and blocking file reads are abandoned, not awaited
    runtime.shutdown_background();
    result
}

async fn async_main(cfg: config::Config, server_cfg: ServerConfig) -> Result<(), StartupError> {
    let addr = server_cfg.socket_addr();
    let listener =
        server::bind_listener(addr).map_err(|source| StartupError::Bind { addr, source })?;

    if !server_cfg.root_dir.is_dir() {
        logger::log_warning(&format!(
            "Served directory does not exist yet: {}",
            server_cfg.root_dir.display()
        ));
    }

    logger::log_server_start(&server_cfg, &cfg);

    let state = Arc::new(AppState::new(&cfg, server_cfg));
    server::run(listener, state).await
}
