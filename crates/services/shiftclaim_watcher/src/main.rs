// File: services/shiftclaim_watcher/src/main.rs
use shiftclaim_common::logging;
use shiftclaim_config::load_config;
use shiftclaim_watcher::service_factory::build_context;
use shiftclaim_watcher::{ClaimLoop, LoopExit, LoopSettings};
use std::process::ExitCode;
use tracing::{error, info, warn};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured from this file, so report straight to stderr
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = logging::init(&config.logging);

    let settings = match LoopSettings::from_config(&config) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let context = match logging::log_result(
        build_context(&config).await,
        "Services initialized",
        "Failed to initialize services",
    ) {
        Ok(context) => context,
        Err(_) => return ExitCode::FAILURE,
    };

    let mut claim_loop = ClaimLoop::new(context, settings);
    match claim_loop.run_until(shutdown_signal()).await {
        Ok(LoopExit::Claimed(event)) => {
            info!(
                "Shift claimed: {} ({} to {}), event id {:?}",
                event.summary, event.start_time, event.end_time, event.event_id
            );
            ExitCode::SUCCESS
        }
        Ok(LoopExit::Interrupted) => {
            info!("Stopped by user");
            ExitCode::SUCCESS
        }
        Err(e) => {
            logging::log_error(&e, "Exiting after fatal error");
            ExitCode::FAILURE
        }
    }
}
