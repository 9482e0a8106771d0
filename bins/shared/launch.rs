use std::process::ExitCode;

use configs::{AppConfig, ServiceKind};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging(service: &'static str) {
    // .env first so RUST_LOG and LOG_FORMAT take effect
    dotenv().ok();
    common::utils::logging::init_logging_from_env();
    info!(service, event = "logger_init", "tracing subscriber initialized");
}

/// Shared `main` body: logging, panic hook, runtime, serve until Ctrl+C.
pub fn launch(kind: ServiceKind) -> ExitCode {
    let service = kind.name();
    init_logging(service);

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service, event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let settings = match AppConfig::load_or_default().resolve(kind) {
        Ok(s) => s,
        Err(e) => {
            error!(service, event = "config_invalid", error = %e, "failed to resolve configuration");
            return ExitCode::FAILURE;
        }
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = settings.worker_threads {
        builder.worker_threads(w);
    }
    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service, event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service,
        event = "start",
        %service_id,
        pid,
        version,
        threads = settings.worker_threads.unwrap_or_default(),
        port = settings.port,
        "service starting"
    );

    // run() handles Ctrl+C itself via graceful shutdown
    rt.block_on(async move {
        match server::run(settings).await {
            Ok(()) => {
                info!(service, event = "stop", %service_id, pid, "service stopped normally");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!(service, event = "run_failed", error = %e, "server::run returned error");
                ExitCode::FAILURE
            }
        }
    })
}
