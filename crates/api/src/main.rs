use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use redrive_api::app::{self, AppState};
use redrive_api::config::Config;
use redrive_api::services;
use redrive_infra::DeliveryWorker;

#[tokio::main]
async fn main() {
    let cfg = Config::from_env();
    redrive_observability::init(&cfg.log_level, &cfg.environment);

    info!(
        environment = %cfg.environment,
        http_addr = %cfg.http_addr,
        "starting redrive"
    );

    let services = match services::build(&cfg).await {
        Ok(services) => services,
        Err(err) => {
            error!(error = %err, "failed to build services");
            std::process::exit(1);
        }
    };

    let cancel = CancellationToken::new();
    let worker = DeliveryWorker::new(services.task_service.clone(), cfg.poll_interval);
    let worker_handle = tokio::spawn({
        let cancel = cancel.clone();
        async move { worker.run(cancel).await }
    });

    let state = AppState {
        tasks: services.task_service.clone(),
        health_checks: services.health_checks.clone(),
    };
    let app = app::build_app(state);

    let listener = tokio::net::TcpListener::bind(&cfg.http_addr)
        .await
        .expect("failed to bind http listener");
    info!(addr = %cfg.http_addr, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel.clone()))
        .await
        .expect("http server error");

    cancel.cancel();
    if let Err(err) = worker_handle.await {
        error!(error = %err, "worker task failed");
    }
    if let Err(err) = services.producer.close().await {
        error!(error = %err, "error closing producers");
    }

    info!("shutdown complete");
}

async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("received shutdown signal");
    cancel.cancel();
}
