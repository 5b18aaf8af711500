//! custos Admin API server.
//!
//! Wires the collaborator clients, the quota gate, and the license
//! enforcement subsystem into an axum application, runs the periodic
//! re-evaluation loop, and serves until shutdown.

mod config;
mod logging;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use config::Config;
use custos_api_admin::{admin_router, AppState};
use custos_directory::{DirectoryClient, InventoryClient, MessageStoreClient, UsageCounter};
use custos_license::{
    EnforcementService, LicenseVerifier, MessageReconciler, WriteAccessFlag,
};
use custos_quota::TenantQuotaGate;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.log_filter);

    let state = match build_state(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to initialize: {}", e);
            std::process::exit(1);
        }
    };

    // Startup evaluation. On failure the flag simply stays restricted
    // until a later run succeeds.
    if let Err(e) = state.enforcement.re_evaluate().await {
        warn!(error = %e, "Initial license evaluation failed; system stays restricted");
    }

    spawn_reevaluation_loop(state.clone(), config.reevaluate_interval);

    let app = Router::new()
        .route("/healthz", get(healthz))
        .merge(admin_router(state))
        .layer(TraceLayer::new_for_http());

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.listen_addr, e);
            std::process::exit(1);
        }
    };

    info!(addr = %config.listen_addr, "custos admin API listening");
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Construct the collaborator clients and assemble the shared state.
fn build_state(config: &Config) -> Result<AppState, String> {
    let directory = Arc::new(
        DirectoryClient::new(
            config.directory_base_url.clone(),
            config.directory_token.clone(),
            config.http_timeout,
        )
        .map_err(|e| format!("directory client: {e}"))?,
    );
    let inventory = Arc::new(
        InventoryClient::new(
            config.inventory_base_url.clone(),
            config.inventory_token.clone(),
            config.http_timeout,
        )
        .map_err(|e| format!("inventory client: {e}"))?,
    );
    let messages = Arc::new(
        MessageStoreClient::new(
            config.message_store_base_url.clone(),
            config.message_store_token.clone(),
            config.http_timeout,
        )
        .map_err(|e| format!("message store client: {e}"))?,
    );

    let certificate = std::fs::read_to_string(&config.license_certificate_path)
        .map_err(|e| format!("reading {}: {e}", config.license_certificate_path))?;
    let verifier = LicenseVerifier::from_certificate_pem(&certificate)
        .map_err(|e| format!("license certificate: {e}"))?;

    let usage = UsageCounter::new(directory.clone(), inventory);
    let enforcement = EnforcementService::new(
        verifier,
        directory.clone(),
        usage.clone(),
        MessageReconciler::new(messages),
        WriteAccessFlag::restricted(),
    );

    Ok(AppState {
        store: directory.clone(),
        gate: Arc::new(TenantQuotaGate::new(directory)),
        enforcement,
        usage,
    })
}

/// Periodic re-evaluation, in addition to the per-mutation triggers.
fn spawn_reevaluation_loop(state: AppState, interval: std::time::Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The immediate first tick duplicates the startup evaluation.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if let Err(e) = state.enforcement.re_evaluate().await {
                warn!(error = %e, "Periodic license evaluation failed");
            }
        }
    });
}

/// GET /healthz
async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Resolve on ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received ctrl-c, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
