//! STOA Metrics Simulator
//!
//! Entry point for the demo telemetry generator. Backfills a few minutes of
//! synthetic history so dashboards render immediately, then serves
//! `/metrics` and `/health` while a background task keeps generating
//! traffic.
//!
//! # Startup Flow
//!
//! 1. Initialize tracing
//! 2. Build the shared metric registry and register the metric families
//! 3. Construct the traffic generator over the static catalog
//! 4. Backfill the historical window
//! 5. Spawn the continuous generation loop
//! 6. Serve HTTP until SIGINT/SIGTERM, then cancel the loop and drain

use std::net::SocketAddr;
use std::sync::Arc;

use prometheus::Registry;
use sim_service::catalog::TENANTS;
use sim_service::config::Config;
use sim_service::observability::SimulatorMetrics;
use sim_service::routes::{self, AppState};
use sim_service::simulation::TrafficGenerator;
use sim_service::tasks;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sim_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting STOA Metrics Simulator");

    let config = Config::new();

    let tenant_ids: Vec<&str> = TENANTS.iter().map(|t| t.id).collect();
    info!(
        bind_address = %config.bind_address,
        tenants = ?tenant_ids,
        historical_minutes = config.historical_minutes,
        "Configuration loaded"
    );

    // Construct the shared metric state and inject it into both the
    // generator and the HTTP state.
    let registry = Arc::new(Registry::new());
    let metrics = Arc::new(SimulatorMetrics::new(&registry).map_err(|e| {
        error!("Failed to register metrics: {}", e);
        e
    })?);
    let generator = Arc::new(TrafficGenerator::new(TENANTS, metrics));

    // Backfill history first so dashboards have data immediately.
    generator
        .backfill_history(config.historical_minutes)
        .map_err(|e| {
            error!("Failed to backfill history: {}", e);
            e
        })?;

    // Pull loop parameters before moving config into state.
    let bind_address = config.bind_address.clone();
    let simulation_interval = config.simulation_interval;
    let error_backoff = config.error_backoff;

    let state = Arc::new(AppState {
        registry: Arc::clone(&registry),
        config,
    });

    let app = routes::build_routes(state);

    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    // Start the continuous generation loop.
    let cancel_token = CancellationToken::new();
    let loop_token = cancel_token.clone();
    let loop_generator = Arc::clone(&generator);
    tokio::spawn(async move {
        tasks::run_simulation_loop(loop_generator, simulation_interval, error_backoff, loop_token)
            .await;
    });

    info!("Metrics Simulator listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    info!("Metrics Simulator shutdown complete");

    Ok(())
}

/// Listens for shutdown signals (SIGTERM, SIGINT). Cancels the generation
/// loop, then returns so the server can drain.
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    cancel_token.cancel();
}
