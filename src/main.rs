//! Snapbook Server — photographer booking marketplace backend
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

use snapbook_api::middleware::rate_limit::RateLimiter;
use snapbook_api::state::AppState;
use snapbook_auth::{AuthService, GoogleTokenVerifier, JwtDecoder, JwtEncoder, PasswordHasher};
use snapbook_core::config::AppConfig;
use snapbook_core::error::AppError;
use snapbook_realtime::{ChatHub, DashboardHub, HubMetricsSource, MetricsSource};
use snapbook_store::{AccountStore, PgAccountStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("SNAPBOOK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Snapbook v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db_pool = snapbook_store::connection::create_pool(&config.database).await?;

    snapbook_store::migration::run_migrations(&db_pool).await?;

    let accounts: Arc<dyn AccountStore> = Arc::new(PgAccountStore::new(db_pool));

    // ── Step 2: Initialize auth system ───────────────────────────
    tracing::info!("Initializing authentication system...");
    let password_hasher = PasswordHasher::new();
    let jwt_encoder = JwtEncoder::new(&config.auth);
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let google_verifier = GoogleTokenVerifier::new(&config.google);
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&accounts),
        password_hasher,
        jwt_encoder,
        JwtDecoder::new(&config.auth),
        google_verifier,
    ));

    // ── Step 3: Initialize realtime hubs ─────────────────────────
    tracing::info!("Initializing realtime hubs...");
    let chat_hub = Arc::new(ChatHub::new());
    let dashboard_hub = Arc::new(DashboardHub::new());
    let metrics: Arc<dyn MetricsSource> = Arc::new(HubMetricsSource::new(
        Arc::clone(&chat_hub),
        Arc::clone(&dashboard_hub),
    ));

    let rate_limiter = Arc::new(RateLimiter::new(&config.rate_limit));

    // ── Step 4: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 5: Periodic metrics broadcaster ─────────────────────
    let broadcaster_handle = {
        let dashboard_hub = Arc::clone(&dashboard_hub);
        let metrics = Arc::clone(&metrics);
        let mut shutdown = shutdown_rx.clone();
        let interval_seconds = config.realtime.metrics_interval_seconds;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval_seconds));
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let snapshot = metrics.current_snapshot().await;
                        match serde_json::to_value(&snapshot) {
                            Ok(payload) => dashboard_hub.broadcast_metrics(payload),
                            Err(e) => tracing::error!(error = %e, "Failed to serialize metrics"),
                        }
                    }
                    _ = shutdown.changed() => break,
                }
            }
        })
    };

    // ── Step 6: Build and start HTTP server ──────────────────────
    let app_state = AppState {
        config: Arc::new(config.clone()),
        accounts,
        auth: auth_service,
        jwt_decoder,
        chat_hub: Arc::clone(&chat_hub),
        dashboard_hub: Arc::clone(&dashboard_hub),
        metrics,
        rate_limiter,
    };

    let app = snapbook_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Snapbook server listening on {}", addr);

    // ── Step 7: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 8: Tear down realtime state ─────────────────────────
    let _ = tokio::time::timeout(Duration::from_secs(5), broadcaster_handle).await;
    chat_hub.close_all();
    dashboard_hub.close_all();

    tracing::info!("Snapbook server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
