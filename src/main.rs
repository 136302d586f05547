mod core;
mod features;
mod modules;
mod shared;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::config::Config;
use crate::core::{database, middleware};
use crate::features::pages::{routes as pages_routes, PagesState};
use crate::features::vehicles::{routes as vehicles_routes, VehicleService, VehiclesState};
use crate::modules::storage::FileStore;
use crate::shared::templates::TemplateEngine;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    database::ensure_database_dir(&config.database.url).await?;
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Open the file-store (creates the upload directory if missing)
    let file_store = Arc::new(
        FileStore::new(config.upload.dir.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open file-store: {}", e))?,
    );
    tracing::info!("File-store ready at {}", file_store.root().display());

    // Load HTML templates
    let templates = Arc::new(
        TemplateEngine::from_dir()
            .map_err(|e| anyhow::anyhow!("Failed to load templates: {}", e))?,
    );
    tracing::info!("Templates loaded");

    // Initialize Vehicle Service
    let vehicle_service = Arc::new(VehicleService::new(pool.clone(), Arc::clone(&file_store)));
    tracing::info!("Vehicle service initialized");

    let app = Router::new()
        .merge(vehicles_routes::routes(VehiclesState {
            service: Arc::clone(&vehicle_service),
            templates: Arc::clone(&templates),
        }))
        .merge(pages_routes::routes(PagesState {
            templates: Arc::clone(&templates),
            file_store: Arc::clone(&file_store),
        }))
        .layer(
            // ServiceBuilder applies top-down: the request id is set before
            // the trace span reads it
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // Propagate X-Request-Id to response headers
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::cors_layer(
                    config.app.cors_allowed_origins.clone(),
                ))
                .layer(DefaultBodyLimit::max(config.app.max_request_body_size)),
        );

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));

    axum::serve(listener, app).await?;

    Ok(())
}
