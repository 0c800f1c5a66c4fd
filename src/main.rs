//! Noleggio Server - Medical Equipment Rental Management System
//!
//! REST API server behind the rental company's browser dashboard.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use noleggio_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("noleggio_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Noleggio Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes (paths mirror the dashboard frontend)
    let api = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Customers
        .route("/clienti", get(api::customers::list_customers))
        .route("/clienti", post(api::customers::create_customer))
        .route("/clienti/search", get(api::customers::search_customers))
        .route("/clienti/importa", post(api::customers::import_customers))
        .route("/clienti/:id", get(api::customers::get_customer))
        .route("/clienti/:id", put(api::customers::update_customer))
        .route("/clienti/:id", delete(api::customers::delete_customer))
        .route("/clienti/:id/noleggi", get(api::customers::get_customer_rentals))
        // Equipment
        .route("/attrezzature", get(api::equipment::list_equipment))
        .route("/attrezzature", post(api::equipment::create_equipment))
        .route("/attrezzature/categorie", get(api::equipment::list_categories))
        .route("/attrezzature/search", get(api::equipment::search_equipment))
        .route("/attrezzature/importa", post(api::equipment::import_equipment))
        .route("/attrezzature/:id", get(api::equipment::get_equipment))
        .route("/attrezzature/:id", put(api::equipment::update_equipment))
        .route("/attrezzature/:id", patch(api::equipment::patch_equipment))
        .route("/attrezzature/:id", delete(api::equipment::delete_equipment))
        // Rentals
        .route("/noleggi", get(api::rentals::list_rentals))
        .route("/noleggi", post(api::rentals::create_rental))
        .route("/noleggi/:id", get(api::rentals::get_rental))
        .route("/noleggi/:id", put(api::rentals::update_rental_dates))
        .route("/noleggi/:id", patch(api::rentals::update_rental_status))
        // Dashboard
        .route("/dashboard/stats", get(api::dashboard::get_stats))
        .route("/dashboard/recent-rentals", get(api::dashboard::recent_rentals))
        .route("/dashboard/top-equipment", get(api::dashboard::top_equipment))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
