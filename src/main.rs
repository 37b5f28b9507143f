//! GearGuard Server - Maintenance Tracking
//!
//! REST API server for equipment maintenance tracking.

use anyhow::Context;
use axum::{
    routing::{get, patch, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gearguard_server::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    tracing::info!("Starting GearGuard Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let repository = Repository::new(pool);
    let services = Services::new(repository, &config.schedule);

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("gearguard_server={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Equipment
        .route("/equipment", get(api::equipment::list_equipment).post(api::equipment::create_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment).put(api::equipment::update_equipment))
        .route("/equipment/:id/status", patch(api::equipment::update_equipment_status))
        .route("/equipment/:id/requests", get(api::equipment::list_equipment_requests))
        // Teams
        .route("/teams", get(api::teams::list_teams).post(api::teams::create_team))
        .route("/teams/:id", get(api::teams::get_team).put(api::teams::update_team))
        .route("/teams/:id/members", get(api::teams::list_team_members).post(api::teams::add_team_member))
        .route("/team-members/:id", get(api::teams::get_team_member).put(api::teams::update_team_member))
        // Maintenance requests
        .route("/requests", get(api::requests::list_requests).post(api::requests::create_request))
        .route("/requests/kanban", get(api::requests::kanban))
        .route("/requests/preventive", get(api::requests::preventive_calendar))
        .route("/requests/:id", get(api::requests::get_request).put(api::requests::update_request))
        .route("/requests/:id/stage", patch(api::requests::update_stage))
        .route("/requests/:id/scrap", post(api::requests::scrap_request))
        // Task activities
        .route("/task-activities/completed", get(api::task_activities::list_completed))
        .route("/task-activities/request/:id", get(api::task_activities::get_task_activity))
        .route("/task-activities/:id/start", post(api::task_activities::start_task))
        .route("/task-activities/:id/progress", patch(api::task_activities::update_progress))
        .route("/task-activities/:id/complete", post(api::task_activities::complete_task))
        // Legacy assets and logs
        .route("/assets", get(api::assets::list_assets).post(api::assets::create_asset))
        .route("/assets/schedule", get(api::assets::asset_schedule))
        .route("/assets/dashboard", get(api::assets::asset_dashboard))
        .route(
            "/assets/:id",
            get(api::assets::get_asset)
                .put(api::assets::update_asset)
                .delete(api::assets::delete_asset),
        )
        .route("/maintenance-logs", get(api::assets::list_logs).post(api::assets::create_log))
        // Reports
        .route("/reports/dashboard", get(api::reports::dashboard))
        .route("/reports/equipment-history", get(api::reports::equipment_history))
        .route("/reports/maintenance-costs", get(api::reports::maintenance_costs))
        .route("/reports/technician-performance", get(api::reports::technician_performance))
        .route("/reports/downtime", get(api::reports::downtime))
        .route("/reports/maintenance-ratio", get(api::reports::maintenance_ratio))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
}
