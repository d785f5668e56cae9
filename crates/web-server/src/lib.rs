use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch},
    Router,
};
use configuration::Settings;
use database::DbRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
    pub low_stock_threshold: i32,
}

/// Builds the API router over the given state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route(
            "/api/volunteers",
            get(handlers::list_volunteers).post(handlers::create_volunteer),
        )
        .route("/api/volunteers/:id", delete(handlers::delete_volunteer))
        .route(
            "/api/volunteers/:id/availability",
            patch(handlers::update_volunteer_availability),
        )
        .route(
            "/api/donations",
            get(handlers::list_donations).post(handlers::create_donation),
        )
        .route("/api/inventory", get(handlers::get_inventory))
        .route("/api/resource-types", get(handlers::list_resource_types))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024))
}

/// Connects to the database and serves the API until the process is stopped.
///
/// Logging must already be initialised by the caller.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let db_pool = database::connect(&settings.database).await?;
    if settings.database.run_migrations {
        database::run_migrations(&db_pool).await?;
    }

    let app_state = Arc::new(AppState {
        db_repo: DbRepository::new(db_pool),
        low_stock_threshold: settings.inventory.low_stock_threshold,
    });
    let app = build_router(app_state);

    let addr: SocketAddr = settings.server.address().parse()?;
    tracing::info!(%addr, "Web server listening.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
