use axum::{routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::Catalog;
use crate::positions::PositionStore;

use super::api::partners as partner_handlers;
use super::api::positions as position_handlers;
use super::api::satellites as satellite_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();

    let catalog = Catalog::new();
    catalog.load(&config.catalog.tle_file);
    log::info!("serving a catalog of {} satellites", catalog.count());

    let state = AppState {
        config: Arc::new(config),
        catalog: Arc::new(catalog),
        positions: Arc::new(PositionStore::new()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Satellite API endpoints
        .route("/api/satellites", get(satellite_handlers::all_satellites))
        .route(
            "/api/satellites/random",
            get(satellite_handlers::random_satellite),
        )
        .route(
            "/api/satellites/count",
            get(satellite_handlers::catalog_count),
        )
        .route(
            "/api/satellites/nearby",
            get(satellite_handlers::nearby_satellites),
        )
        // Partner API endpoints
        .route(
            "/api/partners/destiny",
            get(partner_handlers::destiny_partner),
        )
        .route("/api/partners/track", get(partner_handlers::track_preview))
        // Position API endpoints
        .route("/api/positions", post(position_handlers::upsert_position))
        .route("/api/positions", get(position_handlers::list_positions))
        .route(
            "/api/positions/{user_id}",
            get(position_handlers::get_position),
        )
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
