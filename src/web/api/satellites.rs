use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::matching;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct RandomSatelliteResponse {
    pub satellite_name: String,
    pub total_satellites: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogCountResponse {
    pub count: usize,
    pub is_loaded: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NearbyQuery {
    pub user_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportedPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NearbySatellitesResponse {
    pub user_id: i64,
    pub user_position: ReportedPosition,
    pub nearby_satellites: Vec<String>,
    pub search_radius_km: f64,
    pub time_range_hours: u32,
}

#[utoipa::path(
    get,
    path = "/api/satellites",
    tag = "satellites",
    responses(
        (status = 200, description = "All catalog names in source order", body = Vec<String>)
    )
)]
pub async fn all_satellites(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.all_names().to_vec())
}

#[utoipa::path(
    get,
    path = "/api/satellites/random",
    tag = "satellites",
    responses(
        (status = 200, description = "A uniformly chosen satellite name", body = RandomSatelliteResponse),
        (status = 503, description = "Catalog not loaded yet", body = ErrorResponse)
    )
)]
pub async fn random_satellite(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let picked = {
        let mut rng = rand::thread_rng();
        state.catalog.random_name(&mut rng).map(str::to_string)
    };
    let satellite_name = picked.ok_or(ApiError::Unavailable("catalog_not_loaded"))?;

    Ok(Json(RandomSatelliteResponse {
        satellite_name,
        total_satellites: state.catalog.count(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/satellites/count",
    tag = "satellites",
    responses(
        (status = 200, description = "Catalog size and load state", body = CatalogCountResponse)
    )
)]
pub async fn catalog_count(State(state): State<AppState>) -> Json<CatalogCountResponse> {
    Json(CatalogCountResponse {
        count: state.catalog.count(),
        is_loaded: state.catalog.is_loaded(),
    })
}

#[utoipa::path(
    get,
    path = "/api/satellites/nearby",
    tag = "satellites",
    params(
        ("user_id" = i64, Query, description = "User whose stored position anchors the scan")
    ),
    responses(
        (status = 200, description = "Satellites passing near the user", body = NearbySatellitesResponse),
        (status = 404, description = "User has no stored position", body = ErrorResponse)
    )
)]
pub async fn nearby_satellites(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> ApiResult<impl IntoResponse> {
    let row = state
        .positions
        .get(query.user_id)
        .ok_or(ApiError::NotFound("position_not_found"))?;

    let knobs = &state.config.matching;
    let nearby_satellites = {
        let mut rng = rand::thread_rng();
        matching::find_satellites_near_point(
            row.lat,
            row.lng,
            knobs.tolerance_km,
            knobs.scan_hours,
            &state.catalog,
            &mut rng,
        )
    };

    Ok(Json(NearbySatellitesResponse {
        user_id: row.user_id,
        user_position: ReportedPosition {
            latitude: row.lat,
            longitude: row.lng,
            updated_at: row.updated_at,
        },
        nearby_satellites,
        search_radius_km: knobs.tolerance_km,
        time_range_hours: knobs.scan_hours,
    }))
}
