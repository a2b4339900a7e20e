use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::positions::StoredPosition;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertPositionRequest {
    pub user_id: i64,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PositionResponse {
    pub user_id: i64,
    pub lat: f64,
    pub lng: f64,
    pub updated_at: DateTime<Utc>,
}

impl From<StoredPosition> for PositionResponse {
    fn from(row: StoredPosition) -> Self {
        PositionResponse {
            user_id: row.user_id,
            lat: row.lat,
            lng: row.lng,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PositionListResponse {
    pub total_users: usize,
    pub users: Vec<PositionResponse>,
}

#[utoipa::path(
    post,
    path = "/api/positions",
    tag = "positions",
    request_body = UpsertPositionRequest,
    responses(
        (status = 200, description = "Stored position", body = PositionResponse),
        (status = 400, description = "Coordinates out of range", body = ErrorResponse)
    )
)]
pub async fn upsert_position(
    State(state): State<AppState>,
    Json(body): Json<UpsertPositionRequest>,
) -> ApiResult<impl IntoResponse> {
    if !(-90.0..=90.0).contains(&body.lat) {
        return Err(ApiError::Validation(format!(
            "latitude {} out of range",
            body.lat
        )));
    }
    if !(-180.0..=180.0).contains(&body.lng) {
        return Err(ApiError::Validation(format!(
            "longitude {} out of range",
            body.lng
        )));
    }

    let row = state.positions.upsert(body.user_id, body.lat, body.lng);
    log::debug!("stored position for user {}", row.user_id);

    Ok(Json(PositionResponse::from(row)))
}

#[utoipa::path(
    get,
    path = "/api/positions",
    tag = "positions",
    responses(
        (status = 200, description = "All stored positions in first-report order", body = PositionListResponse)
    )
)]
pub async fn list_positions(State(state): State<AppState>) -> Json<PositionListResponse> {
    let users: Vec<PositionResponse> = state
        .positions
        .all()
        .into_iter()
        .map(PositionResponse::from)
        .collect();

    Json(PositionListResponse {
        total_users: users.len(),
        users,
    })
}

#[utoipa::path(
    get,
    path = "/api/positions/{user_id}",
    tag = "positions",
    params(
        ("user_id" = i64, Path, description = "User to look up")
    ),
    responses(
        (status = 200, description = "The user's stored position", body = PositionResponse),
        (status = 404, description = "User has no stored position", body = ErrorResponse)
    )
)]
pub async fn get_position(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let row = state
        .positions
        .get(user_id)
        .ok_or(ApiError::NotFound("position_not_found"))?;

    Ok(Json(PositionResponse::from(row)))
}
