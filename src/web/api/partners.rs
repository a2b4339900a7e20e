use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::matching::{self, UserPosition};
use crate::orbit::{fallback_track, GroundTrackPoint};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

/// Longest track a preview request may ask for.
const MAX_PREVIEW_HOURS: u32 = 168;

/// How many leading points a track preview includes.
const PREVIEW_POINTS: usize = 10;

#[derive(Debug, Deserialize, ToSchema)]
pub struct DestinyQuery {
    pub satellite_name: String,
    pub user_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DestinyPartnerResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    pub message: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TrackPreviewQuery {
    pub satellite_name: String,
    #[serde(default)]
    pub hours: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrackPreviewResponse {
    pub satellite_name: String,
    pub track_points: usize,
    /// True when the synthetic generator stood in for the real elements.
    pub synthetic: bool,
    pub ground_track: Vec<GroundTrackPoint>,
}

#[utoipa::path(
    get,
    path = "/api/partners/destiny",
    tag = "partners",
    params(
        ("satellite_name" = String, Query, description = "Catalog name whose track decides the match"),
        ("user_id" = i64, Query, description = "Requesting user, excluded from candidates")
    ),
    responses(
        (status = 200, description = "A partner, or a message when nobody else has a position", body = DestinyPartnerResponse),
        (status = 404, description = "No partner candidates matched", body = ErrorResponse)
    )
)]
pub async fn destiny_partner(
    State(state): State<AppState>,
    Query(query): Query<DestinyQuery>,
) -> ApiResult<impl IntoResponse> {
    let knobs = &state.config.matching;

    let track = match matching::catalog_ground_track(
        &state.catalog,
        &query.satellite_name,
        knobs.track_hours,
    ) {
        Ok(track) => track,
        Err(e) => {
            log::warn!("using synthetic track for '{}': {e}", query.satellite_name);
            fallback_track(knobs.track_hours)
        }
    };

    let others: Vec<UserPosition> = state
        .positions
        .all_except(query.user_id)
        .iter()
        .map(|row| row.position())
        .collect();

    if others.is_empty() {
        return Ok(Json(DestinyPartnerResponse {
            user_id: None,
            lat: None,
            lng: None,
            message: "no other users have shared a position yet".to_string(),
        }));
    }

    let matched = matching::find_users_near_track(&track, &others, knobs.tolerance_km);
    log::debug!(
        "'{}' matched {} candidate(s) for user {}",
        query.satellite_name,
        matched.len(),
        query.user_id
    );

    let partner = {
        let mut rng = rand::thread_rng();
        matched.choose(&mut rng).copied()
    }
    .ok_or(ApiError::NotFound("no_destiny_partner"))?;

    Ok(Json(DestinyPartnerResponse {
        user_id: Some(partner.user_id),
        lat: Some(partner.lat),
        lng: Some(partner.lng),
        message: format!(
            "the ground track of '{}' brought you together",
            query.satellite_name
        ),
    }))
}

#[utoipa::path(
    get,
    path = "/api/partners/track",
    tag = "partners",
    params(
        ("satellite_name" = String, Query, description = "Catalog name to propagate"),
        ("hours" = Option<u32>, Query, description = "Track length in hours (default from config)")
    ),
    responses(
        (status = 200, description = "Track summary with the first points", body = TrackPreviewResponse),
        (status = 400, description = "Requested track too long", body = ErrorResponse)
    )
)]
pub async fn track_preview(
    State(state): State<AppState>,
    Query(query): Query<TrackPreviewQuery>,
) -> ApiResult<impl IntoResponse> {
    let hours = query.hours.unwrap_or(state.config.matching.track_hours);
    if hours > MAX_PREVIEW_HOURS {
        return Err(ApiError::Validation(format!(
            "hours must be at most {MAX_PREVIEW_HOURS}"
        )));
    }

    let (track, synthetic) =
        match matching::catalog_ground_track(&state.catalog, &query.satellite_name, hours) {
            Ok(track) => (track, false),
            Err(e) => {
                log::debug!(
                    "track preview for '{}' uses the synthetic generator: {e}",
                    query.satellite_name
                );
                (fallback_track(hours), true)
            }
        };

    Ok(Json(TrackPreviewResponse {
        satellite_name: query.satellite_name,
        track_points: track.len(),
        synthetic,
        ground_track: track.into_iter().take(PREVIEW_POINTS).collect(),
    }))
}
