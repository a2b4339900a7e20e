use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::partners::{
    DestinyPartnerResponse, DestinyQuery, TrackPreviewQuery, TrackPreviewResponse,
};
use super::api::positions::{PositionListResponse, PositionResponse, UpsertPositionRequest};
use super::api::satellites::{
    CatalogCountResponse, NearbyQuery, NearbySatellitesResponse, RandomSatelliteResponse,
    ReportedPosition,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::satellites::all_satellites,
        super::api::satellites::random_satellite,
        super::api::satellites::catalog_count,
        super::api::satellites::nearby_satellites,
        super::api::partners::destiny_partner,
        super::api::partners::track_preview,
        super::api::positions::upsert_position,
        super::api::positions::list_positions,
        super::api::positions::get_position,
    ),
    components(
        schemas(
            RandomSatelliteResponse,
            CatalogCountResponse,
            NearbyQuery,
            ReportedPosition,
            NearbySatellitesResponse,
            DestinyQuery,
            DestinyPartnerResponse,
            TrackPreviewQuery,
            TrackPreviewResponse,
            UpsertPositionRequest,
            PositionResponse,
            PositionListResponse,
            ErrorResponse,
            crate::orbit::GroundTrackPoint,
        )
    ),
    info(
        title = "Starcrossed API",
        description = "Satellite matchmaking: ground tracks, proximity matching, and user positions",
        version = "0.1.0"
    ),
    tags(
        (name = "satellites", description = "Catalog access and near-user scans"),
        (name = "partners", description = "Destiny matching along ground tracks"),
        (name = "positions", description = "User position registry")
    )
)]
pub struct ApiDoc;
