//! Routes for the venue catalog: listings, detail, ratings and the venue
//! lifecycle.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use venues_catalog::application::{command_handlers, query_handlers};
use venues_catalog::domain::commands::{
    CreateVenue, DeleteVenue, RateVenue, UpdateVenue, VenueChanges,
};
use venues_catalog::domain::queries::{FindNearbyVenues, ListVenues};
use venues_core::error::DomainError;
use venues_core::model::{Rating, Venue, VenueType};
use venues_core::outcome::OperationOutcome;
use venues_core::page::PagedResult;

use super::params::{PageParams, page_request, parse_id_list};
use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /.
#[derive(Debug, Deserialize)]
pub struct ListVenuesParams {
    /// Zero-based page index.
    pub page: Option<u32>,
    /// Page size.
    pub size: Option<u32>,
    /// Case-insensitive match on name or description.
    pub search: Option<String>,
    /// Comma-separated venue type ids.
    pub type_ids: Option<String>,
}

/// Query string for GET /nearby.
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    /// Zero-based page index.
    pub page: Option<u32>,
    /// Page size.
    pub size: Option<u32>,
    /// Caller latitude.
    pub latitude: Option<f64>,
    /// Caller longitude.
    pub longitude: Option<f64>,
}

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateVenueRequest {
    /// Display name.
    pub name: String,
    /// City.
    pub location: String,
    /// Description.
    pub description: String,
    /// Opening hours.
    pub working_hours: String,
    /// Seats.
    pub maximum_capacity: i32,
    /// Venue type id.
    pub type_id: i32,
}

/// Request body for PATCH /{venue_id}. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateVenueRequest {
    /// New display name.
    pub name: Option<String>,
    /// New city.
    pub location: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New opening hours.
    pub working_hours: Option<String>,
    /// New seat count.
    pub maximum_capacity: Option<i32>,
    /// New venue type id.
    pub type_id: Option<i32>,
}

impl From<UpdateVenueRequest> for VenueChanges {
    fn from(request: UpdateVenueRequest) -> Self {
        Self {
            name: request.name,
            location: request.location,
            description: request.description,
            working_hours: request.working_hours,
            maximum_capacity: request.maximum_capacity,
            type_id: request.type_id,
        }
    }
}

/// Request body for POST /{venue_id}/ratings.
#[derive(Debug, Deserialize)]
pub struct RateVenueRequest {
    /// The submitting user.
    pub user_id: i32,
    /// Value in `[0.5, 5.0]`.
    pub rating: f64,
    /// Optional comment.
    pub comment: Option<String>,
}

/// Response body for GET /{venue_id}/rating.
#[derive(Debug, Serialize)]
pub struct VenueRatingResponse {
    /// The venue.
    pub venue_id: i32,
    /// Stored average rating.
    pub average_rating: f64,
}

/// Response body for GET /types/{type_id}.
#[derive(Debug, Serialize)]
pub struct VenueTypeResponse {
    /// The venue type.
    pub type_id: i32,
    /// Its name.
    pub name: String,
}

/// An absent, blank or `null` body means "no update request".
fn parse_changes(body: &[u8]) -> Result<Option<VenueChanges>, DomainError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let request: Option<UpdateVenueRequest> = serde_json::from_slice(body)
        .map_err(|e| DomainError::Validation(format!("invalid update request: {e}")))?;
    Ok(request.map(VenueChanges::from))
}

/// GET /
#[instrument(skip(state, params), fields(search = ?params.search))]
async fn list_venues(
    State(state): State<AppState>,
    Query(params): Query<ListVenuesParams>,
) -> Result<Json<PagedResult<Venue>>, ApiError> {
    let query = ListVenues {
        page: page_request(params.page, params.size)?,
        search: params.search,
        type_ids: params.type_ids.as_deref().map(parse_id_list).transpose()?,
    };

    let result = query_handlers::get_all_venues(
        &query,
        state.clock.as_ref(),
        &*state.venues,
        &*state.ratings,
        &*state.reservations,
    )
    .await?;

    Ok(Json(result))
}

/// GET /nearby
#[instrument(skip(state, params), fields(latitude = ?params.latitude, longitude = ?params.longitude))]
async fn nearby_venues(
    State(state): State<AppState>,
    Query(params): Query<NearbyParams>,
) -> Result<Json<PagedResult<Venue>>, ApiError> {
    let query = FindNearbyVenues {
        page: page_request(params.page, params.size)?,
        latitude: params.latitude,
        longitude: params.longitude,
    };

    let result = query_handlers::get_nearby_venues(
        &query,
        state.clock.as_ref(),
        &*state.geolocation,
        &*state.venues,
        &*state.ratings,
        &*state.reservations,
    )
    .await?;

    Ok(Json(result))
}

/// GET /new
#[instrument(skip(state, params))]
async fn new_venues(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedResult<Venue>>, ApiError> {
    let result = query_handlers::get_new_venues(
        params.page_request()?,
        state.clock.as_ref(),
        &*state.venues,
        &*state.ratings,
        &*state.reservations,
    )
    .await?;

    Ok(Json(result))
}

/// GET /trending
#[instrument(skip(state, params))]
async fn trending_venues(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedResult<Venue>>, ApiError> {
    let result = query_handlers::get_trending_venues(
        params.page_request()?,
        state.clock.as_ref(),
        &*state.venues,
        &*state.ratings,
        &*state.reservations,
    )
    .await?;

    Ok(Json(result))
}

/// GET /suggested
#[instrument(skip(state, params))]
async fn suggested_venues(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<PagedResult<Venue>>, ApiError> {
    let result = query_handlers::get_suggested_venues(
        params.page_request()?,
        state.clock.as_ref(),
        &*state.venues,
        &*state.ratings,
        &*state.reservations,
    )
    .await?;

    Ok(Json(result))
}

/// GET /types
#[instrument(skip(state))]
async fn list_venue_types(
    State(state): State<AppState>,
) -> Result<Json<Vec<VenueType>>, ApiError> {
    let types = query_handlers::get_venue_types(&*state.venue_types).await?;
    Ok(Json(types))
}

/// GET /types/{type_id}
#[instrument(skip(state))]
async fn get_venue_type(
    State(state): State<AppState>,
    Path(type_id): Path<i32>,
) -> Result<Json<VenueTypeResponse>, ApiError> {
    let name = query_handlers::get_venue_type(type_id, &*state.venue_types).await?;
    Ok(Json(VenueTypeResponse { type_id, name }))
}

/// GET /{venue_id}
#[instrument(skip(state))]
async fn get_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i32>,
) -> Result<Json<Venue>, ApiError> {
    let venue = query_handlers::get_venue(
        venue_id,
        state.clock.as_ref(),
        &*state.venues,
        &*state.ratings,
        &*state.reservations,
    )
    .await?;

    Ok(Json(venue))
}

/// GET /{venue_id}/rating
#[instrument(skip(state))]
async fn get_venue_rating(
    State(state): State<AppState>,
    Path(venue_id): Path<i32>,
) -> Result<Json<VenueRatingResponse>, ApiError> {
    let average_rating = query_handlers::get_venue_rating(venue_id, &*state.venues).await?;
    Ok(Json(VenueRatingResponse {
        venue_id,
        average_rating,
    }))
}

/// GET /{venue_id}/ratings
#[instrument(skip(state))]
async fn list_venue_ratings(
    State(state): State<AppState>,
    Path(venue_id): Path<i32>,
) -> Result<Json<Vec<Rating>>, ApiError> {
    let ratings = query_handlers::get_venue_ratings(venue_id, &*state.ratings).await?;
    Ok(Json(ratings))
}

/// POST /
#[instrument(skip(state, request), fields(name = %request.name))]
async fn create_venue(
    State(state): State<AppState>,
    Json(request): Json<CreateVenueRequest>,
) -> Result<Json<OperationOutcome>, ApiError> {
    let command = CreateVenue {
        correlation_id: Uuid::new_v4(),
        name: request.name,
        location: request.location,
        description: request.description,
        working_hours: request.working_hours,
        maximum_capacity: request.maximum_capacity,
        type_id: request.type_id,
    };

    info!(correlation_id = %command.correlation_id, "handling create_venue command");

    let outcome = command_handlers::handle_create_venue(&command, &*state.venues).await?;
    Ok(Json(outcome))
}

/// PATCH /{venue_id}
#[instrument(skip(state, body))]
async fn update_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i32>,
    body: Bytes,
) -> Result<Json<OperationOutcome>, ApiError> {
    let command = UpdateVenue {
        correlation_id: Uuid::new_v4(),
        venue_id,
        changes: parse_changes(&body)?,
    };

    info!(correlation_id = %command.correlation_id, "handling update_venue command");

    let outcome = command_handlers::handle_update_venue(
        &command,
        state.clock.as_ref(),
        &*state.venues,
        &*state.reservations,
    )
    .await?;

    Ok(Json(outcome))
}

/// POST /{venue_id}/ratings
#[instrument(skip(state, request), fields(user_id = request.user_id))]
async fn rate_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i32>,
    Json(request): Json<RateVenueRequest>,
) -> Result<Json<OperationOutcome>, ApiError> {
    let command = RateVenue {
        correlation_id: Uuid::new_v4(),
        venue_id,
        user_id: request.user_id,
        rating: request.rating,
        comment: request.comment,
    };

    info!(correlation_id = %command.correlation_id, "handling rate_venue command");

    let outcome = command_handlers::handle_rate_venue(
        &command,
        &*state.venues,
        &*state.ratings,
        &*state.users,
    )
    .await?;

    Ok(Json(outcome))
}

/// DELETE /{venue_id}
#[instrument(skip(state))]
async fn delete_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i32>,
) -> Result<Json<OperationOutcome>, ApiError> {
    let command = DeleteVenue {
        correlation_id: Uuid::new_v4(),
        venue_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_venue command");

    let outcome = command_handlers::handle_delete_venue(&command, &*state.venues).await?;
    Ok(Json(outcome))
}

/// Returns the router for the venue catalog.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_venues).post(create_venue))
        .route("/nearby", get(nearby_venues))
        .route("/new", get(new_venues))
        .route("/trending", get(trending_venues))
        .route("/suggested", get(suggested_venues))
        .route("/types", get(list_venue_types))
        .route("/types/{type_id}", get(get_venue_type))
        .route(
            "/{venue_id}",
            get(get_venue).patch(update_venue).delete(delete_venue),
        )
        .route("/{venue_id}/rating", get(get_venue_rating))
        .route(
            "/{venue_id}/ratings",
            get(list_venue_ratings).post(rate_venue),
        )
}
