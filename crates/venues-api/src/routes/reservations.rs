//! Routes for a user's reservations.

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;
use venues_core::model::Reservation;
use venues_core::outcome::OperationOutcome;
use venues_reservations::application::{command_handlers, query_handlers};
use venues_reservations::domain::commands::{
    CreateReservation, DeleteReservation, UpdateReservation,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /.
#[derive(Debug, Deserialize)]
pub struct UserReservationsParams {
    /// The owner of the reservations.
    pub user_id: i32,
}

/// Query string for DELETE /{reservation_id}.
#[derive(Debug, Deserialize)]
pub struct DeleteReservationParams {
    /// The user cancelling the reservation.
    pub user_id: i32,
    /// The venue the reservation is for.
    pub venue_id: i32,
}

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    /// The user making the booking.
    pub user_id: i32,
    /// The venue being booked.
    pub venue_id: i32,
    /// RFC 3339 instant the booking is for.
    pub datetime: DateTime<Utc>,
    /// Seats requested.
    pub number_of_guests: i32,
}

/// Request body for PATCH /{reservation_id}.
#[derive(Debug, Deserialize)]
pub struct UpdateReservationRequest {
    /// The user owning the reservation.
    pub user_id: i32,
    /// The reserved venue.
    pub venue_id: i32,
    /// New instant, if moving the reservation.
    pub datetime: Option<DateTime<Utc>>,
    /// New seat count, if resizing the reservation.
    pub number_of_guests: Option<i32>,
}

/// GET /
#[instrument(skip(state))]
async fn list_user_reservations(
    State(state): State<AppState>,
    Query(params): Query<UserReservationsParams>,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let reservations =
        query_handlers::get_user_reservations(params.user_id, &*state.users, &*state.reservations)
            .await?;
    Ok(Json(reservations))
}

/// POST /
#[instrument(skip(state, request), fields(user_id = request.user_id, venue_id = request.venue_id))]
async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<Json<OperationOutcome>, ApiError> {
    let command = CreateReservation {
        correlation_id: Uuid::new_v4(),
        user_id: request.user_id,
        venue_id: request.venue_id,
        datetime: request.datetime,
        number_of_guests: request.number_of_guests,
    };

    info!(correlation_id = %command.correlation_id, "handling create_reservation command");

    let outcome = command_handlers::handle_create_reservation(
        &command,
        state.clock.as_ref(),
        &*state.users,
        &*state.venues,
        &*state.reservations,
    )
    .await?;

    Ok(Json(outcome))
}

/// PATCH /{reservation_id}
#[instrument(skip(state, request))]
async fn update_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<i32>,
    Json(request): Json<UpdateReservationRequest>,
) -> Result<Json<OperationOutcome>, ApiError> {
    let command = UpdateReservation {
        correlation_id: Uuid::new_v4(),
        user_id: request.user_id,
        venue_id: request.venue_id,
        reservation_id,
        datetime: request.datetime,
        number_of_guests: request.number_of_guests,
    };

    info!(correlation_id = %command.correlation_id, "handling update_reservation command");

    let outcome = command_handlers::handle_update_reservation(
        &command,
        state.clock.as_ref(),
        &*state.users,
        &*state.venues,
        &*state.reservations,
    )
    .await?;

    Ok(Json(outcome))
}

/// DELETE /{reservation_id}
#[instrument(skip(state))]
async fn delete_reservation(
    State(state): State<AppState>,
    Path(reservation_id): Path<i32>,
    Query(params): Query<DeleteReservationParams>,
) -> Result<Json<OperationOutcome>, ApiError> {
    let command = DeleteReservation {
        correlation_id: Uuid::new_v4(),
        user_id: params.user_id,
        venue_id: params.venue_id,
        reservation_id,
    };

    info!(correlation_id = %command.correlation_id, "handling delete_reservation command");

    let outcome = command_handlers::handle_delete_reservation(
        &command,
        &*state.users,
        &*state.venues,
        &*state.reservations,
    )
    .await?;

    Ok(Json(outcome))
}

/// Returns the router for reservations.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_user_reservations).post(create_reservation))
        .route(
            "/{reservation_id}",
            patch(update_reservation).delete(delete_reservation),
        )
}
