//! Command handlers for the catalog context.
//!
//! Each handler validates structurally, then relationally, then writes.
//! Rule violations and failed writes come back as a failed
//! [`OperationOutcome`]; only missing entities and failed reads are errors.

use tracing::{error, info};
use venues_core::capacity::reserved_guests;
use venues_core::clock::Clock;
use venues_core::error::DomainError;
use venues_core::model::{NewRating, NewVenue};
use venues_core::outcome::OperationOutcome;
use venues_core::repository::{
    RatingRepository, ReservationRepository, UserRepository, VenueRepository,
};

use crate::domain::commands::{CreateVenue, DeleteVenue, RateVenue, UpdateVenue};
use crate::domain::rating::{MAX_RATING, MIN_RATING, incorporate, is_valid_rating};

/// Handles the `CreateVenue` command.
///
/// # Errors
///
/// Never fails today; the `Result` keeps the handler signatures uniform.
pub async fn handle_create_venue(
    command: &CreateVenue,
    venues: &dyn VenueRepository,
) -> Result<OperationOutcome, DomainError> {
    if let Some(message) = command.validation_error() {
        return Ok(OperationOutcome::failure(message));
    }

    let new_venue = NewVenue {
        name: command.name.clone(),
        location: command.location.clone(),
        description: command.description.clone(),
        working_hours: command.working_hours.clone(),
        maximum_capacity: command.maximum_capacity,
        venue_type_id: command.type_id,
        average_rating: 0.0,
    };

    match venues.save_venue(new_venue).await {
        Ok(venue_id) => {
            info!(
                correlation_id = %command.correlation_id,
                venue_id,
                "venue created"
            );
            Ok(OperationOutcome::success(format!(
                "Venue {} created successfully.",
                command.name
            )))
        }
        Err(e) => {
            error!(correlation_id = %command.correlation_id, error = %e, "failed to save venue");
            Ok(OperationOutcome::failure(
                "Error while creating venue. Please try again later.",
            ))
        }
    }
}

/// Handles the `UpdateVenue` command.
///
/// A new maximum capacity must still hold every guest reserved in the
/// active window.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the venue does not exist, or
/// `DomainError::Infrastructure` if a lookup fails.
pub async fn handle_update_venue(
    command: &UpdateVenue,
    clock: &dyn Clock,
    venues: &dyn VenueRepository,
    reservations: &dyn ReservationRepository,
) -> Result<OperationOutcome, DomainError> {
    let venue = venues
        .find_venue_by_id(command.venue_id)
        .await?
        .ok_or_else(|| DomainError::venue_not_found(command.venue_id))?;

    let Some(changes) = &command.changes else {
        return Ok(OperationOutcome::failure(
            "Update request cannot be empty. Provide at least one field to update.",
        ));
    };
    if let Some(message) = changes.validation_error() {
        return Ok(OperationOutcome::failure(message));
    }
    if !changes.modifies(&venue) {
        return Ok(OperationOutcome::failure(
            "No modifications found. Please change at least one field.",
        ));
    }

    if let Some(new_maximum) = changes.maximum_capacity {
        let occupied = reservations
            .find_reservations_by_venue_and_window(venue.id, clock.active_window())
            .await?;
        if i64::from(new_maximum) < reserved_guests(&occupied) {
            return Ok(OperationOutcome::failure(
                "New maximum capacity cannot be lower than the number of currently reserved guests.",
            ));
        }
    }

    let updated = changes.apply_to(&venue);
    if let Err(e) = venues.update_venue(&updated).await {
        error!(
            correlation_id = %command.correlation_id,
            venue_id = venue.id,
            error = %e,
            "failed to update venue"
        );
        return Ok(OperationOutcome::failure(
            "Error while updating venue. Please try again later.",
        ));
    }

    info!(
        correlation_id = %command.correlation_id,
        venue_id = venue.id,
        "venue updated"
    );
    Ok(OperationOutcome::success("Venue updated successfully."))
}

/// Handles the `RateVenue` command: stores the rating, then refreshes the
/// venue's stored average from the ratings read before the insert.
///
/// The two writes are not atomic. If the second fails the rating stays and
/// the stored average lags until the next submission.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the user or venue does not exist, or
/// `DomainError::Infrastructure` if a lookup fails.
pub async fn handle_rate_venue(
    command: &RateVenue,
    venues: &dyn VenueRepository,
    ratings: &dyn RatingRepository,
    users: &dyn UserRepository,
) -> Result<OperationOutcome, DomainError> {
    if !is_valid_rating(command.rating) {
        return Ok(OperationOutcome::failure(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}."
        )));
    }

    let username = users
        .find_username_by_id(command.user_id)
        .await?
        .ok_or_else(|| DomainError::user_not_found(command.user_id))?;
    if venues.find_venue_by_id(command.venue_id).await?.is_none() {
        return Err(DomainError::venue_not_found(command.venue_id));
    }

    let existing = ratings.find_ratings_by_venue_id(command.venue_id).await?;
    let new_rating = NewRating {
        venue_id: command.venue_id,
        rating: command.rating,
        username,
        comment: command.comment.clone(),
    };
    if let Err(e) = ratings.save_rating(new_rating).await {
        error!(
            correlation_id = %command.correlation_id,
            venue_id = command.venue_id,
            error = %e,
            "failed to save rating"
        );
        return Ok(OperationOutcome::failure(
            "Error while saving rating. Please try again later.",
        ));
    }

    let average_rating = incorporate(&existing, command.rating);
    if let Err(e) = venues
        .update_venue_rating(command.venue_id, average_rating)
        .await
    {
        error!(
            correlation_id = %command.correlation_id,
            venue_id = command.venue_id,
            error = %e,
            "rating saved but venue average not refreshed"
        );
        return Ok(OperationOutcome::failure(
            "Error while updating venue after rating. Please try again later.",
        ));
    }

    info!(
        correlation_id = %command.correlation_id,
        venue_id = command.venue_id,
        average_rating,
        "venue rated"
    );
    Ok(OperationOutcome::success(format!(
        "Venue with id {} successfully rated with rating {:?}.",
        command.venue_id, command.rating
    )))
}

/// Handles the `DeleteVenue` command.
///
/// # Errors
///
/// Never fails today; the `Result` keeps the handler signatures uniform.
pub async fn handle_delete_venue(
    command: &DeleteVenue,
    venues: &dyn VenueRepository,
) -> Result<OperationOutcome, DomainError> {
    if let Err(e) = venues.delete_venue_by_id(command.venue_id).await {
        error!(
            correlation_id = %command.correlation_id,
            venue_id = command.venue_id,
            error = %e,
            "failed to delete venue"
        );
        return Ok(OperationOutcome::failure(
            "Error while deleting venue. Please try again later.",
        ));
    }

    info!(
        correlation_id = %command.correlation_id,
        venue_id = command.venue_id,
        "venue deleted"
    );
    Ok(OperationOutcome::success("Venue successfully deleted."))
}
