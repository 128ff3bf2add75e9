//! Command handlers for the reservations context.

use chrono::{DateTime, Utc};
use tracing::{error, info};
use venues_core::capacity::available_capacity;
use venues_core::clock::Clock;
use venues_core::error::DomainError;
use venues_core::model::Venue;
use venues_core::outcome::OperationOutcome;
use venues_core::repository::{ReservationRepository, UserRepository, VenueRepository};
use venues_core::time_window::TimeWindow;

use crate::domain::commands::{CreateReservation, DeleteReservation, UpdateReservation};

const NOT_ENOUGH_SEATS: &str = "Not enough free seats at the venue for the requested time.";

async fn require_user_and_venue(
    user_id: i32,
    venue_id: i32,
    users: &dyn UserRepository,
    venues: &dyn VenueRepository,
) -> Result<Venue, DomainError> {
    if users.find_username_by_id(user_id).await?.is_none() {
        return Err(DomainError::user_not_found(user_id));
    }
    venues
        .find_venue_by_id(venue_id)
        .await?
        .ok_or_else(|| DomainError::venue_not_found(venue_id))
}

/// Seats free at `venue` in the window around `at`, not counting the
/// reservation `ignoring` when one is being moved.
async fn free_seats_at(
    venue: &Venue,
    at: DateTime<Utc>,
    ignoring: Option<i32>,
    reservations: &dyn ReservationRepository,
) -> Result<i32, DomainError> {
    let mut occupied = reservations
        .find_reservations_by_venue_and_window(venue.id, TimeWindow::surrounding(at))
        .await?;
    if let Some(id) = ignoring {
        occupied.retain(|r| r.id != id);
    }
    Ok(available_capacity(venue, &occupied))
}

/// Handles the `CreateReservation` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the user or venue does not exist, or
/// `DomainError::Infrastructure` if a lookup fails.
pub async fn handle_create_reservation(
    command: &CreateReservation,
    clock: &dyn Clock,
    users: &dyn UserRepository,
    venues: &dyn VenueRepository,
    reservations: &dyn ReservationRepository,
) -> Result<OperationOutcome, DomainError> {
    if let Some(message) = command.validation_error(clock.now()) {
        return Ok(OperationOutcome::failure(message));
    }

    let venue = require_user_and_venue(command.user_id, command.venue_id, users, venues).await?;
    let free = free_seats_at(&venue, command.datetime, None, reservations).await?;
    if command.number_of_guests > free {
        return Ok(OperationOutcome::failure(NOT_ENOUGH_SEATS));
    }

    match reservations
        .save_reservation(command.to_new_reservation())
        .await
    {
        Ok(reservation_id) => {
            info!(
                correlation_id = %command.correlation_id,
                reservation_id,
                venue_id = command.venue_id,
                "reservation created"
            );
            Ok(OperationOutcome::success("Reservation created successfully."))
        }
        Err(e) => {
            error!(correlation_id = %command.correlation_id, error = %e, "failed to save reservation");
            Ok(OperationOutcome::failure(
                "Error while creating reservation. Please try again later.",
            ))
        }
    }
}

/// Handles the `UpdateReservation` command.
///
/// The moved or resized reservation must fit next to every other
/// reservation in its target window.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the user, the venue or a matching
/// reservation does not exist, or `DomainError::Infrastructure` if a lookup
/// fails.
pub async fn handle_update_reservation(
    command: &UpdateReservation,
    clock: &dyn Clock,
    users: &dyn UserRepository,
    venues: &dyn VenueRepository,
    reservations: &dyn ReservationRepository,
) -> Result<OperationOutcome, DomainError> {
    if let Some(message) = command.validation_error(clock.now()) {
        return Ok(OperationOutcome::failure(message));
    }

    let venue = require_user_and_venue(command.user_id, command.venue_id, users, venues).await?;
    let existing = reservations
        .find_reservation_by_id(command.reservation_id)
        .await?
        .filter(|reservation| command.targets(reservation))
        .ok_or_else(|| DomainError::reservation_not_found(command.reservation_id))?;

    if !command.modifies(&existing) {
        return Ok(OperationOutcome::failure(
            "No modifications found. Please change at least one field.",
        ));
    }

    let updated = command.apply_to(&existing);
    let free = free_seats_at(&venue, updated.datetime, Some(existing.id), reservations).await?;
    if updated.number_of_guests > free {
        return Ok(OperationOutcome::failure(NOT_ENOUGH_SEATS));
    }

    if let Err(e) = reservations.update_reservation(&updated).await {
        error!(
            correlation_id = %command.correlation_id,
            reservation_id = existing.id,
            error = %e,
            "failed to update reservation"
        );
        return Ok(OperationOutcome::failure(
            "Error while updating reservation. Please try again later.",
        ));
    }

    info!(
        correlation_id = %command.correlation_id,
        reservation_id = existing.id,
        "reservation updated"
    );
    Ok(OperationOutcome::success("Reservation updated successfully."))
}

/// Handles the `DeleteReservation` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the user, the venue or a matching
/// reservation does not exist, or `DomainError::Infrastructure` if a lookup
/// fails.
pub async fn handle_delete_reservation(
    command: &DeleteReservation,
    users: &dyn UserRepository,
    venues: &dyn VenueRepository,
    reservations: &dyn ReservationRepository,
) -> Result<OperationOutcome, DomainError> {
    require_user_and_venue(command.user_id, command.venue_id, users, venues).await?;
    let belongs = reservations
        .find_reservation_by_id(command.reservation_id)
        .await?
        .is_some_and(|reservation| command.targets(&reservation));
    if !belongs {
        return Err(DomainError::reservation_not_found(command.reservation_id));
    }

    if let Err(e) = reservations
        .delete_reservation_by_id(command.reservation_id)
        .await
    {
        error!(
            correlation_id = %command.correlation_id,
            reservation_id = command.reservation_id,
            error = %e,
            "failed to delete reservation"
        );
        return Ok(OperationOutcome::failure(
            "Error while deleting reservation. Please try again later.",
        ));
    }

    info!(
        correlation_id = %command.correlation_id,
        reservation_id = command.reservation_id,
        user_id = command.user_id,
        "reservation deleted"
    );
    Ok(OperationOutcome::success("Reservation deleted successfully."))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use uuid::Uuid;
    use venues_core::model::Reservation;
    use venues_test_support::{FixedClock, InMemoryStore, reservation, venue};

    use super::*;

    fn clock() -> FixedClock {
        FixedClock::at(2026, 7, 3, 18, 0)
    }

    fn evening(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 3, hour, minute, 0).unwrap()
    }

    fn create_command(user_id: i32, venue_id: i32, at: DateTime<Utc>, guests: i32) -> CreateReservation {
        CreateReservation {
            correlation_id: Uuid::new_v4(),
            user_id,
            venue_id,
            datetime: at,
            number_of_guests: guests,
        }
    }

    fn update_command(
        reservation_id: i32,
        datetime: Option<DateTime<Utc>>,
        number_of_guests: Option<i32>,
    ) -> UpdateReservation {
        UpdateReservation {
            correlation_id: Uuid::new_v4(),
            user_id: 1,
            venue_id: 4,
            reservation_id,
            datetime,
            number_of_guests,
        }
    }

    fn command(user_id: i32, venue_id: i32, reservation_id: i32) -> DeleteReservation {
        DeleteReservation {
            correlation_id: Uuid::new_v4(),
            user_id,
            venue_id,
            reservation_id,
        }
    }

    fn store() -> InMemoryStore {
        let at = Utc.with_ymd_and_hms(2026, 7, 3, 20, 0, 0).unwrap();
        InMemoryStore::new()
            .with_user(1, "ana")
            .with_user(2, "ivo")
            .with_venue(venue(4, "Jazz Bar", "Zagreb", 40))
            .with_venue(venue(5, "Rock Club", "Split", 60))
            .with_reservation(reservation(10, 4, at, 2))
            .with_reservation(Reservation {
                user_id: 2,
                ..reservation(11, 4, at, 3)
            })
    }

    #[tokio::test]
    async fn test_delete_reservation_removes_it() {
        // Arrange
        let store = store();

        // Act
        let outcome = handle_delete_reservation(&command(1, 4, 10), &store, &store, &store)
            .await
            .unwrap();

        // Assert
        assert_eq!(
            outcome,
            OperationOutcome::success("Reservation deleted successfully.")
        );
        let remaining: Vec<i32> = store.reservations().iter().map(|r| r.id).collect();
        assert_eq!(remaining, vec![11]);
    }

    #[tokio::test]
    async fn test_delete_for_unknown_user_is_not_found() {
        let store = store();

        let result = handle_delete_reservation(&command(9, 4, 10), &store, &store, &store).await;

        assert_eq!(result, Err(DomainError::user_not_found(9)));
        assert_eq!(store.calls_to("find_venue_by_id"), 0);
    }

    #[tokio::test]
    async fn test_delete_for_unknown_venue_is_not_found() {
        let store = store();

        let result = handle_delete_reservation(&command(1, 8, 10), &store, &store, &store).await;

        assert_eq!(result, Err(DomainError::venue_not_found(8)));
    }

    #[tokio::test]
    async fn test_delete_of_another_users_reservation_is_not_found() {
        let store = store();

        let result = handle_delete_reservation(&command(1, 4, 11), &store, &store, &store).await;

        assert_eq!(result, Err(DomainError::reservation_not_found(11)));
        assert_eq!(store.reservations().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_with_mismatched_venue_is_not_found() {
        let store = store();

        let result = handle_delete_reservation(&command(1, 5, 10), &store, &store, &store).await;

        assert_eq!(result, Err(DomainError::reservation_not_found(10)));
        assert_eq!(store.calls_to("delete_reservation_by_id"), 0);
    }

    #[tokio::test]
    async fn test_delete_reports_store_failure() {
        let store = store().failing_on("delete_reservation_by_id");

        let outcome = handle_delete_reservation(&command(1, 4, 10), &store, &store, &store)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            OperationOutcome::failure("Error while deleting reservation. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_create_reservation_within_free_seats() {
        // Arrange
        let store = store();
        let command = create_command(1, 4, evening(20, 10), 35);

        // Act
        let outcome = handle_create_reservation(&command, &clock(), &store, &store, &store)
            .await
            .unwrap();

        // Assert
        assert_eq!(
            outcome,
            OperationOutcome::success("Reservation created successfully.")
        );
        let created = store
            .reservations()
            .into_iter()
            .find(|r| r.id == 12)
            .unwrap();
        assert_eq!(created.number_of_guests, 35);
        assert_eq!(created.datetime, evening(20, 10));
    }

    #[tokio::test]
    async fn test_create_beyond_free_seats_is_rejected() {
        let store = store();
        let command = create_command(1, 4, evening(20, 29), 36);

        let outcome = handle_create_reservation(&command, &clock(), &store, &store, &store)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            OperationOutcome::failure("Not enough free seats at the venue for the requested time.")
        );
        assert_eq!(store.calls_to("save_reservation"), 0);
    }

    #[tokio::test]
    async fn test_create_in_next_window_ignores_earlier_bookings() {
        let store = store();
        let command = create_command(1, 4, evening(20, 30), 40);

        let outcome = handle_create_reservation(&command, &clock(), &store, &store, &store)
            .await
            .unwrap();

        assert!(outcome.success);
    }

    #[tokio::test]
    async fn test_create_with_no_guests_touches_no_repository() {
        let store = store();
        let command = create_command(1, 4, evening(20, 0), 0);

        let outcome = handle_create_reservation(&command, &clock(), &store, &store, &store)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            OperationOutcome::failure("Number of guests must be positive.")
        );
        assert_eq!(store.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_create_in_the_past_is_rejected() {
        let store = store();
        let command = create_command(1, 4, clock().now() - TimeDelta::minutes(1), 2);

        let outcome = handle_create_reservation(&command, &clock(), &store, &store, &store)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            OperationOutcome::failure("Reservation date cannot be in the past.")
        );
    }

    #[tokio::test]
    async fn test_create_for_unknown_user_or_venue_is_not_found() {
        let store = store();

        let unknown_user =
            handle_create_reservation(&create_command(9, 4, evening(20, 0), 2), &clock(), &store, &store, &store)
                .await;
        let unknown_venue =
            handle_create_reservation(&create_command(1, 8, evening(20, 0), 2), &clock(), &store, &store, &store)
                .await;

        assert_eq!(unknown_user, Err(DomainError::user_not_found(9)));
        assert_eq!(unknown_venue, Err(DomainError::venue_not_found(8)));
        assert_eq!(store.calls_to("save_reservation"), 0);
    }

    #[tokio::test]
    async fn test_create_reports_store_failure() {
        let store = store().failing_on("save_reservation");
        let command = create_command(1, 4, evening(20, 0), 2);

        let outcome = handle_create_reservation(&command, &clock(), &store, &store, &store)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            OperationOutcome::failure("Error while creating reservation. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_update_moves_reservation() {
        // Arrange
        let store = store();
        let command = update_command(10, Some(evening(21, 0)), None);

        // Act
        let outcome = handle_update_reservation(&command, &clock(), &store, &store, &store)
            .await
            .unwrap();

        // Assert
        assert_eq!(
            outcome,
            OperationOutcome::success("Reservation updated successfully.")
        );
        let moved = store
            .reservations()
            .into_iter()
            .find(|r| r.id == 10)
            .unwrap();
        assert_eq!(moved.datetime, evening(21, 0));
        assert_eq!(moved.number_of_guests, 2);
    }

    #[tokio::test]
    async fn test_update_does_not_count_its_own_guests() {
        let store = store();

        let fits = handle_update_reservation(&update_command(10, None, Some(37)), &clock(), &store, &store, &store)
            .await
            .unwrap();
        let too_many =
            handle_update_reservation(&update_command(10, None, Some(38)), &clock(), &store, &store, &store)
                .await
                .unwrap();

        assert!(fits.success);
        assert_eq!(
            too_many,
            OperationOutcome::failure("Not enough free seats at the venue for the requested time.")
        );
    }

    #[tokio::test]
    async fn test_update_of_another_users_reservation_is_not_found() {
        let store = store();

        let result =
            handle_update_reservation(&update_command(11, None, Some(4)), &clock(), &store, &store, &store)
                .await;

        assert_eq!(result, Err(DomainError::reservation_not_found(11)));
        assert_eq!(store.calls_to("update_reservation"), 0);
    }

    #[tokio::test]
    async fn test_update_without_changes_is_rejected() {
        let store = store();

        let outcome =
            handle_update_reservation(&update_command(10, Some(evening(20, 0)), Some(2)), &clock(), &store, &store, &store)
                .await
                .unwrap();

        assert_eq!(
            outcome,
            OperationOutcome::failure("No modifications found. Please change at least one field.")
        );
    }

    #[tokio::test]
    async fn test_update_reports_store_failure() {
        let store = store().failing_on("update_reservation");

        let outcome =
            handle_update_reservation(&update_command(10, None, Some(4)), &clock(), &store, &store, &store)
                .await
                .unwrap();

        assert_eq!(
            outcome,
            OperationOutcome::failure("Error while updating reservation. Please try again later.")
        );
    }
}
