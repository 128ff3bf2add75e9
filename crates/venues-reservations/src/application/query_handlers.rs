//! Query handlers for the reservations context.

use venues_core::error::DomainError;
use venues_core::model::Reservation;
use venues_core::repository::{ReservationRepository, UserRepository};

/// Returns every reservation of a user, earliest first.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the user does not exist, or
/// `DomainError::Infrastructure` if a lookup fails.
pub async fn get_user_reservations(
    user_id: i32,
    users: &dyn UserRepository,
    reservations: &dyn ReservationRepository,
) -> Result<Vec<Reservation>, DomainError> {
    if users.find_username_by_id(user_id).await?.is_none() {
        return Err(DomainError::user_not_found(user_id));
    }

    let mut found = reservations.find_reservations_by_user_id(user_id).await?;
    found.sort_by_key(|r| r.datetime);
    Ok(found)
}
