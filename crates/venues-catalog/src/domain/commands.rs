//! Commands for the catalog context and their structural validation.

use uuid::Uuid;
use venues_core::model::Venue;

/// Command to create a venue.
#[derive(Debug, Clone)]
pub struct CreateVenue {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Display name.
    pub name: String,
    /// City the venue is located in.
    pub location: String,
    /// Free-form description.
    pub description: String,
    /// Human-readable opening hours.
    pub working_hours: String,
    /// Seats the venue can hold.
    pub maximum_capacity: i32,
    /// Venue type identifier.
    pub type_id: i32,
}

impl CreateVenue {
    /// Returns the message for the first blank or non-positive field.
    #[must_use]
    pub fn validation_error(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("Name cannot be empty.")
        } else if self.location.trim().is_empty() {
            Some("Location cannot be empty.")
        } else if self.description.trim().is_empty() {
            Some("Description cannot be empty.")
        } else if self.working_hours.trim().is_empty() {
            Some("Working hours cannot be empty.")
        } else if self.maximum_capacity <= 0 {
            Some("Maximum capacity must be positive.")
        } else if self.type_id <= 0 {
            Some("Invalid venue type id.")
        } else {
            None
        }
    }
}

/// Fields of a partial venue update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VenueChanges {
    /// New display name.
    pub name: Option<String>,
    /// New city.
    pub location: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New opening hours.
    pub working_hours: Option<String>,
    /// New maximum capacity.
    pub maximum_capacity: Option<i32>,
    /// New venue type identifier.
    pub type_id: Option<i32>,
}

fn is_blank(value: Option<&String>) -> bool {
    value.is_some_and(|v| v.trim().is_empty())
}

impl VenueChanges {
    /// Returns the message for the first provided field that is invalid.
    #[must_use]
    pub fn validation_error(&self) -> Option<&'static str> {
        if is_blank(self.name.as_ref()) {
            Some("Name is not valid.")
        } else if is_blank(self.location.as_ref()) {
            Some("Location is not valid.")
        } else if is_blank(self.description.as_ref()) {
            Some("Description is not valid.")
        } else if self.type_id.is_some_and(|id| id <= 0) {
            Some("Invalid venue type id.")
        } else if is_blank(self.working_hours.as_ref()) {
            Some("Working hours are not valid.")
        } else if self.maximum_capacity.is_some_and(|c| c <= 0) {
            Some("Maximum capacity is not valid.")
        } else {
            None
        }
    }

    /// Returns `true` if at least one provided field differs from `venue`.
    #[must_use]
    pub fn modifies(&self, venue: &Venue) -> bool {
        self.name.as_ref().is_some_and(|v| *v != venue.name)
            || self.location.as_ref().is_some_and(|v| *v != venue.location)
            || self
                .description
                .as_ref()
                .is_some_and(|v| *v != venue.description)
            || self
                .working_hours
                .as_ref()
                .is_some_and(|v| *v != venue.working_hours)
            || self
                .maximum_capacity
                .is_some_and(|v| v != venue.maximum_capacity)
            || self.type_id.is_some_and(|v| v != venue.venue_type_id)
    }

    /// Returns a copy of `venue` with every provided field replaced.
    #[must_use]
    pub fn apply_to(&self, venue: &Venue) -> Venue {
        Venue {
            name: self.name.clone().unwrap_or_else(|| venue.name.clone()),
            location: self
                .location
                .clone()
                .unwrap_or_else(|| venue.location.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| venue.description.clone()),
            working_hours: self
                .working_hours
                .clone()
                .unwrap_or_else(|| venue.working_hours.clone()),
            maximum_capacity: self.maximum_capacity.unwrap_or(venue.maximum_capacity),
            venue_type_id: self.type_id.unwrap_or(venue.venue_type_id),
            ..venue.clone()
        }
    }
}

/// Command to update a venue. A missing `changes` is rejected as empty.
#[derive(Debug, Clone)]
pub struct UpdateVenue {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The venue to update.
    pub venue_id: i32,
    /// The requested changes.
    pub changes: Option<VenueChanges>,
}

/// Command to rate a venue.
#[derive(Debug, Clone)]
pub struct RateVenue {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The venue being rated.
    pub venue_id: i32,
    /// The submitting user.
    pub user_id: i32,
    /// Submitted value.
    pub rating: f64,
    /// Optional free-text comment.
    pub comment: Option<String>,
}

/// Command to delete a venue.
#[derive(Debug, Clone)]
pub struct DeleteVenue {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The venue to delete.
    pub venue_id: i32,
}

#[cfg(test)]
mod tests {
    use venues_test_support::venue;

    use super::*;

    fn create(name: &str, capacity: i32, type_id: i32) -> CreateVenue {
        CreateVenue {
            correlation_id: Uuid::new_v4(),
            name: name.to_owned(),
            location: "Zagreb".to_owned(),
            description: "Cosy".to_owned(),
            working_hours: "08-22".to_owned(),
            maximum_capacity: capacity,
            type_id,
        }
    }

    #[test]
    fn test_create_validation_checks_fields_in_order() {
        assert_eq!(
            create("  ", 0, 0).validation_error(),
            Some("Name cannot be empty.")
        );
        assert_eq!(
            create("Bar", 0, 0).validation_error(),
            Some("Maximum capacity must be positive.")
        );
        assert_eq!(
            create("Bar", 10, 0).validation_error(),
            Some("Invalid venue type id.")
        );
        assert_eq!(create("Bar", 10, 1).validation_error(), None);
    }

    #[test]
    fn test_changes_reject_blank_provided_fields() {
        let changes = VenueChanges {
            working_hours: Some(String::new()),
            ..VenueChanges::default()
        };

        assert_eq!(
            changes.validation_error(),
            Some("Working hours are not valid.")
        );
    }

    #[test]
    fn test_changes_with_same_values_do_not_modify() {
        let venue = venue(1, "Bar", "Zagreb", 10);
        let changes = VenueChanges {
            name: Some("Bar".to_owned()),
            location: Some("Zagreb".to_owned()),
            maximum_capacity: Some(10),
            ..VenueChanges::default()
        };

        assert!(!changes.modifies(&venue));
        assert!(!VenueChanges::default().modifies(&venue));
    }

    #[test]
    fn test_apply_to_preserves_unset_fields() {
        let venue = venue(1, "Bar", "Zagreb", 10);
        let changes = VenueChanges {
            name: Some("Pub".to_owned()),
            maximum_capacity: Some(25),
            ..VenueChanges::default()
        };

        let updated = changes.apply_to(&venue);

        assert!(changes.modifies(&venue));
        assert_eq!(updated.name, "Pub");
        assert_eq!(updated.maximum_capacity, 25);
        assert_eq!(updated.location, venue.location);
        assert_eq!(updated.description, venue.description);
        assert_eq!(updated.working_hours, venue.working_hours);
        assert_eq!(updated.venue_type_id, venue.venue_type_id);
        assert_eq!(updated.id, venue.id);
    }
}
