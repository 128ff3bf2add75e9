//! Test repositories: in-memory implementations of every repository trait.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use venues_core::error::DomainError;
use venues_core::model::{
    NewRating, NewReservation, NewVenue, Rating, Reservation, Venue, VenueReservationCount,
    VenueType,
};
use venues_core::page::{Page, PageRequest};
use venues_core::repository::{
    RatingRepository, ReservationRepository, SUGGESTION_RATING_THRESHOLD, UserRepository,
    VenueRepository, VenueTypeRepository,
};
use venues_core::time_window::TimeWindow;

/// An in-memory store that implements every repository trait and records
/// each method call by name.
///
/// Writes can be made to fail with [`InMemoryStore::failing_on`], which is how
/// tests exercise the "store write failed" branches of the command handlers.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    venues: Mutex<Vec<Venue>>,
    ratings: Mutex<Vec<Rating>>,
    reservations: Mutex<Vec<Reservation>>,
    users: Mutex<HashMap<i32, String>>,
    venue_types: Mutex<Vec<VenueType>>,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<&'static str>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a venue.
    #[must_use]
    pub fn with_venue(self, venue: Venue) -> Self {
        self.venues.lock().unwrap().push(venue);
        self
    }

    /// Adds a rating.
    #[must_use]
    pub fn with_rating(self, rating: Rating) -> Self {
        self.ratings.lock().unwrap().push(rating);
        self
    }

    /// Adds a reservation.
    #[must_use]
    pub fn with_reservation(self, reservation: Reservation) -> Self {
        self.reservations.lock().unwrap().push(reservation);
        self
    }

    /// Adds a user.
    #[must_use]
    pub fn with_user(self, user_id: i32, username: &str) -> Self {
        self.users
            .lock()
            .unwrap()
            .insert(user_id, username.to_owned());
        self
    }

    /// Adds a venue type.
    #[must_use]
    pub fn with_venue_type(self, id: i32, name: &str) -> Self {
        self.venue_types.lock().unwrap().push(VenueType {
            id,
            name: name.to_owned(),
        });
        self
    }

    /// Makes the named repository method return an infrastructure error.
    #[must_use]
    pub fn failing_on(self, method: &'static str) -> Self {
        self.failing.lock().unwrap().insert(method);
        self
    }

    /// Number of times the named repository method was called.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls_to(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|name| **name == method)
            .count()
    }

    /// Total number of repository calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Snapshot of a stored venue.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn venue(&self, id: i32) -> Option<Venue> {
        self.venues
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == id)
            .cloned()
    }

    /// Snapshot of every stored rating.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn ratings(&self) -> Vec<Rating> {
        self.ratings.lock().unwrap().clone()
    }

    /// Snapshot of every stored reservation.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn reservations(&self) -> Vec<Reservation> {
        self.reservations.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str) -> Result<(), DomainError> {
        self.calls.lock().unwrap().push(method);
        if self.failing.lock().unwrap().contains(method) {
            return Err(DomainError::Infrastructure(format!("{method} failed")));
        }
        Ok(())
    }

    fn page_of<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let content = items
            .iter()
            .skip(offset)
            .take(page.size() as usize)
            .cloned()
            .collect();
        Page::new(content, page, items.len() as u64)
    }

    fn sorted_venues(&self, keep: impl Fn(&Venue) -> bool) -> Vec<Venue> {
        let mut venues: Vec<Venue> = self
            .venues
            .lock()
            .unwrap()
            .iter()
            .filter(|&v| keep(v))
            .cloned()
            .collect();
        venues.sort_by_key(|v| v.id);
        venues
    }

    fn guests_in_window(&self, venue_id: i32, window: TimeWindow) -> i32 {
        self.reservations
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.venue_id == venue_id && window.contains(r.datetime))
            .map(|r| r.number_of_guests)
            .sum()
    }
}

#[async_trait]
impl VenueRepository for InMemoryStore {
    async fn find_venue_by_id(&self, id: i32) -> Result<Option<Venue>, DomainError> {
        self.record("find_venue_by_id")?;
        Ok(self.venue(id))
    }

    async fn find_venues_by_ids(&self, ids: &[i32]) -> Result<Vec<Venue>, DomainError> {
        self.record("find_venues_by_ids")?;
        Ok(self.sorted_venues(|v| ids.contains(&v.id)))
    }

    async fn find_venues_filtered(
        &self,
        page: PageRequest,
        search_query: Option<&str>,
        type_ids: Option<&[i32]>,
    ) -> Result<Page<Venue>, DomainError> {
        self.record("find_venues_filtered")?;
        let needle = search_query.map(str::to_lowercase);
        let venues = self.sorted_venues(|v| {
            let matches_search = needle.as_deref().is_none_or(|needle| {
                v.name.to_lowercase().contains(needle)
                    || v.description.to_lowercase().contains(needle)
            });
            let matches_type = type_ids.is_none_or(|ids| ids.contains(&v.venue_type_id));
            matches_search && matches_type
        });
        Ok(Self::page_of(&venues, page))
    }

    async fn find_venues_by_location(
        &self,
        city: &str,
        page: PageRequest,
    ) -> Result<Page<Venue>, DomainError> {
        self.record("find_venues_by_location")?;
        let venues = self.sorted_venues(|v| v.location == city);
        Ok(Self::page_of(&venues, page))
    }

    async fn find_venues_by_location_in(
        &self,
        cities: &[String],
        page: PageRequest,
    ) -> Result<Page<Venue>, DomainError> {
        self.record("find_venues_by_location_in")?;
        let venues = self.sorted_venues(|v| cities.contains(&v.location));
        Ok(Self::page_of(&venues, page))
    }

    async fn find_all_venues(&self, page: PageRequest) -> Result<Page<Venue>, DomainError> {
        self.record("find_all_venues")?;
        let mut venues = self.sorted_venues(|_| true);
        venues.reverse();
        Ok(Self::page_of(&venues, page))
    }

    async fn find_suggested_venues(
        &self,
        window: TimeWindow,
        page: PageRequest,
    ) -> Result<Page<Venue>, DomainError> {
        self.record("find_suggested_venues")?;
        let mut candidates: Vec<(Venue, i32)> = self
            .sorted_venues(|v| v.average_rating > SUGGESTION_RATING_THRESHOLD)
            .into_iter()
            .map(|v| {
                let free = v.maximum_capacity - self.guests_in_window(v.id, window);
                (v, free)
            })
            .filter(|(_, free)| *free > 0)
            .collect();
        candidates.sort_by(|(a, a_free), (b, b_free)| {
            b.average_rating
                .total_cmp(&a.average_rating)
                .then(b_free.cmp(a_free))
        });
        let venues: Vec<Venue> = candidates.into_iter().map(|(v, _)| v).collect();
        Ok(Self::page_of(&venues, page))
    }

    async fn save_venue(&self, venue: NewVenue) -> Result<i32, DomainError> {
        self.record("save_venue")?;
        let mut venues = self.venues.lock().unwrap();
        let id = venues.iter().map(|v| v.id).max().unwrap_or(0) + 1;
        venues.push(Venue {
            id,
            name: venue.name,
            location: venue.location,
            description: venue.description,
            working_hours: venue.working_hours,
            maximum_capacity: venue.maximum_capacity,
            available_capacity: venue.maximum_capacity,
            venue_type_id: venue.venue_type_id,
            average_rating: venue.average_rating,
        });
        Ok(id)
    }

    async fn update_venue(&self, venue: &Venue) -> Result<(), DomainError> {
        self.record("update_venue")?;
        let mut venues = self.venues.lock().unwrap();
        if let Some(stored) = venues.iter_mut().find(|v| v.id == venue.id) {
            *stored = Venue {
                average_rating: stored.average_rating,
                ..venue.clone()
            };
        }
        Ok(())
    }

    async fn update_venue_rating(
        &self,
        venue_id: i32,
        average_rating: f64,
    ) -> Result<(), DomainError> {
        self.record("update_venue_rating")?;
        let mut venues = self.venues.lock().unwrap();
        if let Some(stored) = venues.iter_mut().find(|v| v.id == venue_id) {
            stored.average_rating = average_rating;
        }
        Ok(())
    }

    async fn delete_venue_by_id(&self, id: i32) -> Result<(), DomainError> {
        self.record("delete_venue_by_id")?;
        self.venues.lock().unwrap().retain(|v| v.id != id);
        Ok(())
    }
}

#[async_trait]
impl RatingRepository for InMemoryStore {
    async fn find_ratings_by_venue_id(&self, venue_id: i32) -> Result<Vec<Rating>, DomainError> {
        self.record("find_ratings_by_venue_id")?;
        Ok(self
            .ratings()
            .into_iter()
            .filter(|r| r.venue_id == venue_id)
            .collect())
    }

    async fn find_ratings_by_venue_ids(
        &self,
        venue_ids: &[i32],
    ) -> Result<Vec<Rating>, DomainError> {
        self.record("find_ratings_by_venue_ids")?;
        Ok(self
            .ratings()
            .into_iter()
            .filter(|r| venue_ids.contains(&r.venue_id))
            .collect())
    }

    async fn save_rating(&self, rating: NewRating) -> Result<i32, DomainError> {
        self.record("save_rating")?;
        let mut ratings = self.ratings.lock().unwrap();
        let id = ratings.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        ratings.push(Rating {
            id,
            venue_id: rating.venue_id,
            rating: rating.rating,
            username: rating.username,
            comment: rating.comment,
        });
        Ok(id)
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn find_reservation_by_id(
        &self,
        id: i32,
    ) -> Result<Option<Reservation>, DomainError> {
        self.record("find_reservation_by_id")?;
        Ok(self.reservations().into_iter().find(|r| r.id == id))
    }

    async fn find_reservations_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Vec<Reservation>, DomainError> {
        self.record("find_reservations_by_user_id")?;
        let mut reservations: Vec<Reservation> = self
            .reservations()
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect();
        reservations.sort_by_key(|r| (r.datetime, r.id));
        Ok(reservations)
    }

    async fn find_reservations_by_venue_and_window(
        &self,
        venue_id: i32,
        window: TimeWindow,
    ) -> Result<Vec<Reservation>, DomainError> {
        self.record("find_reservations_by_venue_and_window")?;
        Ok(self
            .reservations()
            .into_iter()
            .filter(|r| r.venue_id == venue_id && window.contains(r.datetime))
            .collect())
    }

    async fn find_reservations_in_window(
        &self,
        window: TimeWindow,
    ) -> Result<Vec<Reservation>, DomainError> {
        self.record("find_reservations_in_window")?;
        Ok(self
            .reservations()
            .into_iter()
            .filter(|r| window.contains(r.datetime))
            .collect())
    }

    async fn find_top_venues_by_reservation_count(
        &self,
        page: PageRequest,
    ) -> Result<Page<VenueReservationCount>, DomainError> {
        self.record("find_top_venues_by_reservation_count")?;
        let mut counts: HashMap<i32, i64> = HashMap::new();
        for reservation in self.reservations() {
            *counts.entry(reservation.venue_id).or_default() += 1;
        }
        let mut ranking: Vec<VenueReservationCount> = counts
            .into_iter()
            .map(|(venue_id, reservation_count)| VenueReservationCount {
                venue_id,
                reservation_count,
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.reservation_count
                .cmp(&a.reservation_count)
                .then(a.venue_id.cmp(&b.venue_id))
        });
        Ok(Self::page_of(&ranking, page))
    }

    async fn save_reservation(&self, reservation: NewReservation) -> Result<i32, DomainError> {
        self.record("save_reservation")?;
        let mut reservations = self.reservations.lock().unwrap();
        let id = reservations.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        reservations.push(Reservation {
            id,
            user_id: reservation.user_id,
            venue_id: reservation.venue_id,
            datetime: reservation.datetime,
            number_of_guests: reservation.number_of_guests,
        });
        Ok(id)
    }

    async fn update_reservation(&self, reservation: &Reservation) -> Result<(), DomainError> {
        self.record("update_reservation")?;
        let mut reservations = self.reservations.lock().unwrap();
        if let Some(stored) = reservations.iter_mut().find(|r| r.id == reservation.id) {
            stored.datetime = reservation.datetime;
            stored.number_of_guests = reservation.number_of_guests;
        }
        Ok(())
    }

    async fn delete_reservation_by_id(&self, id: i32) -> Result<(), DomainError> {
        self.record("delete_reservation_by_id")?;
        self.reservations.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_username_by_id(&self, user_id: i32) -> Result<Option<String>, DomainError> {
        self.record("find_username_by_id")?;
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }
}

#[async_trait]
impl VenueTypeRepository for InMemoryStore {
    async fn find_venue_type_by_id(&self, id: i32) -> Result<Option<VenueType>, DomainError> {
        self.record("find_venue_type_by_id")?;
        Ok(self
            .venue_types
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn find_all_venue_types(&self) -> Result<Vec<VenueType>, DomainError> {
        self.record("find_all_venue_types")?;
        Ok(self.venue_types.lock().unwrap().clone())
    }
}

/// A store whose every read and write returns an infrastructure error.
/// Useful for testing error-handling paths.
#[derive(Debug)]
pub struct FailingStore;

fn unavailable<T>() -> Result<T, DomainError> {
    Err(DomainError::Infrastructure("connection refused".into()))
}

#[async_trait]
impl VenueRepository for FailingStore {
    async fn find_venue_by_id(&self, _id: i32) -> Result<Option<Venue>, DomainError> {
        unavailable()
    }

    async fn find_venues_by_ids(&self, _ids: &[i32]) -> Result<Vec<Venue>, DomainError> {
        unavailable()
    }

    async fn find_venues_filtered(
        &self,
        _page: PageRequest,
        _search_query: Option<&str>,
        _type_ids: Option<&[i32]>,
    ) -> Result<Page<Venue>, DomainError> {
        unavailable()
    }

    async fn find_venues_by_location(
        &self,
        _city: &str,
        _page: PageRequest,
    ) -> Result<Page<Venue>, DomainError> {
        unavailable()
    }

    async fn find_venues_by_location_in(
        &self,
        _cities: &[String],
        _page: PageRequest,
    ) -> Result<Page<Venue>, DomainError> {
        unavailable()
    }

    async fn find_all_venues(&self, _page: PageRequest) -> Result<Page<Venue>, DomainError> {
        unavailable()
    }

    async fn find_suggested_venues(
        &self,
        _window: TimeWindow,
        _page: PageRequest,
    ) -> Result<Page<Venue>, DomainError> {
        unavailable()
    }

    async fn save_venue(&self, _venue: NewVenue) -> Result<i32, DomainError> {
        unavailable()
    }

    async fn update_venue(&self, _venue: &Venue) -> Result<(), DomainError> {
        unavailable()
    }

    async fn update_venue_rating(
        &self,
        _venue_id: i32,
        _average_rating: f64,
    ) -> Result<(), DomainError> {
        unavailable()
    }

    async fn delete_venue_by_id(&self, _id: i32) -> Result<(), DomainError> {
        unavailable()
    }
}

#[async_trait]
impl RatingRepository for FailingStore {
    async fn find_ratings_by_venue_id(&self, _venue_id: i32) -> Result<Vec<Rating>, DomainError> {
        unavailable()
    }

    async fn find_ratings_by_venue_ids(
        &self,
        _venue_ids: &[i32],
    ) -> Result<Vec<Rating>, DomainError> {
        unavailable()
    }

    async fn save_rating(&self, _rating: NewRating) -> Result<i32, DomainError> {
        unavailable()
    }
}

#[async_trait]
impl ReservationRepository for FailingStore {
    async fn find_reservation_by_id(
        &self,
        _id: i32,
    ) -> Result<Option<Reservation>, DomainError> {
        unavailable()
    }

    async fn find_reservations_by_user_id(
        &self,
        _user_id: i32,
    ) -> Result<Vec<Reservation>, DomainError> {
        unavailable()
    }

    async fn find_reservations_by_venue_and_window(
        &self,
        _venue_id: i32,
        _window: TimeWindow,
    ) -> Result<Vec<Reservation>, DomainError> {
        unavailable()
    }

    async fn find_reservations_in_window(
        &self,
        _window: TimeWindow,
    ) -> Result<Vec<Reservation>, DomainError> {
        unavailable()
    }

    async fn find_top_venues_by_reservation_count(
        &self,
        _page: PageRequest,
    ) -> Result<Page<VenueReservationCount>, DomainError> {
        unavailable()
    }

    async fn save_reservation(&self, _reservation: NewReservation) -> Result<i32, DomainError> {
        unavailable()
    }

    async fn update_reservation(&self, _reservation: &Reservation) -> Result<(), DomainError> {
        unavailable()
    }

    async fn delete_reservation_by_id(&self, _id: i32) -> Result<(), DomainError> {
        unavailable()
    }
}

#[async_trait]
impl UserRepository for FailingStore {
    async fn find_username_by_id(&self, _user_id: i32) -> Result<Option<String>, DomainError> {
        unavailable()
    }
}

#[async_trait]
impl VenueTypeRepository for FailingStore {
    async fn find_venue_type_by_id(&self, _id: i32) -> Result<Option<VenueType>, DomainError> {
        unavailable()
    }

    async fn find_all_venue_types(&self) -> Result<Vec<VenueType>, DomainError> {
        unavailable()
    }
}
