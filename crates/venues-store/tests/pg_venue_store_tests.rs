//! Integration tests for `PgVenueStore`.
//!
//! Each test gets a fresh database from `sqlx::test`.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use sqlx::PgPool;
use venues_core::model::{NewRating, NewReservation, NewVenue, Reservation};
use venues_core::page::PageRequest;
use venues_core::repository::{
    RatingRepository, ReservationRepository, UserRepository, VenueRepository,
    VenueTypeRepository,
};
use venues_core::time_window::TimeWindow;
use venues_store::PgVenueStore;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 10, 20, 15, 0).unwrap()
}

fn new_venue(name: &str, location: &str, maximum_capacity: i32) -> NewVenue {
    NewVenue {
        name: name.to_string(),
        location: location.to_string(),
        description: format!("{name} description"),
        working_hours: "08:00-23:00".to_string(),
        maximum_capacity,
        venue_type_id: 1,
        average_rating: 0.0,
    }
}

async fn seed_reference_data(pool: &PgPool) {
    sqlx::query("INSERT INTO venue_types (id, name) VALUES (1, 'Bar'), (2, 'Club')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO users (id, username) VALUES (1, 'ana'), (2, 'ivo')")
        .execute(pool)
        .await
        .unwrap();
}

async fn reserve(pool: &PgPool, user_id: i32, venue_id: i32, at: DateTime<Utc>, guests: i32) {
    sqlx::query(
        "INSERT INTO reservations (user_id, venue_id, datetime, number_of_guests) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(venue_id)
    .bind(at)
    .bind(guests)
    .execute(pool)
    .await
    .unwrap();
}

// --- venues ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_save_and_find_venue(pool: PgPool) {
    seed_reference_data(&pool).await;
    let store = PgVenueStore::new(pool);

    let id = store
        .save_venue(new_venue("Jazz Bar", "Zagreb", 40))
        .await
        .unwrap();

    let found = store.find_venue_by_id(id).await.unwrap().unwrap();
    assert_eq!(found.name, "Jazz Bar");
    assert_eq!(found.maximum_capacity, 40);
    assert_eq!(found.available_capacity, 40);
    assert!(store.find_venue_by_id(id + 1).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_filtered_listing_matches_search_and_types(pool: PgPool) {
    seed_reference_data(&pool).await;
    let store = PgVenueStore::new(pool);
    store.save_venue(new_venue("Jazz Bar", "Zagreb", 40)).await.unwrap();
    store
        .save_venue(NewVenue {
            venue_type_id: 2,
            ..new_venue("Jazz Club", "Split", 80)
        })
        .await
        .unwrap();
    store.save_venue(new_venue("Rock Pub", "Split", 30)).await.unwrap();
    let page = PageRequest::new(0, 10).unwrap();

    let all = store.find_venues_filtered(page, None, None).await.unwrap();
    let jazz = store.find_venues_filtered(page, Some("jAzZ"), None).await.unwrap();
    let jazz_clubs = store
        .find_venues_filtered(page, Some("jazz"), Some(&[2]))
        .await
        .unwrap();

    assert_eq!(all.total_elements, 3);
    assert_eq!(jazz.total_elements, 2);
    assert_eq!(jazz_clubs.content.len(), 1);
    assert_eq!(jazz_clubs.content[0].name, "Jazz Club");
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_location_listings_and_paging(pool: PgPool) {
    seed_reference_data(&pool).await;
    let store = PgVenueStore::new(pool);
    for (name, city) in [("A", "Zagreb"), ("B", "Split"), ("C", "Zagreb"), ("D", "Rijeka")] {
        store.save_venue(new_venue(name, city, 10)).await.unwrap();
    }

    let zagreb = store
        .find_venues_by_location("Zagreb", PageRequest::new(0, 1).unwrap())
        .await
        .unwrap();
    let coast = store
        .find_venues_by_location_in(
            &["Split".to_string(), "Rijeka".to_string()],
            PageRequest::default(),
        )
        .await
        .unwrap();
    let newest = store.find_all_venues(PageRequest::default()).await.unwrap();

    assert_eq!(zagreb.content.len(), 1);
    assert_eq!(zagreb.total_elements, 2);
    assert_eq!(zagreb.total_pages(), 2);
    assert_eq!(coast.total_elements, 2);
    let names: Vec<&str> = newest.content.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["D", "C", "B", "A"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_venue_keeps_stored_rating(pool: PgPool) {
    seed_reference_data(&pool).await;
    let store = PgVenueStore::new(pool);
    let id = store.save_venue(new_venue("Jazz Bar", "Zagreb", 40)).await.unwrap();
    store.update_venue_rating(id, 4.5).await.unwrap();
    let mut venue = store.find_venue_by_id(id).await.unwrap().unwrap();
    venue.name = "Blues Bar".to_string();
    venue.average_rating = 1.0;

    store.update_venue(&venue).await.unwrap();

    let stored = store.find_venue_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Blues Bar");
    assert!((stored.average_rating - 4.5).abs() < f64::EPSILON);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_venue_cascades(pool: PgPool) {
    seed_reference_data(&pool).await;
    let store = PgVenueStore::new(pool.clone());
    let id = store.save_venue(new_venue("Jazz Bar", "Zagreb", 40)).await.unwrap();
    reserve(&pool, 1, id, now(), 2).await;

    store.delete_venue_by_id(id).await.unwrap();

    assert!(store.find_venue_by_id(id).await.unwrap().is_none());
    assert!(store.find_reservations_by_user_id(1).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_suggested_venues_need_rating_and_free_seats(pool: PgPool) {
    seed_reference_data(&pool).await;
    let store = PgVenueStore::new(pool.clone());
    let good = store.save_venue(new_venue("Good", "Zagreb", 10)).await.unwrap();
    let best = store.save_venue(new_venue("Best", "Zagreb", 10)).await.unwrap();
    let full = store.save_venue(new_venue("Full", "Zagreb", 4)).await.unwrap();
    let average = store.save_venue(new_venue("Average", "Zagreb", 10)).await.unwrap();
    for (id, rating) in [(good, 4.2), (best, 4.8), (full, 4.9), (average, 4.0)] {
        store.update_venue_rating(id, rating).await.unwrap();
    }
    let window = TimeWindow::surrounding(now());
    reserve(&pool, 1, full, window.lower_bound, 4).await;
    reserve(&pool, 1, good, window.upper_bound, 10).await;

    let suggested = store
        .find_suggested_venues(window, PageRequest::default())
        .await
        .unwrap();

    let ids: Vec<i32> = suggested.content.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![best, good]);
    assert_eq!(suggested.total_elements, 2);
}

// --- ratings ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_ratings_batch_lookup(pool: PgPool) {
    seed_reference_data(&pool).await;
    let store = PgVenueStore::new(pool);
    let a = store.save_venue(new_venue("A", "Zagreb", 10)).await.unwrap();
    let b = store.save_venue(new_venue("B", "Zagreb", 10)).await.unwrap();
    let c = store.save_venue(new_venue("C", "Zagreb", 10)).await.unwrap();
    for (venue_id, rating) in [(a, 4.0), (a, 3.0), (b, 5.0), (c, 1.0)] {
        store
            .save_rating(NewRating {
                venue_id,
                rating,
                username: "ana".to_string(),
                comment: None,
            })
            .await
            .unwrap();
    }

    let batch = store.find_ratings_by_venue_ids(&[a, b]).await.unwrap();
    let single = store.find_ratings_by_venue_id(a).await.unwrap();

    assert_eq!(batch.len(), 3);
    assert!(batch.iter().all(|r| r.venue_id != c));
    assert_eq!(single.len(), 2);
}

// --- reservations ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_window_queries_are_half_open(pool: PgPool) {
    seed_reference_data(&pool).await;
    let store = PgVenueStore::new(pool.clone());
    let id = store.save_venue(new_venue("A", "Zagreb", 10)).await.unwrap();
    let window = TimeWindow::surrounding(now());
    reserve(&pool, 1, id, window.lower_bound, 1).await;
    reserve(&pool, 1, id, window.upper_bound - TimeDelta::seconds(1), 2).await;
    reserve(&pool, 1, id, window.upper_bound, 4).await;

    let for_venue = store
        .find_reservations_by_venue_and_window(id, window)
        .await
        .unwrap();
    let batch = store.find_reservations_in_window(window).await.unwrap();

    assert_eq!(for_venue.len(), 2);
    assert_eq!(batch.len(), 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_top_venues_by_reservation_count(pool: PgPool) {
    seed_reference_data(&pool).await;
    let store = PgVenueStore::new(pool.clone());
    let a = store.save_venue(new_venue("A", "Zagreb", 10)).await.unwrap();
    let b = store.save_venue(new_venue("B", "Zagreb", 10)).await.unwrap();
    for venue_id in [b, a, b, b, a] {
        reserve(&pool, 2, venue_id, now(), 1).await;
    }

    let ranking = store
        .find_top_venues_by_reservation_count(PageRequest::default())
        .await
        .unwrap();

    assert_eq!(ranking.total_elements, 2);
    assert_eq!(ranking.content[0].venue_id, b);
    assert_eq!(ranking.content[0].reservation_count, 3);
    assert_eq!(ranking.content[1].venue_id, a);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_and_delete_reservation(pool: PgPool) {
    seed_reference_data(&pool).await;
    let store = PgVenueStore::new(pool.clone());
    let id = store.save_venue(new_venue("A", "Zagreb", 10)).await.unwrap();
    reserve(&pool, 1, id, now() + TimeDelta::days(1), 2).await;
    reserve(&pool, 1, id, now(), 3).await;

    let mine = store.find_reservations_by_user_id(1).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine[0].datetime < mine[1].datetime);

    store.delete_reservation_by_id(mine[0].id).await.unwrap();

    assert!(store.find_reservation_by_id(mine[0].id).await.unwrap().is_none());
    assert!(store.find_reservation_by_id(mine[1].id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_save_and_update_reservation(pool: PgPool) {
    // Arrange
    seed_reference_data(&pool).await;
    let store = PgVenueStore::new(pool);
    let venue_id = store.save_venue(new_venue("A", "Zagreb", 10)).await.unwrap();

    // Act
    let id = store
        .save_reservation(NewReservation {
            user_id: 2,
            venue_id,
            datetime: now(),
            number_of_guests: 4,
        })
        .await
        .unwrap();
    let later = now() + TimeDelta::hours(3);
    store
        .update_reservation(&Reservation {
            id,
            user_id: 2,
            venue_id,
            datetime: later,
            number_of_guests: 6,
        })
        .await
        .unwrap();

    // Assert
    let stored = store.find_reservation_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.datetime, later);
    assert_eq!(stored.number_of_guests, 6);
    assert_eq!(stored.user_id, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_save_reservation_for_missing_venue_fails(pool: PgPool) {
    seed_reference_data(&pool).await;
    let store = PgVenueStore::new(pool);

    let result = store
        .save_reservation(NewReservation {
            user_id: 1,
            venue_id: 404,
            datetime: now(),
            number_of_guests: 2,
        })
        .await;

    assert!(result.is_err());
}

// --- users and types ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_users_and_venue_types(pool: PgPool) {
    seed_reference_data(&pool).await;
    let store = PgVenueStore::new(pool);

    assert_eq!(
        store.find_username_by_id(2).await.unwrap().as_deref(),
        Some("ivo")
    );
    assert!(store.find_username_by_id(9).await.unwrap().is_none());
    assert_eq!(
        store.find_venue_type_by_id(2).await.unwrap().unwrap().name,
        "Club"
    );
    assert_eq!(store.find_all_venue_types().await.unwrap().len(), 2);
}
