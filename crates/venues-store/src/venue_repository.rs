//! `VenueRepository` over the `venues` table.

use async_trait::async_trait;
use venues_core::error::DomainError;
use venues_core::model::{NewVenue, Venue};
use venues_core::page::{Page, PageRequest};
use venues_core::repository::{SUGGESTION_RATING_THRESHOLD, VenueRepository};
use venues_core::time_window::TimeWindow;

use crate::pg_venue_store::{PgVenueStore, page_from, storage_error};
use crate::rows::VenueRow;
use crate::schema::{FILTERED_VENUES_PREDICATE, SUGGESTED_VENUES_CTE, VENUE_COLUMNS};

#[async_trait]
impl VenueRepository for PgVenueStore {
    async fn find_venue_by_id(&self, id: i32) -> Result<Option<Venue>, DomainError> {
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1");
        let row: Option<VenueRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("find_venue_by_id"))?;
        Ok(row.map(Venue::from))
    }

    async fn find_venues_by_ids(&self, ids: &[i32]) -> Result<Vec<Venue>, DomainError> {
        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = ANY($1) ORDER BY id");
        let rows: Vec<VenueRow> = sqlx::query_as(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("find_venues_by_ids"))?;
        Ok(rows.into_iter().map(Venue::from).collect())
    }

    async fn find_venues_filtered(
        &self,
        page: PageRequest,
        search_query: Option<&str>,
        type_ids: Option<&[i32]>,
    ) -> Result<Page<Venue>, DomainError> {
        let type_ids = type_ids.map(<[i32]>::to_vec);

        let count_sql = format!("SELECT COUNT(*) FROM venues {FILTERED_VENUES_PREDICATE}");
        let (total,): (i64,) = sqlx::query_as(&count_sql)
            .bind(search_query)
            .bind(type_ids.clone())
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error("count_venues_filtered"))?;

        let sql = format!(
            "SELECT {VENUE_COLUMNS} FROM venues {FILTERED_VENUES_PREDICATE} \
             ORDER BY id LIMIT $3 OFFSET $4"
        );
        let rows: Vec<VenueRow> = sqlx::query_as(&sql)
            .bind(search_query)
            .bind(type_ids)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("find_venues_filtered"))?;

        Ok(page_from(rows, page, total))
    }

    async fn find_venues_by_location(
        &self,
        city: &str,
        page: PageRequest,
    ) -> Result<Page<Venue>, DomainError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM venues WHERE location = $1")
            .bind(city)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error("count_venues_by_location"))?;

        let sql = format!(
            "SELECT {VENUE_COLUMNS} FROM venues WHERE location = $1 \
             ORDER BY id LIMIT $2 OFFSET $3"
        );
        let rows: Vec<VenueRow> = sqlx::query_as(&sql)
            .bind(city)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("find_venues_by_location"))?;

        Ok(page_from(rows, page, total))
    }

    async fn find_venues_by_location_in(
        &self,
        cities: &[String],
        page: PageRequest,
    ) -> Result<Page<Venue>, DomainError> {
        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM venues WHERE location = ANY($1)")
                .bind(cities)
                .fetch_one(&self.pool)
                .await
                .map_err(storage_error("count_venues_by_location_in"))?;

        let sql = format!(
            "SELECT {VENUE_COLUMNS} FROM venues WHERE location = ANY($1) \
             ORDER BY id LIMIT $2 OFFSET $3"
        );
        let rows: Vec<VenueRow> = sqlx::query_as(&sql)
            .bind(cities)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("find_venues_by_location_in"))?;

        Ok(page_from(rows, page, total))
    }

    async fn find_all_venues(&self, page: PageRequest) -> Result<Page<Venue>, DomainError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM venues")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error("count_venues"))?;

        let sql = format!("SELECT {VENUE_COLUMNS} FROM venues ORDER BY id DESC LIMIT $1 OFFSET $2");
        let rows: Vec<VenueRow> = sqlx::query_as(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("find_all_venues"))?;

        Ok(page_from(rows, page, total))
    }

    async fn find_suggested_venues(
        &self,
        window: TimeWindow,
        page: PageRequest,
    ) -> Result<Page<Venue>, DomainError> {
        let count_sql =
            format!("{SUGGESTED_VENUES_CTE} SELECT COUNT(*) FROM suggested WHERE free_seats > 0");
        let (total,): (i64,) = sqlx::query_as(&count_sql)
            .bind(window.lower_bound)
            .bind(window.upper_bound)
            .bind(SUGGESTION_RATING_THRESHOLD)
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error("count_suggested_venues"))?;

        let sql = format!(
            "{SUGGESTED_VENUES_CTE} SELECT {VENUE_COLUMNS} FROM suggested WHERE free_seats > 0 \
             ORDER BY average_rating DESC, free_seats DESC, id LIMIT $4 OFFSET $5"
        );
        let rows: Vec<VenueRow> = sqlx::query_as(&sql)
            .bind(window.lower_bound)
            .bind(window.upper_bound)
            .bind(SUGGESTION_RATING_THRESHOLD)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("find_suggested_venues"))?;

        Ok(page_from(rows, page, total))
    }

    async fn save_venue(&self, venue: NewVenue) -> Result<i32, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("save_venue"))?;

        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO venues \
             (name, location, description, working_hours, maximum_capacity, venue_type_id, average_rating) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(&venue.name)
        .bind(&venue.location)
        .bind(&venue.description)
        .bind(&venue.working_hours)
        .bind(venue.maximum_capacity)
        .bind(venue.venue_type_id)
        .bind(venue.average_rating)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_error("save_venue"))?;

        tx.commit().await.map_err(storage_error("save_venue"))?;
        Ok(id)
    }

    async fn update_venue(&self, venue: &Venue) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("update_venue"))?;

        sqlx::query(
            "UPDATE venues SET name = $2, location = $3, description = $4, \
             working_hours = $5, maximum_capacity = $6, venue_type_id = $7 \
             WHERE id = $1",
        )
        .bind(venue.id)
        .bind(&venue.name)
        .bind(&venue.location)
        .bind(&venue.description)
        .bind(&venue.working_hours)
        .bind(venue.maximum_capacity)
        .bind(venue.venue_type_id)
        .execute(&mut *tx)
        .await
        .map_err(storage_error("update_venue"))?;

        tx.commit().await.map_err(storage_error("update_venue"))
    }

    async fn update_venue_rating(
        &self,
        venue_id: i32,
        average_rating: f64,
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("update_venue_rating"))?;

        sqlx::query("UPDATE venues SET average_rating = $2 WHERE id = $1")
            .bind(venue_id)
            .bind(average_rating)
            .execute(&mut *tx)
            .await
            .map_err(storage_error("update_venue_rating"))?;

        tx.commit().await.map_err(storage_error("update_venue_rating"))
    }

    async fn delete_venue_by_id(&self, id: i32) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("delete_venue_by_id"))?;

        sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(storage_error("delete_venue_by_id"))?;

        tx.commit().await.map_err(storage_error("delete_venue_by_id"))
    }
}
