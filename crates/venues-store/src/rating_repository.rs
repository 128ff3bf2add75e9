//! `RatingRepository` over the `ratings` table.

use async_trait::async_trait;
use venues_core::error::DomainError;
use venues_core::model::{NewRating, Rating};
use venues_core::repository::RatingRepository;

use crate::pg_venue_store::{PgVenueStore, storage_error};
use crate::rows::RatingRow;
use crate::schema::RATING_COLUMNS;

#[async_trait]
impl RatingRepository for PgVenueStore {
    async fn find_ratings_by_venue_id(&self, venue_id: i32) -> Result<Vec<Rating>, DomainError> {
        let sql = format!("SELECT {RATING_COLUMNS} FROM ratings WHERE venue_id = $1 ORDER BY id");
        let rows: Vec<RatingRow> = sqlx::query_as(&sql)
            .bind(venue_id)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("find_ratings_by_venue_id"))?;
        Ok(rows.into_iter().map(Rating::from).collect())
    }

    async fn find_ratings_by_venue_ids(
        &self,
        venue_ids: &[i32],
    ) -> Result<Vec<Rating>, DomainError> {
        let sql = format!(
            "SELECT {RATING_COLUMNS} FROM ratings WHERE venue_id = ANY($1) ORDER BY venue_id, id"
        );
        let rows: Vec<RatingRow> = sqlx::query_as(&sql)
            .bind(venue_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("find_ratings_by_venue_ids"))?;
        Ok(rows.into_iter().map(Rating::from).collect())
    }

    async fn save_rating(&self, rating: NewRating) -> Result<i32, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("save_rating"))?;

        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO ratings (venue_id, rating, username, comment) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(rating.venue_id)
        .bind(rating.rating)
        .bind(&rating.username)
        .bind(rating.comment.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_error("save_rating"))?;

        tx.commit().await.map_err(storage_error("save_rating"))?;
        Ok(id)
    }
}
