//! `UserRepository` over the `users` table.

use async_trait::async_trait;
use venues_core::error::DomainError;
use venues_core::repository::UserRepository;

use crate::pg_venue_store::{PgVenueStore, storage_error};

#[async_trait]
impl UserRepository for PgVenueStore {
    async fn find_username_by_id(&self, user_id: i32) -> Result<Option<String>, DomainError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT username FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("find_username_by_id"))?;
        Ok(row.map(|(username,)| username))
    }
}
