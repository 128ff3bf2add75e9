//! `VenueTypeRepository` over the `venue_types` table.

use async_trait::async_trait;
use venues_core::error::DomainError;
use venues_core::model::VenueType;
use venues_core::repository::VenueTypeRepository;

use crate::pg_venue_store::{PgVenueStore, storage_error};
use crate::rows::VenueTypeRow;

#[async_trait]
impl VenueTypeRepository for PgVenueStore {
    async fn find_venue_type_by_id(&self, id: i32) -> Result<Option<VenueType>, DomainError> {
        let row: Option<VenueTypeRow> =
            sqlx::query_as("SELECT id, name FROM venue_types WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_error("find_venue_type_by_id"))?;
        Ok(row.map(VenueType::from))
    }

    async fn find_all_venue_types(&self) -> Result<Vec<VenueType>, DomainError> {
        let rows: Vec<VenueTypeRow> = sqlx::query_as("SELECT id, name FROM venue_types ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("find_all_venue_types"))?;
        Ok(rows.into_iter().map(VenueType::from).collect())
    }
}
