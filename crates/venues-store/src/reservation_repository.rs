//! `ReservationRepository` over the `reservations` table.

use async_trait::async_trait;
use venues_core::error::DomainError;
use venues_core::model::{NewReservation, Reservation, VenueReservationCount};
use venues_core::page::{Page, PageRequest};
use venues_core::repository::ReservationRepository;
use venues_core::time_window::TimeWindow;

use crate::pg_venue_store::{PgVenueStore, page_from, storage_error};
use crate::rows::{ReservationCountRow, ReservationRow};
use crate::schema::RESERVATION_COLUMNS;

#[async_trait]
impl ReservationRepository for PgVenueStore {
    async fn find_reservation_by_id(
        &self,
        id: i32,
    ) -> Result<Option<Reservation>, DomainError> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1");
        let row: Option<ReservationRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error("find_reservation_by_id"))?;
        Ok(row.map(Reservation::from))
    }

    async fn find_reservations_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Vec<Reservation>, DomainError> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE user_id = $1 \
             ORDER BY datetime, id"
        );
        let rows: Vec<ReservationRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("find_reservations_by_user_id"))?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn find_reservations_by_venue_and_window(
        &self,
        venue_id: i32,
        window: TimeWindow,
    ) -> Result<Vec<Reservation>, DomainError> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE venue_id = $1 AND datetime >= $2 AND datetime < $3"
        );
        let rows: Vec<ReservationRow> = sqlx::query_as(&sql)
            .bind(venue_id)
            .bind(window.lower_bound)
            .bind(window.upper_bound)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("find_reservations_by_venue_and_window"))?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn find_reservations_in_window(
        &self,
        window: TimeWindow,
    ) -> Result<Vec<Reservation>, DomainError> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE datetime >= $1 AND datetime < $2"
        );
        let rows: Vec<ReservationRow> = sqlx::query_as(&sql)
            .bind(window.lower_bound)
            .bind(window.upper_bound)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error("find_reservations_in_window"))?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn find_top_venues_by_reservation_count(
        &self,
        page: PageRequest,
    ) -> Result<Page<VenueReservationCount>, DomainError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(DISTINCT venue_id) FROM reservations")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error("count_reserved_venues"))?;

        let rows: Vec<ReservationCountRow> = sqlx::query_as(
            "SELECT venue_id, COUNT(*) AS reservation_count FROM reservations \
             GROUP BY venue_id ORDER BY reservation_count DESC, venue_id \
             LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("find_top_venues_by_reservation_count"))?;

        Ok(page_from(rows, page, total))
    }

    async fn save_reservation(&self, reservation: NewReservation) -> Result<i32, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("save_reservation"))?;

        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO reservations (user_id, venue_id, datetime, number_of_guests) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(reservation.user_id)
        .bind(reservation.venue_id)
        .bind(reservation.datetime)
        .bind(reservation.number_of_guests)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_error("save_reservation"))?;

        tx.commit().await.map_err(storage_error("save_reservation"))?;
        Ok(id)
    }

    async fn update_reservation(&self, reservation: &Reservation) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("update_reservation"))?;

        sqlx::query(
            "UPDATE reservations SET datetime = $2, number_of_guests = $3 WHERE id = $1",
        )
        .bind(reservation.id)
        .bind(reservation.datetime)
        .bind(reservation.number_of_guests)
        .execute(&mut *tx)
        .await
        .map_err(storage_error("update_reservation"))?;

        tx.commit()
            .await
            .map_err(storage_error("update_reservation"))
    }

    async fn delete_reservation_by_id(&self, id: i32) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(storage_error("delete_reservation_by_id"))?;

        sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(storage_error("delete_reservation_by_id"))?;

        tx.commit()
            .await
            .map_err(storage_error("delete_reservation_by_id"))
    }
}
