//! # Reservation Repository
//!
//! Bookings and a guest's reservation history.
//!
//! ```text
//! reservations ──┬── JOIN properties        (what was booked)
//!                └── JOIN property_reviews  (average_rating of that property)
//!
//!   WHERE guest_id = $1 AND end_date < today
//!   ORDER BY start_date  LIMIT $2
//! ```
//!
//! The review join is an inner join: a past stay at a property that has
//! never been reviewed does not appear in the history.

use lightbnb_core::validation::{validate_id, validate_new_reservation};
use lightbnb_core::{NewReservation, Reservation, ReservationListing, DEFAULT_RESULT_LIMIT};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for reservation database operations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReservationRepository { pool }
    }

    /// Lists a guest's completed stays, earliest first.
    ///
    /// A stay is completed once its `end_date` is before today's date.
    ///
    /// ## Arguments
    /// * `guest_id` - The guest whose history to list
    /// * `limit` - Maximum rows (0 means the default of 10)
    ///
    /// ## Returns
    /// * `Ok(vec![])` - No completed, reviewed stays
    /// * `Err(DbError)` - Invalid id or query failure
    pub async fn list_past_for_guest(
        &self,
        guest_id: i64,
        limit: u32,
    ) -> DbResult<Vec<ReservationListing>> {
        validate_id("guest_id", guest_id)?;
        let limit = if limit == 0 { DEFAULT_RESULT_LIMIT } else { limit };

        debug!(guest_id, limit, "Listing past reservations");

        sqlx::query_as::<_, ReservationListing>(
            r#"
            SELECT properties.*,
                   reservations.id AS reservation_id,
                   reservations.guest_id AS guest_id,
                   reservations.start_date AS start_date,
                   reservations.end_date AS end_date,
                   avg(property_reviews.rating) AS average_rating
            FROM reservations
            JOIN properties ON reservations.property_id = properties.id
            JOIN property_reviews ON properties.id = property_reviews.property_id
            WHERE reservations.guest_id = $1
              AND reservations.end_date < date('now')
            GROUP BY properties.id, reservations.id
            ORDER BY reservations.start_date
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DbError::from(e).logged("reservations.list_past_for_guest"))
    }

    /// Books a property for a guest.
    ///
    /// ## Returns
    /// * `Ok(Reservation)` - Inserted row
    /// * `Err(DbError::Validation)` - End date not after start date
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown guest or property
    pub async fn insert(&self, reservation: &NewReservation) -> DbResult<Reservation> {
        validate_new_reservation(reservation)?;

        debug!(
            guest_id = reservation.guest_id,
            property_id = reservation.property_id,
            start = %reservation.start_date,
            end = %reservation.end_date,
            "Inserting reservation"
        );

        sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (start_date, end_date, property_id, guest_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(reservation.property_id)
        .bind(reservation.guest_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).logged("reservations.insert"))
    }
}
