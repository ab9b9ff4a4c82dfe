//! # Review Repository
//!
//! Guest reviews. Their ratings feed `average_rating` in property search
//! and reservation history.

use lightbnb_core::validation::validate_new_review;
use lightbnb_core::{NewPropertyReview, PropertyReview};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for review database operations.
#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: SqlitePool,
}

impl ReviewRepository {
    /// Creates a new ReviewRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReviewRepository { pool }
    }

    /// Records a review of a stay.
    ///
    /// ## Returns
    /// * `Ok(PropertyReview)` - Inserted row
    /// * `Err(DbError::Validation)` - Rating outside 1..=5
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown guest, property or reservation
    pub async fn insert(&self, review: &NewPropertyReview) -> DbResult<PropertyReview> {
        validate_new_review(review)?;

        debug!(
            property_id = review.property_id,
            reservation_id = review.reservation_id,
            rating = review.rating,
            "Inserting review"
        );

        sqlx::query_as::<_, PropertyReview>(
            r#"
            INSERT INTO property_reviews (guest_id, property_id, reservation_id, rating, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(review.guest_id)
        .bind(review.property_id)
        .bind(review.reservation_id)
        .bind(review.rating)
        .bind(&review.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).logged("property_reviews.insert"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{add_property, add_reservation, add_user, date, test_db};

    #[tokio::test]
    async fn test_insert_review() {
        let db = test_db().await;
        let owner = add_user(&db, "owner@example.com").await;
        let guest = add_user(&db, "guest@example.com").await;
        let property = add_property(&db, owner.id, "Fun Glad", "Jaebvap", 34_291).await;
        let stay = add_reservation(&db, property.id, guest.id, date(2019, 1, 4), date(2019, 2, 1)).await;

        let review = db
            .reviews()
            .insert(&NewPropertyReview {
                guest_id: guest.id,
                property_id: property.id,
                reservation_id: stay.id,
                rating: 3,
                message: Some("messages".to_string()),
            })
            .await
            .unwrap();

        assert!(review.id > 0);
        assert_eq!(review.rating, 3);
        assert_eq!(review.message.as_deref(), Some("messages"));
    }

    #[tokio::test]
    async fn test_rating_out_of_range_rejected() {
        let db = test_db().await;

        let err = db
            .reviews()
            .insert(&NewPropertyReview {
                guest_id: 1,
                property_id: 1,
                reservation_id: 1,
                rating: 6,
                message: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_reservation_fails() {
        let db = test_db().await;
        let owner = add_user(&db, "owner@example.com").await;
        let property = add_property(&db, owner.id, "Lonely", "Yellowknife", 9_000).await;

        let err = db
            .reviews()
            .insert(&NewPropertyReview {
                guest_id: owner.id,
                property_id: property.id,
                reservation_id: 42,
                rating: 4,
                message: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
