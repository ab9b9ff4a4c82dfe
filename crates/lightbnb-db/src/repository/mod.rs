//! # Repository Module
//!
//! Database repository implementations for LightBnB.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Web handler                                                           │
//! │       │                                                                 │
//! │       │  db.properties().search(&filter, 10)                           │
//! │       ▼                                                                 │
//! │  PropertyRepository                                                    │
//! │  ├── search(&self, filter, limit)                                      │
//! │  ├── get_by_id(&self, id)                                              │
//! │  └── insert(&self, property)                                           │
//! │       │                                                                 │
//! │       │  One parameterized statement per call                          │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`UserRepository`](user::UserRepository) - lookup by id/email, registration
//! - [`PropertyRepository`](property::PropertyRepository) - filtered search, listing
//! - [`ReservationRepository`](reservation::ReservationRepository) - a guest's past stays
//! - [`ReviewRepository`](review::ReviewRepository) - ratings feeding `average_rating`

pub mod property;
pub mod reservation;
pub mod review;
pub mod user;

/// Shared fixtures for repository tests.
#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use lightbnb_core::{
        NewProperty, NewPropertyReview, NewReservation, NewUser, Property, Reservation, User,
    };

    use crate::{Database, DbConfig};

    pub async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: "$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u.".to_string(),
        }
    }

    pub fn new_property(owner_id: i64, title: &str, city: &str, cost_per_night: i64) -> NewProperty {
        NewProperty {
            owner_id,
            title: title.to_string(),
            description: Some("description".to_string()),
            thumbnail_photo_url: "https://images.pexels.com/photos/2086676/thumb.jpeg".to_string(),
            cover_photo_url: "https://images.pexels.com/photos/2086676/cover.jpeg".to_string(),
            cost_per_night,
            parking_spaces: 1,
            number_of_bathrooms: 1,
            number_of_bedrooms: 2,
            country: "Canada".to_string(),
            street: "651 Nami Road".to_string(),
            city: city.to_string(),
            province: "Ontario".to_string(),
            post_code: "83680".to_string(),
        }
    }

    pub async fn add_user(db: &Database, email: &str) -> User {
        db.users().insert(&new_user("Test Guest", email)).await.unwrap()
    }

    pub async fn add_property(
        db: &Database,
        owner_id: i64,
        title: &str,
        city: &str,
        cost_per_night: i64,
    ) -> Property {
        db.properties()
            .insert(&new_property(owner_id, title, city, cost_per_night))
            .await
            .unwrap()
    }

    pub async fn add_reservation(
        db: &Database,
        property_id: i64,
        guest_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Reservation {
        db.reservations()
            .insert(&NewReservation {
                start_date,
                end_date,
                property_id,
                guest_id,
            })
            .await
            .unwrap()
    }

    /// Books a past stay and reviews it with `rating`.
    pub async fn add_rated_stay(db: &Database, property_id: i64, guest_id: i64, rating: i64) {
        let reservation =
            add_reservation(db, property_id, guest_id, date(2018, 9, 11), date(2018, 9, 26)).await;
        db.reviews()
            .insert(&NewPropertyReview {
                guest_id,
                property_id,
                reservation_id: reservation.id,
                rating,
                message: None,
            })
            .await
            .unwrap();
    }
}
