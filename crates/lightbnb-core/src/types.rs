//! # Domain Types
//!
//! Row and insert types for the four LightBnB tables.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    Property     │   │  Reservation    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  owner_id       │◄──│  property_id    │       │
//! │  │  name, email    │   │  cost_per_night │   │  guest_id ──────┼──►User│
//! │  │  password       │   │  city, ...      │   │  start/end_date │       │
//! │  └─────────────────┘   └────────▲────────┘   └────────▲────────┘       │
//! │                                 │                     │                 │
//! │                        ┌────────┴─────────────────────┴──┐              │
//! │                        │        PropertyReview           │              │
//! │                        │  rating (1-5), message          │              │
//! │                        └─────────────────────────────────┘              │
//! │                                                                         │
//! │  Read models: PropertyListing, ReservationListing                      │
//! │  (property columns + average_rating computed in SQL)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `New*` types carry the columns a caller supplies on insert. Ids and
//! defaults are assigned by the database and come back through
//! `RETURNING *`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Users
// =============================================================================

/// A registered user (guest and/or property owner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Password hash as supplied by the web application. Never serialized.
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password: String,
}

/// Columns supplied when registering a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Properties
// =============================================================================

/// A rentable property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Property {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Nightly price in cents.
    pub cost_per_night: i64,
    pub parking_spaces: i64,
    pub number_of_bathrooms: i64,
    pub number_of_bedrooms: i64,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

impl Property {
    /// Returns the nightly price as Money.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_per_night)
    }
}

/// Columns supplied when listing a new property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Nightly price in cents.
    pub cost_per_night: i64,
    #[serde(default)]
    pub parking_spaces: i64,
    #[serde(default)]
    pub number_of_bathrooms: i64,
    #[serde(default)]
    pub number_of_bedrooms: i64,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

/// A property together with its average review rating.
///
/// Returned by property search. `average_rating` is `None` when the
/// property has no reviews yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PropertyListing {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub property: Property,
    pub average_rating: Option<f64>,
}

// =============================================================================
// Reservations
// =============================================================================

/// A booking of a property by a guest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Reservation {
    pub id: i64,
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    #[ts(as = "String")]
    pub end_date: NaiveDate,
    pub property_id: i64,
    pub guest_id: i64,
}

impl Reservation {
    /// Number of nights booked.
    pub fn nights(&self) -> i64 {
        nights_between(self.start_date, self.end_date)
    }
}

fn nights_between(start_date: NaiveDate, end_date: NaiveDate) -> i64 {
    (end_date - start_date).num_days()
}

/// Columns supplied when booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReservation {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property_id: i64,
    pub guest_id: i64,
}

/// A guest's reservation joined with the reserved property.
///
/// Reservation columns are aliased in SQL so they do not collide with the
/// property's own `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct ReservationListing {
    pub reservation_id: i64,
    pub guest_id: i64,
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    #[ts(as = "String")]
    pub end_date: NaiveDate,
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub property: Property,
    pub average_rating: Option<f64>,
}

impl ReservationListing {
    /// Number of nights booked.
    pub fn nights(&self) -> i64 {
        nights_between(self.start_date, self.end_date)
    }

    /// Total price of the stay (nights × nightly cost).
    ///
    /// `None` if the product overflows.
    pub fn total_cost(&self) -> Option<Money> {
        self.nights()
            .checked_mul(self.property.cost_per_night)
            .map(Money::from_cents)
    }
}

// =============================================================================
// Reviews
// =============================================================================

/// A guest's review of a property after a stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PropertyReview {
    pub id: i64,
    pub guest_id: i64,
    pub property_id: i64,
    pub reservation_id: i64,
    pub rating: i64,
    pub message: Option<String>,
}

/// Columns supplied when leaving a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPropertyReview {
    pub guest_id: i64,
    pub property_id: i64,
    pub reservation_id: i64,
    pub rating: i64,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_property(cost_per_night: i64) -> Property {
        Property {
            id: 1,
            owner_id: 1,
            title: "Speed lamp".to_string(),
            description: None,
            thumbnail_photo_url: "https://example.com/thumb.jpg".to_string(),
            cover_photo_url: "https://example.com/cover.jpg".to_string(),
            cost_per_night,
            parking_spaces: 2,
            number_of_bathrooms: 1,
            number_of_bedrooms: 3,
            country: "Canada".to_string(),
            street: "536 Namsub Highway".to_string(),
            city: "Sotboske".to_string(),
            province: "Quebec".to_string(),
            post_code: "28142".to_string(),
            active: true,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_property_cost() {
        let property = sample_property(93_061);
        assert_eq!(property.cost().to_string(), "$930.61");
    }

    #[test]
    fn test_reservation_nights() {
        let reservation = Reservation {
            id: 1,
            start_date: date(2018, 9, 11),
            end_date: date(2018, 9, 26),
            property_id: 1,
            guest_id: 1,
        };
        assert_eq!(reservation.nights(), 15);
    }

    #[test]
    fn test_reservation_listing_total_cost() {
        let listing = ReservationListing {
            reservation_id: 7,
            guest_id: 3,
            start_date: date(2019, 1, 4),
            end_date: date(2019, 1, 7),
            property: sample_property(10_000),
            average_rating: Some(4.5),
        };
        assert_eq!(listing.nights(), 3);
        assert_eq!(listing.total_cost().map(|m| m.cents()), Some(30_000));
    }

    #[test]
    fn test_total_cost_overflow_is_none() {
        let listing = ReservationListing {
            reservation_id: 8,
            guest_id: 3,
            start_date: date(2019, 1, 4),
            end_date: date(2019, 1, 7),
            property: sample_property(i64::MAX / 2),
            average_rating: None,
        };
        assert_eq!(listing.total_cost(), None);
    }

    #[test]
    fn test_listing_serializes_flat() {
        let listing = PropertyListing {
            property: sample_property(5_000),
            average_rating: Some(4.25),
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["city"], "Sotboske");
        assert_eq!(json["average_rating"], 4.25);
        assert!(json.get("property").is_none());
    }

    #[test]
    fn test_user_password_not_serialized() {
        let user = User {
            id: 1,
            name: "Devin Sanders".to_string(),
            email: "tristanjacobs@gmail.com".to_string(),
            password: "$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u.".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "tristanjacobs@gmail.com");
    }
}
