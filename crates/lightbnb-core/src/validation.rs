//! # Validation Module
//!
//! Input checks run by the repositories before a statement is sent.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Web application                                              │
//! │  └── Form handling, auth, session (out of scope)                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Required fields, lengths, ranges, date order                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE (users.email)                                              │
//! │  └── Foreign keys                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lightbnb_core::validation::validate_email;
//!
//! assert!(validate_email("sebastianguerra@ymail.com").is_ok());
//! assert!(validate_email("not-an-email").is_err());
//! ```

use crate::error::ValidationError;
use crate::search::{non_zero, PropertyFilter};
use crate::types::{NewProperty, NewPropertyReview, NewReservation, NewUser};
use crate::MAX_RATING;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 255;
const MAX_TITLE_LEN: usize = 255;

// =============================================================================
// Field Validators
// =============================================================================

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

fn non_negative(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a database id supplied by the caller.
pub fn validate_id(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty, at most 255 characters
/// - Exactly one `@` with text on both sides
/// - No whitespace
pub fn validate_email(email: &str) -> ValidationResult<()> {
    require("email", email)?;
    max_len("email", email, MAX_EMAIL_LEN)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            if domain.contains('@') {
                return Err(invalid("must contain a single '@'"));
            }
            Ok(())
        }
        _ => Err(invalid("must look like name@domain")),
    }
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a user registration.
pub fn validate_new_user(user: &NewUser) -> ValidationResult<()> {
    require("name", &user.name)?;
    max_len("name", &user.name, MAX_NAME_LEN)?;
    validate_email(&user.email)?;
    require("password", &user.password)?;
    Ok(())
}

/// Validates a new property listing.
///
/// ## Rules
/// - `owner_id` positive
/// - title required, at most 255 characters
/// - photo URLs and address fields required
/// - price and room counts not negative
pub fn validate_new_property(property: &NewProperty) -> ValidationResult<()> {
    validate_id("owner_id", property.owner_id)?;

    require("title", &property.title)?;
    max_len("title", &property.title, MAX_TITLE_LEN)?;

    require("thumbnail_photo_url", &property.thumbnail_photo_url)?;
    require("cover_photo_url", &property.cover_photo_url)?;

    non_negative("cost_per_night", property.cost_per_night)?;
    non_negative("parking_spaces", property.parking_spaces)?;
    non_negative("number_of_bathrooms", property.number_of_bathrooms)?;
    non_negative("number_of_bedrooms", property.number_of_bedrooms)?;

    require("country", &property.country)?;
    require("street", &property.street)?;
    require("city", &property.city)?;
    require("province", &property.province)?;
    require("post_code", &property.post_code)?;

    Ok(())
}

/// Validates a booking: both ids positive and at least one night.
pub fn validate_new_reservation(reservation: &NewReservation) -> ValidationResult<()> {
    validate_id("property_id", reservation.property_id)?;
    validate_id("guest_id", reservation.guest_id)?;

    if reservation.start_date >= reservation.end_date {
        return Err(ValidationError::Inconsistent {
            field: "end_date".to_string(),
            reason: "must be after start_date".to_string(),
        });
    }

    Ok(())
}

/// Validates a review: ids positive, rating between 1 and 5.
pub fn validate_new_review(review: &NewPropertyReview) -> ValidationResult<()> {
    validate_id("guest_id", review.guest_id)?;
    validate_id("property_id", review.property_id)?;
    validate_id("reservation_id", review.reservation_id)?;

    if !(1..=MAX_RATING).contains(&review.rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: MAX_RATING,
        });
    }

    Ok(())
}

/// Validates search filter values that are present.
///
/// Absent (or zero) values are never an error; the price pair being half-filled is
/// also fine (the builder ignores it).
pub fn validate_filter(filter: &PropertyFilter) -> ValidationResult<()> {
    for (field, value) in [
        ("minimum_price_per_night", filter.minimum_price_per_night),
        ("maximum_price_per_night", filter.maximum_price_per_night),
    ] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(ValidationError::MustNotBeNegative {
                    field: field.to_string(),
                });
            }
        }
    }

    if let Some(rating) = filter.minimum_rating {
        if !rating.is_finite() || !(0.0..=MAX_RATING as f64).contains(&rating) {
            return Err(ValidationError::OutOfRange {
                field: "minimum_rating".to_string(),
                min: 0,
                max: MAX_RATING,
            });
        }
    }

    if let Some(owner_id) = non_zero(filter.owner_id) {
        validate_id("owner_id", owner_id)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_property() -> NewProperty {
        NewProperty {
            owner_id: 1,
            title: "Habit mix".to_string(),
            description: Some("description".to_string()),
            thumbnail_photo_url: "https://example.com/t.jpg".to_string(),
            cover_photo_url: "https://example.com/c.jpg".to_string(),
            cost_per_night: 20_000,
            parking_spaces: 1,
            number_of_bathrooms: 2,
            number_of_bedrooms: 3,
            country: "Canada".to_string(),
            street: "1650 Hejto Center".to_string(),
            city: "Genwezuj".to_string(),
            province: "Newfoundland And Labrador".to_string(),
            post_code: "44583".to_string(),
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a@b@c").is_err());
        assert!(validate_email("a b@c.com").is_err());
    }

    #[test]
    fn test_validate_new_user() {
        let user = NewUser {
            name: "Eva Stanley".to_string(),
            email: "sebastianguerra@ymail.com".to_string(),
            password: "hash".to_string(),
        };
        assert!(validate_new_user(&user).is_ok());

        let nameless = NewUser {
            name: "   ".to_string(),
            ..user.clone()
        };
        assert!(matches!(
            validate_new_user(&nameless),
            Err(ValidationError::Required { field }) if field == "name"
        ));

        let no_password = NewUser {
            password: String::new(),
            ..user
        };
        assert!(validate_new_user(&no_password).is_err());
    }

    #[test]
    fn test_validate_new_property() {
        assert!(validate_new_property(&new_property()).is_ok());

        let mut negative = new_property();
        negative.cost_per_night = -1;
        assert!(matches!(
            validate_new_property(&negative),
            Err(ValidationError::MustNotBeNegative { field }) if field == "cost_per_night"
        ));

        let mut no_owner = new_property();
        no_owner.owner_id = 0;
        assert!(validate_new_property(&no_owner).is_err());

        let mut no_city = new_property();
        no_city.city = String::new();
        assert!(validate_new_property(&no_city).is_err());
    }

    #[test]
    fn test_validate_new_reservation_dates() {
        let start = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 3, 4).unwrap();

        let ok = NewReservation {
            start_date: start,
            end_date: end,
            property_id: 1,
            guest_id: 2,
        };
        assert!(validate_new_reservation(&ok).is_ok());

        let same_day = NewReservation {
            end_date: start,
            ..ok.clone()
        };
        assert!(validate_new_reservation(&same_day).is_err());
    }

    #[test]
    fn test_validate_new_review_rating_range() {
        let mut review = NewPropertyReview {
            guest_id: 1,
            property_id: 1,
            reservation_id: 1,
            rating: 5,
            message: None,
        };
        assert!(validate_new_review(&review).is_ok());

        review.rating = 0;
        assert!(validate_new_review(&review).is_err());

        review.rating = 6;
        assert!(validate_new_review(&review).is_err());
    }

    #[test]
    fn test_validate_filter() {
        assert!(validate_filter(&PropertyFilter::default()).is_ok());

        let negative_price = PropertyFilter {
            minimum_price_per_night: Some(-1.0),
            ..Default::default()
        };
        assert!(validate_filter(&negative_price).is_err());

        let rating_too_high = PropertyFilter {
            minimum_rating: Some(5.5),
            ..Default::default()
        };
        assert!(validate_filter(&rating_too_high).is_err());

        let bad_owner = PropertyFilter {
            owner_id: Some(-3),
            ..Default::default()
        };
        assert!(validate_filter(&bad_owner).is_err());

        let zero_owner = PropertyFilter {
            owner_id: Some(0),
            ..Default::default()
        };
        assert!(validate_filter(&zero_owner).is_ok());
    }
}
