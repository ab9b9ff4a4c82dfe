//! # Property Repository
//!
//! Filtered property search and new listings.
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How a Property Search Runs                           │
//! │                                                                         │
//! │  PropertyFilter { city: "Van", minimum_rating: 4 } , limit 10          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_filter()          ← reject negative prices, rating > 5       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PropertySearch::from_filter(..).limit(10).build()   (lightbnb-core)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Statement { sql, params: ["%Van%", 4.0, 10] }                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sqlx::query_as + bind each param in order → Vec<PropertyListing>      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lightbnb_core::validation::{validate_filter, validate_new_property};
use lightbnb_core::{NewProperty, Property, PropertyFilter, PropertyListing, PropertySearch, QueryParam};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for property database operations.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    pool: SqlitePool,
}

impl PropertyRepository {
    /// Creates a new PropertyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PropertyRepository { pool }
    }

    /// Searches properties, cheapest first.
    ///
    /// Every property is a candidate, reviewed or not; `average_rating`
    /// is `None` for properties nobody has reviewed. A non-zero
    /// `minimum_rating` filter therefore excludes unreviewed properties.
    /// Zero-valued numeric filters restrict nothing.
    ///
    /// ## Arguments
    /// * `filter` - Optional constraints; absent fields don't restrict
    /// * `limit` - Maximum rows (0 means the default of 10)
    ///
    /// ## Returns
    /// * `Ok(vec![])` - Nothing matched
    /// * `Err(DbError)` - Invalid filter or query failure
    pub async fn search(&self, filter: &PropertyFilter, limit: u32) -> DbResult<Vec<PropertyListing>> {
        validate_filter(filter)?;

        let statement = PropertySearch::from_filter(filter)?.limit(limit).build();

        debug!(
            sql = %statement.sql(),
            params = ?statement.params(),
            "Searching properties"
        );

        let mut query = sqlx::query_as::<_, PropertyListing>(statement.sql());
        for param in statement.params() {
            query = match param {
                QueryParam::Text(value) => query.bind(value.as_str()),
                QueryParam::Integer(value) => query.bind(*value),
                QueryParam::Real(value) => query.bind(*value),
            };
        }

        let listings = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DbError::from(e).logged("properties.search"))?;

        debug!(count = listings.len(), "Search returned properties");
        Ok(listings)
    }

    /// Gets a property by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Property))` - Property found
    /// * `Ok(None)` - Property not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Property>> {
        sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DbError::from(e).logged("properties.get_by_id"))
    }

    /// Lists a new property.
    ///
    /// `cost_per_night` is expected in cents already.
    ///
    /// ## Returns
    /// * `Ok(Property)` - Inserted row (id assigned, `active` = true)
    /// * `Err(DbError::Validation)` - Missing title, negative price, ...
    /// * `Err(DbError::ForeignKeyViolation)` - Owner doesn't exist
    pub async fn insert(&self, property: &NewProperty) -> DbResult<Property> {
        validate_new_property(property)?;

        debug!(
            owner_id = property.owner_id,
            title = %property.title,
            cost_per_night = property.cost_per_night,
            "Inserting property"
        );

        sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                cost_per_night, parking_spaces, number_of_bathrooms, number_of_bedrooms,
                country, street, city, province, post_code
            ) VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8, $9,
                $10, $11, $12, $13, $14
            )
            RETURNING *
            "#,
        )
        .bind(property.owner_id)
        .bind(&property.title)
        .bind(&property.description)
        .bind(&property.thumbnail_photo_url)
        .bind(&property.cover_photo_url)
        .bind(property.cost_per_night)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .bind(&property.country)
        .bind(&property.street)
        .bind(&property.city)
        .bind(&property.province)
        .bind(&property.post_code)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).logged("properties.insert"))
    }

    /// Counts active properties (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM properties WHERE active = TRUE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DbError::from(e).logged("properties.count"))
    }
}
