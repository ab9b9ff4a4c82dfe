//! # Property Search
//!
//! Turns an optional-filter object into one parameterized SQL statement.
//!
//! ## How a Search Is Built
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Filter → Predicates → Statement                      │
//! │                                                                         │
//! │  PropertyFilter                                                         │
//! │  { city: "Van", owner_id: -, min: 50, max: 150, rating: 4 }             │
//! │       │                                                                 │
//! │       │  predicates() - fixed order, absent fields dropped,             │
//! │       │                 price pair all-or-nothing, ×100 to cents        │
//! │       ▼                                                                 │
//! │  [CityMatch("Van"), PriceRange(5000, 15000), RatingThreshold(4)]        │
//! │       │                                                                 │
//! │       │  build() - WHERE predicates, GROUP BY, HAVING, ORDER, LIMIT     │
//! │       ▼                                                                 │
//! │  SELECT properties.*, avg(property_reviews.rating) AS average_rating    │
//! │  FROM properties                                                        │
//! │  LEFT JOIN property_reviews ON properties.id = property_reviews...      │
//! │  WHERE true                                                             │
//! │  AND properties.city LIKE $1                  params: ["%Van%",         │
//! │  AND properties.cost_per_night >= $2                   5000,            │
//! │  AND properties.cost_per_night <= $3                   15000,           │
//! │  GROUP BY properties.id                                                 │
//! │  HAVING avg(property_reviews.rating) >= $4             4.0,             │
//! │  ORDER BY properties.cost_per_night                                     │
//! │  LIMIT $5                                              10]              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Placeholders are only ever produced by `StatementWriter::bind`, which
//! pushes the value and returns `$<new length>`. SQL text and parameter
//! list therefore cannot drift apart.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::DEFAULT_RESULT_LIMIT;

// =============================================================================
// Filter
// =============================================================================

/// Optional search constraints supplied by the caller.
///
/// Every field may be omitted when deserializing:
///
/// ```rust
/// use lightbnb_core::search::PropertyFilter;
///
/// let filter: PropertyFilter = serde_json::from_str(r#"{"city": "Vancouver"}"#).unwrap();
/// assert_eq!(filter.city.as_deref(), Some("Vancouver"));
/// assert!(filter.minimum_rating.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PropertyFilter {
    /// Substring of the property's city.
    pub city: Option<String>,
    pub owner_id: Option<i64>,
    /// Lower nightly price bound in major units (dollars).
    pub minimum_price_per_night: Option<f64>,
    /// Upper nightly price bound in major units (dollars).
    pub maximum_price_per_night: Option<f64>,
    /// Lowest acceptable average review rating.
    pub minimum_rating: Option<f64>,
}

impl PropertyFilter {
    /// Reduces the filter to its predicates, in the fixed order
    /// city, owner, price range, rating.
    ///
    /// - A blank city is treated as absent, and so is a zero owner, price
    ///   bound or rating.
    /// - The price range only appears when both bounds are set.
    ///
    /// Fails only when a price bound cannot be converted to cents.
    pub fn predicates(&self) -> CoreResult<Vec<SearchPredicate>> {
        let mut predicates = Vec::new();

        if let Some(city) = self.city.as_deref().map(str::trim) {
            if !city.is_empty() {
                predicates.push(SearchPredicate::CityMatch(city.to_string()));
            }
        }

        if let Some(owner_id) = non_zero(self.owner_id) {
            predicates.push(SearchPredicate::OwnerMatch(owner_id));
        }

        if let (Some(min), Some(max)) = (
            non_zero(self.minimum_price_per_night),
            non_zero(self.maximum_price_per_night),
        ) {
            predicates.push(SearchPredicate::PriceRange {
                min: Money::from_major_units(min)?,
                max: Money::from_major_units(max)?,
            });
        }

        if let Some(rating) = non_zero(self.minimum_rating) {
            predicates.push(SearchPredicate::RatingThreshold(rating));
        }

        Ok(predicates)
    }
}

/// Treats a zero numeric filter as unset.
pub(crate) fn non_zero<T: Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}

// =============================================================================
// Predicates
// =============================================================================

/// One search constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPredicate {
    /// `city LIKE %<city>%`
    CityMatch(String),
    /// `owner_id = <id>`
    OwnerMatch(i64),
    /// Inclusive nightly price range, in cents.
    PriceRange { min: Money, max: Money },
    /// Minimum average rating. Filters on an aggregate, so it is applied
    /// after grouping.
    RatingThreshold(f64),
}

impl SearchPredicate {
    /// Whether the predicate belongs in `HAVING` rather than `WHERE`.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, SearchPredicate::RatingThreshold(_))
    }

    /// Appends the predicate, opening it with `keyword` (`AND` or `HAVING`).
    fn write(&self, out: &mut StatementWriter, keyword: &str) {
        match self {
            SearchPredicate::CityMatch(city) => {
                let p = out.bind(QueryParam::Text(format!("%{}%", city)));
                out.line(&format!("{keyword} properties.city LIKE {p}"));
            }
            SearchPredicate::OwnerMatch(owner_id) => {
                let p = out.bind(QueryParam::Integer(*owner_id));
                out.line(&format!("{keyword} properties.owner_id = {p}"));
            }
            SearchPredicate::PriceRange { min, max } => {
                let lo = out.bind(QueryParam::Integer(min.cents()));
                let hi = out.bind(QueryParam::Integer(max.cents()));
                out.line(&format!("{keyword} properties.cost_per_night >= {lo}"));
                out.line(&format!("AND properties.cost_per_night <= {hi}"));
            }
            SearchPredicate::RatingThreshold(rating) => {
                let p = out.bind(QueryParam::Real(*rating));
                out.line(&format!("{keyword} avg(property_reviews.rating) >= {p}"));
            }
        }
    }
}

// =============================================================================
// Statement
// =============================================================================

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Text(String),
    Integer(i64),
    Real(f64),
}

/// SQL text plus its parameters. `params()[i]` binds to `$<i + 1>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<QueryParam>,
}

impl Statement {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[QueryParam] {
        &self.params
    }
}

#[derive(Default)]
struct StatementWriter {
    sql: String,
    params: Vec<QueryParam>,
}

impl StatementWriter {
    /// Pushes a parameter and returns the placeholder that refers to it.
    fn bind(&mut self, param: QueryParam) -> String {
        self.params.push(param);
        format!("${}", self.params.len())
    }

    fn line(&mut self, fragment: &str) {
        if !self.sql.is_empty() {
            self.sql.push('\n');
        }
        self.sql.push_str(fragment);
    }

    fn finish(self) -> Statement {
        Statement {
            sql: self.sql,
            params: self.params,
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds the property search statement.
///
/// ```rust
/// use lightbnb_core::search::{PropertyFilter, PropertySearch};
///
/// let filter = PropertyFilter {
///     owner_id: Some(42),
///     ..Default::default()
/// };
/// let statement = PropertySearch::from_filter(&filter)?.limit(20).build();
///
/// assert!(statement.sql().contains("properties.owner_id = $1"));
/// assert!(statement.sql().ends_with("LIMIT $2"));
/// # Ok::<(), lightbnb_core::CoreError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySearch {
    predicates: Vec<SearchPredicate>,
    limit: u32,
}

impl PropertySearch {
    /// Creates a search from explicit predicates.
    pub fn new(predicates: Vec<SearchPredicate>) -> Self {
        PropertySearch {
            predicates,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }

    /// Creates a search from a caller's filter object.
    pub fn from_filter(filter: &PropertyFilter) -> CoreResult<Self> {
        Ok(PropertySearch::new(filter.predicates()?))
    }

    /// Sets the maximum number of rows. Zero falls back to the default.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = if limit == 0 { DEFAULT_RESULT_LIMIT } else { limit };
        self
    }

    pub fn predicates(&self) -> &[SearchPredicate] {
        &self.predicates
    }

    /// Renders the statement.
    ///
    /// Row-level predicates are written first, then `GROUP BY`, then any
    /// aggregate predicate, then ordering and the limit. Parameters are
    /// pushed in exactly that order, so the limit is always last.
    pub fn build(&self) -> Statement {
        let mut out = StatementWriter::default();

        out.line("SELECT properties.*, avg(property_reviews.rating) AS average_rating");
        out.line("FROM properties");
        out.line("LEFT JOIN property_reviews ON properties.id = property_reviews.property_id");
        out.line("WHERE true");

        for predicate in self.predicates.iter().filter(|p| !p.is_aggregate()) {
            predicate.write(&mut out, "AND");
        }

        out.line("GROUP BY properties.id");

        let aggregates = self.predicates.iter().filter(|p| p.is_aggregate());
        for (i, predicate) in aggregates.enumerate() {
            predicate.write(&mut out, if i == 0 { "HAVING" } else { "AND" });
        }

        out.line("ORDER BY properties.cost_per_night");
        let p = out.bind(QueryParam::Integer(i64::from(self.limit)));
        out.line(&format!("LIMIT {p}"));

        out.finish()
    }
}
