//! # lightbnb-core: Pure Domain Logic for LightBnB
//!
//! Everything the data layer needs that does not touch a database:
//! row types, money conversion, validation, and the property search
//! query builder.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LightBnB Data Flow                               │
//! │                                                                         │
//! │  Web application (routes, sessions, auth - out of scope)               │
//! │       │                                                                 │
//! │       │  PropertyFilter { city: "Van", minimum_rating: 4, .. }          │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ lightbnb-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  search   │  │ validation│  │   │
//! │  │   │   User    │  │   Money   │  │ Predicate │  │   rules   │  │   │
//! │  │   │ Property  │  │  ×100     │  │ Statement │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 lightbnb-db (Database Layer)                    │   │
//! │  │           SQLite pool, migrations, repositories                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Row and insert types (User, Property, Reservation, Review)
//! - [`money`] - Money type stored in minor units
//! - [`search`] - Property filter and the query builder
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use lightbnb_core::search::{PropertyFilter, PropertySearch};
//!
//! let filter = PropertyFilter {
//!     city: Some("Vancouver".to_string()),
//!     minimum_rating: Some(4.0),
//!     ..Default::default()
//! };
//!
//! let statement = PropertySearch::from_filter(&filter)?.limit(5).build();
//! assert_eq!(statement.params().len(), 3);
//! # Ok::<(), lightbnb_core::CoreError>(())
//! ```

pub mod error;
pub mod money;
pub mod search;
pub mod types;
pub mod validation;

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use search::{PropertyFilter, PropertySearch, QueryParam, SearchPredicate, Statement};
pub use types::*;

/// Number of rows returned when the caller does not ask for a limit.
pub const DEFAULT_RESULT_LIMIT: u32 = 10;

/// Highest rating a guest can leave on a property.
pub const MAX_RATING: i64 = 5;
