//! # lightbnb-db: Database Layer for LightBnB
//!
//! Data access for the LightBnB property-rental application: user lookup
//! and registration, a guest's reservation history, filtered property
//! search, and new listings. SQLite storage with sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LightBnB Data Flow                               │
//! │                                                                         │
//! │  Web handler (GET /properties?city=Vancouver&minimum_rating=4)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   lightbnb-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │  │   │
//! │  │   │               │    │ UserRepo       │   │              │  │   │
//! │  │   │ SqlitePool    │◄───│ PropertyRepo   │   │ 001_initial  │  │   │
//! │  │   │ DbConfig      │    │ ReservationRepo│   │   _schema    │  │   │
//! │  │   │               │    │ ReviewRepo     │   │              │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  │                               │                                 │   │
//! │  │                               │ PropertySearch (lightbnb-core)  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   $LIGHTBNB_DB_PATH (default ./lightbnb.db)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Pool settings, read from the environment
//! - [`pool`] - Connection pool creation and repository access
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lightbnb_core::PropertyFilter;
//! use lightbnb_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//!
//! let guest = db.users().get_by_email("tristanjacobs@gmail.com").await?;
//!
//! let filter = PropertyFilter {
//!     city: Some("Vancouver".into()),
//!     minimum_rating: Some(4.0),
//!     ..Default::default()
//! };
//! let listings = db.properties().search(&filter, 10).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, DbConfig};
pub use error::{DbError, DbResult};
pub use pool::Database;

// Repository re-exports for convenience
pub use repository::property::PropertyRepository;
pub use repository::reservation::ReservationRepository;
pub use repository::review::ReviewRepository;
pub use repository::user::UserRepository;
