//! # User Repository
//!
//! Lookups used by login/session handling in the web application, and
//! registration.

use lightbnb_core::validation::validate_new_user;
use lightbnb_core::{NewUser, User};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Gets a user by email address (exact match).
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        debug!(email = %email, "Fetching user by email");

        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DbError::from(e).logged("users.get_by_email"))
    }

    /// Gets a user by id.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that id
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        debug!(id, "Fetching user by id");

        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DbError::from(e).logged("users.get_by_id"))
    }

    /// Registers a new user.
    ///
    /// The password is stored exactly as given; hashing belongs to the
    /// caller.
    ///
    /// ## Returns
    /// * `Ok(User)` - Inserted row including its new id
    /// * `Err(DbError::Validation)` - Missing name, malformed email, ...
    /// * `Err(DbError::UniqueViolation)` - Email already registered
    pub async fn insert(&self, user: &NewUser) -> DbResult<User> {
        validate_new_user(user)?;

        debug!(email = %user.email, "Inserting user");

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let err = match DbError::from(e) {
                DbError::UniqueViolation { field, .. } => DbError::UniqueViolation {
                    field,
                    value: user.email.clone(),
                },
                other => other,
            };
            err.logged("users.insert")
        })
    }

    /// Counts registered users (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DbError::from(e).logged("users.count"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{new_user, test_db};

    #[tokio::test]
    async fn test_insert_and_fetch() {
        let db = test_db().await;
        let users = db.users();

        let inserted = users
            .insert(&new_user("Devin Sanders", "tristanjacobs@gmail.com"))
            .await
            .unwrap();
        assert!(inserted.id > 0);
        assert_eq!(inserted.name, "Devin Sanders");

        let by_id = users.get_by_id(inserted.id).await.unwrap();
        assert_eq!(by_id, Some(inserted.clone()));

        let by_email = users.get_by_email("tristanjacobs@gmail.com").await.unwrap();
        assert_eq!(by_email, Some(inserted));

        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_user_is_none_not_error() {
        let db = test_db().await;

        assert_eq!(db.users().get_by_id(999).await.unwrap(), None);
        assert_eq!(db.users().get_by_email("nobody@example.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = test_db().await;
        let users = db.users();

        users.insert(&new_user("Eva Stanley", "eva@ymail.com")).await.unwrap();
        let err = users
            .insert(&new_user("Eva Impostor", "eva@ymail.com"))
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "users.email");
                assert_eq!(value, "eva@ymail.com");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
        assert_eq!(users.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_user_never_reaches_database() {
        let db = test_db().await;

        let err = db
            .users()
            .insert(&new_user("No Email", "not-an-email"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(db.users().count().await.unwrap(), 0);
    }
}
