/// Owner model and database operations
///
/// This module provides the Owner model for store owner accounts. An owner is
/// the scoping unit for all inventory data: every inventory query and
/// mutation is filtered by the owner's id.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     user_id       INTEGER PRIMARY KEY AUTOINCREMENT,
///     username      TEXT    NOT NULL UNIQUE,
///     user_password TEXT    NOT NULL,
///     store_name    TEXT    NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use stockroom_shared::models::owner::{Owner, CreateOwner};
/// use stockroom_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_owner = CreateOwner {
///     username: "corner-store".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     store_name: "The Corner Store".to_string(),
/// };
///
/// let owner = Owner::create(&pool, new_owner).await?;
/// println!("Created owner: {}", owner.owner_id);
///
/// let found = Owner::find_by_username(&pool, "corner-store").await?;
/// # Ok(())
/// # }
/// ```
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Owner model representing a store owner account
///
/// Usernames are unique and case-sensitive. Passwords are stored as Argon2id
/// hashes, never in plaintext. The struct field names differ from the legacy
/// column names (`user_id`, `user_password`), so every query aliases columns
/// explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Owner {
    /// Unique owner ID, assigned by the database
    pub owner_id: i64,

    /// Login name, unique across all owners
    pub username: String,

    /// Argon2id password hash
    ///
    /// Never store plaintext passwords!
    pub password_hash: String,

    /// Display name of the owner's store
    pub store_name: String,
}

/// Input for creating a new owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOwner {
    /// Login name (must be unique)
    pub username: String,

    /// Argon2id password hash (NOT the plaintext password!)
    pub password_hash: String,

    /// Display name of the store
    pub store_name: String,
}

impl Owner {
    /// Creates a new owner account
    ///
    /// Uniqueness of the username is enforced by the database constraint in
    /// the same statement that inserts the row; callers translate the
    /// resulting unique-violation error, there is no separate existence
    /// check.
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `data` - Owner creation data
    ///
    /// # Returns
    ///
    /// The newly created owner with its generated ID
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The username is already taken (unique constraint violation)
    /// - Database connection fails
    pub async fn create(pool: &SqlitePool, data: CreateOwner) -> Result<Self, sqlx::Error> {
        let owner = sqlx::query_as::<_, Owner>(
            r#"
            INSERT INTO users (username, user_password, store_name)
            VALUES (?, ?, ?)
            RETURNING user_id AS owner_id, username, user_password AS password_hash, store_name
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .bind(data.store_name)
        .fetch_one(pool)
        .await?;

        Ok(owner)
    }

    /// Finds an owner by ID
    ///
    /// # Returns
    ///
    /// The owner if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let owner = sqlx::query_as::<_, Owner>(
            r#"
            SELECT user_id AS owner_id, username, user_password AS password_hash, store_name
            FROM users
            WHERE user_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(owner)
    }

    /// Finds an owner by username (case-sensitive)
    ///
    /// # Returns
    ///
    /// The owner if found, None otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let owner = sqlx::query_as::<_, Owner>(
            r#"
            SELECT user_id AS owner_id, username, user_password AS password_hash, store_name
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(owner)
    }

    /// Counts total number of owners
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_owner_struct() {
        let create_owner = CreateOwner {
            username: "grocer".to_string(),
            password_hash: "hash".to_string(),
            store_name: "Green Grocer".to_string(),
        };

        assert_eq!(create_owner.username, "grocer");
        assert_eq!(create_owner.password_hash, "hash");
        assert_eq!(create_owner.store_name, "Green Grocer");
    }

    // Integration tests for database operations are in tests/store_tests.rs
}
