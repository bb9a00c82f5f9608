/// Database models for Stockroom
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `owner`: Store owner accounts, the scoping unit for all inventory data
/// - `item`: Inventory rows and the owner-scoped operations over them
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
/// # Ok(())
/// # }
/// ```
pub mod item;
pub mod owner;
