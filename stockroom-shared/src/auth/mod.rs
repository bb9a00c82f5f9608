/// Authentication utilities
///
/// This module provides the authentication primitives for Stockroom:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and strength validation
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: Axum middleware resolving Bearer tokens to an owner
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing with configurable expiration
/// - **Constant-time Comparison**: Password verification never short-circuits
///
/// # Example
///
/// ```
/// use stockroom_shared::auth::password::{hash_password, verify_password};
/// use stockroom_shared::auth::jwt::{create_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("owner_password1")?;
/// assert!(verify_password("owner_password1", &hash)?);
///
/// let token = create_token(&Claims::new(7, "corner-store", 24), "secret-key")?;
/// # Ok(())
/// # }
/// ```
pub mod jwt;
pub mod middleware;
pub mod password;
