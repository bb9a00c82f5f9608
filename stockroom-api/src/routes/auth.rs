/// Authentication endpoints
///
/// This module provides owner account endpoints:
/// - Registration
/// - Login
///
/// Both return a signed JWT that the client presents as a Bearer token on
/// every inventory request. Tokens are stateless, so there is no logout
/// endpoint; clients discard the token.
///
/// # Endpoints
///
/// - `POST /v1/auth/register` - Create an owner account
/// - `POST /v1/auth/login` - Verify credentials and get a token
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use stockroom_shared::{
    auth::{jwt, password},
    models::owner::{CreateOwner, Owner},
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login name, unique across all owners
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: String,

    /// Password (also validated for strength)
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    /// Display name of the store
    #[validate(length(min = 1, max = 100, message = "Store name must be 1-100 characters"))]
    pub store_name: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Password
    pub password: String,
}

/// Owner fields safe to return to clients
///
/// The password hash never leaves the server; this is the whole public
/// surface of an account.
#[derive(Debug, Serialize, Deserialize)]
pub struct OwnerPublic {
    /// Owner ID
    pub owner_id: i64,

    /// Login name
    pub username: String,

    /// Display name of the store
    pub store_name: String,
}

impl From<Owner> for OwnerPublic {
    fn from(owner: Owner) -> Self {
        Self {
            owner_id: owner.owner_id,
            username: owner.username,
            store_name: owner.store_name,
        }
    }
}

/// Response for both register and login: a token plus the public fields
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed JWT, presented as `Authorization: Bearer <token>`
    pub token: String,

    /// The authenticated owner
    pub owner: OwnerPublic,
}

/// Register a new owner
///
/// Creates the account and signs the owner in immediately by returning a
/// token. The password is hashed before storage; the username uniqueness
/// check is the INSERT itself, guarded by the database constraint, so two
/// concurrent registrations of the same name cannot both succeed and a
/// rejected one leaves no partial row.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/register
/// Content-Type: application/json
///
/// {
///   "username": "corner-store",
///   "password": "stockroom1",
///   "store_name": "The Corner Store"
/// }
/// ```
///
/// # Response
///
/// `201 Created`
/// ```json
/// {
///   "token": "eyJ...",
///   "owner": {
///     "owner_id": 1,
///     "username": "corner-store",
///     "store_name": "The Corner Store"
///   }
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `409 Conflict`: Username already taken
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    // Whitespace padding is stripped before storage; an all-whitespace
    // value passes the length check above but is still not a name.
    let username = req.username.trim().to_string();
    let store_name = req.store_name.trim().to_string();
    if username.is_empty() {
        return Err(ApiError::validation("username", "Username is required"));
    }
    if store_name.is_empty() {
        return Err(ApiError::validation("store_name", "Store name is required"));
    }

    password::validate_password_strength(&req.password)
        .map_err(|message| ApiError::validation("password", message))?;

    let password_hash = password::hash_password(&req.password)?;

    // Hash first, insert second; a duplicate username surfaces here as a
    // unique violation and maps to 409.
    let owner = Owner::create(
        &state.db,
        CreateOwner {
            username,
            password_hash,
            store_name,
        },
    )
    .await?;

    tracing::info!(owner_id = owner.owner_id, username = %owner.username, "Owner registered");

    let token = issue_token(&state, &owner)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            owner: owner.into(),
        }),
    ))
}

/// Login
///
/// Verifies the credentials and returns a fresh token. An unknown username
/// and a wrong password produce the same 401 response, so the endpoint
/// never confirms which usernames exist.
///
/// # Endpoint
///
/// ```text
/// POST /v1/auth/login
/// Content-Type: application/json
///
/// {
///   "username": "corner-store",
///   "password": "stockroom1"
/// }
/// ```
///
/// # Response
///
/// `200 OK`
/// ```json
/// {
///   "token": "eyJ...",
///   "owner": {
///     "owner_id": 1,
///     "username": "corner-store",
///     "store_name": "The Corner Store"
///   }
/// }
/// ```
///
/// # Errors
///
/// - `422 Unprocessable Entity`: Validation failed
/// - `401 Unauthorized`: Invalid username or password
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    let owner = Owner::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| ApiError::Unauthenticated("Invalid username or password".to_string()))?;

    let valid = password::verify_password(&req.password, &owner.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthenticated(
            "Invalid username or password".to_string(),
        ));
    }

    tracing::debug!(owner_id = owner.owner_id, "Owner logged in");

    let token = issue_token(&state, &owner)?;

    Ok(Json(AuthResponse {
        token,
        owner: owner.into(),
    }))
}

/// Signs a token for the given owner with the configured expiry
fn issue_token(state: &AppState, owner: &Owner) -> Result<String, ApiError> {
    let claims = jwt::Claims::new(owner.owner_id, &owner.username, state.jwt_expiry_hours());
    Ok(jwt::create_token(&claims, state.jwt_secret())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            username: "corner-store".to_string(),
            password: "stockroom1".to_string(),
            store_name: "The Corner Store".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_username = RegisterRequest {
            username: "ab".to_string(),
            password: "stockroom1".to_string(),
            store_name: "The Corner Store".to_string(),
        };
        assert!(short_username.validate().is_err());

        let empty_store = RegisterRequest {
            username: "corner-store".to_string(),
            password: "stockroom1".to_string(),
            store_name: String::new(),
        };
        assert!(empty_store.validate().is_err());
    }

    #[test]
    fn test_owner_public_drops_password_hash() {
        let owner = Owner {
            owner_id: 7,
            username: "corner-store".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            store_name: "The Corner Store".to_string(),
        };

        let public = OwnerPublic::from(owner);
        let json = serde_json::to_string(&public).unwrap();

        assert!(json.contains("corner-store"));
        assert!(!json.contains("argon2id"));
    }
}
