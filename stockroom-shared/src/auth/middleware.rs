/// Authentication middleware for Axum
///
/// This module provides the JWT middleware that guards every inventory
/// route. It extracts the Bearer token from the Authorization header,
/// validates it, and adds an [`AuthContext`] to the request extensions;
/// handlers read the owner id from that context and from nowhere else.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use stockroom_shared::auth::middleware::{create_jwt_middleware, AuthContext};
///
/// async fn protected_handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, owner {}!", auth.owner_id)
/// }
///
/// let app: Router = Router::new()
///     .route("/items", get(protected_handler))
///     .layer(middleware::from_fn(create_jwt_middleware("your-jwt-secret")));
/// ```
use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::jwt::{validate_token, JwtError};

/// Authentication context added to request extensions
///
/// This struct is added to the request after successful authentication.
/// Handlers extract it with Axum's `Extension` extractor; it is the only
/// source of caller identity in the whole API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated owner ID, the scoping key for every store operation
    pub owner_id: i64,

    /// Login name, for logging
    pub username: String,
}

impl AuthContext {
    /// Creates an auth context from validated JWT claims
    pub fn from_claims(claims: &super::jwt::Claims) -> Self {
        Self {
            owner_id: claims.sub,
            username: claims.username.clone(),
        }
    }
}

/// Error type for authentication middleware
///
/// Every variant maps to 401: a missing, malformed, or invalid credential
/// all mean the request has no valid owner context.
#[derive(Debug)]
pub enum AuthError {
    /// Missing authorization header
    MissingCredentials,

    /// Authorization header is not a Bearer token
    InvalidFormat(String),

    /// Token validation failed
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingCredentials => "Missing authorization header".to_string(),
            AuthError::InvalidFormat(msg) => msg,
            AuthError::InvalidToken(msg) => msg,
        };

        let body = Json(json!({
            "error": {
                "code": "UNAUTHENTICATED",
                "message": message,
            }
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// JWT authentication middleware
///
/// Validates the token from the `Authorization: Bearer <token>` header and
/// injects [`AuthContext`] into the request extensions.
///
/// # Errors
///
/// Returns 401 Unauthorized if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token validation fails
/// - Token has expired
pub async fn jwt_auth_middleware(
    secret: String,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_token(token, &secret).map_err(|e| match e {
        JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
        JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
        _ => AuthError::InvalidToken(format!("Invalid token: {}", e)),
    })?;

    let auth_context = AuthContext::from_claims(&claims);
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

/// Creates a JWT authentication middleware closure
///
/// Helper that captures the JWT secret and returns a function suitable for
/// `axum::middleware::from_fn`.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
/// use stockroom_shared::auth::middleware::create_jwt_middleware;
///
/// let app: Router = Router::new()
///     .route("/items", get(|| async { "OK" }))
///     .layer(middleware::from_fn(create_jwt_middleware("secret")));
/// ```
pub fn create_jwt_middleware(
    secret: impl Into<String>,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<
    Box<dyn std::future::Future<Output = Result<Response, AuthError>> + Send>,
> + Clone {
    let secret = secret.into();
    move |req, next| {
        let secret = secret.clone();
        Box::pin(jwt_auth_middleware(secret, req, next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::Claims;

    #[test]
    fn test_auth_context_from_claims() {
        let claims = Claims::new(42, "corner-store", 24);
        let context = AuthContext::from_claims(&claims);

        assert_eq!(context.owner_id, 42);
        assert_eq!(context.username, "corner-store");
    }

    #[test]
    fn test_auth_error_into_response() {
        let err = AuthError::MissingCredentials;
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let err = AuthError::InvalidFormat("Expected Bearer token".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let err = AuthError::InvalidToken("expired".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
