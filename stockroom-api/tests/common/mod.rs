/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - In-memory test database with migrations applied
/// - Router construction with a known configuration
/// - Owner creation and JWT minting
/// - Multipart body construction for item-create requests
/// - Response body helpers
use axum::body::Body;
use axum::http::{header, Request};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use stockroom_api::app::{build_router, AppState};
use stockroom_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use stockroom_shared::auth::jwt::{create_token, Claims};
use stockroom_shared::db::migrations::MIGRATOR;
use stockroom_shared::models::owner::{CreateOwner, Owner};
use tower::Service as _;

/// JWT secret used by every test router
pub const TEST_JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Multipart boundary used by [`multipart_body`]
pub const BOUNDARY: &str = "stockroom-test-boundary";

/// Test context containing the app and its backing database
///
/// Each context owns a private in-memory database, so tests are isolated
/// from each other and can run in parallel.
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
    pub config: Config,
}

/// An owner created directly in the database plus a valid token
pub struct TestOwner {
    pub owner: Owner,
    pub token: String,
}

impl TestOwner {
    /// Returns the authorization header value for this owner
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl TestContext {
    /// Creates a new test context with a fresh migrated database
    pub async fn new() -> anyhow::Result<Self> {
        // An in-memory database lives and dies with its connection, so the
        // pool is pinned to a single connection that is never reaped.
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        MIGRATOR.run(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
                expiry_hours: 24,
            },
        };

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext { db, app, config })
    }

    /// Creates an owner directly in the database and mints a token
    ///
    /// Bypasses the register endpoint (and its argon2 work) for tests that
    /// only need an authenticated owner, not the registration flow itself.
    pub async fn signup(&self, username: &str) -> anyhow::Result<TestOwner> {
        let owner = Owner::create(
            &self.db,
            CreateOwner {
                username: username.to_string(),
                password_hash: "$argon2id$placeholder-hash".to_string(),
                store_name: format!("{username} general store"),
            },
        )
        .await?;

        let claims = Claims::new(owner.owner_id, &owner.username, 24);
        let token = create_token(&claims, &self.config.jwt.secret)?;

        Ok(TestOwner { owner, token })
    }

    /// Sends a multipart item-create request and returns the response
    pub async fn create_item(
        &self,
        owner: &TestOwner,
        name: &str,
        quantity: &str,
        price: &str,
        image: Option<(&str, &[u8])>,
    ) -> axum::response::Response {
        let body = multipart_body(
            &[
                ("name", name),
                ("description", &format!("{name} description")),
                ("quantity", quantity),
                ("price", price),
            ],
            image,
        );

        let request = Request::builder()
            .method("POST")
            .uri("/v1/items")
            .header(header::AUTHORIZATION, owner.auth_header())
            .header(header::CONTENT_TYPE, multipart_content_type())
            .body(Body::from(body))
            .unwrap();

        self.app.clone().call(request).await.unwrap()
    }
}

/// Builds a multipart/form-data body with the given text fields
///
/// The optional image tuple is (filename, content); an empty filename is
/// how a browser submits a file input left blank.
pub fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((filename, content)) = image {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Content-Type header value matching [`multipart_body`]
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Reads the full response body as bytes
pub async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec()
}

/// Reads the full response body and parses it as JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "Response body is not JSON ({e}): {}",
            String::from_utf8_lossy(&bytes)
        )
    })
}
