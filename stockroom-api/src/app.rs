/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use stockroom_api::{app::AppState, config::Config};
/// use stockroom_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(DatabaseConfig {
///     url: config.database.url.clone(),
///     ..Default::default()
/// })
/// .await?;
/// let state = AppState::new(pool, config);
/// let app = stockroom_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use stockroom_shared::auth::middleware::create_jwt_middleware;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;

/// Upper bound on request bodies, sized for image uploads
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: SqlitePool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Gets the configured token lifetime in hours
    pub fn jwt_expiry_hours(&self) -> i64 {
        self.config.jwt.expiry_hours
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                        # Liveness (public)
/// ├── /health/ready                  # Readiness incl. DB ping (public)
/// ├── /v1/
/// │   ├── /auth/
/// │   │   ├── POST /register         # Create owner account, returns JWT
/// │   │   └── POST /login            # Verify credentials, returns JWT
/// │   ├── /items/                    # (authenticated)
/// │   │   ├── GET    /               # List this owner's inventory
/// │   │   ├── POST   /               # Create item (multipart, optional image)
/// │   │   ├── GET    /low-stock      # Low/out-of-stock report
/// │   │   ├── GET    /quantity/:name # Quantity of one item
/// │   │   ├── PUT    /quantity/:name # Set quantity of one item
/// │   │   └── DELETE /:id            # Delete item by id
/// │   └── /exports/                  # (authenticated)
/// │       ├── GET /xml               # inventory.xml attachment
/// │       └── GET /xlsx              # inventory.xlsx attachment
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Body size limit (covers image uploads)
/// 4. Authentication (items and exports subtrees only)
///
/// The authentication layer is the shared JWT middleware; handlers under it
/// read the owner id from the injected `AuthContext` extension and from
/// nowhere else.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health checks (public, no auth)
    let health_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/health/ready", get(routes::health::readiness_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Inventory routes. Quantity lives under its own static segment so the
    // name-addressed routes never share a parameter position with the
    // id-addressed delete.
    let item_routes = Router::new()
        .route(
            "/",
            get(routes::items::list_items).post(routes::items::create_item),
        )
        .route("/low-stock", get(routes::items::low_stock))
        .route(
            "/quantity/:name",
            get(routes::items::get_quantity).put(routes::items::update_quantity),
        )
        .route("/:id", delete(routes::items::delete_item));

    // Export downloads
    let export_routes = Router::new()
        .route("/xml", get(routes::exports::export_xml))
        .route("/xlsx", get(routes::exports::export_xlsx));

    // Everything touching inventory requires an authenticated owner
    let protected_routes = Router::new()
        .nest("/items", item_routes)
        .nest("/exports", export_routes)
        .layer(axum::middleware::from_fn(create_jwt_middleware(
            state.jwt_secret().to_string(),
        )));

    let v1_routes = Router::new().nest("/auth", auth_routes).merge(protected_routes);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
