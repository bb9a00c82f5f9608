/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Liveness and readiness endpoints
/// - `auth`: Authentication endpoints (register, login)
/// - `items`: Owner-scoped inventory endpoints
/// - `exports`: XML and XLSX download endpoints
pub mod auth;
pub mod exports;
pub mod health;
pub mod items;
