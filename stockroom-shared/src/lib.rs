//! # Stockroom Shared Library
//!
//! This crate contains the core types and business logic used by the
//! Stockroom API server: database models, authentication utilities, the
//! image codec, and the inventory exporters.
//!
//! ## Module Organization
//!
//! - `models`: Database models and owner-scoped queries
//! - `auth`: Password hashing, JWT issuance, and request middleware
//! - `db`: Connection pool and embedded migrations
//! - `images`: Upload intake and image encoding for display/export
//! - `export`: XML and XLSX inventory exporters
//! - `stock`: Low/out-of-stock classification

pub mod auth;
pub mod db;
pub mod export;
pub mod images;
pub mod models;
pub mod stock;

/// Current version of the Stockroom shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
