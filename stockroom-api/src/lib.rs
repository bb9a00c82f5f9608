//! # Stockroom API Server Library
//!
//! This library provides the core functionality for the Stockroom API
//! server: the HTTP surface over the inventory store in `stockroom-shared`.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
