//! # TuneStack Shared Library
//!
//! This crate contains the plumbing shared by the three TuneStack services
//! (users, music, playlists). Each service owns its own SQLite database and
//! HTTP surface; what they have in common lives here.
//!
//! ## Module Organization
//!
//! - `auth`: Password hashing
//! - `config`: Environment-driven configuration
//! - `db`: SQLite connection pool and migration runner
//! - `error`: Unified API error type and HTTP mapping
//! - `http`: Middleware stack, health endpoints, server bootstrap
//! - `pagination`: Shared list query parameters
//! - `telemetry`: Tracing subscriber setup

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod pagination;
pub mod telemetry;

/// Current version of the TuneStack shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
