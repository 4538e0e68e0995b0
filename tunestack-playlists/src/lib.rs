//! # TuneStack Playlist Service
//!
//! Owns playlists: ordered lists of Music Service songs belonging to User
//! Service users. Owners and songs are verified against those services
//! before each write.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration (port 8003, `playlists.db`, service URLs)
//! - `db`: Embedded migrations and database bootstrap
//! - `docs`: OpenAPI document and Swagger UI
//! - `models`: Database models
//! - `references`: User and song existence checks
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod db;
pub mod docs;
pub mod models;
pub mod references;
pub mod routes;
