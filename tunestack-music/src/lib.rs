//! # TuneStack Music Service
//!
//! Owns the song catalog plus standalone artist and album records, stored in
//! the service's own SQLite database.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration defaults (port 8002, `music.db`)
//! - `db`: Embedded migrations and database bootstrap
//! - `docs`: OpenAPI document and Swagger UI
//! - `models`: Database models
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod db;
pub mod docs;
pub mod models;
pub mod routes;
