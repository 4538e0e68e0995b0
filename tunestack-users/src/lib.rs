//! # TuneStack User Service
//!
//! Owns user accounts: registration, login, listing, lookup and deletion,
//! stored in the service's own SQLite database.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration defaults (port 8001, `users.db`)
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
