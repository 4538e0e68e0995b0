/// Database layer for the TuneStack services
///
/// Every service owns exactly one SQLite database. This module provides the
/// pool and the migration runner; the tables themselves live in each service
/// crate's `migrations/` directory.
///
/// # Modules
///
/// - `pool`: Pool construction, health check and shutdown
/// - `migrations`: Runs a service's embedded migrator and reports status

pub mod migrations;
pub mod pool;
