/// Database models for the User Service
///
/// - `user`: Registered accounts and credential lookups

pub mod user;
