/// Database models for the Music Service
///
/// - `song`: Catalog entries, with partial updates
/// - `artist`: Standalone artist records (unique names)
/// - `album`: Standalone album records

pub mod album;
pub mod artist;
pub mod song;
