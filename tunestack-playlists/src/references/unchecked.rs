/// Reference checker that trusts every identifier
///
/// Used when `VERIFY_REFERENCES=false`, e.g. to run the Playlist Service
/// without the other two.

use super::{ReferenceResult, SongCatalog, UserDirectory};
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct UncheckedReferences;

#[async_trait]
impl UserDirectory for UncheckedReferences {
    async fn user_exists(&self, _id: i64) -> ReferenceResult<bool> {
        Ok(true)
    }
}

#[async_trait]
impl SongCatalog for UncheckedReferences {
    async fn song_exists(&self, _id: i64) -> ReferenceResult<bool> {
        Ok(true)
    }
}
