/// API route handlers
///
/// - `playlists`: Playlist CRUD and song membership
///
/// `/` and `/health` come from `tunestack_shared::http::health`.

pub mod playlists;
