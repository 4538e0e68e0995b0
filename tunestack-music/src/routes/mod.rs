/// API route handlers
///
/// - `songs`: Song catalog CRUD
/// - `artists`: Artist records
/// - `albums`: Album records
///
/// `/` and `/health` come from `tunestack_shared::http::health`.

pub mod albums;
pub mod artists;
pub mod songs;
