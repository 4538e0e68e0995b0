/// API route handlers
///
/// - `users`: Registration, login and account management
///
/// `/` and `/health` come from `tunestack_shared::http::health`.

pub mod users;
