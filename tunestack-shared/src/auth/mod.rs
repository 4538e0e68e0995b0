/// Authentication utilities
///
/// - [`password`]: Argon2id password hashing and verification
///
/// The services issue no tokens or sessions; login is a credential check
/// against the stored hash.

pub mod password;
