/// Authentication building blocks
///
/// - `password`: Argon2id hashing and verification
/// - `session`: in-process session store binding opaque tokens to identities

pub mod password;
pub mod session;
