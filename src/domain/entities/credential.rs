//! Administrator credential entity.

/// Username and Argon2 PHC-format password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password_hash: String,
}
