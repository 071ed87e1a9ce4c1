//! Users table and password digest helpers.
//!
//! The identity of a user is the username. Passwords are stored as
//! base64-encoded SHA-256 digests; credential hardening beyond that is
//! out of scope.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A user as seen by the rest of the engine (no credential material).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub is_admin: bool,
}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            username: model.username,
            is_admin: model.is_admin,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub password: String,
    pub is_admin: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Digest a plaintext password for storage.
pub fn password_digest(password: &str) -> String {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use sha2::{Digest, Sha256};

    STANDARD.encode(Sha256::digest(password.as_bytes()))
}

/// Compare a plaintext password against a stored digest.
pub fn verify_password(password: &str, digest: &str) -> bool {
    password_digest(password) == digest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable_and_verifiable() {
        let digest = password_digest("admin123");
        assert_eq!(digest, password_digest("admin123"));
        assert!(verify_password("admin123", &digest));
        assert!(!verify_password("admin124", &digest));
    }
}
