use serde::{Serialize, Deserialize};
use validator::Validate;

use crate::constants::{MAX_PASSWORD_HASH_LENGTH, MAX_USERNAME_LENGTH};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}

/// Hashing happens upstream; this only carries the finished hash.
#[derive(Debug, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = MAX_USERNAME_LENGTH, message = "Username must be 1-50 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = MAX_PASSWORD_HASH_LENGTH, message = "Password hash must be 1-128 characters"))]
    pub password_hash: String,
}

#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i32,
    pub username: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            username: user.username,
        }
    }
}
