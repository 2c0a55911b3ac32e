use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::MAX_NAME_LENGTH;

/// Root record: every other alumni-owned row is deleted with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Alumni {
    pub id: i32,
    pub name: String,
    pub surname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewAlumni {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Surname must be 1-100 characters"))]
    pub surname: String,
}

impl NewAlumni {
    pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
        NewAlumni {
            name: name.into(),
            surname: surname.into(),
        }
    }
}
