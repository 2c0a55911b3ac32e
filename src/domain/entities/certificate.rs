use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::MAX_NAME_LENGTH;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Certificate {
    pub id: i32,
    pub alumni_id: i32,
    pub name: String,
    pub company: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewCertificate {
    pub alumni_id: i32,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Issuer must be 1-100 characters"))]
    pub company: String,
}
