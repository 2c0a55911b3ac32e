use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// `creation_date` is UTC wall-clock time, filled in by the store on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i32,
    pub alumni_id: i32,
    pub text: String,
    pub creation_date: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewPost {
    pub alumni_id: i32,

    #[validate(length(min = 1, message = "Post text cannot be empty"))]
    pub text: String,
}
