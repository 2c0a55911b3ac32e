use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{constants::MAX_NAME_LENGTH, domain::rules::check_study_years};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Study {
    pub id: i32,
    pub alumni_id: i32,
    pub name: String,
    pub faculty: String,
    pub start_year: i32,
    pub end_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_years"))]
pub struct NewStudy {
    pub alumni_id: i32,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Faculty must be 1-100 characters"))]
    pub faculty: String,

    pub start_year: i32,
    pub end_year: Option<i32>,
}

fn validate_years(record: &NewStudy) -> Result<(), ValidationError> {
    check_study_years(record.start_year, record.end_year)
}
