use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{constants::MAX_NAME_LENGTH, domain::rules::check_employment_period};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkExperience {
    pub id: i32,
    pub alumni_id: i32,
    pub title: String,
    pub company: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_working: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_period"))]
pub struct NewWorkExperience {
    pub alumni_id: i32,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Company must be 1-100 characters"))]
    pub company: String,

    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_working: bool,
}

impl NewWorkExperience {
    /// A position the alumni still holds.
    pub fn current(
        alumni_id: i32,
        title: impl Into<String>,
        company: impl Into<String>,
        start_date: NaiveDate,
    ) -> Self {
        NewWorkExperience {
            alumni_id,
            title: title.into(),
            company: company.into(),
            start_date,
            end_date: None,
            is_working: true,
        }
    }

    /// A position that ended on `end_date`.
    pub fn past(
        alumni_id: i32,
        title: impl Into<String>,
        company: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        NewWorkExperience {
            alumni_id,
            title: title.into(),
            company: company.into(),
            start_date,
            end_date: Some(end_date),
            is_working: false,
        }
    }
}

fn validate_period(record: &NewWorkExperience) -> Result<(), ValidationError> {
    check_employment_period(record.start_date, record.end_date, record.is_working)
}
