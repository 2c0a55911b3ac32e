//! Record-level rules mirroring the store's check constraints, so a caller can
//! reject a record before sending it. The database stays authoritative.

use chrono::{Datelike, NaiveDate, Utc};
use validator::ValidationError;

use crate::{
    constants::{MIN_START_YEAR, START_YEAR_LOOKAHEAD},
    infrastructure::db::schema::{
        CHECK_IS_WORKING_END_DATE, CHECK_START_END_DATE, CHECK_START_END_YEAR, CHECK_START_YEAR,
    },
};

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// `is_working` holds exactly when there is no end date, and a finished job
/// cannot end before it started.
pub fn check_employment_period(
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    is_working: bool,
) -> Result<(), ValidationError> {
    if is_working != end_date.is_none() {
        return Err(violation(
            CHECK_IS_WORKING_END_DATE,
            "A current position has no end date, a past one must have it",
        ));
    }
    if end_date.is_some_and(|end| end < start_date) {
        return Err(violation(CHECK_START_END_DATE, "End date cannot precede start date"));
    }
    Ok(())
}

/// Latest accepted study start year, relative to `today`.
pub fn max_start_year(today: NaiveDate) -> i32 {
    today.year() + START_YEAR_LOOKAHEAD
}

/// `today` should be the store's `current_date` (see
/// `db::postgres::store_current_date`): the check runs in the database
/// session's time zone, which can be a calendar year away from UTC around
/// New Year.
pub fn check_study_years_on(
    start_year: i32,
    end_year: Option<i32>,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if start_year < MIN_START_YEAR || start_year > max_start_year(today) {
        return Err(violation(
            CHECK_START_YEAR,
            "Start year must be between 1900 and ten years from now",
        ));
    }
    if end_year.is_some_and(|end| end < start_year) {
        return Err(violation(CHECK_START_END_YEAR, "End year cannot precede start year"));
    }
    Ok(())
}

/// Same as [`check_study_years_on`] with today's UTC date. Near New Year this
/// can disagree with a store whose session runs in another time zone.
pub fn check_study_years(start_year: i32, end_year: Option<i32>) -> Result<(), ValidationError> {
    check_study_years_on(start_year, end_year, Utc::now().date_naive())
}
