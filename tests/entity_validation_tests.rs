use alumni_registry::{
    db::schema::{
        SchemaReport, Table, CHECK_CONSTRAINTS, CHECK_IS_WORKING_END_DATE, CHECK_START_END_DATE,
        CHECK_START_END_YEAR, CHECK_START_YEAR, IDX_POST_CREATION_DATE, INDEXES,
    },
    entities::{
        alumni::NewAlumni,
        alumni_skill::AlumniSkill,
        change_log::{ChangeAction, NewChangeLog},
        study::NewStudy,
        user::{NewUser, PublicUser, User},
        work_experience::NewWorkExperience,
    },
    errors::{AppError, ConstraintViolation},
    rules::{check_employment_period, check_study_years_on, max_start_year},
};
use chrono::NaiveDate;
use serde_json::json;
use validator::Validate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn study(start_year: i32, end_year: Option<i32>) -> NewStudy {
    NewStudy {
        alumni_id: 1,
        name: "Computer Science".into(),
        faculty: "Engineering".into(),
        start_year,
        end_year,
    }
}

#[test]
fn current_position_has_no_end_date() {
    let job = NewWorkExperience::current(1, "Engineer", "Acme", date(2020, 1, 1));

    assert!(job.is_working);
    assert!(job.end_date.is_none());
    assert!(job.validate().is_ok());
}

#[test]
fn working_flag_with_end_date_is_rejected() {
    let mut job = NewWorkExperience::past(1, "Engineer", "Acme", date(2020, 1, 1), date(2021, 1, 1));
    job.is_working = true;

    let err = check_employment_period(job.start_date, job.end_date, job.is_working).unwrap_err();

    assert_eq!(err.code, CHECK_IS_WORKING_END_DATE);
    assert!(job.validate().is_err());
}

#[test]
fn finished_position_without_end_date_is_rejected() {
    let err = check_employment_period(date(2020, 1, 1), None, false).unwrap_err();

    assert_eq!(err.code, CHECK_IS_WORKING_END_DATE);
}

#[test]
fn end_date_before_start_date_is_rejected() {
    let err = check_employment_period(date(2021, 6, 1), Some(date(2021, 5, 31)), false).unwrap_err();

    assert_eq!(err.code, CHECK_START_END_DATE);
}

#[test]
fn same_day_start_and_end_is_allowed() {
    assert!(check_employment_period(date(2021, 6, 1), Some(date(2021, 6, 1)), false).is_ok());
}

#[test]
fn study_start_year_bounds_follow_today() {
    let today = date(2026, 3, 15);

    assert_eq!(max_start_year(today), 2036);
    assert!(check_study_years_on(1900, None, today).is_ok());
    assert!(check_study_years_on(2036, None, today).is_ok());
    assert_eq!(check_study_years_on(1899, None, today).unwrap_err().code, CHECK_START_YEAR);
    assert_eq!(check_study_years_on(2037, None, today).unwrap_err().code, CHECK_START_YEAR);
}

#[test]
fn study_start_year_bound_moves_on_new_year() {
    let new_years_eve = date(2026, 12, 31);
    let new_years_day = date(2027, 1, 1);

    assert!(check_study_years_on(2037, None, new_years_eve).is_err());
    assert!(check_study_years_on(2037, None, new_years_day).is_ok());
}

#[test]
fn study_end_year_cannot_precede_start() {
    let today = date(2026, 3, 15);

    assert!(check_study_years_on(2010, Some(2010), today).is_ok());
    assert_eq!(
        check_study_years_on(2010, Some(2009), today).unwrap_err().code,
        CHECK_START_END_YEAR
    );
}

#[test]
fn study_record_validation_uses_current_year() {
    assert!(study(2015, Some(2019)).validate().is_ok());
    assert!(study(1850, None).validate().is_err());
    assert!(study(2015, Some(2014)).validate().is_err());
}

#[test]
fn names_longer_than_column_width_are_rejected() {
    let alumni = NewAlumni::new("a".repeat(101), "Doe");
    assert!(alumni.validate().is_err());

    let alumni = NewAlumni::new("a".repeat(100), "Doe");
    assert!(alumni.validate().is_ok());

    let skill = AlumniSkill::new(1, "");
    assert!(skill.validate().is_err());
}

#[test]
fn username_is_limited_to_fifty_characters() {
    let user = NewUser {
        username: "u".repeat(51),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc".into(),
    };

    assert!(user.validate().is_err());
}

#[test]
fn validation_errors_become_field_errors() {
    let job = NewWorkExperience {
        alumni_id: 1,
        title: String::new(),
        company: "Acme".into(),
        start_date: date(2020, 1, 1),
        end_date: None,
        is_working: true,
    };

    match AppError::from(job.validate().unwrap_err()) {
        AppError::ValidationError(fields) => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].field, "title");
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn record_level_errors_carry_the_rule_message() {
    let job = NewWorkExperience {
        alumni_id: 1,
        title: "Engineer".into(),
        company: "Acme".into(),
        start_date: date(2020, 1, 1),
        end_date: None,
        is_working: false,
    };

    match AppError::from(job.validate().unwrap_err()) {
        AppError::ValidationError(fields) => {
            assert!(fields.iter().any(|f| f.message.contains("end date")));
        }
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn change_actions_are_stored_uppercase() {
    assert_eq!(ChangeAction::Insert.as_str(), "INSERT");
    assert_eq!("update".parse::<ChangeAction>().unwrap(), ChangeAction::Update);
    assert_eq!("DELETE".parse::<ChangeAction>().unwrap(), ChangeAction::Delete);
    assert!("UPSERT".parse::<ChangeAction>().is_err());
    assert_eq!(serde_json::to_value(ChangeAction::Delete).unwrap(), json!("DELETE"));
}

#[test]
fn change_log_builder_sets_user_and_snapshots() {
    let entry = NewChangeLog::new("alumni", 7, ChangeAction::Update)
        .by_user(3)
        .with_snapshots(Some(json!({"name": "Ann"})), Some(json!({"name": "Anna"})));

    assert!(entry.validate().is_ok());
    assert_eq!(entry.user_id, Some(3));
    assert_eq!(entry.old_data.unwrap()["name"], "Ann");
}

#[test]
fn public_user_drops_password_hash() {
    let user = User {
        id: 4,
        username: "registrar".into(),
        password_hash: "hash".into(),
    };

    let public = serde_json::to_value(PublicUser::from(user)).unwrap();

    assert_eq!(public, json!({"id": 4, "username": "registrar"}));
}

#[test]
fn sqlstates_map_to_constraint_kinds() {
    assert_eq!(
        ConstraintViolation::from_sqlstate("23514", CHECK_START_YEAR),
        Some(ConstraintViolation::Check(CHECK_START_YEAR.into()))
    );
    assert!(matches!(
        ConstraintViolation::from_sqlstate("23503", "post_alumni_id_fkey"),
        Some(ConstraintViolation::ForeignKey(_))
    ));
    assert!(matches!(
        ConstraintViolation::from_sqlstate("23505", "users_username_key"),
        Some(ConstraintViolation::Unique(_))
    ));
    assert_eq!(ConstraintViolation::from_sqlstate("42P01", "x"), None);
}

#[test]
fn schema_catalog_names_are_stable() {
    let tables: Vec<&str> = Table::ALL.iter().map(|t| t.name()).collect();
    assert_eq!(
        tables,
        ["alumni", "work_experience", "study", "certificate", "alumni_skill", "post", "users", "change_log"]
    );
    assert!(Table::Post.cascades_from_alumni());
    assert!(!Table::ChangeLog.cascades_from_alumni());
    assert!(!Table::Users.cascades_from_alumni());

    let constraints: Vec<&str> = CHECK_CONSTRAINTS.iter().map(|(_, n)| *n).collect();
    assert_eq!(
        constraints,
        ["check_is_working_end_date", "check_start_end_date", "check_start_year", "check_start_end_year"]
    );

    let indexes: Vec<&str> = INDEXES.iter().map(|(_, n)| *n).collect();
    assert_eq!(
        indexes,
        ["idx_alumni_name", "idx_alumni_surname", "idx_alumni_skill_skill_name", "idx_post_creation_date"]
    );
}

#[test]
fn schema_report_lists_missing_items() {
    let tables: Vec<String> = Table::ALL.iter().map(|t| t.name().to_string()).collect();
    let constraints: Vec<String> = CHECK_CONSTRAINTS.iter().map(|(_, n)| n.to_string()).collect();
    let indexes: Vec<String> = INDEXES
        .iter()
        .map(|(_, n)| n.to_string())
        .filter(|n| n != IDX_POST_CREATION_DATE)
        .collect();

    let report = SchemaReport::from_catalog(&tables, &constraints, &indexes);

    assert!(!report.is_complete());
    assert_eq!(report.missing_indexes, vec![IDX_POST_CREATION_DATE]);
    assert!(report.to_string().contains(IDX_POST_CREATION_DATE));

    let all_indexes: Vec<String> = INDEXES.iter().map(|(_, n)| n.to_string()).collect();
    assert!(SchemaReport::from_catalog(&tables, &constraints, &all_indexes).is_complete());
}
