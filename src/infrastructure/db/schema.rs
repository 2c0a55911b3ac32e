//! Names of every table, check constraint and index the migrations create,
//! and a catalog probe that confirms they exist in a live database.
//!
//! The names are part of the persisted interface; migrations written against
//! earlier deployments refer to them, so they must not change.

use std::fmt;

use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, warn};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Table {
    Alumni,
    WorkExperience,
    Study,
    Certificate,
    AlumniSkill,
    Post,
    Users,
    ChangeLog,
}

impl Table {
    pub const ALL: [Table; 8] = [
        Table::Alumni,
        Table::WorkExperience,
        Table::Study,
        Table::Certificate,
        Table::AlumniSkill,
        Table::Post,
        Table::Users,
        Table::ChangeLog,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Table::Alumni => "alumni",
            Table::WorkExperience => "work_experience",
            Table::Study => "study",
            Table::Certificate => "certificate",
            Table::AlumniSkill => "alumni_skill",
            Table::Post => "post",
            Table::Users => "users",
            Table::ChangeLog => "change_log",
        }
    }

    /// Tables removed together with their owning alumni row.
    pub const fn cascades_from_alumni(self) -> bool {
        matches!(
            self,
            Table::WorkExperience
                | Table::Study
                | Table::Certificate
                | Table::AlumniSkill
                | Table::Post
        )
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const CHECK_IS_WORKING_END_DATE: &str = "check_is_working_end_date";
pub const CHECK_START_END_DATE: &str = "check_start_end_date";
pub const CHECK_START_YEAR: &str = "check_start_year";
pub const CHECK_START_END_YEAR: &str = "check_start_end_year";

pub const IDX_ALUMNI_NAME: &str = "idx_alumni_name";
pub const IDX_ALUMNI_SURNAME: &str = "idx_alumni_surname";
pub const IDX_ALUMNI_SKILL_SKILL_NAME: &str = "idx_alumni_skill_skill_name";
pub const IDX_POST_CREATION_DATE: &str = "idx_post_creation_date";

/// Default PostgreSQL name of the unique constraint on `users.username`.
pub const USERS_USERNAME_KEY: &str = "users_username_key";

pub const CHECK_CONSTRAINTS: [(Table, &str); 4] = [
    (Table::WorkExperience, CHECK_IS_WORKING_END_DATE),
    (Table::WorkExperience, CHECK_START_END_DATE),
    (Table::Study, CHECK_START_YEAR),
    (Table::Study, CHECK_START_END_YEAR),
];

pub const INDEXES: [(Table, &str); 4] = [
    (Table::Alumni, IDX_ALUMNI_NAME),
    (Table::Alumni, IDX_ALUMNI_SURNAME),
    (Table::AlumniSkill, IDX_ALUMNI_SKILL_SKILL_NAME),
    (Table::Post, IDX_POST_CREATION_DATE),
];

/// What the catalog probe could not find.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    pub missing_tables: Vec<&'static str>,
    pub missing_constraints: Vec<&'static str>,
    pub missing_indexes: Vec<&'static str>,
}

impl SchemaReport {
    pub fn is_complete(&self) -> bool {
        self.missing_tables.is_empty()
            && self.missing_constraints.is_empty()
            && self.missing_indexes.is_empty()
    }

    /// Builds a report from the names found in the catalog.
    pub fn from_catalog(tables: &[String], constraints: &[String], indexes: &[String]) -> Self {
        fn present(found: &[String], name: &str) -> bool {
            found.iter().any(|f| f == name)
        }

        SchemaReport {
            missing_tables: Table::ALL
                .iter()
                .map(|t| t.name())
                .filter(|name| !present(tables, *name))
                .collect(),
            missing_constraints: CHECK_CONSTRAINTS
                .iter()
                .map(|(_, name)| *name)
                .filter(|name| !present(constraints, *name))
                .collect(),
            missing_indexes: INDEXES
                .iter()
                .map(|(_, name)| *name)
                .filter(|name| !present(indexes, *name))
                .collect(),
        }
    }
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_complete() {
            return write!(f, "schema complete");
        }
        write!(
            f,
            "missing tables: [{}], constraints: [{}], indexes: [{}]",
            self.missing_tables.join(", "),
            self.missing_constraints.join(", "),
            self.missing_indexes.join(", ")
        )
    }
}

/// Reads the current schema's catalog and reports anything the migrations
/// should have created but did not.
pub async fn verify_schema(pool: &PgPool) -> Result<SchemaReport, AppError> {
    let table_names: Vec<&str> = Table::ALL.iter().map(|t| t.name()).collect();
    let constraint_names: Vec<&str> = CHECK_CONSTRAINTS.iter().map(|(_, n)| *n).collect();
    let index_names: Vec<&str> = INDEXES.iter().map(|(_, n)| *n).collect();

    let tables: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT table_name::text FROM information_schema.tables
        WHERE table_schema = current_schema() AND table_name::text = ANY($1)
        "#,
    )
    .bind(&table_names)
    .fetch_all(pool)
    .await?;

    let constraints: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT c.conname::text FROM pg_constraint c
        JOIN pg_namespace n ON n.oid = c.connamespace
        WHERE n.nspname = current_schema() AND c.contype = 'c' AND c.conname::text = ANY($1)
        "#,
    )
    .bind(&constraint_names)
    .fetch_all(pool)
    .await?;

    let indexes: Vec<String> = sqlx::query_scalar(
        r#"
        SELECT indexname::text FROM pg_indexes
        WHERE schemaname = current_schema() AND indexname::text = ANY($1)
        "#,
    )
    .bind(&index_names)
    .fetch_all(pool)
    .await?;

    debug!(
        tables = tables.len(),
        constraints = constraints.len(),
        indexes = indexes.len(),
        "Read schema catalog"
    );

    let report = SchemaReport::from_catalog(&tables, &constraints, &indexes);
    if !report.is_complete() {
        warn!(%report, "Schema is incomplete");
    }

    Ok(report)
}
