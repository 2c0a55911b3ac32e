use std::fmt;

use config::ConfigError;
use derive_more::Display;
use serde::Serialize;
use sqlx::migrate::MigrateError;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    NotFound(String),
    Conflict(String),
    Constraint(ConstraintViolation),
    Configuration(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Constraint(violation) => write!(f, "Constraint violation: {}", violation),
            AppError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg)
        }
    }
}

impl std::error::Error for AppError {}

/// A store-level integrity failure, keyed by the violated constraint's name.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    #[display("check constraint '{_0}' failed")]
    Check(String),

    #[display("foreign key '{_0}' failed")]
    ForeignKey(String),

    #[display("unique constraint '{_0}' failed")]
    Unique(String),

    #[display("not-null constraint on '{_0}' failed")]
    NotNull(String),
}

impl ConstraintViolation {
    /// Classifies a PostgreSQL SQLSTATE. `name` is the constraint (or column,
    /// for not-null) the store reported.
    pub fn from_sqlstate(code: &str, name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        match code {
            "23514" => Some(ConstraintViolation::Check(name)),
            "23503" => Some(ConstraintViolation::ForeignKey(name)),
            "23505" => Some(ConstraintViolation::Unique(name)),
            "23502" => Some(ConstraintViolation::NotNull(name)),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ConstraintViolation::Check(name)
            | ConstraintViolation::ForeignKey(name)
            | ConstraintViolation::Unique(name)
            | ConstraintViolation::NotNull(name) => name,
        }
    }
}

impl AppError {
    /// The violated constraint, when this error came from one.
    pub fn constraint(&self) -> Option<&ConstraintViolation> {
        match self {
            AppError::Constraint(violation) => Some(violation),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(ref e) => {
                let name = e
                    .constraint()
                    .or_else(|| e.try_downcast_ref::<sqlx::postgres::PgDatabaseError>().and_then(|pg| pg.column()))
                    .unwrap_or("unknown")
                    .to_string();

                match e.code().and_then(|code| ConstraintViolation::from_sqlstate(&code, name)) {
                    Some(violation) => AppError::Constraint(violation),
                    None => AppError::InternalError(format!("Database error: {}", err)),
                }
            }
            _ => AppError::InternalError(format!("Database error: {}", err))
        }
    }
}

impl From<MigrateError> for AppError {
    fn from(err: MigrateError) -> Self {
        AppError::InternalError(format!("Migration failed: {}", err))
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        // Record-level rules land under "__all__"; keep the output stable
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::ValidationError(field_errors)
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
