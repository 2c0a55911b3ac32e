use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use validator::Validate;

use crate::{constants::MAX_TABLE_NAME_LENGTH, errors::AppError};

/// Audit row. `record_id` is not a foreign key: together with `table_name`
/// it may name a row in any table, including one that no longer exists.
/// `user_id` becomes `NULL` when the acting user is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChangeLog {
    pub id: i32,
    pub table_name: String,
    pub record_id: i32,
    pub user_id: Option<i32>,
    pub action: String,
    pub change_time: NaiveDateTime,
    pub old_data: Option<JsonValue>,
    pub new_data: Option<JsonValue>,
}

impl ChangeLog {
    pub fn action_kind(&self) -> Result<ChangeAction, AppError> {
        self.action.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    Insert,
    Update,
    Delete,
}

impl ChangeAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            ChangeAction::Insert => "INSERT",
            ChangeAction::Update => "UPDATE",
            ChangeAction::Delete => "DELETE",
        }
    }
}

impl FromStr for ChangeAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INSERT" => Ok(ChangeAction::Insert),
            "UPDATE" => Ok(ChangeAction::Update),
            "DELETE" => Ok(ChangeAction::Delete),
            other => Err(AppError::InternalError(format!("Unknown change action: {}", other))),
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewChangeLog {
    #[validate(length(min = 1, max = MAX_TABLE_NAME_LENGTH, message = "Table name must be 1-50 characters"))]
    pub table_name: String,

    pub record_id: i32,
    pub user_id: Option<i32>,
    pub action: ChangeAction,
    pub old_data: Option<JsonValue>,
    pub new_data: Option<JsonValue>,
}

impl NewChangeLog {
    pub fn new(table_name: impl Into<String>, record_id: i32, action: ChangeAction) -> Self {
        NewChangeLog {
            table_name: table_name.into(),
            record_id,
            user_id: None,
            action,
            old_data: None,
            new_data: None,
        }
    }

    pub fn by_user(mut self, user_id: i32) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_snapshots(mut self, old_data: Option<JsonValue>, new_data: Option<JsonValue>) -> Self {
        self.old_data = old_data;
        self.new_data = new_data;
        self
    }
}
