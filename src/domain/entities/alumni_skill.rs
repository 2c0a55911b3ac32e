use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::MAX_NAME_LENGTH;

/// A skill tag. `(alumni_id, skill_name)` is the whole key; the row has no
/// identity of its own, so it doubles as its own insert shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate, sqlx::FromRow)]
pub struct AlumniSkill {
    pub alumni_id: i32,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH, message = "Skill must be 1-100 characters"))]
    pub skill_name: String,
}

impl AlumniSkill {
    pub fn new(alumni_id: i32, skill_name: impl Into<String>) -> Self {
        AlumniSkill {
            alumni_id,
            skill_name: skill_name.into(),
        }
    }
}
