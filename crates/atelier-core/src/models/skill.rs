use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::ContentStatus;

/// Skill entry grouped by category on the public page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: Uuid,
    pub category: String,
    pub skill_name: String,
    /// Self-assessed proficiency 1-5, if shown.
    pub level: Option<u8>,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a skill
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSkillRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Category must be between 1 and 100 characters"
    ))]
    pub category: String,
    #[validate(length(
        min = 1,
        max = 100,
        message = "Skill name must be between 1 and 100 characters"
    ))]
    pub skill_name: String,
    #[serde(default)]
    #[validate(range(min = 1, max = 5, message = "Level must be between 1 and 5"))]
    pub level: Option<u8>,
    #[serde(default)]
    pub status: ContentStatus,
}

impl CreateSkillRequest {
    pub fn into_skill(self) -> Result<Skill, validator::ValidationErrors> {
        self.validate()?;
        Ok(Skill {
            id: Uuid::new_v4(),
            category: self.category,
            skill_name: self.skill_name,
            level: self.level,
            status: self.status,
            created_at: Utc::now(),
        })
    }
}
