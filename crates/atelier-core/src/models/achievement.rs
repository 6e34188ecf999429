use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::ContentStatus;

/// Competition or award entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: Uuid,
    pub title: String,
    pub event: String,
    pub award: String,
    pub level: String,
    pub year: i32,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub proof_url: Option<String>,
    /// Public URL of the cropped proof image (certificate, podium photo).
    pub proof_image_url: Option<String>,
    pub proof_image_caption: Option<String>,
    pub status: ContentStatus,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating an achievement
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAchievementRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Event must be between 1 and 255 characters"))]
    pub event: String,
    #[validate(length(min = 1, max = 255, message = "Award must be between 1 and 255 characters"))]
    pub award: String,
    #[validate(length(min = 1, max = 100, message = "Level must be between 1 and 100 characters"))]
    pub level: String,
    #[validate(range(min = 1900, max = 2100, message = "Year must be plausible"))]
    pub year: i32,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub description: String,
    #[serde(default)]
    #[validate(url(message = "proof_url must be a valid URL"))]
    pub proof_url: Option<String>,
    #[serde(default)]
    pub proof_image_url: Option<String>,
    #[serde(default)]
    pub proof_image_caption: Option<String>,
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default)]
    pub sort_order: i32,
}

impl CreateAchievementRequest {
    pub fn into_achievement(self) -> Result<Achievement, validator::ValidationErrors> {
        self.validate()?;
        Ok(Achievement {
            id: Uuid::new_v4(),
            title: self.title,
            event: self.event,
            award: self.award,
            level: self.level,
            year: self.year,
            date: self.date,
            description: self.description,
            proof_url: self.proof_url,
            proof_image_url: self.proof_image_url,
            proof_image_caption: self.proof_image_caption,
            status: self.status,
            sort_order: self.sort_order,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_implausible_year() {
        let request: CreateAchievementRequest = serde_json::from_value(serde_json::json!({
            "title": "First place",
            "event": "National data mining competition",
            "award": "Gold",
            "level": "National",
            "year": 1742,
            "description": "Won the tabular track."
        }))
        .unwrap();
        assert!(request.into_achievement().is_err());
    }
}
