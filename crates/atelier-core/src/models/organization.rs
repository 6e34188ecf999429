use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::ContentStatus;

/// Work experience / organization membership entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub org_name: String,
    pub role_title: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub achievements: Vec<String>,
    /// Public URL of the cropped organization logo.
    pub logo: Option<String>,
    pub link_url: Option<String>,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating an organization entry
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Organization name must be between 1 and 255 characters"
    ))]
    pub org_name: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Role title must be between 1 and 255 characters"
    ))]
    pub role_title: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    #[validate(url(message = "link_url must be a valid URL"))]
    pub link_url: Option<String>,
    #[serde(default)]
    pub status: ContentStatus,
}

impl CreateOrganizationRequest {
    pub fn into_organization(self) -> Result<Organization, validator::ValidationErrors> {
        self.validate()?;
        Ok(Organization {
            id: Uuid::new_v4(),
            org_name: self.org_name,
            role_title: self.role_title,
            start_date: self.start_date,
            end_date: self.end_date,
            description: self.description,
            achievements: self.achievements,
            logo: self.logo,
            link_url: self.link_url,
            status: self.status,
            created_at: Utc::now(),
        })
    }
}
