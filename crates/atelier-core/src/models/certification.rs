use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::ContentStatus;

/// Professional certification entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certification {
    pub id: Uuid,
    pub name: String,
    pub issuer: String,
    pub issue_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    /// Public URL of the cropped certificate scan.
    pub certificate_image: Option<String>,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a certification
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCertificationRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 255, message = "Issuer must be between 1 and 255 characters"))]
    pub issuer: String,
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub credential_id: Option<String>,
    #[serde(default)]
    #[validate(url(message = "credential_url must be a valid URL"))]
    pub credential_url: Option<String>,
    #[serde(default)]
    pub certificate_image: Option<String>,
    #[serde(default)]
    pub status: ContentStatus,
}

impl CreateCertificationRequest {
    pub fn into_certification(self) -> Result<Certification, validator::ValidationErrors> {
        self.validate()?;
        Ok(Certification {
            id: Uuid::new_v4(),
            name: self.name,
            issuer: self.issuer,
            issue_date: self.issue_date,
            expiry_date: self.expiry_date,
            credential_id: self.credential_id,
            credential_url: self.credential_url,
            certificate_image: self.certificate_image,
            status: self.status,
            created_at: Utc::now(),
        })
    }
}
