use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Site owner profile (a single row in practice)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub headline: Option<String>,
    pub bio_short: Option<String>,
    pub bio_long: Option<String>,
    pub location: Option<String>,
    /// Public URL of the cropped profile photo (1:1).
    pub profile_photo: Option<String>,
    /// Public URL of the cropped banner image (16:9).
    pub banner_image: Option<String>,
    pub cv_url: Option<String>,
    pub contact_email: Option<String>,
}

/// Request DTO for updating the profile
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub full_name: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub bio_short: Option<String>,
    #[serde(default)]
    pub bio_long: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    #[validate(url(message = "cv_url must be a valid URL"))]
    pub cv_url: Option<String>,
    #[serde(default)]
    #[validate(email(message = "contact_email must be a valid email"))]
    pub contact_email: Option<String>,
}

impl UpdateProfileRequest {
    /// Apply the validated update on top of an existing profile.
    pub fn apply_to(self, mut profile: Profile) -> Result<Profile, validator::ValidationErrors> {
        self.validate()?;
        if let Some(full_name) = self.full_name {
            profile.full_name = full_name;
        }
        if let Some(headline) = self.headline {
            profile.headline = Some(headline);
        }
        if let Some(bio_short) = self.bio_short {
            profile.bio_short = Some(bio_short);
        }
        if let Some(bio_long) = self.bio_long {
            profile.bio_long = Some(bio_long);
        }
        if let Some(location) = self.location {
            profile.location = Some(location);
        }
        if let Some(profile_photo) = self.profile_photo {
            profile.profile_photo = Some(profile_photo);
        }
        if let Some(banner_image) = self.banner_image {
            profile.banner_image = Some(banner_image);
        }
        if let Some(cv_url) = self.cv_url {
            profile.cv_url = Some(cv_url);
        }
        if let Some(contact_email) = self.contact_email {
            profile.contact_email = Some(contact_email);
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_profile() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            full_name: "Ada".to_string(),
            headline: None,
            bio_short: None,
            bio_long: None,
            location: None,
            profile_photo: None,
            banner_image: None,
            cv_url: None,
            contact_email: None,
        }
    }

    #[test]
    fn test_partial_update_keeps_existing_fields() {
        let request: UpdateProfileRequest = serde_json::from_value(serde_json::json!({
            "headline": "ML engineer"
        }))
        .unwrap();
        let updated = request.apply_to(empty_profile()).unwrap();
        assert_eq!(updated.full_name, "Ada");
        assert_eq!(updated.headline.as_deref(), Some("ML engineer"));
    }

    #[test]
    fn test_rejects_bad_email() {
        let request: UpdateProfileRequest = serde_json::from_value(serde_json::json!({
            "contact_email": "not-an-email"
        }))
        .unwrap();
        assert!(request.apply_to(empty_profile()).is_err());
    }
}
