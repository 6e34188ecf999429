use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::ContentStatus;

/// Whether a project was individual or team work.
///
/// Deliberately a separate field from [`ProjectCategory`]: scope says who
/// built it, category says what kind of work it is. The two are never
/// collapsed into a single "type" field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectScope {
    Personal,
    Team,
}

/// Kind of work a project represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    ImageClassification,
    ObjectDetection,
    ImageSegmentation,
    CharacterRecognition,
    Clustering,
    TabularClassification,
    Regression,
    Forecasting,
    SentimentAnalysis,
    TextClassification,
}

/// Portfolio project entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub scope: ProjectScope,
    pub category: ProjectCategory,
    pub status: ContentStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub role: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub highlights: Vec<String>,
    pub tech_stack: Vec<String>,
    pub tags: Vec<String>,
    pub metrics: HashMap<String, String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub article_url: Option<String>,
    /// Public URL of the cropped thumbnail produced by the upload pipeline.
    pub thumbnail_image: Option<String>,
    pub gallery_images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a project
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 255, message = "Slug must be between 1 and 255 characters"))]
    pub slug: String,
    pub scope: ProjectScope,
    pub category: ProjectCategory,
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metrics: HashMap<String, String>,
    #[serde(default)]
    #[validate(url(message = "github_url must be a valid URL"))]
    pub github_url: Option<String>,
    #[serde(default)]
    #[validate(url(message = "demo_url must be a valid URL"))]
    pub demo_url: Option<String>,
    #[serde(default)]
    #[validate(url(message = "article_url must be a valid URL"))]
    pub article_url: Option<String>,
    #[serde(default)]
    pub thumbnail_image: Option<String>,
    #[serde(default)]
    pub gallery_images: Vec<String>,
}

impl CreateProjectRequest {
    /// Validate once at the boundary and build the typed record.
    pub fn into_project(self) -> Result<Project, validator::ValidationErrors> {
        self.validate()?;
        Ok(Project {
            id: Uuid::new_v4(),
            title: self.title,
            slug: self.slug,
            scope: self.scope,
            category: self.category,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            role: self.role,
            summary: self.summary,
            description: self.description,
            highlights: self.highlights,
            tech_stack: self.tech_stack,
            tags: self.tags,
            metrics: self.metrics,
            github_url: self.github_url,
            demo_url: self.demo_url,
            article_url: self.article_url,
            thumbnail_image: self.thumbnail_image,
            gallery_images: self.gallery_images,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_request() -> CreateProjectRequest {
        serde_json::from_value(serde_json::json!({
            "title": "Street sign detector",
            "slug": "street-sign-detector",
            "scope": "PERSONAL",
            "category": "object_detection"
        }))
        .unwrap()
    }

    #[test]
    fn test_scope_and_category_are_separate_fields() {
        let project = minimal_request().into_project().unwrap();
        assert_eq!(project.scope, ProjectScope::Personal);
        assert_eq!(project.category, ProjectCategory::ObjectDetection);
        assert_eq!(project.status, ContentStatus::Draft);
    }

    #[test]
    fn test_rejects_empty_title() {
        let mut request = minimal_request();
        request.title = String::new();
        assert!(request.into_project().is_err());
    }

    #[test]
    fn test_rejects_invalid_url() {
        let mut request = minimal_request();
        request.github_url = Some("not a url".to_string());
        assert!(request.into_project().is_err());
    }
}
