//! Domain models for portfolio content.
//!
//! Each entity is a strongly-typed record validated once at the boundary via
//! its `Create*Request` DTO; nothing downstream works with loosely-typed
//! payloads. Image-bearing fields hold the public URLs produced by the
//! upload pipeline.

use serde::{Deserialize, Serialize};

pub mod achievement;
pub mod certification;
pub mod organization;
pub mod profile;
pub mod project;
pub mod skill;

pub use achievement::{Achievement, CreateAchievementRequest};
pub use certification::{Certification, CreateCertificationRequest};
pub use organization::{CreateOrganizationRequest, Organization};
pub use profile::{Profile, UpdateProfileRequest};
pub use project::{CreateProjectRequest, Project, ProjectCategory, ProjectScope};
pub use skill::{CreateSkillRequest, Skill};

/// Publication state gating public visibility of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentStatus {
    #[default]
    Draft,
    Published,
}

impl ContentStatus {
    pub fn is_published(self) -> bool {
        matches!(self, ContentStatus::Published)
    }
}
