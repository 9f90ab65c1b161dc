//! Job posting entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::user::UserId;

/// Job posting identifier - UUID string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();

        if id.is_empty() || id.len() > 64 {
            return Err(DomainError::invalid_id(
                "Job ID must be a non-empty string of at most 64 characters",
            ));
        }

        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for JobId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<JobId> for String {
    fn from(id: JobId) -> Self {
        id.0
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for JobId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// A job posted by a seller, visible to other sellers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    id: JobId,
    title: String,
    description: String,
    location: String,
    /// Posting seller; only this user may delete the posting
    seller_id: UserId,
    created_at: DateTime<Utc>,
}

impl JobPosting {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        seller_id: UserId,
    ) -> Result<Self, DomainError> {
        let title = title.into();

        if title.trim().is_empty() {
            return Err(DomainError::validation("Job title must not be empty"));
        }

        Ok(Self {
            id: JobId::generate(),
            title,
            description: description.into(),
            location: location.into(),
            seller_id,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn seller_id(&self) -> &UserId {
        &self.seller_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.seller_id == user_id
    }
}

impl StorageEntity for JobPosting {
    type Key = JobId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_creation() {
        let seller = UserId::generate();
        let job = JobPosting::new("Weaver needed", "Part-time loom work", "Samba", seller.clone())
            .unwrap();

        assert_eq!(job.title(), "Weaver needed");
        assert_eq!(job.location(), "Samba");
        assert!(job.is_owned_by(&seller));
    }

    #[test]
    fn test_empty_title_rejected() {
        let result = JobPosting::new(" ", "", "Samba", UserId::generate());
        assert!(result.is_err());
    }

    #[test]
    fn test_ownership() {
        let job = JobPosting::new("Carver", "", "Udhampur", UserId::generate()).unwrap();
        assert!(!job.is_owned_by(&UserId::generate()));
    }
}
