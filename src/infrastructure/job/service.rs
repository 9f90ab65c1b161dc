//! Job board service

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::storage::Storage;
use crate::domain::{DomainError, JobId, JobPosting, User};

/// Request to post a job
#[derive(Debug, Clone)]
pub struct PostJobRequest {
    pub title: String,
    pub description: String,
    pub location: String,
}

/// Job board operations exposed to the API layer
#[async_trait]
pub trait JobServiceTrait: Send + Sync + Debug {
    /// All postings, newest first; the board is seller-facing
    async fn list(&self, viewer: &User) -> Result<Vec<JobPosting>, DomainError>;

    /// Post a job as the acting seller
    async fn post(&self, seller: &User, request: PostJobRequest)
    -> Result<JobPosting, DomainError>;

    /// Delete a posting owned by the acting seller
    async fn delete(&self, seller: &User, id: &JobId) -> Result<(), DomainError>;
}

#[derive(Debug)]
pub struct JobService {
    jobs: Arc<dyn Storage<JobPosting>>,
}

impl JobService {
    pub fn new(jobs: Arc<dyn Storage<JobPosting>>) -> Self {
        Self { jobs }
    }

    fn require_seller(user: &User) -> Result<(), DomainError> {
        if !user.is_seller() {
            return Err(DomainError::authorization(
                "The job board is only available to sellers",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl JobServiceTrait for JobService {
    async fn list(&self, viewer: &User) -> Result<Vec<JobPosting>, DomainError> {
        Self::require_seller(viewer)?;

        let mut jobs = self.jobs.list().await?;
        jobs.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(jobs)
    }

    async fn post(
        &self,
        seller: &User,
        request: PostJobRequest,
    ) -> Result<JobPosting, DomainError> {
        Self::require_seller(seller)?;

        let job = JobPosting::new(
            request.title,
            request.description,
            request.location,
            seller.id().clone(),
        )?;

        let job = self.jobs.create(job).await?;

        tracing::info!(job_id = %job.id(), seller_id = %seller.id(), "Posted job");

        Ok(job)
    }

    async fn delete(&self, seller: &User, id: &JobId) -> Result<(), DomainError> {
        Self::require_seller(seller)?;

        // Same conflation as product deletion: not-owned reads as missing.
        let owned = self
            .jobs
            .get(id)
            .await?
            .is_some_and(|j| j.is_owned_by(seller.id()));

        if !owned {
            return Err(DomainError::not_found(format!("Job '{}' not found", id)));
        }

        self.jobs.delete(id).await?;

        Ok(())
    }
}
