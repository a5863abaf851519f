//! Application screening against job requirements.

use tokio::task::JoinSet;
use tracing::debug;

use super::Service;
use crate::error::{AppError, Result};
use crate::models::JobApplication;

impl Service {
    /// Returns the applications that satisfy their job's requirements, in
    /// input order.
    ///
    /// The repository first drops applications for unknown jobs; the rest
    /// are checked concurrently, each reading its job through the
    /// cache-aside path.
    pub async fn filter_applications(
        &self,
        applications: Vec<JobApplication>,
    ) -> Result<Vec<JobApplication>> {
        let candidates = self
            .repo_call(
                "filter_applications",
                self.repo.filter_applications(applications),
            )
            .await?;

        let mut checks = JoinSet::new();
        for (index, application) in candidates.into_iter().enumerate() {
            let service = self.clone();
            checks.spawn(async move {
                let job = service.view_job_details_by_id(application.job_id).await;
                (index, application, job)
            });
        }

        let mut accepted = Vec::new();
        while let Some(joined) = checks.join_next().await {
            let (index, application, job) =
                joined.map_err(|e| AppError::Internal(e.to_string()))?;
            match job {
                Ok(job) if application.matches(&job) => accepted.push((index, application)),
                Ok(_) => debug!(
                    job_id = application.job_id,
                    applicant = %application.name,
                    "application rejected"
                ),
                // Job removed between the repository filter and the read
                Err(AppError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }

        accepted.sort_by_key(|(index, _)| *index);
        Ok(accepted.into_iter().map(|(_, application)| application).collect())
    }
}
