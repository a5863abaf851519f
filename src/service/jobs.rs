//! Job operations and the cache-aside read path.

use tracing::{debug, info, warn};

use super::Service;
use crate::error::{AppError, Result};
use crate::models::{CreatedJob, Job, NewJob};

impl Service {
    /// Posts a job. The cache is not touched; a stale entry for the same id
    /// cannot exist because ids are never reused.
    pub async fn add_job_details(&self, company_id: u64, data: NewJob) -> Result<CreatedJob> {
        if let Some(msg) = data.validate() {
            return Err(AppError::InvalidRequest(msg));
        }
        let job = self
            .repo_call("create_job", self.repo.create_job(company_id, data))
            .await?;
        info!(job_id = job.id, company_id, "job posted");
        Ok(CreatedJob { id: job.id })
    }

    /// Jobs of one company, straight from the repository.
    pub async fn view_job_details(&self, company_id: u64) -> Result<Vec<Job>> {
        self.repo_call(
            "find_jobs_by_company",
            self.repo.find_jobs_by_company(company_id),
        )
        .await
    }

    pub async fn view_all_job_postings(&self) -> Result<Vec<Job>> {
        self.repo_call("list_jobs", self.repo.list_jobs()).await
    }

    /// Cache-aside read of a single job.
    ///
    /// A hit returns without touching the repository. A miss or any cache
    /// failure falls through to the repository and repopulates the cache
    /// best-effort. Concurrent misses for one id may both read the
    /// repository; there is no request coalescing.
    pub async fn view_job_details_by_id(&self, job_id: u64) -> Result<Job> {
        match self.cache_call(self.cache.fetch(job_id)).await {
            Ok(Some(job)) => {
                debug!(job_id, "job cache hit");
                return Ok(job);
            }
            Ok(None) => debug!(job_id, "job cache miss"),
            Err(e) => warn!(job_id, error = %e, "job cache read failed, using repository"),
        }

        let job = self
            .repo_call("find_job", self.repo.find_job(job_id))
            .await?;

        if let Err(e) = self
            .cache_call(self.cache.add(job_id, &job, self.cache_ttl))
            .await
        {
            warn!(job_id, error = %e, "job cache write failed");
        }
        Ok(job)
    }
}
