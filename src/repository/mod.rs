//! Repository Module
//!
//! Persistence contract for users, companies, jobs and applications. The
//! service only sees the `Repository` trait; `InMemoryRepository` is the
//! implementation wired in by the binary and the tests.

mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Company, Job, JobApplication, NewCompany, NewJob, NewUser, User};

pub use memory::InMemoryRepository;

// == Repo Error Enum ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    #[error("{0} not found")]
    NotFound(String),

    /// Uniqueness violation
    #[error("{0}")]
    Conflict(String),

    /// Backend failure; there is no fallback data source
    #[error("store failure: {0}")]
    Store(String),
}

pub type RepoResult<T> = std::result::Result<T, RepoError>;

/// Persistence operations consumed by the orchestration service.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Persists a user whose password has already been hashed.
    /// `Conflict` if the email is taken.
    async fn create_user(&self, user: NewUser, password_hash: String) -> RepoResult<User>;

    async fn find_user_by_email(&self, email: &str) -> RepoResult<User>;

    async fn create_company(&self, company: NewCompany) -> RepoResult<Company>;

    async fn find_company(&self, id: u64) -> RepoResult<Company>;

    async fn list_companies(&self) -> RepoResult<Vec<Company>>;

    /// `NotFound` if the company does not exist.
    async fn create_job(&self, company_id: u64, job: NewJob) -> RepoResult<Job>;

    async fn find_job(&self, id: u64) -> RepoResult<Job>;

    async fn list_jobs(&self) -> RepoResult<Vec<Job>>;

    async fn find_jobs_by_company(&self, company_id: u64) -> RepoResult<Vec<Job>>;

    /// Drops applications that reference a job the store does not know,
    /// preserving input order.
    async fn filter_applications(
        &self,
        applications: Vec<JobApplication>,
    ) -> RepoResult<Vec<JobApplication>>;
}
