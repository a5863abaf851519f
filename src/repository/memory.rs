//! In-memory `Repository` over tokio-locked maps.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{Company, Job, JobApplication, NewCompany, NewJob, NewUser, User};
use crate::repository::{RepoError, RepoResult, Repository};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<u64, User>,
    /// Lowercased email -> user id
    emails: HashMap<String, u64>,
    companies: BTreeMap<u64, Company>,
    jobs: BTreeMap<u64, Job>,
    next_user_id: u64,
    next_company_id: u64,
    next_job_id: u64,
}

/// Process-local store. Ids start at 1 and are never reused; listings come
/// back in id order.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn create_user(&self, user: NewUser, password_hash: String) -> RepoResult<User> {
        let mut tables = self.tables.write().await;
        let email_key = user.email.to_lowercase();
        if tables.emails.contains_key(&email_key) {
            return Err(RepoError::Conflict(format!(
                "email {} is already registered",
                user.email
            )));
        }

        let id = next_id(&mut tables.next_user_id);
        let created = User {
            id,
            name: user.name,
            email: user.email,
            password_hash,
            dob: user.dob,
            role: user.role,
            created_at: Utc::now(),
        };
        tables.emails.insert(email_key, id);
        tables.users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> RepoResult<User> {
        let tables = self.tables.read().await;
        tables
            .emails
            .get(&email.to_lowercase())
            .and_then(|id| tables.users.get(id))
            .cloned()
            .ok_or_else(|| RepoError::NotFound(format!("user {email}")))
    }

    async fn create_company(&self, company: NewCompany) -> RepoResult<Company> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.next_company_id);
        let created = Company {
            id,
            name: company.name,
            location: company.location,
            field: company.field,
            created_at: Utc::now(),
        };
        tables.companies.insert(id, created.clone());
        Ok(created)
    }

    async fn find_company(&self, id: u64) -> RepoResult<Company> {
        self.tables
            .read()
            .await
            .companies
            .get(&id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(format!("company {id}")))
    }

    async fn list_companies(&self) -> RepoResult<Vec<Company>> {
        Ok(self.tables.read().await.companies.values().cloned().collect())
    }

    async fn create_job(&self, company_id: u64, job: NewJob) -> RepoResult<Job> {
        let mut tables = self.tables.write().await;
        if !tables.companies.contains_key(&company_id) {
            return Err(RepoError::NotFound(format!("company {company_id}")));
        }
        let id = next_id(&mut tables.next_job_id);
        let created = job.into_job(id, company_id);
        tables.jobs.insert(id, created.clone());
        Ok(created)
    }

    async fn find_job(&self, id: u64) -> RepoResult<Job> {
        self.tables
            .read()
            .await
            .jobs
            .get(&id)
            .cloned()
            .ok_or_else(|| RepoError::NotFound(format!("job {id}")))
    }

    async fn list_jobs(&self) -> RepoResult<Vec<Job>> {
        Ok(self.tables.read().await.jobs.values().cloned().collect())
    }

    async fn find_jobs_by_company(&self, company_id: u64) -> RepoResult<Vec<Job>> {
        let tables = self.tables.read().await;
        if !tables.companies.contains_key(&company_id) {
            return Err(RepoError::NotFound(format!("company {company_id}")));
        }
        Ok(tables
            .jobs
            .values()
            .filter(|job| job.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn filter_applications(
        &self,
        applications: Vec<JobApplication>,
    ) -> RepoResult<Vec<JobApplication>> {
        let tables = self.tables.read().await;
        Ok(applications
            .into_iter()
            .filter(|app| tables.jobs.contains_key(&app.job_id))
            .collect())
    }
}
