//! Job posting model.
//!
//! `Job` is the cache payload: the job cache stores its JSON form keyed by
//! the decimal job id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job posting owned by a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub company_id: u64,
    pub title: String,
    pub description: String,
    /// Notice period range in days
    pub min_notice_period: u32,
    pub max_notice_period: u32,
    /// Maximum salary offered
    pub budget: u64,
    /// Experience range in years
    pub min_experience: u32,
    pub max_experience: u32,
    pub locations: Vec<String>,
    pub tech_stack: Vec<String>,
    pub qualifications: Vec<String>,
    pub shifts: Vec<String>,
    pub job_type: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/companies/:id/jobs`
#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub min_notice_period: u32,
    pub max_notice_period: u32,
    pub budget: u64,
    pub min_experience: u32,
    pub max_experience: u32,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub shifts: Vec<String>,
    pub job_type: String,
}

impl NewJob {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("Job title cannot be empty".to_string());
        }
        if self.min_notice_period > self.max_notice_period {
            return Some("min_notice_period exceeds max_notice_period".to_string());
        }
        if self.min_experience > self.max_experience {
            return Some("min_experience exceeds max_experience".to_string());
        }
        if self.job_type.trim().is_empty() {
            return Some("Job type cannot be empty".to_string());
        }
        None
    }

    /// Builds the persisted entity once the repository has assigned an id.
    pub fn into_job(self, id: u64, company_id: u64) -> Job {
        Job {
            id,
            company_id,
            title: self.title,
            description: self.description,
            min_notice_period: self.min_notice_period,
            max_notice_period: self.max_notice_period,
            budget: self.budget,
            min_experience: self.min_experience,
            max_experience: self.max_experience,
            locations: self.locations,
            tech_stack: self.tech_stack,
            qualifications: self.qualifications,
            shifts: self.shifts,
            job_type: self.job_type,
            created_at: Utc::now(),
        }
    }
}

/// Response body for a created job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedJob {
    pub id: u64,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn new_job(title: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            description: "Build and run backend services".to_string(),
            min_notice_period: 0,
            max_notice_period: 60,
            budget: 120_000,
            min_experience: 2,
            max_experience: 6,
            locations: vec!["Bengaluru".to_string(), "Remote".to_string()],
            tech_stack: vec!["rust".to_string(), "postgres".to_string()],
            qualifications: vec!["B.Tech".to_string()],
            shifts: vec!["day".to_string()],
            job_type: "full-time".to_string(),
        }
    }
}
