//! Job application submitted for filtering against a posting's requirements.

use serde::{Deserialize, Serialize};

use crate::models::Job;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub name: String,
    pub job_id: u64,
    /// Days until the applicant can join
    pub notice_period: u32,
    pub expected_salary: u64,
    /// Years of experience
    pub experience: u32,
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

impl JobApplication {
    /// Checks the application against the posting it targets.
    ///
    /// List criteria need at least one overlap; comparisons are
    /// case-insensitive.
    pub fn matches(&self, job: &Job) -> bool {
        self.job_id == job.id
            && (job.min_notice_period..=job.max_notice_period).contains(&self.notice_period)
            && self.expected_salary <= job.budget
            && (job.min_experience..=job.max_experience).contains(&self.experience)
            && self.job_type.eq_ignore_ascii_case(&job.job_type)
            && overlaps(&self.locations, &job.locations)
            && overlaps(&self.tech_stack, &job.tech_stack)
            && overlaps(&self.qualifications, &job.qualifications)
            && overlaps(&self.shifts, &job.shifts)
    }
}

fn overlaps(offered: &[String], wanted: &[String]) -> bool {
    offered
        .iter()
        .any(|o| wanted.iter().any(|w| w.eq_ignore_ascii_case(o)))
}
