//! User (principal) model and the signup/login request bodies.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Authorization role carried in the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Applicant,
    Employer,
    Admin,
}

impl Role {
    /// Employers and admins may create companies and post jobs.
    pub fn can_post(&self) -> bool {
        matches!(self, Role::Employer | Role::Admin)
    }
}

/// A registered user. Created at signup, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    /// Unique login identifier
    pub email: String,
    /// Argon2 PHC string, never sent back to clients
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub dob: NaiveDate,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/register`
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub dob: NaiveDate,
    #[serde(default)]
    pub role: Role,
}

impl NewUser {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if !self.email.contains('@') {
            return Some("Email address is not valid".to_string());
        }
        if self.password.is_empty() {
            return Some("Password cannot be empty".to_string());
        }
        None
    }
}

/// Request body for `POST /api/login`
#[derive(Debug, Clone, Deserialize)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /api/forgot-password`
#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPassword {
    pub email: String,
    pub dob: NaiveDate,
}
