//! Signup, login and identity checks.

use tracing::{info, warn};

use super::Service;
use crate::error::{AppError, Result};
use crate::models::{ForgotPassword, NewUser, User, UserLogin};

const BAD_CREDENTIALS: &str = "invalid email or password";

impl Service {
    /// Registers a user. No token is issued at signup.
    pub async fn user_signup(&self, data: NewUser) -> Result<User> {
        if let Some(msg) = data.validate() {
            return Err(AppError::InvalidRequest(msg));
        }

        match self
            .repo_call("find_user_by_email", self.repo.find_user_by_email(&data.email))
            .await
        {
            Ok(_) => {
                return Err(AppError::Conflict(format!(
                    "email {} is already registered",
                    data.email
                )))
            }
            Err(AppError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        let password_hash = self.hash_password(data.password.clone()).await?;
        // The repository re-checks uniqueness, closing the race between
        // two concurrent signups for the same email
        let user = self
            .repo_call("create_user", self.repo.create_user(data, password_hash))
            .await?;

        info!(user_id = user.id, role = ?user.role, "user registered");
        Ok(user)
    }

    /// Checks credentials and returns a signed session token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn user_login(&self, data: UserLogin) -> Result<String> {
        let user = match self
            .repo_call("find_user_by_email", self.repo.find_user_by_email(&data.email))
            .await
        {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()))
            }
            Err(e) => return Err(e),
        };

        if !self
            .verify_password(data.password, user.password_hash.clone())
            .await?
        {
            warn!(user_id = user.id, "login rejected: password mismatch");
            return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()));
        }

        let token = self.auth.issue(&user)?;
        info!(user_id = user.id, "session token issued");
        Ok(token)
    }

    /// Confirms an email/date-of-birth pair before a password reset.
    pub async fn verify_user(&self, data: ForgotPassword) -> Result<()> {
        let user = match self
            .repo_call("find_user_by_email", self.repo.find_user_by_email(&data.email))
            .await
        {
            Ok(user) => user,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::Unauthorized("user could not be verified".to_string()))
            }
            Err(e) => return Err(e),
        };

        if user.dob != data.dob {
            return Err(AppError::Unauthorized(
                "user could not be verified".to_string(),
            ));
        }
        Ok(())
    }

    // Argon2 is CPU-bound; keep it off the async workers
    async fn hash_password(&self, password: String) -> Result<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .map_err(AppError::from)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .map_err(AppError::from)
    }
}
