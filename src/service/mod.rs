//! Orchestration Service
//!
//! Composes token auth, the job cache and the repository into the
//! user-facing operations. Dependencies are injected as trait objects so
//! tests can substitute in-memory fakes.
//!
//! Every cache and repository call runs under `io_timeout`. Cache failures
//! (errors or timeouts) are logged and treated as misses; repository
//! failures are surfaced.

mod applications;
mod companies;
mod jobs;
mod users;


use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::{CredentialHasher, TokenAuth};
use crate::cache::{CacheError, JobCache, DEFAULT_CACHE_TTL};
use crate::error::{AppError, Result};
use crate::repository::{RepoResult, Repository};

/// Bound applied to each cache or repository call when none is configured
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(2);

/// Cheap to clone: all collaborators are shared handles.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn Repository>,
    auth: Arc<TokenAuth>,
    cache: Arc<dyn JobCache>,
    hasher: CredentialHasher,
    cache_ttl: Duration,
    io_timeout: Duration,
}

impl Service {
    // == Constructor ==
    pub fn new(repo: Arc<dyn Repository>, auth: Arc<TokenAuth>, cache: Arc<dyn JobCache>) -> Self {
        Self {
            repo,
            auth,
            cache,
            hasher: CredentialHasher::default(),
            cache_ttl: DEFAULT_CACHE_TTL,
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }

    pub fn with_hasher(mut self, hasher: CredentialHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Lifetime of job entries written on a cache miss.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = timeout;
        self
    }

    pub fn auth(&self) -> &TokenAuth {
        &self.auth
    }

    // == Bounded I/O ==
    async fn repo_call<T>(
        &self,
        op: &'static str,
        call: impl Future<Output = RepoResult<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.io_timeout, call).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => Err(AppError::Store(format!(
                "{op} timed out after {:?}",
                self.io_timeout
            ))),
        }
    }

    async fn cache_call<T>(
        &self,
        call: impl Future<Output = std::result::Result<T, CacheError>>,
    ) -> std::result::Result<T, CacheError> {
        tokio::time::timeout(self.io_timeout, call)
            .await
            .unwrap_or_else(|_| Err(CacheError::Timeout(self.io_timeout)))
    }
}
