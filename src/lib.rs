//! Job Portal - signup/login, companies, job postings and application
//! filtering over HTTP.
//!
//! Sessions are RSA-signed tokens; single-job reads go through a
//! cache-aside layer over the repository.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::Service;
pub use tasks::spawn_cleanup_task;
