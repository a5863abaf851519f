//! Domain models and request/response DTOs for the job portal API
//!
//! Entities (`User`, `Company`, `Job`) are owned by the repository; the
//! serialized `Job` is also the payload stored in the job cache.

pub mod application;
pub mod company;
pub mod job;
pub mod responses;
pub mod user;

// Re-export commonly used types
pub use application::JobApplication;
pub use company::{Company, NewCompany};
pub use job::{CreatedJob, Job, NewJob};
pub use responses::{ErrorResponse, HealthResponse, LoginResponse, MessageResponse};
pub use user::{ForgotPassword, NewUser, Role, User, UserLogin};
