//! API Module
//!
//! HTTP handlers and routing for the job portal REST API.
//!
//! # Endpoints
//! - `GET /health` - Health check
//! - `POST /api/register`, `POST /api/login`, `POST /api/forgot-password`
//! - Bearer-authenticated: companies, jobs and application filtering under
//!   `/api/companies`, `/api/jobs` and `/api/applications`

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
