//! API Routes
//!
//! Configures the Axum router with public and token-protected endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_company_handler, create_job_handler, filter_applications_handler,
    forgot_password_handler, get_company_handler, get_job_handler, health_handler,
    list_companies_handler, list_company_jobs_handler, list_jobs_handler, login_handler,
    register_handler, AppState,
};
use super::middleware::require_auth;

/// Creates the main router.
///
/// Everything except health, register, login and forgot-password sits
/// behind `require_auth`.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .route(
            "/api/companies",
            post(create_company_handler).get(list_companies_handler),
        )
        .route("/api/companies/:id", get(get_company_handler))
        .route(
            "/api/companies/:id/jobs",
            post(create_job_handler).get(list_company_jobs_handler),
        )
        .route("/api/jobs", get(list_jobs_handler))
        .route("/api/jobs/:id", get(get_job_handler))
        .route("/api/applications", post(filter_applications_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/register", post(register_handler))
        .route("/api/login", post(login_handler))
        .route("/api/forgot-password", post(forgot_password_handler))
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
