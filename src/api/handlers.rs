//! API Handlers
//!
//! Thin adapters between HTTP and the orchestration service.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::auth::TokenClaims;
use crate::error::{AppError, Result};
use crate::models::{
    Company, CreatedJob, ForgotPassword, HealthResponse, Job, JobApplication, LoginResponse,
    MessageResponse, NewCompany, NewJob, NewUser, User, UserLogin,
};
use crate::service::Service;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Service,
}

impl AppState {
    pub fn new(service: Service) -> Self {
        Self { service }
    }
}

fn require_poster(claims: &TokenClaims) -> Result<()> {
    if claims.role.can_post() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "only employers and admins can do this".to_string(),
        ))
    }
}

/// Handler for POST /api/register
pub async fn register_handler(
    State(state): State<AppState>,
    Json(req): Json<NewUser>,
) -> Result<(StatusCode, Json<User>)> {
    let user = state.service.user_signup(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for POST /api/login
pub async fn login_handler(
    State(state): State<AppState>,
    Json(req): Json<UserLogin>,
) -> Result<Json<LoginResponse>> {
    let token = state.service.user_login(req).await?;
    Ok(Json(LoginResponse::new(token)))
}

/// Handler for POST /api/forgot-password
pub async fn forgot_password_handler(
    State(state): State<AppState>,
    Json(req): Json<ForgotPassword>,
) -> Result<Json<MessageResponse>> {
    state.service.verify_user(req).await?;
    Ok(Json(MessageResponse::new("user verified")))
}

/// Handler for POST /api/companies
pub async fn create_company_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Json(req): Json<NewCompany>,
) -> Result<(StatusCode, Json<Company>)> {
    require_poster(&claims)?;
    let company = state.service.add_company_details(req).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

/// Handler for GET /api/companies
pub async fn list_companies_handler(State(state): State<AppState>) -> Result<Json<Vec<Company>>> {
    Ok(Json(state.service.view_all_companies().await?))
}

/// Handler for GET /api/companies/:id
pub async fn get_company_handler(
    State(state): State<AppState>,
    Path(company_id): Path<u64>,
) -> Result<Json<Company>> {
    Ok(Json(state.service.view_company_details(company_id).await?))
}

/// Handler for POST /api/companies/:id/jobs
pub async fn create_job_handler(
    State(state): State<AppState>,
    Path(company_id): Path<u64>,
    Extension(claims): Extension<TokenClaims>,
    Json(req): Json<NewJob>,
) -> Result<(StatusCode, Json<CreatedJob>)> {
    require_poster(&claims)?;
    let created = state.service.add_job_details(company_id, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for GET /api/companies/:id/jobs
pub async fn list_company_jobs_handler(
    State(state): State<AppState>,
    Path(company_id): Path<u64>,
) -> Result<Json<Vec<Job>>> {
    Ok(Json(state.service.view_job_details(company_id).await?))
}

/// Handler for GET /api/jobs
pub async fn list_jobs_handler(State(state): State<AppState>) -> Result<Json<Vec<Job>>> {
    Ok(Json(state.service.view_all_job_postings().await?))
}

/// Handler for GET /api/jobs/:id
pub async fn get_job_handler(
    State(state): State<AppState>,
    Path(job_id): Path<u64>,
) -> Result<Json<Job>> {
    Ok(Json(state.service.view_job_details_by_id(job_id).await?))
}

/// Handler for POST /api/applications
pub async fn filter_applications_handler(
    State(state): State<AppState>,
    Json(req): Json<Vec<JobApplication>>,
) -> Result<Json<Vec<JobApplication>>> {
    Ok(Json(state.service.filter_applications(req).await?))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
