//! Company operations. Repository only; companies are not cached.

use tracing::info;

use super::Service;
use crate::error::{AppError, Result};
use crate::models::{Company, NewCompany};

impl Service {
    pub async fn add_company_details(&self, data: NewCompany) -> Result<Company> {
        if let Some(msg) = data.validate() {
            return Err(AppError::InvalidRequest(msg));
        }
        let company = self
            .repo_call("create_company", self.repo.create_company(data))
            .await?;
        info!(company_id = company.id, "company added");
        Ok(company)
    }

    pub async fn view_company_details(&self, company_id: u64) -> Result<Company> {
        self.repo_call("find_company", self.repo.find_company(company_id))
            .await
    }

    pub async fn view_all_companies(&self) -> Result<Vec<Company>> {
        self.repo_call("list_companies", self.repo.list_companies())
            .await
    }
}
