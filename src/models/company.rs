//! Company model and creation request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: u64,
    pub name: String,
    pub location: String,
    pub field: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/companies`
#[derive(Debug, Clone, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub field: String,
}

impl NewCompany {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Company name cannot be empty".to_string());
        }
        if self.location.trim().is_empty() {
            return Some("Company location cannot be empty".to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_company_validate() {
        let ok = NewCompany {
            name: "Acme".to_string(),
            location: "Pune".to_string(),
            field: String::new(),
        };
        assert!(ok.validate().is_none());

        let blank = NewCompany {
            name: "  ".to_string(),
            ..ok
        };
        assert!(blank.validate().is_some());
    }
}
