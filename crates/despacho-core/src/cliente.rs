//! Client records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A client of the practice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cliente {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Mexican tax id
    pub rfc: Option<String>,
    /// Mexican personal id
    pub curp: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cliente {
    /// Create a client.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] when `name` is empty.
    pub fn nuevo(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "name" });
        }
        let now = Utc::now();
        Ok(Cliente {
            id: Uuid::new_v4().to_string(),
            name,
            phone: None,
            email: None,
            rfc: None,
            curp: None,
            address: None,
            notes: None,
            created_at: now,
            updated_at: now,
        })
    }
}
