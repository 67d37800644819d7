//! Case (expediente) records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Branch of law a case belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CasoTipo {
    Civil,
    Penal,
    Familiar,
    Mercantil,
    Laboral,
    Amparo,
    Administrativo,
}

impl CasoTipo {
    pub fn as_str(&self) -> &'static str {
        match self {
            CasoTipo::Civil => "civil",
            CasoTipo::Penal => "penal",
            CasoTipo::Familiar => "familiar",
            CasoTipo::Mercantil => "mercantil",
            CasoTipo::Laboral => "laboral",
            CasoTipo::Amparo => "amparo",
            CasoTipo::Administrativo => "administrativo",
        }
    }
}

impl Default for CasoTipo {
    fn default() -> Self {
        CasoTipo::Civil
    }
}

impl fmt::Display for CasoTipo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CasoTipo {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "civil" => Ok(CasoTipo::Civil),
            "penal" => Ok(CasoTipo::Penal),
            "familiar" => Ok(CasoTipo::Familiar),
            "mercantil" => Ok(CasoTipo::Mercantil),
            "laboral" => Ok(CasoTipo::Laboral),
            "amparo" => Ok(CasoTipo::Amparo),
            "administrativo" => Ok(CasoTipo::Administrativo),
            other => Err(ValidationError::InvalidValue {
                field: "case_type",
                message: format!("unknown case type '{other}'"),
            }),
        }
    }
}

/// Case status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CasoStatus {
    Activo,
    Suspendido,
    Cerrado,
}

impl CasoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CasoStatus::Activo => "activo",
            CasoStatus::Suspendido => "suspendido",
            CasoStatus::Cerrado => "cerrado",
        }
    }
}

impl Default for CasoStatus {
    fn default() -> Self {
        CasoStatus::Activo
    }
}

impl fmt::Display for CasoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CasoStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "activo" => Ok(CasoStatus::Activo),
            "suspendido" => Ok(CasoStatus::Suspendido),
            "cerrado" => Ok(CasoStatus::Cerrado),
            other => Err(ValidationError::InvalidValue {
                field: "status",
                message: format!("unknown status '{other}'"),
            }),
        }
    }
}

/// A case file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caso {
    pub id: String,
    pub client_id: String,
    /// Court docket number, e.g. "123/2026"
    pub case_number: Option<String>,
    /// Subject matter of the case
    pub matter: String,
    pub case_type: CasoTipo,
    pub status: CasoStatus,
    pub court: Option<String>,
    pub judge: Option<String>,
    pub opponent: Option<String>,
    pub opponent_lawyer: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Caso {
    /// Create an active case.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] when `matter` or `client_id` is empty.
    pub fn nuevo(
        matter: impl Into<String>,
        client_id: impl Into<String>,
        start_date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let matter = matter.into();
        let client_id = client_id.into();
        if matter.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "matter" });
        }
        if client_id.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "client_id" });
        }
        let now = Utc::now();
        Ok(Caso {
            id: Uuid::new_v4().to_string(),
            client_id,
            case_number: None,
            matter,
            case_type: CasoTipo::default(),
            status: CasoStatus::default(),
            court: None,
            judge: None,
            opponent: None,
            opponent_lawyer: None,
            description: None,
            notes: None,
            start_date,
            created_at: now,
            updated_at: now,
        })
    }

    /// Close the case. No state guard: closing twice stays closed.
    pub fn cerrar(&mut self) {
        self.status = CasoStatus::Cerrado;
        self.updated_at = Utc::now();
    }
}
