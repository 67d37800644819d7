//! Quick notes with an optional reminder date.
//!
//! Reminder labels share the day-offset rule in [`crate::dates`]; only the
//! wording differs from término urgency labels.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates;
use crate::error::ValidationError;

/// Note priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotaPrioridad {
    Alta,
    Media,
    Baja,
}

impl NotaPrioridad {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotaPrioridad::Alta => "alta",
            NotaPrioridad::Media => "media",
            NotaPrioridad::Baja => "baja",
        }
    }
}

impl Default for NotaPrioridad {
    fn default() -> Self {
        NotaPrioridad::Media
    }
}

impl fmt::Display for NotaPrioridad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotaPrioridad {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alta" => Ok(NotaPrioridad::Alta),
            "media" => Ok(NotaPrioridad::Media),
            "baja" => Ok(NotaPrioridad::Baja),
            other => Err(ValidationError::InvalidValue {
                field: "priority",
                message: format!("unknown priority '{other}'"),
            }),
        }
    }
}

/// Note status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotaStatus {
    Pendiente,
    Completada,
}

impl NotaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotaStatus::Pendiente => "pendiente",
            NotaStatus::Completada => "completada",
        }
    }
}

impl Default for NotaStatus {
    fn default() -> Self {
        NotaStatus::Pendiente
    }
}

impl fmt::Display for NotaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotaStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(NotaStatus::Pendiente),
            "completada" => Ok(NotaStatus::Completada),
            other => Err(ValidationError::InvalidValue {
                field: "status",
                message: format!("unknown status '{other}'"),
            }),
        }
    }
}

/// A quick note, optionally tied to a case and a reminder date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nota {
    pub id: String,
    pub case_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    /// Reminder date, date-only like término due dates
    pub due_date: Option<NaiveDate>,
    pub priority: NotaPrioridad,
    pub status: NotaStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Nota {
    /// Create a pending note.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] when `title` is empty.
    pub fn nueva(title: impl Into<String>) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "title" });
        }
        let now = Utc::now();
        Ok(Nota {
            id: Uuid::new_v4().to_string(),
            case_id: None,
            title,
            description: None,
            due_date: None,
            priority: NotaPrioridad::default(),
            status: NotaStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Mark the note completed. One-way, like término fulfilment.
    pub fn completar(&mut self) -> bool {
        if self.status == NotaStatus::Completada {
            return false;
        }
        self.status = NotaStatus::Completada;
        self.updated_at = Utc::now();
        true
    }

    /// Reminder label for `hoy`, `None` when the note has no reminder.
    pub fn recordatorio(&self, hoy: NaiveDate) -> Option<String> {
        let fecha = self.due_date?;
        Some(etiqueta_recordatorio(fecha, hoy))
    }
}

/// "Hace N día(s)" / "Hoy" / "Mañana" / short date.
pub fn etiqueta_recordatorio(fecha: NaiveDate, hoy: NaiveDate) -> String {
    let dias = dates::dias_restantes(fecha, hoy);
    if dias < 0 {
        format!("Hace {} día(s)", dias.abs())
    } else if dias == 0 {
        "Hoy".to_string()
    } else if dias == 1 {
        "Mañana".to_string()
    } else {
        dates::formato_corto(fecha)
    }
}
