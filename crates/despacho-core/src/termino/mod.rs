//! Término (procedural deadline) types and lifecycle.
//!
//! A término is created `pendiente` and moves to `cumplido` through an
//! explicit mark-complete action; there is no transition back. Deletion is
//! unconditional. Urgency is not part of the record: it is derived at read
//! time by [`urgencia`] from the due date and the state.

pub mod stats;
pub mod urgencia;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates;
use crate::error::ValidationError;

pub use stats::{filtrar_y_ordenar, TerminoFilter, TerminoStats};
pub use urgencia::{Urgencia, UrgenciaInfo};

/// Classification of a término. Informational only: it never changes the
/// lifecycle or the urgency thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TerminoTipo {
    /// Fatal procedural deadline; missing it forfeits the right.
    Fatal,
    /// Ordinary procedural deadline.
    Procesal,
    /// Deadline agreed between the parties.
    Convencional,
}

impl TerminoTipo {
    /// Display label with its badge glyph.
    pub fn etiqueta(&self) -> &'static str {
        match self {
            TerminoTipo::Fatal => "⚠️ Fatal",
            TerminoTipo::Procesal => "⏰ Procesal",
            TerminoTipo::Convencional => "📅 Convencional",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TerminoTipo::Fatal => "fatal",
            TerminoTipo::Procesal => "procesal",
            TerminoTipo::Convencional => "convencional",
        }
    }
}

impl Default for TerminoTipo {
    fn default() -> Self {
        TerminoTipo::Procesal
    }
}

impl fmt::Display for TerminoTipo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerminoTipo {
    type Err = ValidationError;

    /// Unknown kinds are rejected at the boundary instead of falling back
    /// to a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fatal" => Ok(TerminoTipo::Fatal),
            "procesal" => Ok(TerminoTipo::Procesal),
            "convencional" => Ok(TerminoTipo::Convencional),
            other => Err(ValidationError::InvalidValue {
                field: "tipo",
                message: format!("unknown tipo '{other}'"),
            }),
        }
    }
}

/// Lifecycle state of a término.
///
/// ```text
/// PENDIENTE ──marcar_cumplido──> CUMPLIDO
/// ```
///
/// `Cumplido` is terminal; nothing reverts it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TerminoEstado {
    /// Awaiting fulfilment (initial state).
    Pendiente,
    /// Fulfilled (terminal state).
    Cumplido,
}

impl TerminoEstado {
    /// Check if a transition is valid.
    pub fn can_transition_to(&self, to: &TerminoEstado) -> bool {
        match self {
            TerminoEstado::Pendiente => matches!(to, TerminoEstado::Cumplido),
            TerminoEstado::Cumplido => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TerminoEstado::Pendiente => "pendiente",
            TerminoEstado::Cumplido => "cumplido",
        }
    }
}

impl Default for TerminoEstado {
    fn default() -> Self {
        TerminoEstado::Pendiente
    }
}

impl fmt::Display for TerminoEstado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerminoEstado {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pendiente" => Ok(TerminoEstado::Pendiente),
            "cumplido" => Ok(TerminoEstado::Cumplido),
            other => Err(ValidationError::InvalidValue {
                field: "estado",
                message: format!("unknown estado '{other}'"),
            }),
        }
    }
}

/// A procedural deadline tied to a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Termino {
    /// Unique identifier
    pub id: String,
    /// Owning case id (required at creation)
    pub case_id: String,
    /// Short label
    pub titulo: String,
    /// Optional free text
    pub descripcion: Option<String>,
    /// Due date; date-only, the time of day never participates in urgency
    pub fecha_vencimiento: NaiveDate,
    /// Classification, informational only
    pub tipo: TerminoTipo,
    /// Lead days for alerting. Stored per término but the urgency
    /// thresholds do not consume it.
    pub dias_alerta: i64,
    /// Whether reminders are wanted for this término
    pub recordatorio: bool,
    /// Lifecycle state
    pub estado: TerminoEstado,
    /// Optional free text
    pub notas: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
    /// When the término was fulfilled (null while pendiente)
    pub cumplido_at: Option<DateTime<Utc>>,
}

impl Termino {
    /// Create a término in the `pendiente` state.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] when `titulo` or `case_id` is empty.
    pub fn nuevo(
        titulo: impl Into<String>,
        case_id: impl Into<String>,
        fecha_vencimiento: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let titulo = titulo.into();
        let case_id = case_id.into();
        if titulo.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "titulo" });
        }
        if case_id.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "case_id" });
        }
        let now = Utc::now();
        Ok(Termino {
            id: Uuid::new_v4().to_string(),
            case_id,
            titulo,
            descripcion: None,
            fecha_vencimiento,
            tipo: TerminoTipo::default(),
            dias_alerta: 3,
            recordatorio: true,
            estado: TerminoEstado::default(),
            notas: None,
            created_at: now,
            updated_at: now,
            cumplido_at: None,
        })
    }

    /// Days between `hoy` and the due date. Negative = past due.
    pub fn dias_restantes(&self, hoy: NaiveDate) -> i64 {
        dates::dias_restantes(self.fecha_vencimiento, hoy)
    }

    /// Pendiente and past due.
    pub fn esta_vencido(&self, hoy: NaiveDate) -> bool {
        self.estado == TerminoEstado::Pendiente && self.dias_restantes(hoy) < 0
    }

    /// Derived urgency tier and display label for `hoy`.
    pub fn urgencia(&self, hoy: NaiveDate) -> UrgenciaInfo {
        UrgenciaInfo::calcular(self.fecha_vencimiento, self.estado, hoy)
    }

    /// Transition pendiente → cumplido.
    ///
    /// Returns `true` when the transition happened, `false` when the
    /// término was already cumplido. Calling it twice never reverts the
    /// terminal state.
    pub fn marcar_cumplido(&mut self) -> bool {
        if self.estado == TerminoEstado::Cumplido {
            return false;
        }
        let now = Utc::now();
        self.estado = TerminoEstado::Cumplido;
        self.cumplido_at = Some(now);
        self.updated_at = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn nuevo_estado_inicial() {
        let t = Termino::nuevo("Contestar demanda", "caso-1", fecha(2026, 9, 1)).unwrap();
        assert_eq!(t.estado, TerminoEstado::Pendiente);
        assert_eq!(t.tipo, TerminoTipo::Procesal);
        assert_eq!(t.dias_alerta, 3);
        assert!(t.recordatorio);
        assert!(t.cumplido_at.is_none());
    }

    #[test]
    fn nuevo_requiere_titulo() {
        let err = Termino::nuevo("   ", "caso-1", fecha(2026, 9, 1)).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "titulo" });
    }

    #[test]
    fn nuevo_requiere_caso() {
        let err = Termino::nuevo("Contestar demanda", "", fecha(2026, 9, 1)).unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "case_id" });
    }

    #[test]
    fn marcar_cumplido_transiciona() {
        let mut t = Termino::nuevo("Apelar", "caso-1", fecha(2026, 9, 1)).unwrap();
        assert!(t.marcar_cumplido());
        assert_eq!(t.estado, TerminoEstado::Cumplido);
        assert!(t.cumplido_at.is_some());
    }

    #[test]
    fn marcar_cumplido_es_idempotente() {
        let mut t = Termino::nuevo("Apelar", "caso-1", fecha(2026, 9, 1)).unwrap();
        assert!(t.marcar_cumplido());
        let primera_vez = t.cumplido_at;
        // Second application is a no-op; it never reverts.
        assert!(!t.marcar_cumplido());
        assert_eq!(t.estado, TerminoEstado::Cumplido);
        assert_eq!(t.cumplido_at, primera_vez);
    }

    #[test]
    fn estados_transiciones_validas() {
        assert!(TerminoEstado::Pendiente.can_transition_to(&TerminoEstado::Cumplido));
        assert!(!TerminoEstado::Cumplido.can_transition_to(&TerminoEstado::Pendiente));
        assert!(!TerminoEstado::Cumplido.can_transition_to(&TerminoEstado::Cumplido));
    }

    #[test]
    fn esta_vencido_solo_pendiente() {
        let hoy = fecha(2026, 3, 15);
        let mut t = Termino::nuevo("Desahogo", "caso-1", fecha(2026, 3, 10)).unwrap();
        assert!(t.esta_vencido(hoy));
        t.marcar_cumplido();
        assert!(!t.esta_vencido(hoy));
    }

    #[test]
    fn tipo_parse_rechaza_desconocidos() {
        assert_eq!("fatal".parse::<TerminoTipo>().unwrap(), TerminoTipo::Fatal);
        assert_eq!(
            "convencional".parse::<TerminoTipo>().unwrap(),
            TerminoTipo::Convencional
        );
        assert!("urgente".parse::<TerminoTipo>().is_err());
        assert!("".parse::<TerminoTipo>().is_err());
    }

    #[test]
    fn estado_parse() {
        assert_eq!(
            "pendiente".parse::<TerminoEstado>().unwrap(),
            TerminoEstado::Pendiente
        );
        assert!("abierto".parse::<TerminoEstado>().is_err());
    }

    #[test]
    fn tipo_etiquetas() {
        assert_eq!(TerminoTipo::Fatal.etiqueta(), "⚠️ Fatal");
        assert_eq!(TerminoTipo::Procesal.etiqueta(), "⏰ Procesal");
        assert_eq!(TerminoTipo::Convencional.etiqueta(), "📅 Convencional");
    }

    #[test]
    fn serializacion() {
        let t = Termino::nuevo("Contestar demanda", "caso-1", fecha(2026, 9, 1)).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"estado\":\"pendiente\""));
        assert!(json.contains("\"tipo\":\"procesal\""));
        let decoded: Termino = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.id, t.id);
        assert_eq!(decoded.fecha_vencimiento, t.fecha_vencimiento);
    }
}
