//! Hearing (audiencia) records and agenda date bucketing.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Kind of hearing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AudienciaTipo {
    Inicial,
    Pruebas,
    Alegatos,
    Sentencia,
    Conciliacion,
    Otra,
}

impl AudienciaTipo {
    /// Display label shown in the agenda legend.
    pub fn etiqueta(&self) -> &'static str {
        match self {
            AudienciaTipo::Inicial => "Audiencia Inicial",
            AudienciaTipo::Pruebas => "Desahogo de Pruebas",
            AudienciaTipo::Alegatos => "Alegatos",
            AudienciaTipo::Sentencia => "Sentencia",
            AudienciaTipo::Conciliacion => "Conciliación",
            AudienciaTipo::Otra => "Otra",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AudienciaTipo::Inicial => "inicial",
            AudienciaTipo::Pruebas => "pruebas",
            AudienciaTipo::Alegatos => "alegatos",
            AudienciaTipo::Sentencia => "sentencia",
            AudienciaTipo::Conciliacion => "conciliacion",
            AudienciaTipo::Otra => "otra",
        }
    }
}

impl Default for AudienciaTipo {
    fn default() -> Self {
        AudienciaTipo::Otra
    }
}

impl fmt::Display for AudienciaTipo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudienciaTipo {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inicial" => Ok(AudienciaTipo::Inicial),
            "pruebas" => Ok(AudienciaTipo::Pruebas),
            "alegatos" => Ok(AudienciaTipo::Alegatos),
            "sentencia" => Ok(AudienciaTipo::Sentencia),
            "conciliacion" => Ok(AudienciaTipo::Conciliacion),
            "otra" => Ok(AudienciaTipo::Otra),
            other => Err(ValidationError::InvalidValue {
                field: "tipo",
                message: format!("unknown hearing type '{other}'"),
            }),
        }
    }
}

/// Scheduling status of a hearing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AudienciaStatus {
    Programada,
    Celebrada,
    Cancelada,
}

impl AudienciaStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudienciaStatus::Programada => "programada",
            AudienciaStatus::Celebrada => "celebrada",
            AudienciaStatus::Cancelada => "cancelada",
        }
    }
}

impl Default for AudienciaStatus {
    fn default() -> Self {
        AudienciaStatus::Programada
    }
}

impl fmt::Display for AudienciaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudienciaStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "programada" => Ok(AudienciaStatus::Programada),
            "celebrada" => Ok(AudienciaStatus::Celebrada),
            "cancelada" => Ok(AudienciaStatus::Cancelada),
            other => Err(ValidationError::InvalidValue {
                field: "status",
                message: format!("unknown status '{other}'"),
            }),
        }
    }
}

/// A scheduled hearing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Audiencia {
    pub id: String,
    pub case_id: String,
    pub fecha: NaiveDate,
    /// "HH:mm", kept as text
    pub hora: String,
    pub tipo: AudienciaTipo,
    pub status: AudienciaStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Audiencia {
    /// Schedule a hearing at the default 09:00 slot.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] when `case_id` is empty.
    pub fn nueva(case_id: impl Into<String>, fecha: NaiveDate) -> Result<Self, ValidationError> {
        let case_id = case_id.into();
        if case_id.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "case_id" });
        }
        Ok(Audiencia {
            id: Uuid::new_v4().to_string(),
            case_id,
            fecha,
            hora: "09:00".to_string(),
            tipo: AudienciaTipo::default(),
            status: AudienciaStatus::default(),
            location: None,
            notes: None,
            created_at: Utc::now(),
        })
    }
}

/// Upcoming hearings view: the next window of scheduled hearings plus a
/// same-day count for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximasAudiencias {
    pub audiencias: Vec<Audiencia>,
    pub hoy: usize,
}

/// Scheduled hearings within `[hoy, hoy + dias]`, sorted by date then time.
pub fn proximas(audiencias: Vec<Audiencia>, hoy: NaiveDate, dias: i64) -> ProximasAudiencias {
    let limite = hoy + chrono::Duration::days(dias);
    let mut ventana: Vec<Audiencia> = audiencias
        .into_iter()
        .filter(|a| {
            a.status == AudienciaStatus::Programada && a.fecha >= hoy && a.fecha <= limite
        })
        .collect();
    ventana.sort_by(|a, b| a.fecha.cmp(&b.fecha).then_with(|| a.hora.cmp(&b.hora)));
    let hoy_count = ventana.iter().filter(|a| a.fecha == hoy).count();
    ProximasAudiencias {
        audiencias: ventana,
        hoy: hoy_count,
    }
}

/// Bucket hearings by calendar day, for the month-grid agenda.
pub fn agrupar_por_fecha(audiencias: Vec<Audiencia>) -> BTreeMap<NaiveDate, Vec<Audiencia>> {
    let mut agenda: BTreeMap<NaiveDate, Vec<Audiencia>> = BTreeMap::new();
    for a in audiencias {
        agenda.entry(a.fecha).or_default().push(a);
    }
    for dia in agenda.values_mut() {
        dia.sort_by(|a, b| a.hora.cmp(&b.hora));
    }
    agenda
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn audiencia(f: NaiveDate, hora: &str) -> Audiencia {
        let mut a = Audiencia::nueva("caso-1", f).unwrap();
        a.hora = hora.to_string();
        a
    }

    #[test]
    fn nueva_programada_a_las_nueve() {
        let a = Audiencia::nueva("caso-1", fecha(2026, 4, 1)).unwrap();
        assert_eq!(a.status, AudienciaStatus::Programada);
        assert_eq!(a.hora, "09:00");
        assert_eq!(a.tipo, AudienciaTipo::Otra);
    }

    #[test]
    fn proximas_ventana_de_siete_dias() {
        let hoy = fecha(2026, 3, 15);
        let lista = vec![
            audiencia(fecha(2026, 3, 14), "10:00"), // ayer: fuera
            audiencia(hoy, "12:00"),
            audiencia(hoy, "09:30"),
            audiencia(fecha(2026, 3, 20), "09:00"),
            audiencia(fecha(2026, 3, 23), "09:00"), // día 8: fuera
        ];
        let prox = proximas(lista, hoy, 7);
        assert_eq!(prox.audiencias.len(), 3);
        assert_eq!(prox.hoy, 2);
        // Sorted by date then time.
        assert_eq!(prox.audiencias[0].hora, "09:30");
        assert_eq!(prox.audiencias[1].hora, "12:00");
        assert_eq!(prox.audiencias[2].fecha, fecha(2026, 3, 20));
    }

    #[test]
    fn proximas_ignora_canceladas() {
        let hoy = fecha(2026, 3, 15);
        let mut cancelada = audiencia(hoy, "10:00");
        cancelada.status = AudienciaStatus::Cancelada;
        let prox = proximas(vec![cancelada], hoy, 7);
        assert!(prox.audiencias.is_empty());
        assert_eq!(prox.hoy, 0);
    }

    #[test]
    fn agrupar_por_dia() {
        let d1 = fecha(2026, 3, 10);
        let d2 = fecha(2026, 3, 12);
        let agenda = agrupar_por_fecha(vec![
            audiencia(d2, "13:00"),
            audiencia(d1, "11:00"),
            audiencia(d1, "09:00"),
        ]);
        assert_eq!(agenda.len(), 2);
        assert_eq!(agenda[&d1].len(), 2);
        assert_eq!(agenda[&d1][0].hora, "09:00");
        // BTreeMap iterates in chronological order.
        assert_eq!(agenda.keys().next(), Some(&d1));
    }

    #[test]
    fn tipo_etiquetas_y_parse() {
        assert_eq!(AudienciaTipo::Pruebas.etiqueta(), "Desahogo de Pruebas");
        assert_eq!(
            "conciliacion".parse::<AudienciaTipo>().unwrap(),
            AudienciaTipo::Conciliacion
        );
        assert!("apelacion".parse::<AudienciaTipo>().is_err());
    }
}
