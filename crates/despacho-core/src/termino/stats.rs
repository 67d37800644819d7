//! Aggregate counters and list filters over a snapshot of términos.
//!
//! Each counter applies its own threshold query independently, so a
//! pendiente término that is past due is counted by both `vencidos` and
//! `proximos_vencer`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Termino, TerminoEstado};
use crate::error::ValidationError;

/// Days-ahead window shared by the "próximos a vencer" counter and filter.
pub const VENTANA_PROXIMOS: i64 = 3;

/// Aggregate counters for a collection of términos.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TerminoStats {
    /// Términos in the pendiente state.
    pub total_pendientes: usize,
    /// Pendiente with at most [`VENTANA_PROXIMOS`] days remaining.
    /// Includes negative offsets, so it overlaps `vencidos`.
    pub proximos_vencer: usize,
    /// Pendiente and past due.
    pub vencidos: usize,
}

impl TerminoStats {
    /// Count the collection against `hoy`.
    pub fn calcular(terminos: &[Termino], hoy: NaiveDate) -> Self {
        let mut stats = TerminoStats::default();
        for t in terminos {
            if t.estado != TerminoEstado::Pendiente {
                continue;
            }
            stats.total_pendientes += 1;
            let dias = t.dias_restantes(hoy);
            if dias <= VENTANA_PROXIMOS {
                stats.proximos_vencer += 1;
            }
            if dias < 0 {
                stats.vencidos += 1;
            }
        }
        stats
    }
}

/// Named list filters for the término views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TerminoFilter {
    Todos,
    /// Pendiente and not past due.
    Pendientes,
    /// Pendiente and past due.
    Vencidos,
    Cumplidos,
}

impl TerminoFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminoFilter::Todos => "todos",
            TerminoFilter::Pendientes => "pendientes",
            TerminoFilter::Vencidos => "vencidos",
            TerminoFilter::Cumplidos => "cumplidos",
        }
    }

    fn acepta(&self, termino: &Termino, hoy: NaiveDate) -> bool {
        match self {
            TerminoFilter::Todos => true,
            TerminoFilter::Pendientes => {
                termino.estado == TerminoEstado::Pendiente && !termino.esta_vencido(hoy)
            }
            TerminoFilter::Vencidos => termino.esta_vencido(hoy),
            TerminoFilter::Cumplidos => termino.estado == TerminoEstado::Cumplido,
        }
    }
}

impl Default for TerminoFilter {
    fn default() -> Self {
        TerminoFilter::Pendientes
    }
}

impl fmt::Display for TerminoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerminoFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todos" => Ok(TerminoFilter::Todos),
            "pendientes" => Ok(TerminoFilter::Pendientes),
            "vencidos" => Ok(TerminoFilter::Vencidos),
            "cumplidos" => Ok(TerminoFilter::Cumplidos),
            other => Err(ValidationError::InvalidValue {
                field: "filter",
                message: format!("unknown filter '{other}'"),
            }),
        }
    }
}

/// Apply a filter and sort ascending by days remaining.
pub fn filtrar_y_ordenar(
    terminos: Vec<Termino>,
    filtro: TerminoFilter,
    hoy: NaiveDate,
) -> Vec<Termino> {
    let mut filtrados: Vec<Termino> = terminos
        .into_iter()
        .filter(|t| filtro.acepta(t, hoy))
        .collect();
    filtrados.sort_by_key(|t| t.dias_restantes(hoy));
    filtrados
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn termino(titulo: &str, f: NaiveDate) -> Termino {
        Termino::nuevo(titulo, "caso-1", f).unwrap()
    }

    fn cumplido(titulo: &str, f: NaiveDate) -> Termino {
        let mut t = termino(titulo, f);
        t.marcar_cumplido();
        t
    }

    fn coleccion(hoy: NaiveDate) -> Vec<Termino> {
        vec![
            termino("vencido hace 5", hoy - chrono::Duration::days(5)),
            termino("vence hoy", hoy),
            termino("vence en 2", hoy + chrono::Duration::days(2)),
            termino("vence en 10", hoy + chrono::Duration::days(10)),
            cumplido("cumplido pasado", hoy - chrono::Duration::days(3)),
        ]
    }

    #[test]
    fn stats_contadores() {
        let hoy = fecha(2026, 3, 15);
        let stats = TerminoStats::calcular(&coleccion(hoy), hoy);
        assert_eq!(stats.total_pendientes, 4);
        // hoy, en 2 y el vencido caen dentro de la ventana de 3 días.
        assert_eq!(stats.proximos_vencer, 3);
        assert_eq!(stats.vencidos, 1);
    }

    #[test]
    fn vencidos_dentro_de_proximos() {
        // A past-due pendiente término is double counted: the two counters
        // run independent threshold queries.
        let hoy = fecha(2026, 3, 15);
        let solo_vencido = vec![termino("tarde", hoy - chrono::Duration::days(2))];
        let stats = TerminoStats::calcular(&solo_vencido, hoy);
        assert_eq!(stats.vencidos, 1);
        assert_eq!(stats.proximos_vencer, 1);
        assert!(stats.proximos_vencer >= stats.vencidos);
    }

    #[test]
    fn cumplidos_fuera_de_contadores() {
        let hoy = fecha(2026, 3, 15);
        let solo_cumplido = vec![cumplido("hecho", hoy - chrono::Duration::days(10))];
        let stats = TerminoStats::calcular(&solo_cumplido, hoy);
        assert_eq!(stats, TerminoStats::default());
    }

    #[test]
    fn filtro_pendientes_excluye_vencidos() {
        let hoy = fecha(2026, 3, 15);
        let lista = filtrar_y_ordenar(coleccion(hoy), TerminoFilter::Pendientes, hoy);
        let titulos: Vec<&str> = lista.iter().map(|t| t.titulo.as_str()).collect();
        assert_eq!(titulos, ["vence hoy", "vence en 2", "vence en 10"]);
    }

    #[test]
    fn filtro_vencidos() {
        let hoy = fecha(2026, 3, 15);
        let lista = filtrar_y_ordenar(coleccion(hoy), TerminoFilter::Vencidos, hoy);
        assert_eq!(lista.len(), 1);
        assert_eq!(lista[0].titulo, "vencido hace 5");
    }

    #[test]
    fn filtro_cumplidos() {
        let hoy = fecha(2026, 3, 15);
        let lista = filtrar_y_ordenar(coleccion(hoy), TerminoFilter::Cumplidos, hoy);
        assert_eq!(lista.len(), 1);
        assert_eq!(lista[0].estado, TerminoEstado::Cumplido);
    }

    #[test]
    fn todos_ordena_ascendente_por_dias() {
        let hoy = fecha(2026, 3, 15);
        let lista = filtrar_y_ordenar(coleccion(hoy), TerminoFilter::Todos, hoy);
        let dias: Vec<i64> = lista.iter().map(|t| t.dias_restantes(hoy)).collect();
        let mut ordenados = dias.clone();
        ordenados.sort_unstable();
        assert_eq!(dias, ordenados);
        assert_eq!(lista.len(), 5);
    }

    #[test]
    fn filter_parse() {
        assert_eq!(
            "vencidos".parse::<TerminoFilter>().unwrap(),
            TerminoFilter::Vencidos
        );
        assert!("activos".parse::<TerminoFilter>().is_err());
    }
}
