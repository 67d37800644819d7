//! Urgency classification for términos.
//!
//! Pure functions over `(días restantes, estado)`. The tiers double as sort
//! keys and filter predicates; presentation layers only render the returned
//! tier and label.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TerminoEstado;
use crate::dates;

/// Urgency tier, in priority order: the first matching rule wins.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Urgencia {
    /// Fulfilled; overrides every day-based tier.
    Cumplido,
    /// Past due (only reachable while pendiente).
    Vencido,
    /// Due today or tomorrow.
    Critico,
    /// Due within three days.
    Proximo,
    /// Everything further out.
    Normal,
}

impl Urgencia {
    /// Classify a día offset and lifecycle state.
    ///
    /// Rules, first match wins:
    /// 1. cumplido → `Cumplido`
    /// 2. dias < 0 → `Vencido`
    /// 3. dias <= 1 → `Critico`
    /// 4. dias <= 3 → `Proximo`
    /// 5. otherwise `Normal`
    pub fn clasificar(dias: i64, estado: TerminoEstado) -> Self {
        if estado == TerminoEstado::Cumplido {
            Urgencia::Cumplido
        } else if dias < 0 {
            Urgencia::Vencido
        } else if dias <= 1 {
            Urgencia::Critico
        } else if dias <= 3 {
            Urgencia::Proximo
        } else {
            Urgencia::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgencia::Cumplido => "cumplido",
            Urgencia::Vencido => "vencido",
            Urgencia::Critico => "critico",
            Urgencia::Proximo => "proximo",
            Urgencia::Normal => "normal",
        }
    }
}

/// Display label for a día offset and state.
///
/// These strings are part of the presentation contract and are matched
/// verbatim by tests.
pub fn etiqueta(dias: i64, estado: TerminoEstado) -> String {
    if estado == TerminoEstado::Cumplido {
        return "✓ Cumplido".to_string();
    }
    if dias < 0 {
        format!("Venció hace {} día(s)", dias.abs())
    } else if dias == 0 {
        "¡Vence HOY!".to_string()
    } else if dias == 1 {
        "Vence MAÑANA".to_string()
    } else {
        format!("Vence en {dias} días")
    }
}

/// Derived read-time view of a término's urgency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrgenciaInfo {
    pub dias_restantes: i64,
    pub urgencia: Urgencia,
    pub etiqueta: String,
}

impl UrgenciaInfo {
    /// Compute days remaining, tier and label for `hoy`.
    pub fn calcular(fecha_vencimiento: NaiveDate, estado: TerminoEstado, hoy: NaiveDate) -> Self {
        let dias = dates::dias_restantes(fecha_vencimiento, hoy);
        UrgenciaInfo {
            dias_restantes: dias,
            urgencia: Urgencia::clasificar(dias, estado),
            etiqueta: etiqueta(dias, estado),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termino::TerminoEstado::{Cumplido, Pendiente};

    fn fecha(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn tabla_de_tiers() {
        assert_eq!(Urgencia::clasificar(-10, Pendiente), Urgencia::Vencido);
        assert_eq!(Urgencia::clasificar(-1, Pendiente), Urgencia::Vencido);
        assert_eq!(Urgencia::clasificar(0, Pendiente), Urgencia::Critico);
        assert_eq!(Urgencia::clasificar(1, Pendiente), Urgencia::Critico);
        assert_eq!(Urgencia::clasificar(2, Pendiente), Urgencia::Proximo);
        assert_eq!(Urgencia::clasificar(3, Pendiente), Urgencia::Proximo);
        assert_eq!(Urgencia::clasificar(4, Pendiente), Urgencia::Normal);
        assert_eq!(Urgencia::clasificar(30, Pendiente), Urgencia::Normal);
    }

    #[test]
    fn cumplido_domina_todo() {
        for dias in [-100, -1, 0, 1, 3, 100] {
            assert_eq!(Urgencia::clasificar(dias, Cumplido), Urgencia::Cumplido);
        }
    }

    #[test]
    fn etiquetas_exactas() {
        assert_eq!(etiqueta(0, Cumplido), "✓ Cumplido");
        assert_eq!(etiqueta(-5, Pendiente), "Venció hace 5 día(s)");
        assert_eq!(etiqueta(-1, Pendiente), "Venció hace 1 día(s)");
        assert_eq!(etiqueta(0, Pendiente), "¡Vence HOY!");
        assert_eq!(etiqueta(1, Pendiente), "Vence MAÑANA");
        assert_eq!(etiqueta(2, Pendiente), "Vence en 2 días");
        assert_eq!(etiqueta(10, Pendiente), "Vence en 10 días");
    }

    // Scenario table covering each tier and label.

    #[test]
    fn vence_hoy_pendiente_es_critico() {
        let hoy = fecha(2026, 3, 15);
        let info = UrgenciaInfo::calcular(hoy, Pendiente, hoy);
        assert_eq!(info.dias_restantes, 0);
        assert_eq!(info.urgencia, Urgencia::Critico);
        assert_eq!(info.etiqueta, "¡Vence HOY!");
    }

    #[test]
    fn vencio_hace_cinco_dias() {
        let hoy = fecha(2026, 3, 15);
        let info = UrgenciaInfo::calcular(fecha(2026, 3, 10), Pendiente, hoy);
        assert_eq!(info.urgencia, Urgencia::Vencido);
        assert_eq!(info.etiqueta, "Venció hace 5 día(s)");
    }

    #[test]
    fn en_dos_dias_es_proximo() {
        let hoy = fecha(2026, 3, 15);
        let info = UrgenciaInfo::calcular(fecha(2026, 3, 17), Pendiente, hoy);
        assert_eq!(info.urgencia, Urgencia::Proximo);
    }

    #[test]
    fn en_diez_dias_es_normal() {
        let hoy = fecha(2026, 3, 15);
        let info = UrgenciaInfo::calcular(fecha(2026, 3, 25), Pendiente, hoy);
        assert_eq!(info.urgencia, Urgencia::Normal);
        assert_eq!(info.etiqueta, "Vence en 10 días");
    }

    #[test]
    fn cumplido_en_el_pasado_nunca_vencido() {
        let hoy = fecha(2026, 3, 15);
        let info = UrgenciaInfo::calcular(fecha(2026, 1, 1), Cumplido, hoy);
        assert_eq!(info.urgencia, Urgencia::Cumplido);
        assert_eq!(info.etiqueta, "✓ Cumplido");
    }

    mod propiedades {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clasificar_es_total(dias in -10_000i64..10_000) {
                // Every offset lands in exactly one pendiente tier.
                let tier = Urgencia::clasificar(dias, Pendiente);
                prop_assert_ne!(tier, Urgencia::Cumplido);
            }

            #[test]
            fn cumplido_siempre_gana(dias in -10_000i64..10_000) {
                prop_assert_eq!(
                    Urgencia::clasificar(dias, Cumplido),
                    Urgencia::Cumplido
                );
            }

            #[test]
            fn etiqueta_coincide_con_tier(dias in -10_000i64..10_000) {
                let tier = Urgencia::clasificar(dias, Pendiente);
                let texto = etiqueta(dias, Pendiente);
                match tier {
                    Urgencia::Vencido => prop_assert!(texto.starts_with("Venció hace")),
                    Urgencia::Critico => prop_assert!(
                        texto == "¡Vence HOY!" || texto == "Vence MAÑANA"
                    ),
                    Urgencia::Proximo | Urgencia::Normal => {
                        prop_assert!(texto.starts_with("Vence en"))
                    }
                    Urgencia::Cumplido => prop_assert!(false),
                }
            }

            #[test]
            fn mismo_dia_siempre_cero(
                y in 2000i32..2100,
                m in 1u32..=12,
                d in 1u32..=28,
            ) {
                let fecha = NaiveDate::from_ymd_opt(y, m, d).unwrap();
                prop_assert_eq!(crate::dates::dias_restantes(fecha, fecha), 0);
            }
        }
    }
}
