//! Calendar date arithmetic shared by términos, notas and the agenda.
//!
//! All due dates in the data model carry date-only semantics: the time of
//! day is discarded before any comparison. `dias_restantes` is the single
//! shared implementation of the day-offset rule; every consumer derives its
//! labels from it.

use chrono::{DateTime, Datelike, Local, NaiveDate};

/// Abbreviated month names as rendered by es-MX short date formatting.
const MESES_CORTOS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// Signed whole days between `hoy` and `fecha`.
///
/// Both sides are calendar dates, i.e. already normalized to midnight, so
/// the subtraction is an exact day count: negative means past due, zero
/// means due today, positive means due in the future.
pub fn dias_restantes(fecha: NaiveDate, hoy: NaiveDate) -> i64 {
    (fecha - hoy).num_days()
}

/// Variant of [`dias_restantes`] taking a reference timestamp.
///
/// The time-of-day portion is discarded, so any timestamp on the same
/// calendar day as `fecha` yields exactly 0.
pub fn dias_restantes_desde(fecha: NaiveDate, ahora: DateTime<Local>) -> i64 {
    dias_restantes(fecha, ahora.date_naive())
}

/// [`dias_restantes`] against the system clock, for presentation shells.
/// Engine calls take an explicit `hoy` instead.
pub fn dias_restantes_hoy(fecha: NaiveDate) -> i64 {
    dias_restantes_desde(fecha, Local::now())
}

/// Today's calendar date from the system clock.
pub fn hoy() -> NaiveDate {
    Local::now().date_naive()
}

/// "7 ago" -- short es-MX date, used for note reminders.
pub fn formato_corto(fecha: NaiveDate) -> String {
    format!(
        "{} {}",
        fecha.day(),
        MESES_CORTOS[fecha.month0() as usize]
    )
}

/// "7 ago 2026" -- short es-MX date with year, used in término listings.
pub fn formato_corto_con_anio(fecha: NaiveDate) -> String {
    format!(
        "{} {} {}",
        fecha.day(),
        MESES_CORTOS[fecha.month0() as usize],
        fecha.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn d(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn mismo_dia_es_cero() {
        let hoy = d(2026, 3, 15);
        assert_eq!(dias_restantes(hoy, hoy), 0);
    }

    #[test]
    fn manana_es_uno() {
        assert_eq!(dias_restantes(d(2026, 3, 16), d(2026, 3, 15)), 1);
    }

    #[test]
    fn pasado_es_negativo() {
        assert_eq!(dias_restantes(d(2026, 3, 10), d(2026, 3, 15)), -5);
    }

    #[test]
    fn cruza_fin_de_mes() {
        assert_eq!(dias_restantes(d(2026, 4, 2), d(2026, 3, 30)), 3);
    }

    #[test]
    fn cruza_anio_bisiesto() {
        // 2028 is a leap year; Feb 28 -> Mar 1 spans the 29th.
        assert_eq!(dias_restantes(d(2028, 3, 1), d(2028, 2, 28)), 2);
    }

    #[test]
    fn hora_del_dia_se_descarta() {
        let fecha = d(2026, 3, 15);
        let tarde = Local.with_ymd_and_hms(2026, 3, 15, 23, 45, 0).unwrap();
        let madrugada = Local.with_ymd_and_hms(2026, 3, 15, 0, 0, 1).unwrap();
        assert_eq!(dias_restantes_desde(fecha, tarde), 0);
        assert_eq!(dias_restantes_desde(fecha, madrugada), 0);
    }

    #[test]
    fn formato_corto_es_mx() {
        assert_eq!(formato_corto(d(2026, 8, 7)), "7 ago");
        assert_eq!(formato_corto_con_anio(d(2026, 1, 31)), "31 ene 2026");
    }
}
