pub mod audiencia;
pub mod caso;
pub mod cliente;
pub mod config;
pub mod nota;
pub mod resumen;
pub mod termino;

use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_fecha(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))
}
