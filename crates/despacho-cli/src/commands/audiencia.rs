//! Hearing and agenda commands.

use chrono::{Datelike, NaiveDate};
use clap::Subcommand;
use despacho_core::audiencia::{agrupar_por_fecha, proximas, AudienciaStatus, AudienciaTipo};
use despacho_core::{dates, Audiencia, Config, CoreError, DespachoDb};

use super::parse_fecha;

#[derive(Subcommand)]
pub enum AudienciaAction {
    /// Schedule a hearing
    Create {
        /// Owning case id
        #[arg(long)]
        caso: String,
        /// Hearing date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_fecha)]
        fecha: NaiveDate,
        /// Time as HH:mm (default 09:00)
        #[arg(long)]
        hora: Option<String>,
        /// Kind: inicial, pruebas, alegatos, sentencia, conciliacion or otra
        #[arg(long)]
        tipo: Option<String>,
        /// Location
        #[arg(long)]
        lugar: Option<String>,
        /// Free-text notes
        #[arg(long)]
        notas: Option<String>,
    },
    /// List hearings, optionally within a date range
    List {
        /// Range start (YYYY-MM-DD)
        #[arg(long, value_parser = parse_fecha)]
        desde: Option<NaiveDate>,
        /// Range end (YYYY-MM-DD)
        #[arg(long, value_parser = parse_fecha)]
        hasta: Option<NaiveDate>,
    },
    /// Month agenda bucketed by day
    Agenda {
        /// Month as YYYY-MM (default: current month)
        #[arg(long)]
        mes: Option<String>,
    },
    /// Upcoming scheduled hearings
    Proximas,
    /// Update a hearing's status
    Status {
        /// Hearing id
        id: String,
        /// New status: programada, celebrada or cancelada
        status: String,
    },
    /// Delete a hearing
    Delete {
        /// Hearing id
        id: String,
    },
}

/// First and last day of a `YYYY-MM` month.
fn rango_del_mes(mes: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let invalid = || format!("invalid month '{mes}', expected YYYY-MM");
    let (anio, mes_num) = mes.split_once('-').ok_or_else(invalid)?;
    let anio: i32 = anio.parse().map_err(|_| invalid())?;
    let mes_num: u32 = mes_num.parse().map_err(|_| invalid())?;
    let primero = NaiveDate::from_ymd_opt(anio, mes_num, 1).ok_or_else(invalid)?;
    let siguiente = if mes_num == 12 {
        NaiveDate::from_ymd_opt(anio + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(anio, mes_num + 1, 1)
    }
    .ok_or_else(invalid)?;
    Ok((primero, siguiente - chrono::Duration::days(1)))
}

pub fn run(action: AudienciaAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = DespachoDb::open()?;
    let hoy = dates::hoy();

    match action {
        AudienciaAction::Create {
            caso,
            fecha,
            hora,
            tipo,
            lugar,
            notas,
        } => {
            if db.get_caso(&caso)?.is_none() {
                return Err(CoreError::not_found("Caso", &caso).into());
            }
            let mut audiencia = Audiencia::nueva(caso, fecha)?;
            if let Some(h) = hora {
                audiencia.hora = h;
            }
            if let Some(t) = tipo {
                audiencia.tipo = t.parse::<AudienciaTipo>()?;
            }
            audiencia.location = lugar;
            audiencia.notes = notas;
            db.create_audiencia(&audiencia)?;
            println!("Audiencia created: {}", audiencia.id);
            println!("{}", serde_json::to_string_pretty(&audiencia)?);
        }
        AudienciaAction::List { desde, hasta } => {
            let rango = match (desde, hasta) {
                (Some(d), Some(h)) => Some((d, h)),
                (None, None) => None,
                _ => return Err("both --desde and --hasta are required for a range".into()),
            };
            for a in db.list_audiencias(rango)? {
                println!(
                    "{}  {} {}  {} ({})",
                    a.id,
                    dates::formato_corto_con_anio(a.fecha),
                    a.hora,
                    a.tipo.etiqueta(),
                    a.status,
                );
            }
        }
        AudienciaAction::Agenda { mes } => {
            let (primero, ultimo) = match mes {
                Some(m) => rango_del_mes(&m)?,
                None => rango_del_mes(&format!("{}-{:02}", hoy.year(), hoy.month()))?,
            };
            let audiencias = db.list_audiencias(Some((primero, ultimo)))?;
            let agenda = agrupar_por_fecha(audiencias);
            if agenda.is_empty() {
                println!("Sin audiencias entre {primero} y {ultimo}");
            }
            for (dia, del_dia) in agenda {
                println!("{}:", dates::formato_corto_con_anio(dia));
                for a in del_dia {
                    println!("  {} {}  {}", a.hora, a.tipo.etiqueta(), a.case_id);
                }
            }
        }
        AudienciaAction::Proximas => {
            let config = Config::load();
            let prox = proximas(db.list_audiencias(None)?, hoy, config.agenda.dias_proximas);
            println!(
                "{} hoy • {} en los próximos {} días",
                prox.hoy,
                prox.audiencias.len(),
                config.agenda.dias_proximas
            );
            println!("{}", serde_json::to_string_pretty(&prox)?);
        }
        AudienciaAction::Status { id, status } => {
            let mut audiencia = db
                .get_audiencia(&id)?
                .ok_or_else(|| CoreError::not_found("Audiencia", &id))?;
            audiencia.status = status.parse::<AudienciaStatus>()?;
            db.update_audiencia(&audiencia)?;
            println!("Audiencia updated: {id}");
        }
        AudienciaAction::Delete { id } => {
            db.delete_audiencia(&id)?;
            println!("Audiencia deleted: {id}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rango_del_mes_normal() {
        let (primero, ultimo) = rango_del_mes("2026-03").unwrap();
        assert_eq!(primero, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(ultimo, NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());
    }

    #[test]
    fn rango_del_mes_diciembre() {
        let (_, ultimo) = rango_del_mes("2026-12").unwrap();
        assert_eq!(ultimo, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
    }

    #[test]
    fn rango_del_mes_febrero_bisiesto() {
        let (_, ultimo) = rango_del_mes("2028-02").unwrap();
        assert_eq!(ultimo, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn rango_del_mes_invalido() {
        assert!(rango_del_mes("2026").is_err());
        assert!(rango_del_mes("2026-13").is_err());
        assert!(rango_del_mes("marzo").is_err());
    }
}
