//! Término (deadline) commands.

use chrono::NaiveDate;
use clap::Subcommand;
use despacho_core::dates;
use despacho_core::termino::{filtrar_y_ordenar, TerminoFilter, TerminoStats};
use despacho_core::{Config, CoreError, DespachoDb, Termino, TerminoTipo};

use super::parse_fecha;

#[derive(Subcommand)]
pub enum TerminoAction {
    /// Create a new término
    Create {
        /// Término title, e.g. "Contestar demanda"
        titulo: String,
        /// Owning case id
        #[arg(long)]
        caso: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_fecha)]
        vence: NaiveDate,
        /// Kind: fatal, procesal or convencional
        #[arg(long)]
        tipo: Option<String>,
        /// Description
        #[arg(long)]
        descripcion: Option<String>,
        /// Alert lead days (default from config)
        #[arg(long)]
        dias_alerta: Option<i64>,
        /// Free-text notes
        #[arg(long)]
        notas: Option<String>,
        /// Disable reminders for this término
        #[arg(long)]
        sin_recordatorio: bool,
    },
    /// List términos with urgency labels
    List {
        /// Filter: todos, pendientes, vencidos or cumplidos
        #[arg(long, default_value = "pendientes")]
        filter: String,
        /// Only pendientes due within N days (includes past due)
        #[arg(long)]
        proximos: Option<i64>,
        /// Maximum rows
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// Get término details
    Show {
        /// Término id
        id: String,
    },
    /// Mark a término as cumplido
    Complete {
        /// Término id
        id: String,
    },
    /// Delete a término
    Delete {
        /// Término id
        id: String,
    },
    /// Aggregate counters over all términos
    Stats,
}

pub fn run(action: TerminoAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = DespachoDb::open()?;
    let hoy = dates::hoy();

    match action {
        TerminoAction::Create {
            titulo,
            caso,
            vence,
            tipo,
            descripcion,
            dias_alerta,
            notas,
            sin_recordatorio,
        } => {
            if db.get_caso(&caso)?.is_none() {
                return Err(CoreError::not_found("Caso", &caso).into());
            }
            let config = Config::load();
            let mut termino = Termino::nuevo(titulo, caso, vence)?;
            if let Some(t) = tipo {
                termino.tipo = t.parse::<TerminoTipo>()?;
            }
            termino.descripcion = descripcion;
            termino.dias_alerta = dias_alerta.unwrap_or(config.alertas.dias_alerta);
            termino.recordatorio = !sin_recordatorio && config.alertas.recordatorios;
            termino.notas = notas;
            db.create_termino(&termino)?;
            println!("Término created: {}", termino.id);
            println!("{}", serde_json::to_string_pretty(&termino)?);
        }
        TerminoAction::List {
            filter,
            proximos,
            limit,
        } => {
            let terminos = match proximos {
                Some(dias) => db.list_terminos_proximos(hoy, dias)?,
                None => db.list_terminos(None, limit)?,
            };
            let stats = TerminoStats::calcular(&terminos, hoy);
            println!(
                "{} pendientes • {} próximos • {} vencidos",
                stats.total_pendientes, stats.proximos_vencer, stats.vencidos
            );

            let filtro: TerminoFilter = filter.parse()?;
            for t in filtrar_y_ordenar(terminos, filtro, hoy) {
                let info = t.urgencia(hoy);
                println!(
                    "{}  [{}] {} — {} ({})",
                    t.id,
                    t.tipo.etiqueta(),
                    t.titulo,
                    info.etiqueta,
                    dates::formato_corto_con_anio(t.fecha_vencimiento),
                );
            }
        }
        TerminoAction::Show { id } => {
            let termino = db
                .get_termino(&id)?
                .ok_or_else(|| CoreError::not_found("Término", &id))?;
            println!("{}", serde_json::to_string_pretty(&termino)?);
            println!(
                "{}",
                serde_json::to_string_pretty(&termino.urgencia(hoy))?
            );
        }
        TerminoAction::Complete { id } => {
            let termino = db.marcar_termino_cumplido(&id)?;
            println!("Término cumplido: {}", termino.id);
        }
        TerminoAction::Delete { id } => {
            db.delete_termino(&id)?;
            println!("Término deleted: {id}");
        }
        TerminoAction::Stats => {
            let terminos = db.list_terminos(None, 10_000)?;
            let stats = TerminoStats::calcular(&terminos, hoy);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
