//! Quick note commands.

use chrono::NaiveDate;
use clap::Subcommand;
use despacho_core::nota::NotaPrioridad;
use despacho_core::{dates, CoreError, DespachoDb, Nota, NotaStatus};

use super::parse_fecha;

#[derive(Subcommand)]
pub enum NotaAction {
    /// Create a note
    Create {
        /// Note title
        title: String,
        /// Description
        #[arg(long)]
        descripcion: Option<String>,
        /// Related case id
        #[arg(long)]
        caso: Option<String>,
        /// Reminder date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_fecha)]
        recordatorio: Option<NaiveDate>,
        /// Priority: alta, media or baja
        #[arg(long)]
        prioridad: Option<String>,
    },
    /// List notes
    List {
        /// Filter by status: pendiente or completada
        #[arg(long)]
        status: Option<String>,
        /// Maximum rows
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// Mark a note completed
    Complete {
        /// Note id
        id: String,
    },
    /// Delete a note
    Delete {
        /// Note id
        id: String,
    },
}

pub fn run(action: NotaAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = DespachoDb::open()?;
    let hoy = dates::hoy();

    match action {
        NotaAction::Create {
            title,
            descripcion,
            caso,
            recordatorio,
            prioridad,
        } => {
            if let Some(caso_id) = &caso {
                if db.get_caso(caso_id)?.is_none() {
                    return Err(CoreError::not_found("Caso", caso_id).into());
                }
            }
            let mut nota = Nota::nueva(title)?;
            nota.description = descripcion;
            nota.case_id = caso;
            nota.due_date = recordatorio;
            if let Some(p) = prioridad {
                nota.priority = p.parse::<NotaPrioridad>()?;
            }
            db.create_nota(&nota)?;
            println!("Nota created: {}", nota.id);
            println!("{}", serde_json::to_string_pretty(&nota)?);
        }
        NotaAction::List { status, limit } => {
            let filtro = status.map(|s| s.parse::<NotaStatus>()).transpose()?;
            let notas = db.list_notas(filtro, limit)?;
            println!("{} nota(s)", notas.len());
            for n in notas {
                let recordatorio = n
                    .recordatorio(hoy)
                    .map(|r| format!(" [{r}]"))
                    .unwrap_or_default();
                println!("{}  ({}) {}{}", n.id, n.priority, n.title, recordatorio);
            }
        }
        NotaAction::Complete { id } => {
            let mut nota = db
                .get_nota(&id)?
                .ok_or_else(|| CoreError::not_found("Nota", &id))?;
            nota.completar();
            db.update_nota(&nota)?;
            println!("Nota completada: {id}");
        }
        NotaAction::Delete { id } => {
            db.delete_nota(&id)?;
            println!("Nota deleted: {id}");
        }
    }
    Ok(())
}
