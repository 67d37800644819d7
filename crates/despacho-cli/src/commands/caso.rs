//! Case management commands.

use chrono::NaiveDate;
use clap::Subcommand;
use despacho_core::dates;
use despacho_core::{Caso, CasoStatus, CasoTipo, CoreError, DespachoDb};

use super::parse_fecha;

#[derive(Subcommand)]
pub enum CasoAction {
    /// Create a new case
    Create {
        /// Subject matter, e.g. "Juicio ordinario mercantil"
        matter: String,
        /// Client id
        #[arg(long)]
        cliente: String,
        /// Court docket number, e.g. "123/2026"
        #[arg(long)]
        expediente: Option<String>,
        /// Branch of law: civil, penal, familiar, mercantil, laboral,
        /// amparo or administrativo
        #[arg(long)]
        tipo: Option<String>,
        /// Court or tribunal
        #[arg(long)]
        juzgado: Option<String>,
        /// Judge
        #[arg(long)]
        juez: Option<String>,
        /// Opposing party
        #[arg(long)]
        contraparte: Option<String>,
        /// Opposing counsel
        #[arg(long)]
        abogado_contrario: Option<String>,
        /// Description
        #[arg(long)]
        descripcion: Option<String>,
        /// Start date (YYYY-MM-DD, default today)
        #[arg(long, value_parser = parse_fecha)]
        inicio: Option<NaiveDate>,
    },
    /// List cases
    List {
        /// Filter by status: activo, suspendido or cerrado
        #[arg(long)]
        status: Option<String>,
        /// Maximum rows
        #[arg(long, default_value = "50")]
        limit: usize,
    },
    /// Get case details
    Show {
        /// Case id
        id: String,
    },
    /// Close a case
    Close {
        /// Case id
        id: String,
    },
    /// Delete a case
    Delete {
        /// Case id
        id: String,
    },
}

pub fn run(action: CasoAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = DespachoDb::open()?;

    match action {
        CasoAction::Create {
            matter,
            cliente,
            expediente,
            tipo,
            juzgado,
            juez,
            contraparte,
            abogado_contrario,
            descripcion,
            inicio,
        } => {
            if db.get_cliente(&cliente)?.is_none() {
                return Err(CoreError::not_found("Cliente", &cliente).into());
            }
            let mut caso = Caso::nuevo(matter, cliente, inicio.unwrap_or_else(dates::hoy))?;
            if let Some(t) = tipo {
                caso.case_type = t.parse::<CasoTipo>()?;
            }
            caso.case_number = expediente;
            caso.court = juzgado;
            caso.judge = juez;
            caso.opponent = contraparte;
            caso.opponent_lawyer = abogado_contrario;
            caso.description = descripcion;
            db.create_caso(&caso)?;
            println!("Caso created: {}", caso.id);
            println!("{}", serde_json::to_string_pretty(&caso)?);
        }
        CasoAction::List { status, limit } => {
            let filtro = status.map(|s| s.parse::<CasoStatus>()).transpose()?;
            let casos = db.list_casos(filtro, limit)?;
            println!(
                "{} casos • {} activos",
                db.count_casos()?,
                db.count_casos_activos()?
            );
            for c in casos {
                let numero = c.case_number.as_deref().unwrap_or("s/n");
                println!("{}  [{}] {} — {} ({})", c.id, c.case_type, numero, c.matter, c.status);
            }
        }
        CasoAction::Show { id } => {
            let caso = db
                .get_caso(&id)?
                .ok_or_else(|| CoreError::not_found("Caso", &id))?;
            println!("{}", serde_json::to_string_pretty(&caso)?);
        }
        CasoAction::Close { id } => {
            let mut caso = db
                .get_caso(&id)?
                .ok_or_else(|| CoreError::not_found("Caso", &id))?;
            caso.cerrar();
            db.update_caso(&caso)?;
            println!("Caso cerrado: {id}");
        }
        CasoAction::Delete { id } => {
            db.delete_caso(&id)?;
            println!("Caso deleted: {id}");
        }
    }
    Ok(())
}
