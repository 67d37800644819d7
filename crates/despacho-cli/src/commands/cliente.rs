//! Client management commands.

use clap::Subcommand;
use despacho_core::{Cliente, CoreError, DespachoDb};

#[derive(Subcommand)]
pub enum ClienteAction {
    /// Register a new client
    Create {
        /// Full name
        name: String,
        /// Phone number
        #[arg(long)]
        phone: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// RFC (tax id)
        #[arg(long)]
        rfc: Option<String>,
        /// CURP (personal id)
        #[arg(long)]
        curp: Option<String>,
        /// Address
        #[arg(long)]
        address: Option<String>,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List clients alphabetically
    List,
    /// Get client details
    Show {
        /// Client id
        id: String,
    },
    /// Delete a client
    Delete {
        /// Client id
        id: String,
    },
}

pub fn run(action: ClienteAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = DespachoDb::open()?;

    match action {
        ClienteAction::Create {
            name,
            phone,
            email,
            rfc,
            curp,
            address,
            notes,
        } => {
            let mut cliente = Cliente::nuevo(name)?;
            cliente.phone = phone;
            cliente.email = email;
            cliente.rfc = rfc;
            cliente.curp = curp;
            cliente.address = address;
            cliente.notes = notes;
            db.create_cliente(&cliente)?;
            println!("Cliente created: {}", cliente.id);
            println!("{}", serde_json::to_string_pretty(&cliente)?);
        }
        ClienteAction::List => {
            let clientes = db.list_clientes()?;
            println!("{} cliente(s)", clientes.len());
            for c in clientes {
                let phone = c.phone.as_deref().unwrap_or("-");
                println!("{}  {} ({phone})", c.id, c.name);
            }
        }
        ClienteAction::Show { id } => {
            let cliente = db
                .get_cliente(&id)?
                .ok_or_else(|| CoreError::not_found("Cliente", &id))?;
            println!("{}", serde_json::to_string_pretty(&cliente)?);
        }
        ClienteAction::Delete { id } => {
            db.delete_cliente(&id)?;
            println!("Cliente deleted: {id}");
        }
    }
    Ok(())
}
