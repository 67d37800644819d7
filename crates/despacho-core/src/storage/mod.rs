pub mod config;
pub mod db;

pub use config::Config;
pub use db::{DespachoDb, Resumen};

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns the data directory, `~/.config/despacho[-dev]/` by default.
///
/// `DESPACHO_DATA_DIR` overrides the location entirely (used by the CLI
/// tests); otherwise set `DESPACHO_ENV=dev` to use a development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let dir = if let Ok(dir) = std::env::var("DESPACHO_DATA_DIR") {
        PathBuf::from(dir)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");
        let env = std::env::var("DESPACHO_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("despacho-dev")
        } else {
            base_dir.join("despacho")
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
