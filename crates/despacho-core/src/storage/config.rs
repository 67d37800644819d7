//! TOML-based application configuration.
//!
//! Stores practice-wide preferences:
//! - Alert defaults applied to new términos
//! - Agenda window for the upcoming-hearings view
//!
//! Configuration is stored at `~/.config/despacho/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Alert defaults for new términos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertasConfig {
    /// Default lead days recorded on new términos. Informational; the
    /// urgency thresholds stay fixed.
    #[serde(default = "default_dias_alerta")]
    pub dias_alerta: i64,
    /// Whether new términos want reminders by default.
    #[serde(default = "default_true")]
    pub recordatorios: bool,
}

/// Agenda preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaConfig {
    /// Days ahead shown by the upcoming-hearings view.
    #[serde(default = "default_dias_proximas")]
    pub dias_proximas: i64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/despacho/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub alertas: AlertasConfig,
    #[serde(default)]
    pub agenda: AgendaConfig,
}

// Default functions
fn default_dias_alerta() -> i64 {
    3
}
fn default_dias_proximas() -> i64 {
    7
}
fn default_true() -> bool {
    true
}

impl Default for AlertasConfig {
    fn default() -> Self {
        AlertasConfig {
            dias_alerta: default_dias_alerta(),
            recordatorios: default_true(),
        }
    }
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            dias_proximas: default_dias_proximas(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            alertas: AlertasConfig::default(),
            agenda: AgendaConfig::default(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/despacho"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load() -> Self {
        let Ok(path) = Self::path() else {
            return Config::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text).unwrap_or_default(),
            Err(_) => Config::default(),
        }
    }

    /// Persist the configuration.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let text = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, text).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a value by dotted key, e.g. `alertas.dias_alerta`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "alertas.dias_alerta" => Some(self.alertas.dias_alerta.to_string()),
            "alertas.recordatorios" => Some(self.alertas.recordatorios.to_string()),
            "agenda.dias_proximas" => Some(self.agenda.dias_proximas.to_string()),
            _ => None,
        }
    }

    /// Set a value by dotted key.
    ///
    /// # Errors
    /// Returns an error for unknown keys or unparseable values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        match key {
            "alertas.dias_alerta" => {
                self.alertas.dias_alerta = value.parse().map_err(|_| {
                    invalid(format!("expected an integer, got '{value}'"))
                })?;
            }
            "alertas.recordatorios" => {
                self.alertas.recordatorios = value.parse().map_err(|_| {
                    invalid(format!("expected true/false, got '{value}'"))
                })?;
            }
            "agenda.dias_proximas" => {
                self.agenda.dias_proximas = value.parse().map_err(|_| {
                    invalid(format!("expected an integer, got '{value}'"))
                })?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.alertas.dias_alerta, 3);
        assert!(config.alertas.recordatorios);
        assert_eq!(config.agenda.dias_proximas, 7);
    }

    #[test]
    fn toml_roundtrip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let decoded: Config = toml::from_str(&text).unwrap();
        assert_eq!(decoded.alertas.dias_alerta, config.alertas.dias_alerta);
    }

    #[test]
    fn parcial_usa_defaults() {
        let decoded: Config = toml::from_str("[alertas]\ndias_alerta = 5\n").unwrap();
        assert_eq!(decoded.alertas.dias_alerta, 5);
        assert!(decoded.alertas.recordatorios);
        assert_eq!(decoded.agenda.dias_proximas, 7);
    }

    #[test]
    fn get_claves() {
        let config = Config::default();
        assert_eq!(config.get("alertas.dias_alerta").unwrap(), "3");
        assert!(config.get("alertas.tema").is_none());
    }
}
