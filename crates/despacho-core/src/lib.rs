//! # Despacho Core Library
//!
//! This library provides the core business logic for Despacho, a legal
//! practice manager. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI
//! being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Términos Engine**: deadline classification and lifecycle. Urgency is
//!   never stored; it is derived at read time from the due date and the
//!   lifecycle state against an injected "today"
//! - **Expedientes**: clients, cases, hearings and notes tied to a case
//! - **Storage**: SQLite-based record storage and TOML-based configuration
//! - **Agenda**: date bucketing for the hearings calendar
//!
//! ## Key Components
//!
//! - [`Termino`]: deadline record with a one-way pendiente → cumplido lifecycle
//! - [`Urgencia`]: urgency tier derived from days remaining and state
//! - [`TerminoStats`]: aggregate counters over a snapshot of términos
//! - [`DespachoDb`]: record persistence
//! - [`Config`]: application configuration management

pub mod audiencia;
pub mod caso;
pub mod cliente;
pub mod dates;
pub mod error;
pub mod nota;
pub mod storage;
pub mod termino;

pub use audiencia::{Audiencia, AudienciaStatus, AudienciaTipo, ProximasAudiencias};
pub use caso::{Caso, CasoStatus, CasoTipo};
pub use cliente::Cliente;
pub use dates::dias_restantes;
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use nota::{Nota, NotaPrioridad, NotaStatus};
pub use storage::{Config, DespachoDb};
pub use termino::{
    Termino, TerminoEstado, TerminoFilter, TerminoStats, TerminoTipo, Urgencia, UrgenciaInfo,
};
