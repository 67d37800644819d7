//! SQLite-based storage for clients, cases, hearings, términos and notes.
//!
//! Enum columns store stable wire strings (`"pendiente"`, `"procesal"`,
//! ...) and are parsed strictly on the way out: a value that
//! no longer maps to a variant surfaces as a conversion error instead of
//! silently falling back to a default.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::data_dir;
use crate::audiencia::Audiencia;
use crate::caso::Caso;
use crate::cliente::Cliente;
use crate::error::{CoreError, DatabaseError, ValidationError};
use crate::nota::Nota;
use crate::termino::{Termino, TerminoEstado};

// === Helper functions ===

/// Strict enum parse for a TEXT column.
fn parse_enum<T>(idx: usize, s: &str) -> Result<T, rusqlite::Error>
where
    T: FromStr<Err = ValidationError>,
{
    s.parse().map_err(|e: ValidationError| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a `%Y-%m-%d` DATE column.
fn parse_fecha(idx: usize, s: &str) -> Result<NaiveDate, rusqlite::Error> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse an RFC3339 timestamp column.
fn parse_ts(idx: usize, s: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

fn fmt_fecha(fecha: NaiveDate) -> String {
    fecha.format("%Y-%m-%d").to_string()
}

fn row_to_cliente(row: &rusqlite::Row) -> Result<Cliente, rusqlite::Error> {
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;
    Ok(Cliente {
        id: row.get(0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        email: row.get(3)?,
        rfc: row.get(4)?,
        curp: row.get(5)?,
        address: row.get(6)?,
        notes: row.get(7)?,
        created_at: parse_ts(8, &created_at)?,
        updated_at: parse_ts(9, &updated_at)?,
    })
}

fn row_to_caso(row: &rusqlite::Row) -> Result<Caso, rusqlite::Error> {
    let case_type: String = row.get(4)?;
    let status: String = row.get(5)?;
    let start_date: String = row.get(12)?;
    let created_at: String = row.get(13)?;
    let updated_at: String = row.get(14)?;
    Ok(Caso {
        id: row.get(0)?,
        client_id: row.get(1)?,
        case_number: row.get(2)?,
        matter: row.get(3)?,
        case_type: parse_enum(4, &case_type)?,
        status: parse_enum(5, &status)?,
        court: row.get(6)?,
        judge: row.get(7)?,
        opponent: row.get(8)?,
        opponent_lawyer: row.get(9)?,
        description: row.get(10)?,
        notes: row.get(11)?,
        start_date: parse_fecha(12, &start_date)?,
        created_at: parse_ts(13, &created_at)?,
        updated_at: parse_ts(14, &updated_at)?,
    })
}

fn row_to_termino(row: &rusqlite::Row) -> Result<Termino, rusqlite::Error> {
    let fecha: String = row.get(4)?;
    let tipo: String = row.get(5)?;
    let estado: String = row.get(8)?;
    let created_at: String = row.get(10)?;
    let updated_at: String = row.get(11)?;
    let cumplido_at: Option<String> = row.get(12)?;
    Ok(Termino {
        id: row.get(0)?,
        case_id: row.get(1)?,
        titulo: row.get(2)?,
        descripcion: row.get(3)?,
        fecha_vencimiento: parse_fecha(4, &fecha)?,
        tipo: parse_enum(5, &tipo)?,
        dias_alerta: row.get(6)?,
        recordatorio: row.get(7)?,
        estado: parse_enum(8, &estado)?,
        notas: row.get(9)?,
        created_at: parse_ts(10, &created_at)?,
        updated_at: parse_ts(11, &updated_at)?,
        cumplido_at: cumplido_at.as_deref().map(|s| parse_ts(12, s)).transpose()?,
    })
}

fn row_to_audiencia(row: &rusqlite::Row) -> Result<Audiencia, rusqlite::Error> {
    let fecha: String = row.get(2)?;
    let tipo: String = row.get(4)?;
    let status: String = row.get(5)?;
    let created_at: String = row.get(8)?;
    Ok(Audiencia {
        id: row.get(0)?,
        case_id: row.get(1)?,
        fecha: parse_fecha(2, &fecha)?,
        hora: row.get(3)?,
        tipo: parse_enum(4, &tipo)?,
        status: parse_enum(5, &status)?,
        location: row.get(6)?,
        notes: row.get(7)?,
        created_at: parse_ts(8, &created_at)?,
    })
}

fn row_to_nota(row: &rusqlite::Row) -> Result<Nota, rusqlite::Error> {
    let due_date: Option<String> = row.get(4)?;
    let priority: String = row.get(5)?;
    let status: String = row.get(6)?;
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;
    Ok(Nota {
        id: row.get(0)?,
        case_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        due_date: due_date.as_deref().map(|s| parse_fecha(4, s)).transpose()?,
        priority: parse_enum(5, &priority)?,
        status: parse_enum(6, &status)?,
        created_at: parse_ts(7, &created_at)?,
        updated_at: parse_ts(8, &updated_at)?,
    })
}

/// Dashboard counters assembled from simple count queries, one per metric.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resumen {
    pub total_casos: usize,
    pub casos_activos: usize,
    pub audiencias_hoy: usize,
    pub notas_pendientes: usize,
}

/// SQLite database for practice records.
pub struct DespachoDb {
    conn: Connection,
}

impl DespachoDb {
    /// Open the database at `<data_dir>/despacho.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("despacho.db");
        let conn = Connection::open(&path).map_err(|source| DatabaseError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        debug!(path = %path.display(), "database open");
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS clientes (
                id         TEXT PRIMARY KEY,
                name       TEXT NOT NULL,
                phone      TEXT,
                email      TEXT,
                rfc        TEXT,
                curp       TEXT,
                address    TEXT,
                notes      TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS casos (
                id              TEXT PRIMARY KEY,
                client_id       TEXT NOT NULL,
                case_number     TEXT,
                matter          TEXT NOT NULL,
                case_type       TEXT NOT NULL DEFAULT 'civil',
                status          TEXT NOT NULL DEFAULT 'activo',
                court           TEXT,
                judge           TEXT,
                opponent        TEXT,
                opponent_lawyer TEXT,
                description     TEXT,
                notes           TEXT,
                start_date      TEXT NOT NULL,
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS terminos (
                id                TEXT PRIMARY KEY,
                case_id           TEXT NOT NULL,
                titulo            TEXT NOT NULL,
                descripcion       TEXT,
                fecha_vencimiento TEXT NOT NULL,
                tipo              TEXT NOT NULL DEFAULT 'procesal',
                dias_alerta       INTEGER NOT NULL DEFAULT 3,
                recordatorio      INTEGER NOT NULL DEFAULT 1,
                estado            TEXT NOT NULL DEFAULT 'pendiente',
                notas             TEXT,
                created_at        TEXT NOT NULL,
                updated_at        TEXT NOT NULL,
                cumplido_at       TEXT
            );

            CREATE TABLE IF NOT EXISTS audiencias (
                id         TEXT PRIMARY KEY,
                case_id    TEXT NOT NULL,
                fecha      TEXT NOT NULL,
                hora       TEXT NOT NULL DEFAULT '09:00',
                tipo       TEXT NOT NULL DEFAULT 'otra',
                status     TEXT NOT NULL DEFAULT 'programada',
                location   TEXT,
                notes      TEXT,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS notas (
                id          TEXT PRIMARY KEY,
                case_id     TEXT,
                title       TEXT NOT NULL,
                description TEXT,
                due_date    TEXT,
                priority    TEXT NOT NULL DEFAULT 'media',
                status      TEXT NOT NULL DEFAULT 'pendiente',
                created_at  TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_casos_client ON casos(client_id);
            CREATE INDEX IF NOT EXISTS idx_casos_status ON casos(status);
            CREATE INDEX IF NOT EXISTS idx_terminos_case ON terminos(case_id);
            CREATE INDEX IF NOT EXISTS idx_terminos_estado ON terminos(estado);
            CREATE INDEX IF NOT EXISTS idx_terminos_fecha ON terminos(fecha_vencimiento);
            CREATE INDEX IF NOT EXISTS idx_audiencias_case ON audiencias(case_id);
            CREATE INDEX IF NOT EXISTS idx_audiencias_fecha ON audiencias(fecha);
            CREATE INDEX IF NOT EXISTS idx_notas_status ON notas(status);",
        )
    }

    // === Clientes ===

    pub fn create_cliente(&self, c: &Cliente) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT INTO clientes (id, name, phone, email, rfc, curp, address, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                c.id,
                c.name,
                c.phone,
                c.email,
                c.rfc,
                c.curp,
                c.address,
                c.notes,
                c.created_at.to_rfc3339(),
                c.updated_at.to_rfc3339(),
            ],
        )?;
        debug!(id = %c.id, "cliente created");
        Ok(())
    }

    pub fn get_cliente(&self, id: &str) -> Result<Option<Cliente>, CoreError> {
        let mut stmt = self.conn.prepare("SELECT * FROM clientes WHERE id = ?1")?;
        Ok(stmt
            .query_row(params![id], row_to_cliente)
            .optional()?)
    }

    pub fn list_clientes(&self) -> Result<Vec<Cliente>, CoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM clientes ORDER BY name ASC")?;
        let rows = stmt.query_map([], row_to_cliente)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn update_cliente(&self, c: &Cliente) -> Result<(), CoreError> {
        let changed = self.conn.execute(
            "UPDATE clientes SET name = ?2, phone = ?3, email = ?4, rfc = ?5, curp = ?6,
                                 address = ?7, notes = ?8, updated_at = ?9
             WHERE id = ?1",
            params![
                c.id,
                c.name,
                c.phone,
                c.email,
                c.rfc,
                c.curp,
                c.address,
                c.notes,
                Utc::now().to_rfc3339(),
            ],
        )?;
        if changed == 0 {
            return Err(CoreError::not_found("Cliente", &c.id));
        }
        Ok(())
    }

    pub fn delete_cliente(&self, id: &str) -> Result<(), CoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM clientes WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(CoreError::not_found("Cliente", id));
        }
        debug!(id, "cliente deleted");
        Ok(())
    }

    // === Casos ===

    pub fn create_caso(&self, c: &Caso) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT INTO casos (id, client_id, case_number, matter, case_type, status, court,
                                judge, opponent, opponent_lawyer, description, notes, start_date,
                                created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                c.id,
                c.client_id,
                c.case_number,
                c.matter,
                c.case_type.as_str(),
                c.status.as_str(),
                c.court,
                c.judge,
                c.opponent,
                c.opponent_lawyer,
                c.description,
                c.notes,
                fmt_fecha(c.start_date),
                c.created_at.to_rfc3339(),
                c.updated_at.to_rfc3339(),
            ],
        )?;
        debug!(id = %c.id, "caso created");
        Ok(())
    }

    pub fn get_caso(&self, id: &str) -> Result<Option<Caso>, CoreError> {
        let mut stmt = self.conn.prepare("SELECT * FROM casos WHERE id = ?1")?;
        Ok(stmt.query_row(params![id], row_to_caso).optional()?)
    }

    /// Cases, newest first, optionally filtered by status.
    pub fn list_casos(
        &self,
        status: Option<crate::caso::CasoStatus>,
        limit: usize,
    ) -> Result<Vec<Caso>, CoreError> {
        let rows = match status {
            Some(s) => {
                let mut stmt = self.conn.prepare(
                    "SELECT * FROM casos WHERE status = ?1 ORDER BY created_at DESC LIMIT ?2",
                )?;
                let rows = stmt.query_map(params![s.as_str(), limit as i64], row_to_caso)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare("SELECT * FROM casos ORDER BY created_at DESC LIMIT ?1")?;
                let rows = stmt.query_map(params![limit as i64], row_to_caso)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(rows)
    }

    pub fn update_caso(&self, c: &Caso) -> Result<(), CoreError> {
        let changed = self.conn.execute(
            "UPDATE casos SET client_id = ?2, case_number = ?3, matter = ?4, case_type = ?5,
                              status = ?6, court = ?7, judge = ?8, opponent = ?9,
                              opponent_lawyer = ?10, description = ?11, notes = ?12,
                              start_date = ?13, updated_at = ?14
             WHERE id = ?1",
            params![
                c.id,
                c.client_id,
                c.case_number,
                c.matter,
                c.case_type.as_str(),
                c.status.as_str(),
                c.court,
                c.judge,
                c.opponent,
                c.opponent_lawyer,
                c.description,
                c.notes,
                fmt_fecha(c.start_date),
                Utc::now().to_rfc3339(),
            ],
        )?;
        if changed == 0 {
            return Err(CoreError::not_found("Caso", &c.id));
        }
        Ok(())
    }

    pub fn delete_caso(&self, id: &str) -> Result<(), CoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM casos WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(CoreError::not_found("Caso", id));
        }
        debug!(id, "caso deleted");
        Ok(())
    }

    pub fn count_casos(&self) -> Result<usize, CoreError> {
        let n: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM casos", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    pub fn count_casos_activos(&self) -> Result<usize, CoreError> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM casos WHERE status = 'activo'",
            [],
            |row| row.get(0),
        )?;
        Ok(n as usize)
    }

    // === Términos ===

    pub fn create_termino(&self, t: &Termino) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT INTO terminos (id, case_id, titulo, descripcion, fecha_vencimiento, tipo,
                                   dias_alerta, recordatorio, estado, notas, created_at,
                                   updated_at, cumplido_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                t.id,
                t.case_id,
                t.titulo,
                t.descripcion,
                fmt_fecha(t.fecha_vencimiento),
                t.tipo.as_str(),
                t.dias_alerta,
                t.recordatorio,
                t.estado.as_str(),
                t.notas,
                t.created_at.to_rfc3339(),
                t.updated_at.to_rfc3339(),
                t.cumplido_at.map(|ts| ts.to_rfc3339()),
            ],
        )?;
        debug!(id = %t.id, fecha = %t.fecha_vencimiento, "término created");
        Ok(())
    }

    pub fn get_termino(&self, id: &str) -> Result<Option<Termino>, CoreError> {
        let mut stmt = self.conn.prepare("SELECT * FROM terminos WHERE id = ?1")?;
        Ok(stmt.query_row(params![id], row_to_termino).optional()?)
    }

    /// Términos sorted by due date, optionally filtered by estado.
    pub fn list_terminos(
        &self,
        estado: Option<TerminoEstado>,
        limit: usize,
    ) -> Result<Vec<Termino>, CoreError> {
        let rows = match estado {
            Some(e) => {
                let mut stmt = self.conn.prepare(
                    "SELECT * FROM terminos WHERE estado = ?1
                     ORDER BY fecha_vencimiento ASC LIMIT ?2",
                )?;
                let rows = stmt.query_map(params![e.as_str(), limit as i64], row_to_termino)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare("SELECT * FROM terminos ORDER BY fecha_vencimiento ASC LIMIT ?1")?;
                let rows = stmt.query_map(params![limit as i64], row_to_termino)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(rows)
    }

    /// Pendiente términos due within `dias` days of `hoy` (past due
    /// included), sorted by due date.
    pub fn list_terminos_proximos(
        &self,
        hoy: NaiveDate,
        dias: i64,
    ) -> Result<Vec<Termino>, CoreError> {
        let limite = hoy + chrono::Duration::days(dias);
        let mut stmt = self.conn.prepare(
            "SELECT * FROM terminos
             WHERE estado = 'pendiente' AND fecha_vencimiento <= ?1
             ORDER BY fecha_vencimiento ASC",
        )?;
        let rows = stmt.query_map(params![fmt_fecha(limite)], row_to_termino)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn update_termino(&self, t: &Termino) -> Result<(), CoreError> {
        let changed = self.conn.execute(
            "UPDATE terminos SET case_id = ?2, titulo = ?3, descripcion = ?4,
                                 fecha_vencimiento = ?5, tipo = ?6, dias_alerta = ?7,
                                 recordatorio = ?8, estado = ?9, notas = ?10,
                                 updated_at = ?11, cumplido_at = ?12
             WHERE id = ?1",
            params![
                t.id,
                t.case_id,
                t.titulo,
                t.descripcion,
                fmt_fecha(t.fecha_vencimiento),
                t.tipo.as_str(),
                t.dias_alerta,
                t.recordatorio,
                t.estado.as_str(),
                t.notas,
                t.updated_at.to_rfc3339(),
                t.cumplido_at.map(|ts| ts.to_rfc3339()),
            ],
        )?;
        if changed == 0 {
            return Err(CoreError::not_found("Término", &t.id));
        }
        Ok(())
    }

    /// Fetch, transition to cumplido and persist. Already-cumplido términos
    /// pass through unchanged.
    pub fn marcar_termino_cumplido(&self, id: &str) -> Result<Termino, CoreError> {
        let mut termino = self
            .get_termino(id)?
            .ok_or_else(|| CoreError::not_found("Término", id))?;
        if termino.marcar_cumplido() {
            self.update_termino(&termino)?;
            debug!(id, "término cumplido");
        }
        Ok(termino)
    }

    pub fn delete_termino(&self, id: &str) -> Result<(), CoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM terminos WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(CoreError::not_found("Término", id));
        }
        debug!(id, "término deleted");
        Ok(())
    }

    // === Audiencias ===

    pub fn create_audiencia(&self, a: &Audiencia) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT INTO audiencias (id, case_id, fecha, hora, tipo, status, location, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                a.id,
                a.case_id,
                fmt_fecha(a.fecha),
                a.hora,
                a.tipo.as_str(),
                a.status.as_str(),
                a.location,
                a.notes,
                a.created_at.to_rfc3339(),
            ],
        )?;
        debug!(id = %a.id, fecha = %a.fecha, "audiencia created");
        Ok(())
    }

    pub fn get_audiencia(&self, id: &str) -> Result<Option<Audiencia>, CoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM audiencias WHERE id = ?1")?;
        Ok(stmt.query_row(params![id], row_to_audiencia).optional()?)
    }

    /// Hearings ordered by date then time, optionally restricted to an
    /// inclusive date range.
    pub fn list_audiencias(
        &self,
        rango: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<Audiencia>, CoreError> {
        let rows = match rango {
            Some((desde, hasta)) => {
                let mut stmt = self.conn.prepare(
                    "SELECT * FROM audiencias WHERE fecha >= ?1 AND fecha <= ?2
                     ORDER BY fecha ASC, hora ASC",
                )?;
                let rows = stmt.query_map(
                    params![fmt_fecha(desde), fmt_fecha(hasta)],
                    row_to_audiencia,
                )?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self
                    .conn
                    .prepare("SELECT * FROM audiencias ORDER BY fecha ASC, hora ASC")?;
                let rows = stmt.query_map([], row_to_audiencia)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(rows)
    }

    pub fn update_audiencia(&self, a: &Audiencia) -> Result<(), CoreError> {
        let changed = self.conn.execute(
            "UPDATE audiencias SET case_id = ?2, fecha = ?3, hora = ?4, tipo = ?5,
                                   status = ?6, location = ?7, notes = ?8
             WHERE id = ?1",
            params![
                a.id,
                a.case_id,
                fmt_fecha(a.fecha),
                a.hora,
                a.tipo.as_str(),
                a.status.as_str(),
                a.location,
                a.notes,
            ],
        )?;
        if changed == 0 {
            return Err(CoreError::not_found("Audiencia", &a.id));
        }
        Ok(())
    }

    pub fn delete_audiencia(&self, id: &str) -> Result<(), CoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM audiencias WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(CoreError::not_found("Audiencia", id));
        }
        Ok(())
    }

    // === Notas ===

    pub fn create_nota(&self, n: &Nota) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT INTO notas (id, case_id, title, description, due_date, priority, status,
                                created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                n.id,
                n.case_id,
                n.title,
                n.description,
                n.due_date.map(fmt_fecha),
                n.priority.as_str(),
                n.status.as_str(),
                n.created_at.to_rfc3339(),
                n.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_nota(&self, id: &str) -> Result<Option<Nota>, CoreError> {
        let mut stmt = self.conn.prepare("SELECT * FROM notas WHERE id = ?1")?;
        Ok(stmt.query_row(params![id], row_to_nota).optional()?)
    }

    /// Notes by priority (alta first) then reminder date, optionally
    /// filtered by status.
    pub fn list_notas(
        &self,
        status: Option<crate::nota::NotaStatus>,
        limit: usize,
    ) -> Result<Vec<Nota>, CoreError> {
        const ORDEN: &str = "ORDER BY CASE priority WHEN 'alta' THEN 0 WHEN 'media' THEN 1 ELSE 2 END,
                             due_date IS NULL, due_date ASC";
        let rows = match status {
            Some(s) => {
                let sql =
                    format!("SELECT * FROM notas WHERE status = ?1 {ORDEN} LIMIT ?2");
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map(params![s.as_str(), limit as i64], row_to_nota)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
            None => {
                let sql = format!("SELECT * FROM notas {ORDEN} LIMIT ?1");
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map(params![limit as i64], row_to_nota)?;
                rows.collect::<Result<Vec<_>, _>>()?
            }
        };
        Ok(rows)
    }

    pub fn update_nota(&self, n: &Nota) -> Result<(), CoreError> {
        let changed = self.conn.execute(
            "UPDATE notas SET case_id = ?2, title = ?3, description = ?4, due_date = ?5,
                              priority = ?6, status = ?7, updated_at = ?8
             WHERE id = ?1",
            params![
                n.id,
                n.case_id,
                n.title,
                n.description,
                n.due_date.map(fmt_fecha),
                n.priority.as_str(),
                n.status.as_str(),
                n.updated_at.to_rfc3339(),
            ],
        )?;
        if changed == 0 {
            return Err(CoreError::not_found("Nota", &n.id));
        }
        Ok(())
    }

    pub fn delete_nota(&self, id: &str) -> Result<(), CoreError> {
        let changed = self
            .conn
            .execute("DELETE FROM notas WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(CoreError::not_found("Nota", id));
        }
        Ok(())
    }

    pub fn count_notas_pendientes(&self) -> Result<usize, CoreError> {
        let n: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM notas WHERE status = 'pendiente'",
            [],
            |row| row.get(0),
        )?;
        Ok(n as usize)
    }

    // === Resumen ===

    /// Dashboard counters for `hoy`.
    pub fn resumen(&self, hoy: NaiveDate) -> Result<Resumen, CoreError> {
        let audiencias_hoy: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM audiencias WHERE fecha = ?1 AND status = 'programada'",
            params![fmt_fecha(hoy)],
            |row| row.get(0),
        )?;
        Ok(Resumen {
            total_casos: self.count_casos()?,
            casos_activos: self.count_casos_activos()?,
            audiencias_hoy: audiencias_hoy as usize,
            notas_pendientes: self.count_notas_pendientes()?,
        })
    }
}
