//! Relational report (SQLite).

use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::{ReportError, Result};
use crate::parse::GroupRecord;

use super::RecordSink;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS flexconnect_groups (
    wlc        TEXT    NOT NULL,
    group_name TEXT    NOT NULL,
    ap_count   INTEGER NOT NULL
)";

/// Three-column relational table, created if absent.
pub struct SqliteReport {
    conn: Connection,
}

impl SqliteReport {
    /// Open (or create) the database and ensure the table exists.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(ReportError::Database)?;
        Self::with_connection(conn)
    }

    /// In-memory database, for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(ReportError::Database)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA).map_err(ReportError::Database)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    fn row_count(&self) -> i64 {
        self.conn
            .query_row("SELECT COUNT(*) FROM flexconnect_groups", [], |row| {
                row.get(0)
            })
            .unwrap()
    }
}

impl RecordSink for SqliteReport {
    fn append_rows(&mut self, rows: &[GroupRecord]) -> Result<()> {
        let tx = self.conn.transaction().map_err(ReportError::Database)?;
        {
            let mut insert = tx
                .prepare(
                    "INSERT INTO flexconnect_groups (wlc, group_name, ap_count)
                     VALUES (?1, ?2, ?3)",
                )
                .map_err(ReportError::Database)?;
            for row in rows {
                insert
                    .execute(params![row.host, row.group, row.ap_count])
                    .map_err(ReportError::Database)?;
            }
        }
        tx.commit().map_err(ReportError::Database)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}
