use std::path::Path;

use anyhow::{bail, Context, Result};
use rusqlite::Connection;
use tracing::info;

pub struct Database {
    pub conn: Connection,
    pub table: String,
}

impl Database {
    /// Opens (or creates) the SQLite file at `path` and makes sure the permit
    /// table exists.
    pub fn open(path: &Path, table: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open SQLite database {}", path.display()))?;
        info!(path = %path.display(), table, "Opened database");
        Self::init(conn, table)
    }

    #[cfg(test)]
    pub fn open_in_memory(table: &str) -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::init(conn, table)
    }

    fn init(conn: Connection, table: &str) -> Result<Self> {
        validate_table_name(table)?;

        // No UNIQUE constraint: files written by earlier runs may already hold
        // duplicate references and the DDL must keep accepting them.
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY,
                description TEXT,
                date_scraped TEXT,
                date_received TEXT,
                on_notice_to TEXT,
                address TEXT,
                council_reference TEXT,
                applicant TEXT,
                owner TEXT,
                stage_description TEXT,
                stage_status TEXT,
                document_description TEXT,
                title_reference TEXT
            );
            CREATE INDEX IF NOT EXISTS {table}_council_reference ON {table} (council_reference);"
        ))
        .with_context(|| format!("Failed to create table {}", table))?;

        Ok(Self {
            conn,
            table: table.to_string(),
        })
    }

    pub fn count_permits(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| {
                row.get(0)
            })
            .context("Failed to count stored permits")?;
        Ok(count)
    }
}

/// The table name is spliced into SQL text, so only plain identifiers pass.
pub fn validate_table_name(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if !valid {
        bail!("Invalid table name: {:?}", table);
    }
    Ok(())
}
