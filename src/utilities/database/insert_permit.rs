use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, TransactionBehavior};

use crate::scraping::permit_record::{PermitRecord, ADDRESS_NOT_FOUND};
use crate::utilities::database::init::Database;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

/// Inserts `record` unless a row with the same council reference is already
/// stored. Existing rows are never touched.
///
/// The existence check and the insert share one IMMEDIATE transaction, which
/// takes the SQLite write lock up front so two runs against the same file
/// cannot both see "absent" and insert twice.
pub fn insert_permit(
    db: &mut Database,
    record: &PermitRecord,
    date_scraped: NaiveDate,
) -> Result<InsertOutcome> {
    let tx = db
        .conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .context("Failed to start transaction")?;

    let exists: bool = tx
        .query_row(
            &format!(
                "SELECT EXISTS(SELECT 1 FROM {} WHERE council_reference = ?1)",
                db.table
            ),
            params![record.council_reference],
            |row| row.get(0),
        )
        .with_context(|| format!("Failed to look up {}", record.council_reference))?;

    if exists {
        return Ok(InsertOutcome::Duplicate);
    }

    let date_received = record
        .date_received
        .map(|date| date.to_string())
        .unwrap_or_else(|| record.date_received_fallback.to_string());

    tx.execute(
        &format!(
            "INSERT INTO {} (description, date_scraped, date_received, on_notice_to, address,
                council_reference, applicant, owner, stage_description, stage_status,
                document_description, title_reference)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, '', '', '', '', ?7, ?8)",
            db.table
        ),
        params![
            record.description,
            date_scraped.to_string(),
            date_received,
            record.on_notice_to,
            record.address.as_deref().unwrap_or(ADDRESS_NOT_FOUND),
            record.council_reference,
            record.document_description,
            record.title_reference,
        ],
    )
    .with_context(|| format!("Failed to insert {}", record.council_reference))?;

    tx.commit().context("Failed to commit insert")?;

    Ok(InsertOutcome::Inserted)
}
