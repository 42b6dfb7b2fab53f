use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::config::config::{AppConfig, ExtractionConfig};
use crate::scraping::extract_rows::{compile_selector, extract_rows};
use crate::scraping::extractor::{build_extractor, Extractor};
use crate::scraping::permit_record::Extraction;
use crate::utilities::database::init::Database;
use crate::utilities::database::insert_permit::{insert_permit, InsertOutcome};
use crate::utilities::fetch_page::fetch_page;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub skipped: usize,
    pub stored: i64,
}

pub struct PageScraper {
    rows: Selector,
    extractor: Box<dyn Extractor>,
}

impl PageScraper {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            rows: compile_selector(&config.row_selector)?,
            extractor: build_extractor(config)?,
        })
    }

    /// Extracts every result row of `page_html` and stores the permits not
    /// seen before.
    pub fn process_page(
        &self,
        db: &mut Database,
        page_html: &str,
        date_scraped: NaiveDate,
    ) -> Result<RunSummary> {
        let document = Html::parse_document(page_html);
        let rows = extract_rows(&document, &self.rows);
        info!(rows = rows.len(), "Found result rows");

        let mut summary = RunSummary::default();

        for (index, row) in rows.into_iter().enumerate() {
            summary.rows += 1;

            let record = match self.extractor.extract(row) {
                Extraction::Record(record) => record,
                Extraction::Skipped(reason) => {
                    warn!(row = index, %reason, "Skipping row");
                    summary.skipped += 1;
                    continue;
                }
            };

            info!(
                council_reference = %record.council_reference,
                description = ?record.description,
                address = ?record.address,
                date_received = ?record.date_received,
                on_notice_to = ?record.on_notice_to,
                document_url = ?record.document_description,
                "Extracted permit"
            );

            match insert_permit(db, &record, date_scraped)? {
                InsertOutcome::Inserted => {
                    info!(council_reference = %record.council_reference, "Saved permit to database");
                    summary.inserted += 1;
                }
                InsertOutcome::Duplicate => {
                    info!(
                        council_reference = %record.council_reference,
                        "Duplicate permit found, skipping insertion"
                    );
                    summary.duplicates += 1;
                }
            }
        }

        summary.stored = db.count_permits()?;

        Ok(summary)
    }
}

/// Fetch, parse, store. The store is only opened once the page is in hand,
/// so a failed fetch leaves the database untouched.
pub async fn scrape_permits(config: &AppConfig, date_scraped: NaiveDate) -> Result<RunSummary> {
    let scraper = PageScraper::new(&config.extraction)?;

    info!(url = %config.source.url, "Fetching page content");
    let page_html = fetch_page(&config.source.url, config.source.user_agent.as_deref())
        .await
        .context("Failed to fetch page content")?;
    info!(bytes = page_html.len(), "Fetched page content");

    let mut db = Database::open(Path::new(&config.database.path), &config.database.table)?;

    scraper.process_page(&mut db, &page_html, date_scraped)
}
