use anyhow::Result;
use scraper::{ElementRef, Selector};
use tracing::warn;

use crate::config::config::{ExtractionConfig, Strategy};
use crate::scraping::extract_address::{extract_address_after_reference, extract_address_by_pattern};
use crate::scraping::extract_council_reference::extract_council_reference;
use crate::scraping::extract_date_received::parse_modified_date;
use crate::scraping::extract_description::{
    extract_description_after_last_delimiter, extract_description_before_expiry,
};
use crate::scraping::extract_on_notice_to::{extract_notice_date, notice_period_end};
use crate::scraping::extract_rows::{compile_selector, extract_text};
use crate::scraping::permit_record::{Extraction, PermitRecord};

/// Turns one result row into a permit record.
pub trait Extractor {
    fn extract(&self, row: ElementRef<'_>) -> Extraction;
}

pub fn build_extractor(config: &ExtractionConfig) -> Result<Box<dyn Extractor>> {
    let extractor: Box<dyn Extractor> = match config.strategy {
        Strategy::FileTitle => Box::new(FileTitleExtractor::new(config)?),
        Strategy::TitleAttribute => Box::new(TitleAttributeExtractor::new(config)?),
    };
    Ok(extractor)
}

/// Mines the `title` attribute of the row's download link.
pub struct TitleAttributeExtractor {
    link: Selector,
}

impl TitleAttributeExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            link: compile_selector(&config.link_selector)?,
        })
    }
}

impl Extractor for TitleAttributeExtractor {
    fn extract(&self, row: ElementRef<'_>) -> Extraction {
        let Some(link) = row.select(&self.link).next() else {
            return Extraction::Skipped("no download link".to_string());
        };
        let Some(title) = link.value().attr("title") else {
            return Extraction::Skipped("download link has no title attribute".to_string());
        };
        let Some(council_reference) = extract_council_reference(title) else {
            return Extraction::Skipped(format!("no council reference in title {:?}", title));
        };

        Extraction::Record(PermitRecord {
            address: extract_address_by_pattern(title),
            description: extract_description_before_expiry(title),
            on_notice_to: extract_notice_date(title),
            document_description: link.value().attr("href").map(str::to_string),
            // This strategy never reads a received date.
            date_received_fallback: "",
            ..PermitRecord::new(council_reference, title.to_string())
        })
    }
}

/// Mines the file title text and the file modified date of the row.
pub struct FileTitleExtractor {
    title: Selector,
    modified: Selector,
    link: Selector,
    notice_period_days: u32,
}

impl FileTitleExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            title: compile_selector(&config.title_selector)?,
            modified: compile_selector(&config.modified_selector)?,
            link: compile_selector(&config.link_selector)?,
            notice_period_days: config.notice_period_days,
        })
    }
}

impl Extractor for FileTitleExtractor {
    fn extract(&self, row: ElementRef<'_>) -> Extraction {
        let Some(title) = extract_text(row, &self.title) else {
            return Extraction::Skipped("no file title element".to_string());
        };
        let Some(council_reference) = extract_council_reference(&title) else {
            return Extraction::Skipped(format!("no council reference in title {:?}", title));
        };

        let date_received = extract_text(row, &self.modified).and_then(|text| {
            let date = parse_modified_date(&text);
            if date.is_none() && !text.is_empty() {
                warn!(council_reference = %council_reference, modified = %text, "Unrecognised modified date");
            }
            date
        });
        let on_notice_to = date_received
            .and_then(|date| notice_period_end(date, self.notice_period_days))
            .map(|date| date.to_string());

        // Scoped to this row: a row without a link gets no URL.
        let document_description = row
            .select(&self.link)
            .next()
            .and_then(|link| link.value().attr("href"))
            .map(str::to_string);

        Extraction::Record(PermitRecord {
            address: extract_address_after_reference(&title),
            description: extract_description_after_last_delimiter(&title),
            date_received,
            on_notice_to,
            document_description,
            ..PermitRecord::new(council_reference, title)
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use scraper::Html;

    use super::*;
    use crate::scraping::extract_rows::extract_rows;
    use crate::scraping::permit_record::DATE_NOT_FOUND;

    fn rows(document: &Html) -> Vec<ElementRef<'_>> {
        let selector = compile_selector(&ExtractionConfig::default().row_selector).unwrap();
        extract_rows(document, &selector)
    }

    fn record(extraction: Extraction) -> PermitRecord {
        match extraction {
            Extraction::Record(record) => record,
            Extraction::Skipped(reason) => panic!("row skipped: {}", reason),
        }
    }

    #[test]
    fn title_attribute_row() {
        let document = Html::parse_document(
            r#"<table><tbody><tr class="wpfd-search-result"><td>
                <a class="wpfd_downloadlink" href="https://example.org/DA2023-45.pdf"
                   title="DA2023/45 - 12 Smith Street - Construction of garage - Notification expiry date 5 March 2024">Download</a>
            </td></tr></tbody></table>"#,
        );
        let extractor = TitleAttributeExtractor::new(&ExtractionConfig::default()).unwrap();

        let permit = record(extractor.extract(rows(&document)[0]));

        assert_eq!(permit.council_reference, "DA2023/45");
        assert_eq!(permit.address.as_deref(), Some("12 Smith Street"));
        assert_eq!(permit.description.as_deref(), Some("Construction of garage"));
        assert_eq!(permit.on_notice_to.as_deref(), Some("5 March 2024"));
        assert_eq!(
            permit.document_description.as_deref(),
            Some("https://example.org/DA2023-45.pdf")
        );
        assert_eq!(permit.date_received, None);
        assert_eq!(permit.date_received_fallback, "");
        assert_eq!(
            permit.title_reference,
            "DA2023/45 - 12 Smith Street - Construction of garage - Notification expiry date 5 March 2024"
        );
    }

    #[test]
    fn title_attribute_row_without_link_is_skipped() {
        let document = Html::parse_document(
            r#"<table><tbody><tr class="wpfd-search-result"><td>nothing</td></tr></tbody></table>"#,
        );
        let extractor = TitleAttributeExtractor::new(&ExtractionConfig::default()).unwrap();

        assert!(matches!(
            extractor.extract(rows(&document)[0]),
            Extraction::Skipped(_)
        ));
    }

    #[test]
    fn file_title_row() {
        let document = Html::parse_document(
            r#"<table><tbody><tr class="wpfd-search-result">
                <td><span class="file_title"> DA2023/45 - 12 Smith Street - Construction of garage </span></td>
                <td><span class="file_modified">2024-02-20</span></td>
                <td><a class="wpfd_downloadlink" href="https://example.org/DA2023-45.pdf">Download</a></td>
            </tr></tbody></table>"#,
        );
        let extractor = FileTitleExtractor::new(&ExtractionConfig::default()).unwrap();

        let permit = record(extractor.extract(rows(&document)[0]));

        assert_eq!(permit.council_reference, "DA2023/45");
        assert_eq!(permit.address.as_deref(), Some("12 Smith Street"));
        assert_eq!(permit.description.as_deref(), Some("Construction of garage"));
        assert_eq!(permit.date_received, NaiveDate::from_ymd_opt(2024, 2, 20));
        assert_eq!(permit.on_notice_to.as_deref(), Some("2024-03-05"));
        assert_eq!(
            permit.document_description.as_deref(),
            Some("https://example.org/DA2023-45.pdf")
        );
        assert_eq!(
            permit.title_reference,
            "DA2023/45 - 12 Smith Street - Construction of garage"
        );
    }

    #[test]
    fn file_title_notice_period_is_configurable() {
        let document = Html::parse_document(
            r#"<table><tbody><tr class="wpfd-search-result">
                <td class="file_title">DA2024/2 - 7 Inglis Street - Shed</td>
                <td class="file_modified">2024-02-20</td>
            </tr></tbody></table>"#,
        );
        let config = ExtractionConfig {
            notice_period_days: 28,
            ..ExtractionConfig::default()
        };
        let extractor = FileTitleExtractor::new(&config).unwrap();

        let permit = record(extractor.extract(rows(&document)[0]));

        assert_eq!(permit.on_notice_to.as_deref(), Some("2024-03-19"));
    }

    #[test]
    fn file_title_without_modified_date() {
        let document = Html::parse_document(
            r#"<table><tbody><tr class="wpfd-search-result">
                <td class="file_title">DA2024/9 - Shed</td>
                <td class="file_modified">not a date</td>
            </tr></tbody></table>"#,
        );
        let extractor = FileTitleExtractor::new(&ExtractionConfig::default()).unwrap();

        let permit = record(extractor.extract(rows(&document)[0]));

        assert_eq!(permit.council_reference, "DA2024/9");
        assert_eq!(permit.address, None);
        assert_eq!(permit.description.as_deref(), Some("Shed"));
        assert_eq!(permit.date_received, None);
        assert_eq!(permit.date_received_fallback, DATE_NOT_FOUND);
        assert_eq!(permit.on_notice_to, None);
        assert_eq!(permit.document_description, None);
    }

    #[test]
    fn file_title_missing_title_is_skipped() {
        let document = Html::parse_document(
            r#"<table><tbody><tr class="wpfd-search-result">
                <td class="file_modified">2024-02-20</td>
                <td><a class="wpfd_downloadlink" href="https://example.org/x.pdf">Download</a></td>
            </tr></tbody></table>"#,
        );
        let extractor = FileTitleExtractor::new(&ExtractionConfig::default()).unwrap();

        assert!(matches!(
            extractor.extract(rows(&document)[0]),
            Extraction::Skipped(_)
        ));
    }

    #[test]
    fn file_title_href_does_not_leak_between_rows() {
        let document = Html::parse_document(
            r#"<table><tbody>
                <tr class="wpfd-search-result">
                    <td class="file_title">DA2024/1 - 1 Jackson Street - Dwelling</td>
                    <td><a class="wpfd_downloadlink" href="https://example.org/DA2024-1.pdf">Download</a></td>
                </tr>
                <tr class="wpfd-search-result">
                    <td class="file_title">DA2024/2 - 2 Jackson Street - Dwelling</td>
                </tr>
            </tbody></table>"#,
        );
        let extractor = FileTitleExtractor::new(&ExtractionConfig::default()).unwrap();

        let permits: Vec<_> = rows(&document)
            .into_iter()
            .map(|row| record(extractor.extract(row)))
            .collect();

        assert_eq!(
            permits[0].document_description.as_deref(),
            Some("https://example.org/DA2024-1.pdf")
        );
        assert_eq!(permits[1].document_description, None);
    }

    #[test]
    fn build_extractor_rejects_bad_selector() {
        let config = ExtractionConfig {
            title_selector: "[[".to_string(),
            ..ExtractionConfig::default()
        };

        assert!(build_extractor(&config).is_err());
        assert!(build_extractor(&ExtractionConfig::default()).is_ok());
    }
}
