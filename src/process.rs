use std::path::Path;

use chrono::Local;
use indexmap::IndexMap;
use scraper::Html;

use crate::parse::{extract_detail, extract_listing, DetailRecord, ListingRow, LISTING_REGIONS};
use crate::request::PageFetcher;
use crate::write::save_to_csv;
use crate::{
    cli::base_url, error_time, info_time, Result, CODE_COLUMN, ENVELOPES_COLUMN,
    LOCATION_COLUMN, REGISTERED_COLUMN, VALID_COLUMN,
};

/// One line of the output: column name -> value, in column order.
/// `None` marks a field the source page didn't have.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRow(pub IndexMap<String, Option<String>>);

impl OutputRow {
    /// Joins a listing row with its detail record. Without a detail record only
    /// the code and location are present.
    pub fn new(listing: &ListingRow, detail: Option<DetailRecord>) -> Self {
        let mut fields = IndexMap::new();
        fields.insert(CODE_COLUMN.to_owned(), Some(listing.code.clone()));
        fields.insert(LOCATION_COLUMN.to_owned(), Some(listing.location.clone()));

        if let Some(detail) = detail {
            fields.insert(REGISTERED_COLUMN.to_owned(), detail.registered);
            fields.insert(ENVELOPES_COLUMN.to_owned(), detail.envelopes);
            fields.insert(VALID_COLUMN.to_owned(), detail.valid);
            fields.extend(detail.parties.into_iter().map(|(name, votes)| (name, Some(votes))));
        }
        Self(fields)
    }

    pub fn get(&self, column: &str) -> Option<&Option<String>> {
        self.0.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Downloads the listing page, scrapes all municipalities and writes them to `output`.
/// If the listing page can't be downloaded the failure is logged and nothing is written.
pub async fn process_election_data(page_url: &str, output: &Path) -> Result<()> {
    let start_time = Local::now();
    let fetcher = PageFetcher::new()?;

    let Some(page) = fetcher.fetch_page(page_url).await else {
        error_time!("Failed to download or parse data from the URL.");
        return Ok(());
    };

    let base = base_url(page_url);
    let rows = extract_data(&fetcher, &page, &base, page_url).await?;
    save_to_csv(&rows, output)?;

    info_time!(start_time, "Terminating Elections Scraper...");
    Ok(())
}

/// Walks the listing regions in order and joins every municipality with its detail page.
/// A detail page that fails to download leaves its row with code and location only.
pub async fn extract_data(
    fetcher: &PageFetcher,
    listing_page: &Html,
    base_url: &str,
    page_url: &str,
) -> Result<Vec<OutputRow>> {
    let start_time = Local::now();
    info_time!("Extracting data from {page_url}...");

    let mut listing_rows = Vec::new();
    for table_index in 1..=LISTING_REGIONS {
        let table = extract_listing(listing_page, table_index)?;
        listing_rows.extend(table.rows());
    }

    let mut extracted = Vec::with_capacity(listing_rows.len());
    for row in &listing_rows {
        let detail_url = format!("{base_url}{}", row.detail_link);
        let detail = match fetcher.fetch_page(&detail_url).await {
            Some(detail_page) => Some(extract_detail(&detail_page)?),
            None => None,
        };
        extracted.push(OutputRow::new(row, detail));
    }

    info_time!(start_time, "Data extracted successfully.");
    Ok(extracted)
}
