use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};

use crate::{Error, Result, DETAIL_LINK_MARKER};

/// Code cells (number + link to the detail page) and location cells of the three
/// listing regions, indexed by `region - 1`.
const LISTING_SELECTORS: [(&str, &str); 3] = [
    (
        r#"td.cislo[headers="t1sa1 t1sb1"]"#,
        r#"td[headers="t1sa1 t1sb2"]"#,
    ),
    (
        r#"td.cislo[headers="t2sa1 t2sb1"]"#,
        r#"td[headers="t2sa1 t2sb2"]"#,
    ),
    (
        r#"td.cislo[headers="t3sa1 t3sb1"]"#,
        r#"td[headers="t3sa1 t3sb2"]"#,
    ),
];

/// Party name cells and vote count cells of the two party sub-tables,
/// indexed by `table - 1`.
const PARTY_SELECTORS: [(&str, &str); 2] = [
    (
        r#"td.overflow_name[headers="t1sa1 t1sb2"]"#,
        r#"td.cislo[headers="t1sa2 t1sb3"]"#,
    ),
    (
        r#"td.overflow_name[headers="t2sa1 t2sb2"]"#,
        r#"td.cislo[headers="t2sa2 t2sb3"]"#,
    ),
];

pub const LISTING_REGIONS: usize = LISTING_SELECTORS.len();

const REGISTERED_SELECTOR: &str = r#"td.cislo[headers~="sa2"]"#;
const ENVELOPES_SELECTOR: &str = r#"td.cislo[headers~="sa3"]"#;
const VALID_SELECTOR: &str = r#"td.cislo[headers~="sa6"]"#;
const LINK_SELECTOR: &str = "a";

/// The three parallel sequences read from one listing region.
///
/// `links` only keeps anchors pointing at a detail page, so it can be shorter
/// than `codes` and lose its alignment with them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingTable {
    pub codes: Vec<String>,
    pub locations: Vec<String>,
    pub links: Vec<String>,
}

/// One municipality of the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub code: String,
    pub location: String,
    /// Relative to the base URL.
    pub detail_link: String,
}

impl ListingTable {
    /// Pairs the sequences by position, stopping at the shortest one.
    pub fn rows(&self) -> impl Iterator<Item = ListingRow> + '_ {
        self.codes
            .iter()
            .zip(&self.locations)
            .zip(&self.links)
            .map(|((code, location), link)| ListingRow {
                code: code.clone(),
                location: location.clone(),
                detail_link: link.clone(),
            })
    }
}

/// Fields scraped from a municipality detail page. Values keep the source
/// formatting (e.g. non-breaking spaces as thousands separators).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailRecord {
    pub registered: Option<String>,
    pub envelopes: Option<String>,
    pub valid: Option<String>,
    /// Party name -> vote count, in page order.
    pub parties: IndexMap<String, String>,
}

/// Extracts codes, locations and detail links from listing region `table_index` (1-based).
/// An unknown index or a region missing from the page yields empty sequences.
pub fn extract_listing(page: &Html, table_index: usize) -> Result<ListingTable> {
    let Some((code_sel, location_sel)) = table_index
        .checked_sub(1)
        .and_then(|i| LISTING_SELECTORS.get(i))
    else {
        return Ok(ListingTable::default());
    };

    let code_selector = create_selector(code_sel)?;
    let location_selector = create_selector(location_sel)?;
    let link_selector = create_selector(LINK_SELECTOR)?;

    let code_cells: Vec<ElementRef> = page.select(&code_selector).collect();

    let codes = code_cells.iter().map(|cell| cell_text(*cell)).collect();

    let locations = page
        .select(&location_selector)
        .map(|cell| match cell.select(&link_selector).next() {
            Some(anchor) => cell_text(anchor),
            None => cell_text(cell),
        })
        .collect();

    // Cells without a qualifying anchor are dropped, not replaced.
    let links = code_cells
        .iter()
        .filter_map(|cell| cell.select(&link_selector).next())
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.contains(DETAIL_LINK_MARKER))
        .map(str::to_owned)
        .collect();

    Ok(ListingTable {
        codes,
        locations,
        links,
    })
}

/// Extracts the voter statistics and party results from a detail page.
/// Missing cells become `None` or simply don't contribute a party.
pub fn extract_detail(page: &Html) -> Result<DetailRecord> {
    let registered = first_cell_text(page, REGISTERED_SELECTOR)?;
    let envelopes = first_cell_text(page, ENVELOPES_SELECTOR)?;
    let valid = first_cell_text(page, VALID_SELECTOR)?;

    let mut parties = IndexMap::new();
    for (name_sel, votes_sel) in PARTY_SELECTORS {
        let name_selector = create_selector(name_sel)?;
        let votes_selector = create_selector(votes_sel)?;

        let names = page.select(&name_selector).map(cell_text);
        let votes = page.select(&votes_selector).map(cell_text);
        // A later sub-table overwrites duplicate names in place.
        parties.extend(names.zip(votes));
    }

    Ok(DetailRecord {
        registered,
        envelopes,
        valid,
        parties,
    })
}

fn first_cell_text(page: &Html, sel_str: &str) -> Result<Option<String>> {
    let selector = create_selector(sel_str)?;
    Ok(page.select(&selector).next().map(cell_text))
}

#[inline]
fn cell_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_owned()
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}
