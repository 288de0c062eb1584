//! Scraper for the Czech election results published on volby.cz.
//!
//! Takes a district listing page, follows every municipality's detail link
//! and collects registered voters, envelopes, valid votes and per-party votes
//! into a single CSV file.

mod error;
mod macros;

pub mod cli;
pub mod parse;
pub mod process;
pub mod request;
pub mod write;

pub use error::{Error, Result};

/// Per-request timeout.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
/// Only anchors whose href contains this marker lead to a municipality detail page.
pub const DETAIL_LINK_MARKER: &str = "ps311";
/// Number of leading `/`-separated segments of the source URL kept for the base URL.
pub const BASE_URL_SEGMENTS: usize = 5;

pub const CODE_COLUMN: &str = "Code";
pub const LOCATION_COLUMN: &str = "Location";
pub const REGISTERED_COLUMN: &str = "Registered";
pub const ENVELOPES_COLUMN: &str = "Envelopes";
pub const VALID_COLUMN: &str = "Valid";
