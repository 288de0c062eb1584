use std::path::PathBuf;

use clap::Parser;

use crate::BASE_URL_SEGMENTS;

#[derive(Debug, Parser)]
#[command(name = "volby")]
#[command(about = "Scrapes municipal election results from volby.cz into a CSV file")]
pub struct Cli {
    /// Listing page of a district, e.g. https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=4&xnumnuts=4101
    #[arg(value_parser = parse_source_url)]
    pub url: String,

    /// Output CSV file, overwritten if it exists
    pub output: PathBuf,
}

fn parse_source_url(s: &str) -> Result<String, String> {
    if s.starts_with("http://") || s.starts_with("https://") {
        Ok(s.to_owned())
    } else {
        Err("Invalid URL or arguments in the wrong order. \
             Please provide the valid URL and the output filename."
            .to_owned())
    }
}

/// Keeps the first five `/`-separated pieces of `page_url` and appends a slash:
/// `https://www.volby.cz/pls/ps2017nss/ps32?..` becomes `https://www.volby.cz/pls/ps2017nss/`.
/// Shallower URLs collapse to whatever pieces they have.
pub fn base_url(page_url: &str) -> String {
    let mut base = page_url
        .split('/')
        .take(BASE_URL_SEGMENTS)
        .collect::<Vec<_>>()
        .join("/");
    base.push('/');
    base
}
