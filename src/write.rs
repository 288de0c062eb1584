use std::{fs, io, path::Path};

use chrono::Local;

use crate::process::OutputRow;
use crate::{info_time, Error, Result};

/// Writes the rows to `path` as CSV, replacing any existing file.
/// The file is only touched once every row has been serialized.
pub fn save_to_csv(rows: &[OutputRow], path: &Path) -> Result<()> {
    let start_time = Local::now();
    info_time!("Saving data to {}...", path.display());

    let mut buf = Vec::new();
    write_rows(rows, &mut buf)?;
    fs::write(path, buf)?;

    info_time!(start_time, "Data saved successfully.");
    Ok(())
}

/// Writes a header taken from the first row's columns, then one record per row.
///
/// A column of the header that a row lacks is written empty, same as a `None` value.
/// A row carrying a column the header doesn't have fails with [`Error::UnexpectedColumn`].
pub fn write_rows<W: io::Write>(rows: &[OutputRow], mut writer: W) -> Result<()> {
    let Some(first) = rows.first() else {
        // An empty record would come out as `""`; the header line of an empty run is blank.
        writer.write_all(b"\r\n")?;
        return Ok(());
    };
    let header: Vec<&str> = first.columns().collect();

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    wtr.write_record(&header)?;

    for row in rows {
        if let Some(extra) = row.columns().find(|col| !header.contains(col)) {
            return Err(Error::UnexpectedColumn(extra.to_owned()));
        }
        let record = header
            .iter()
            .map(|col| row.get(col).and_then(Option::as_deref).unwrap_or_default());
        wtr.write_record(record)?;
    }

    wtr.flush()?;
    Ok(())
}
