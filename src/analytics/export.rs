use super::loader::{CONTINENT, COUNTRY, PRODUCTION, YEAR};
use super::types::FilteredSet;
use crate::error::Result;
use polars::prelude::*;
use std::io::Write;
use std::path::Path;

/// File name offered by the download button.
pub const DEFAULT_EXPORT_NAME: &str = "nickel_filtered.csv";

/// Column-oriented copy of the filtered set.
pub fn to_frame(filtered: &FilteredSet) -> Result<DataFrame> {
    let countries: Vec<&str> = filtered.iter().map(|r| r.country.as_str()).collect();
    let years: Vec<i32> = filtered.iter().map(|r| r.year).collect();
    let productions: Vec<f64> = filtered.iter().map(|r| r.production).collect();
    let continents: Vec<&str> = filtered.iter().map(|r| r.continent.as_str()).collect();

    let df = df!(
        COUNTRY => countries,
        YEAR => years,
        PRODUCTION => productions,
        CONTINENT => continents
    )?;
    Ok(df)
}

/// Writes the filtered set as comma-separated CSV with a header row.
pub fn write_csv<W: Write>(filtered: &FilteredSet, writer: W) -> Result<()> {
    let mut df = to_frame(filtered)?;
    CsvWriter::new(writer)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)?;
    Ok(())
}

pub fn to_csv_bytes(filtered: &FilteredSet) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(filtered, &mut buf)?;
    Ok(buf)
}

pub fn export_csv(filtered: &FilteredSet, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(filtered, file)?;
    tracing::info!("Exported {} rows to {}", filtered.len(), path.display());
    Ok(())
}
