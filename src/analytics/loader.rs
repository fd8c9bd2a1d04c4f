use super::continent::ContinentClassifier;
use super::types::{ProductionRecord, ProductionTable};
use crate::error::{DashboardError, Result};
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

pub const COUNTRY: &str = "Country";
pub const YEAR: &str = "Year";
pub const PRODUCTION: &str = "Production";
pub const CONTINENT: &str = "Continent";
pub const SUB_COMMODITY: &str = "Sub-commodity";

/// Where and how to read the production table.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DatasetSource {
    pub path: PathBuf,
    pub separator: u8,
    /// Column read from the file but discarded, if present.
    pub dropped_column: Option<String>,
}

impl DatasetSource {
    /// Semicolon-separated source that discards `Sub-commodity`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            separator: b';',
            dropped_column: Some(SUB_COMMODITY.to_owned()),
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_dropped_column(mut self, column: Option<String>) -> Self {
        self.dropped_column = column;
        self
    }
}

/// Reads the raw table, dropping the discarded column.
pub fn read_frame(source: &DatasetSource) -> Result<DataFrame> {
    if !source.path.is_file() {
        return Err(DashboardError::NotFound(source.path.clone()));
    }

    let mut df = LazyCsvReader::new(&source.path)
        .with_separator(source.separator)
        .with_has_header(true)
        .with_infer_schema_length(None)
        .finish()?
        .collect()?;

    if let Some(name) = source.dropped_column.as_deref()
        && df.column(name).is_ok()
    {
        df = df.drop(name)?;
    }

    Ok(df)
}

fn required_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| DashboardError::MissingColumn(name.to_owned()))
}

fn malformed(row: usize, column: &str) -> DashboardError {
    DashboardError::MalformedRow {
        row,
        column: column.to_owned(),
    }
}

/// Converts a raw frame into enriched records.
///
/// # Errors
///
/// Fails with [`DashboardError::MissingColumn`] when `Country`, `Year` or
/// `Production` is absent, and with [`DashboardError::MalformedRow`] when a
/// row has an empty country or a missing / non-numeric year or production.
pub fn frame_to_records(
    df: &DataFrame,
    classifier: &ContinentClassifier,
) -> Result<Vec<ProductionRecord>> {
    let country_series = required_column(df, COUNTRY)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    // Read as float so fractional years are rejected rather than truncated
    let year_series = required_column(df, YEAR)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let production_series = required_column(df, PRODUCTION)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;

    let countries = country_series.str()?;
    let years = year_series.f64()?;
    let productions = production_series.f64()?;

    let mut records = Vec::with_capacity(df.height());
    for (idx, ((country, year), production)) in countries
        .into_iter()
        .zip(years)
        .zip(productions)
        .enumerate()
    {
        let row = idx + 1;
        let country = country
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| malformed(row, COUNTRY))?;
        let year = year
            .and_then(whole_year)
            .ok_or_else(|| malformed(row, YEAR))?;
        let production = production
            .filter(|p| p.is_finite())
            .ok_or_else(|| malformed(row, PRODUCTION))?;

        records.push(ProductionRecord::new(
            country,
            year,
            production,
            classifier.classify(country),
        ));
    }

    Ok(records)
}

/// `Some` for finite whole numbers within `i32` range.
fn whole_year(value: f64) -> Option<i32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}

fn count_duplicate_keys(records: &[ProductionRecord]) -> usize {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .iter()
        .filter(|r| !seen.insert((r.country.as_str(), r.year)))
        .count()
}

/// Reads and enriches the table. Always hits the filesystem; use
/// [`DatasetCache`] to read once per process.
pub fn load(source: &DatasetSource, classifier: &ContinentClassifier) -> Result<ProductionTable> {
    let start = std::time::Instant::now();
    let df = read_frame(source)?;
    let records = frame_to_records(&df, classifier)?;

    let duplicates = count_duplicate_keys(&records);
    if duplicates > 0 {
        tracing::warn!(
            "{} duplicate (Country, Year) rows in {}; their production is summed",
            duplicates,
            source.path.display()
        );
    }

    tracing::info!(
        "Loaded {} production records from {} in {:?}",
        records.len(),
        source.path.display(),
        start.elapsed()
    );

    Ok(ProductionTable::new(records))
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct SourceSignature {
    source: DatasetSource,
    len: u64,
    modified: Option<SystemTime>,
}

impl SourceSignature {
    fn of(source: &DatasetSource) -> Result<Self> {
        let metadata = std::fs::metadata(&source.path)
            .map_err(|_| DashboardError::NotFound(source.path.clone()))?;
        Ok(Self {
            source: source.clone(),
            len: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

/// Process-lifetime memo of loaded tables.
///
/// Keyed by the source and the file's size and modification time. Entries are
/// never evicted: once a signature is loaded, the same `Arc` is handed out for
/// the lifetime of the cache.
#[derive(Debug, Default)]
pub struct DatasetCache {
    classifier: ContinentClassifier,
    entries: HashMap<SourceSignature, Arc<ProductionTable>>,
    hits: u64,
    misses: u64,
}

impl DatasetCache {
    pub fn new(classifier: ContinentClassifier) -> Self {
        Self {
            classifier,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get_or_load(&mut self, source: &DatasetSource) -> Result<Arc<ProductionTable>> {
        let signature = SourceSignature::of(source)?;

        if let Some(table) = self.entries.get(&signature) {
            self.hits += 1;
            tracing::debug!("Dataset cache hit for {}", source.path.display());
            return Ok(Arc::clone(table));
        }

        self.misses += 1;
        let table = Arc::new(load(source, &self.classifier)?);
        self.entries.insert(signature, Arc::clone(&table));
        Ok(table)
    }

    pub fn classifier(&self) -> &ContinentClassifier {
        &self.classifier
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// File name suggested when no path is configured.
pub fn default_data_path() -> &'static Path {
    Path::new("production-of-nickel-mine.csv")
}
