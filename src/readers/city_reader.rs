use crate::error::{ImportError, Result};
use crate::models::{City, CityMap};
use crate::utils::constants::GAZETTEER_FIELD_COUNT;
use crate::utils::ProgressReporter;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

// Column positions in the GeoNames gazetteer dump (see the dump readme).
const GEONAMEID: usize = 0;
const NAME: usize = 1;
const ALTERNATENAMES: usize = 3;
const LATITUDE: usize = 4;
const LONGITUDE: usize = 5;
const COUNTRY_CODE: usize = 8;
const ADMIN1_CODE: usize = 10;
const POPULATION: usize = 14;
const TIMEZONE: usize = 17;

/// Counters describing one pass over a source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub duplicate_keys: usize,
}

impl ImportStats {
    pub fn summary(&self) -> String {
        format!(
            "{} rows read, {} skipped, {} duplicate keys",
            self.rows_read, self.rows_skipped, self.duplicate_keys
        )
    }
}

/// Reads the tab separated GeoNames city dump (`cities15000.txt` and friends).
///
/// The first row is a header and is discarded; a file without one is rejected.
#[derive(Debug, Default)]
pub struct CityReader;

impl CityReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every city of a gazetteer file into a map keyed by geonameid
    pub fn read_cities(&self, path: &Path, progress: &ProgressReporter) -> Result<(CityMap, ImportStats)> {
        let file = File::open(path)?;
        self.read_cities_from(file, progress)
    }

    pub fn read_cities_from<R: Read>(
        &self,
        source: R,
        progress: &ProgressReporter,
    ) -> Result<(CityMap, ImportStats)> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .quoting(false)
            .flexible(true)
            .from_reader(source);

        if reader.headers()?.is_empty() {
            return Err(ImportError::InvalidFormat(
                "gazetteer file is empty, expected a header row".to_string(),
            ));
        }

        let rows = reader.records().map(|row| {
            if let Ok(ref record) = row {
                progress.tick_row(record.position().map_or(0, |p| p.line()));
            }
            row.map_err(ImportError::from)
        });

        collect_cities(CityMap::new(), rows)
    }
}

/// Fold gazetteer rows into `cities`, returning the grown map.
///
/// Rows with an empty geonameid are skipped; a later row with the same key
/// replaces the earlier one. The first malformed row aborts the whole pass.
pub fn collect_cities<I>(mut cities: CityMap, rows: I) -> Result<(CityMap, ImportStats)>
where
    I: IntoIterator<Item = Result<StringRecord>>,
{
    let mut stats = ImportStats::default();

    for row in rows {
        let record = row?;
        stats.rows_read += 1;
        let line = record.position().map_or(stats.rows_read as u64, |p| p.line());

        match parse_city_record(&record, line)? {
            Some((key, city)) => {
                if let Some(previous) = cities.insert(key, city) {
                    stats.duplicate_keys += 1;
                    warn!(geonameid = previous.geonameid, line, "Duplicate geonameid, keeping last row");
                }
            }
            None => {
                stats.rows_skipped += 1;
                debug!(line, "Skipping row without geonameid");
            }
        }
    }

    Ok((cities, stats))
}

/// Parse a single gazetteer row into its map key and city.
///
/// Returns `Ok(None)` when the geonameid column is empty.
pub fn parse_city_record(record: &StringRecord, line: u64) -> Result<Option<(String, City)>> {
    if record.len() != GAZETTEER_FIELD_COUNT {
        return Err(ImportError::InvalidFormat(format!(
            "line {}: expected {} columns, found {}",
            line,
            GAZETTEER_FIELD_COUNT,
            record.len()
        )));
    }

    let field = |index: usize| record.get(index).unwrap_or_default();

    let key = field(GEONAMEID);
    if key.is_empty() {
        return Ok(None);
    }

    let city = City::new(
        parse_number(key, "geonameid", line)?,
        field(NAME).to_string(),
        parse_number(field(LATITUDE), "latitude", line)?,
        parse_number(field(LONGITUDE), "longitude", line)?,
        field(COUNTRY_CODE).to_string(),
        parse_number(field(POPULATION), "population", line)?,
        field(TIMEZONE).to_string(),
        field(ADMIN1_CODE).to_string(),
        City::split_alternate_names(field(ALTERNATENAMES)),
    );

    Ok(Some((key.to_string(), city)))
}

fn parse_number<T: FromStr>(value: &str, name: &str, line: u64) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| {
        ImportError::InvalidFormat(format!("line {}: invalid {}: '{}'", line, name, value))
    })
}
