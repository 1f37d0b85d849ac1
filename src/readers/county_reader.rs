use crate::error::{ImportError, Result};
use crate::models::UsCounty;
use crate::utils::constants::COUNTY_MIN_FIELDS;
use crate::utils::ProgressReporter;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const STATE: usize = 0;
const STATE_FIPS: usize = 1;
const COUNTY_FIPS: usize = 2;
const NAME: usize = 3;

/// Reads the comma separated US county list (`state,statefp,countyfp,name,...`).
///
/// The first row is a header and is discarded; a file without one is rejected.
#[derive(Debug, Default)]
pub struct CountyReader;

impl CountyReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_counties(&self, path: &Path, progress: &ProgressReporter) -> Result<Vec<UsCounty>> {
        let file = File::open(path)?;
        self.read_counties_from(file, progress)
    }

    pub fn read_counties_from<R: Read>(
        &self,
        source: R,
        progress: &ProgressReporter,
    ) -> Result<Vec<UsCounty>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        if reader.headers()?.is_empty() {
            return Err(ImportError::InvalidFormat(
                "county file is empty, expected a header row".to_string(),
            ));
        }

        let mut counties = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let record = row?;
            let line = record.position().map_or(index as u64 + 1, |p| p.line());
            counties.push(parse_county_record(&record, line)?);
            progress.tick_row(index as u64 + 1);
        }

        Ok(counties)
    }
}

pub fn parse_county_record(record: &StringRecord, line: u64) -> Result<UsCounty> {
    if record.len() < COUNTY_MIN_FIELDS {
        return Err(ImportError::InvalidFormat(format!(
            "line {}: expected at least {} columns, found {}",
            line,
            COUNTY_MIN_FIELDS,
            record.len()
        )));
    }

    Ok(UsCounty::new(
        &record[STATE_FIPS],
        &record[COUNTY_FIPS],
        record[NAME].to_string(),
        record[STATE].to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_counties_file() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "STATE,STATEFP,COUNTYFP,COUNTYNAME,CLASSFP")?;
        writeln!(temp_file, "AL,01,001,Autauga County,H1")?;
        writeln!(temp_file, "AL,01,003,Baldwin County,H1")?;
        writeln!(temp_file, "PR,72,001,\"Adjuntas Municipio\",H1")?;
        writeln!(temp_file, "AL,01,001,Autauga County,H1")?;

        let counties = CountyReader::new().read_counties(temp_file.path(), &ProgressReporter::silent())?;

        assert_eq!(counties.len(), 4);
        assert_eq!(
            counties[0],
            UsCounty {
                fips: "01001".to_string(),
                name: "Autauga County".to_string(),
                state: "AL".to_string(),
            }
        );
        assert_eq!(counties[2].fips, "72001");
        assert_eq!(counties[2].name, "Adjuntas Municipio");
        // Duplicates are kept in input order
        assert_eq!(counties[3], counties[0]);
        Ok(())
    }

    #[test]
    fn test_short_row_is_an_error() {
        let content = "STATE,STATEFP,COUNTYFP,COUNTYNAME\nAL,01,001\n";
        let err = CountyReader::new()
            .read_counties_from(content.as_bytes(), &ProgressReporter::silent())
            .unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let err = CountyReader::new()
            .read_counties_from("".as_bytes(), &ProgressReporter::silent())
            .unwrap_err();
        assert!(matches!(err, ImportError::InvalidFormat(_)));
    }

    #[test]
    fn test_header_only_yields_empty_list() -> Result<()> {
        let content = "STATE,STATEFP,COUNTYFP,COUNTYNAME\n";
        let counties = CountyReader::new().read_counties_from(content.as_bytes(), &ProgressReporter::silent())?;
        assert!(counties.is_empty());
        Ok(())
    }
}
