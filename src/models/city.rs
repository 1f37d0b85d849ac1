use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Cities keyed by the raw geonameid string of their source row, in file order.
pub type CityMap = IndexMap<String, City>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub geonameid: u32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub countrycode: String,
    pub population: u64,
    pub timezone: String,
    pub admin1code: String,
    pub alternatenames: Vec<String>,
}

impl City {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        geonameid: u32,
        name: String,
        latitude: f64,
        longitude: f64,
        countrycode: String,
        population: u64,
        timezone: String,
        admin1code: String,
        alternatenames: Vec<String>,
    ) -> Self {
        Self {
            geonameid,
            name,
            latitude,
            longitude,
            countrycode,
            population,
            timezone,
            admin1code,
            alternatenames,
        }
    }

    /// Split a comma-joined alternate names field. An empty field yields one empty name.
    pub fn split_alternate_names(field: &str) -> Vec<String> {
        field.split(',').map(str::to_string).collect()
    }
}
