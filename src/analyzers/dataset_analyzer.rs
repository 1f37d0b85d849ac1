use crate::cli::DatasetKind;
use crate::error::Result;
use crate::models::{City, CityMap, ContinentMap, UsCounty};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct GeographicBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStatistics {
    pub kind: DatasetKind,
    pub total_entries: usize,
    /// Distinct countries for cities, states for counties, codes for continents.
    pub groups: BTreeSet<String>,
    pub total_population: Option<u64>,
    pub largest: Option<String>,
    pub bounds: Option<GeographicBounds>,
    pub samples: Vec<String>,
}

impl DatasetStatistics {
    pub fn detailed_summary(&self) -> String {
        let group_label = match self.kind {
            DatasetKind::Cities => "Countries",
            DatasetKind::Continents => "Continent codes",
            DatasetKind::Counties => "States",
        };

        let mut summary = format!(
            "Dataset: {}\nEntries: {}\n{}: {}",
            self.kind,
            self.total_entries,
            group_label,
            self.groups.len()
        );
        if self.kind == DatasetKind::Continents {
            let codes: Vec<&str> = self.groups.iter().map(String::as_str).collect();
            summary.push_str(&format!(" ({})", codes.join(", ")));
        }
        if let Some(population) = self.total_population {
            summary.push_str(&format!("\nTotal population: {}", population));
        }
        if let Some(ref largest) = self.largest {
            summary.push_str(&format!("\nLargest: {}", largest));
        }
        if let Some(ref b) = self.bounds {
            summary.push_str(&format!(
                "\nBounds: lat {:.4}..{:.4}, lon {:.4}..{:.4}",
                b.min_lat, b.max_lat, b.min_lon, b.max_lon
            ));
        }
        summary
    }
}

/// One line summary of a city, as printed by `info`.
pub fn describe_city(id: &str, city: &City) -> String {
    format!(
        "{}: {} ({}) {:.5}, {:.5}",
        id, city.name, city.countrycode, city.latitude, city.longitude
    )
}

/// Loads a generated dataset back and describes it.
pub struct DatasetAnalyzer {
    sample_size: usize,
}

impl DatasetAnalyzer {
    pub fn new() -> Self {
        Self { sample_size: 5 }
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn analyze_file(&self, path: &Path, kind: DatasetKind) -> Result<DatasetStatistics> {
        let content = fs::read(path)?;
        match kind {
            DatasetKind::Cities => Ok(self.analyze_cities(&self.load_cities(path)?)),
            DatasetKind::Continents => {
                let continents: ContinentMap = serde_json::from_slice(&content)?;
                Ok(self.analyze_continents(&continents))
            }
            DatasetKind::Counties => {
                let counties: Vec<UsCounty> = serde_json::from_slice(&content)?;
                Ok(self.analyze_counties(&counties))
            }
        }
    }

    pub fn load_cities(&self, path: &Path) -> Result<CityMap> {
        let content = fs::read(path)?;
        Ok(serde_json::from_slice(&content)?)
    }

    /// Cities whose name equals `name`, ignoring case, in file order.
    pub fn cities_by_name<'a>(&self, cities: &'a CityMap, name: &str) -> Vec<(&'a str, &'a City)> {
        let name = name.to_lowercase();
        cities
            .iter()
            .filter(|(_, city)| city.name.to_lowercase() == name)
            .map(|(id, city)| (id.as_str(), city))
            .collect()
    }

    /// Cities with an alternate name equal to `query`, ignoring case.
    pub fn search_cities<'a>(&self, cities: &'a CityMap, query: &str) -> Vec<(&'a str, &'a City)> {
        let query = query.to_lowercase();
        cities
            .iter()
            .filter(|(_, city)| city.alternatenames.iter().any(|alt| alt.to_lowercase() == query))
            .map(|(id, city)| (id.as_str(), city))
            .collect()
    }

    pub fn analyze_cities(&self, cities: &CityMap) -> DatasetStatistics {
        let mut bounds: Option<GeographicBounds> = None;
        for city in cities.values() {
            let b = bounds.get_or_insert(GeographicBounds {
                min_lat: city.latitude,
                max_lat: city.latitude,
                min_lon: city.longitude,
                max_lon: city.longitude,
            });
            b.min_lat = b.min_lat.min(city.latitude);
            b.max_lat = b.max_lat.max(city.latitude);
            b.min_lon = b.min_lon.min(city.longitude);
            b.max_lon = b.max_lon.max(city.longitude);
        }

        let largest = cities
            .values()
            .max_by_key(|city| city.population)
            .map(|city| format!("{} ({}, population {})", city.name, city.countrycode, city.population));

        DatasetStatistics {
            kind: DatasetKind::Cities,
            total_entries: cities.len(),
            groups: cities.values().map(|city| city.countrycode.clone()).collect(),
            total_population: Some(cities.values().map(|city| city.population).sum()),
            largest,
            bounds,
            samples: cities
                .iter()
                .take(self.sample_size)
                .map(|(id, city)| describe_city(id, city))
                .collect(),
        }
    }

    pub fn analyze_continents(&self, continents: &ContinentMap) -> DatasetStatistics {
        DatasetStatistics {
            kind: DatasetKind::Continents,
            total_entries: continents.len(),
            groups: continents.keys().cloned().collect(),
            total_population: None,
            largest: None,
            bounds: None,
            samples: continents
                .iter()
                .take(self.sample_size)
                .map(|(code, payload)| {
                    let name = payload.get("name").and_then(|n| n.as_str()).unwrap_or("?");
                    format!("{}: {}", code, name)
                })
                .collect(),
        }
    }

    pub fn analyze_counties(&self, counties: &[UsCounty]) -> DatasetStatistics {
        DatasetStatistics {
            kind: DatasetKind::Counties,
            total_entries: counties.len(),
            groups: counties.iter().map(|county| county.state.clone()).collect(),
            total_population: None,
            largest: None,
            bounds: None,
            samples: counties
                .iter()
                .take(self.sample_size)
                .map(|county| format!("{}: {}, {}", county.fips, county.name, county.state))
                .collect(),
        }
    }
}

impl Default for DatasetAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
