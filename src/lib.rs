//! Import GeoNames reference data into flat JSON datasets.
//!
//! Three independent jobs, each a single pass over its source:
//!
//! - cities: the tab separated gazetteer dump, keyed by geonameid
//! - continents: the seven continents fetched from the GeoNames web service
//! - counties: the comma separated US county list
pub mod analyzers;
pub mod cli;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod processors;
pub mod readers;
pub mod utils;
pub mod writers;

pub use error::{ImportError, Result};
