pub mod city_reader;
pub mod county_reader;

pub use city_reader::{collect_cities, parse_city_record, CityReader, ImportStats};
pub use county_reader::{parse_county_record, CountyReader};
