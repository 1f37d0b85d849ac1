pub mod city;
pub mod continent;
pub mod county;

pub use city::{City, CityMap};
pub use continent::{continent_code, ContinentMap, ServiceStatus};
pub use county::UsCounty;
