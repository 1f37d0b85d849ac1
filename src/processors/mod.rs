pub mod continent_collector;

pub use continent_collector::{absorb_continent, collect_continents};
