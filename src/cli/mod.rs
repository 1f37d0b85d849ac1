pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DatasetKind};
pub use commands::{fatal_exit_code, import_cities, import_continents, import_counties, run};
