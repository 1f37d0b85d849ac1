use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geonames-import")]
#[command(about = "Convert GeoNames reference data into flat JSON datasets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Hide progress spinners")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert the tab separated city dump into JSON keyed by geonameid
    Cities {
        #[arg(short, long, help = "Gazetteer file [default: data/cities15000.txt]")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Output JSON file [default: src/cities.json]")]
        output_file: Option<PathBuf>,
    },

    /// Fetch the seven continents from the GeoNames web service (needs GEONAMES_USER)
    Continents {
        #[arg(short, long, help = "Output JSON file [default: src/continents.json]")]
        output_file: Option<PathBuf>,
    },

    /// Convert the comma separated US county list into a JSON array
    Counties {
        #[arg(short, long, help = "County CSV file [default: data/us_counties.txt]")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Output JSON file [default: src/us_counties.json]")]
        output_file: Option<PathBuf>,
    },

    /// Run the city, county and continent imports with configured paths
    All,

    /// Display information about a generated JSON file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, value_enum)]
        kind: DatasetKind,

        #[arg(short, long, default_value = "5")]
        sample: usize,

        #[arg(long, help = "List cities whose name matches, ignoring case (cities only)")]
        name: Option<String>,

        #[arg(long, help = "List cities with a matching alternate name, ignoring case (cities only)")]
        search: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetKind {
    Cities,
    Continents,
    Counties,
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DatasetKind::Cities => "cities",
            DatasetKind::Continents => "continents",
            DatasetKind::Counties => "counties",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cities_with_paths() {
        let cli = Cli::try_parse_from([
            "geonames-import",
            "--verbose",
            "cities",
            "-i",
            "data/cities500.txt",
            "-o",
            "out/cities.json",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Cities { input, output_file } => {
                assert_eq!(input, Some(PathBuf::from("data/cities500.txt")));
                assert_eq!(output_file, Some(PathBuf::from("out/cities.json")));
            }
            _ => panic!("expected cities command"),
        }
    }

    #[test]
    fn test_parse_info_kind() {
        let cli = Cli::try_parse_from(["geonames-import", "info", "-f", "src/continents.json", "-k", "continents"])
            .unwrap();

        match cli.command {
            Commands::Info { kind, sample, .. } => {
                assert_eq!(kind, DatasetKind::Continents);
                assert_eq!(sample, 5);
            }
            _ => panic!("expected info command"),
        }
    }

    #[test]
    fn test_parse_info_name_and_search() {
        let cli = Cli::try_parse_from([
            "geonames-import",
            "info",
            "-f",
            "src/cities.json",
            "-k",
            "cities",
            "--name",
            "madrid",
            "--search",
            "Madrit",
        ])
        .unwrap();

        match cli.command {
            Commands::Info { name, search, .. } => {
                assert_eq!(name.as_deref(), Some("madrid"));
                assert_eq!(search.as_deref(), Some("Madrit"));
            }
            _ => panic!("expected info command"),
        }
    }
}
