use crate::analyzers::{describe_city, DatasetAnalyzer};
use crate::cli::args::{Cli, Commands, DatasetKind};
use crate::config::ImportConfig;
use crate::error::{ImportError, Result};
use crate::lookup::{GeonameLookup, GeonamesClient};
use crate::models::City;
use crate::processors::collect_continents;
use crate::readers::{CityReader, CountyReader};
use crate::utils::constants::CONTINENT_IDS;
use crate::utils::{init_logging, ProgressReporter};
use crate::writers::JsonWriter;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;
    let config = ImportConfig::load(cli.config.as_deref())?;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Cities { input, output_file } => {
            let input = input.unwrap_or_else(|| config.cities_input.clone());
            let output = output_file.unwrap_or_else(|| config.cities_output.clone());
            import_cities(&input, &output, quiet)?;
        }

        Commands::Counties { input, output_file } => {
            let input = input.unwrap_or_else(|| config.counties_input.clone());
            let output = output_file.unwrap_or_else(|| config.counties_output.clone());
            import_counties(&input, &output, quiet)?;
        }

        Commands::Continents { output_file } => {
            let output = output_file.unwrap_or_else(|| config.continents_output.clone());
            let client = GeonamesClient::from_config(&config)?;
            import_continents(&client, &output, quiet).await?;
        }

        Commands::All => {
            // Fail on a missing account before spending time on the local files.
            let client = GeonamesClient::from_config(&config)?;
            import_cities(&config.cities_input, &config.cities_output, quiet)?;
            import_counties(&config.counties_input, &config.counties_output, quiet)?;
            import_continents(&client, &config.continents_output, quiet).await?;
        }

        Commands::Info {
            file,
            kind,
            sample,
            name,
            search,
        } => {
            let analyzer = DatasetAnalyzer::new().with_sample_size(sample);

            if name.is_some() || search.is_some() {
                if kind != DatasetKind::Cities {
                    return Err(ImportError::Unsupported(format!(
                        "--name and --search need --kind cities, got {}",
                        kind
                    )));
                }
                let cities = analyzer.load_cities(&file)?;
                if let Some(ref name) = name {
                    let matches = analyzer.cities_by_name(&cities, name);
                    print_matches(&format!("Cities named '{}'", name), &matches);
                }
                if let Some(ref query) = search {
                    let matches = analyzer.search_cities(&cities, query);
                    print_matches(&format!("Cities known as '{}'", query), &matches);
                }
                return Ok(());
            }

            println!("Analyzing {} file: {}", kind, file.display());
            let stats = analyzer.analyze_file(&file, kind)?;

            println!("\n{}", stats.detailed_summary());

            if !stats.samples.is_empty() {
                println!("\nSample entries (showing {}):", stats.samples.len());
                for (i, entry) in stats.samples.iter().enumerate() {
                    println!("{}. {}", i + 1, entry);
                }
            }
        }
    }

    Ok(())
}

fn print_matches(title: &str, matches: &[(&str, &City)]) {
    println!("{}: {} found", title, matches.len());
    for (i, (id, city)) in matches.iter().enumerate() {
        println!("{}. {}", i + 1, describe_city(id, city));
    }
}

/// Write the service message of a refused account to `out` and return the
/// exit status the process should end with. Other errors yield `None`.
pub fn fatal_exit_code<W: Write>(err: &ImportError, out: &mut W) -> std::io::Result<Option<i32>> {
    match err {
        ImportError::AccountStatus { message, .. } => {
            writeln!(out, "{}", message)?;
            out.flush()?;
            Ok(Some(1))
        }
        _ => Ok(None),
    }
}

/// Convert the gazetteer at `input` into a compact JSON map at `output`.
/// Returns the number of cities written.
pub fn import_cities(input: &Path, output: &Path, quiet: bool) -> Result<usize> {
    info!(input = %input.display(), "Importing cities");
    let progress = ProgressReporter::new_spinner("Reading cities...", quiet);

    let (cities, stats) = CityReader::new().read_cities(input, &progress)?;
    progress.finish_with_message(&format!("Read {} cities", cities.len()));
    info!("{}", stats.summary());

    let bytes = JsonWriter::compact().write(&cities, output)?;
    info!(output = %output.display(), cities = cities.len(), bytes, "Wrote cities");

    Ok(cities.len())
}

/// Convert the county CSV at `input` into a JSON array at `output`.
/// Returns the number of counties written.
pub fn import_counties(input: &Path, output: &Path, quiet: bool) -> Result<usize> {
    info!(input = %input.display(), "Importing US counties");
    let progress = ProgressReporter::new_spinner("Reading counties...", quiet);

    let counties = CountyReader::new().read_counties(input, &progress)?;
    progress.finish_with_message(&format!("Read {} counties", counties.len()));

    let bytes = JsonWriter::spaced_ascii().write(&counties, output)?;
    info!(output = %output.display(), counties = counties.len(), bytes, "Wrote counties");

    Ok(counties.len())
}

/// Look up the seven continents and write them keyed by continent code.
/// Nothing is written when any lookup fails or the account is refused.
pub async fn import_continents<L: GeonameLookup>(lookup: &L, output: &Path, quiet: bool) -> Result<usize> {
    info!("Importing continents");
    let progress = ProgressReporter::new_spinner("Looking up continents...", quiet);

    let continents = collect_continents(lookup, &CONTINENT_IDS, &progress).await?;
    progress.finish_with_message(&format!("Fetched {} continents", continents.len()));

    let bytes = JsonWriter::spaced_ascii().write(&continents, output)?;
    info!(output = %output.display(), continents = continents.len(), bytes, "Wrote continents");

    Ok(continents.len())
}
