use clap::Parser;
use geonames_import::cli::{fatal_exit_code, run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => Ok(()),
        Err(err) => {
            if let Some(code) = fatal_exit_code(&err, &mut std::io::stdout())? {
                std::process::exit(code);
            }
            Err(err.into())
        }
    }
}
