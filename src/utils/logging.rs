use crate::error::Result;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, Level};

/// Install the global fmt subscriber. Logs go to stderr unless `log_file` is given.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case that subscriber keeps receiving events.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<bool> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    match installed {
        Ok(()) => Ok(true),
        Err(err) => {
            debug!("Keeping existing log subscriber: {}", err);
            Ok(false)
        }
    }
}
