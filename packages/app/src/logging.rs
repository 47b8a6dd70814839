//! Logger installation for the binary. Library crates only use the `log`
//! facade.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use log::LevelFilter;

use crate::cli::{LogConfig, LogDestination};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to open log file {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to install logger: {0}")]
    Init(#[from] log::SetLoggerError),
}

/// Our own crates log at INFO (DEBUG with `debug`), everything else at WARN.
/// `RUST_LOG` can still override either.
#[must_use]
pub fn builder(config: &LogConfig) -> env_logger::Builder {
    let level = if config.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Warn)
        .filter_module("repopulse", level)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} | {} | {} | {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .parse_default_env();
    builder
}

/// Where records go: stdout, or appended to the configured file.
///
/// # Errors
///
/// * If the log file cannot be opened
pub fn open_target(destination: &LogDestination) -> Result<env_logger::Target, LoggingError> {
    match destination {
        LogDestination::Stdout => Ok(env_logger::Target::Stdout),
        LogDestination::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::OpenFile {
                    path: path.clone(),
                    source,
                })?;
            Ok(env_logger::Target::Pipe(Box::new(file)))
        }
    }
}

/// Install the global logger.
///
/// # Errors
///
/// * If the log file cannot be opened
/// * If a logger was already installed
pub fn init(config: &LogConfig) -> Result<(), LoggingError> {
    let mut builder = builder(config);
    builder.target(open_target(&config.destination)?);
    builder.try_init()?;

    log::debug!(
        "Logging configured (dest={:?}, debug={})",
        config.destination,
        config.debug
    );
    Ok(())
}
