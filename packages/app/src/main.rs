#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use repopulse_app::{AppConfig, Cli, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_cli(Cli::parse(), chrono::Utc::now());

    logging::init(&config.log)?;

    repopulse_app::run(&config)
        .await
        .inspect_err(|e| log::error!("{e:?}"))
}
