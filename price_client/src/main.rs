//! Price Client — looks up the last recorded price of a stock ticker (Alpha Vantage)
//! or one or more crypto symbols (CoinGecko) and prints it.
//!
//! Usage example (CLI):
//! ```bash
//! price_client                                   # fully interactive
//! price_client --market stocks --symbol ibm
//! price_client --market crypto --tier free --symbol btc,eth
//! ```
//!
//! API keys and the log level come from the environment or a `.env` file.
//! See `price_common::settings` for the variables.
#![warn(missing_docs)]
mod args;
mod error;
mod prompt;
mod result;

use std::process::ExitCode;

use crate::args::Args;
use crate::prompt::{display_price, pick_api_client, prompt_for_symbol};
use crate::result::Result;
use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};
use price_common::{ClientFactory, Settings};

/// One lookup: pick a client, read the symbol, print the price(s).
fn run(args: &Args, settings: Settings) -> Result<()> {
    settings.warn_missing_keys();
    let factory = ClientFactory::new(settings);

    let client = pick_api_client(&factory, args)?;
    let input = prompt_for_symbol(args)?;
    info!("Looking up '{}' on the {} market", input, client.market());

    for (symbol, price) in client.lookup(&input)? {
        display_price(symbol.as_str(), price);
    }
    Ok(())
}

fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    let settings = Settings::from_env();
    init_logger(
        settings
            .as_ref()
            .map(|settings| settings.log_level)
            .unwrap_or(LevelFilter::Info),
    );

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Could not read .env file: {}", e),
    }

    let args = Args::parse();
    let outcome = settings
        .map_err(Into::into)
        .and_then(|settings| run(&args, settings));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Unable to show the requested information: {}", e);
            eprintln!("Unable to show the requested information. Check the log for details.");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
