//! Command-line arguments for the price client.
//!
//! Every flag is optional; anything left out is asked for interactively.
use clap::Parser;
use price_common::{Market, Tier};

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Look up the last recorded price of a stock or crypto symbol", long_about = None)]
pub struct Args {
    /// Market to query. Skips the market menu.
    #[clap(long, value_enum)]
    pub market: Option<Market>,

    /// Subscription tier. Only used by the crypto market.
    #[clap(long, value_enum)]
    pub tier: Option<Tier>,

    /// Symbol to price, e.g. `ibm` or `btc`. Crypto accepts a comma separated list.
    #[clap(long)]
    pub symbol: Option<String>,
}
