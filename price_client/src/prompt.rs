//! Interactive menus and prompts.
//!
//! Each question is skipped when the matching command-line flag was given.
use dialoguer::Input;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use log::debug;
use price_common::{Client, ClientFactory, Market, Tier};
use strum::IntoEnumIterator;

use crate::args::Args;
use crate::error::CliError;
use crate::result::Result;

/// Crypto tiers offered in the menu.
const CRYPTO_TIERS: [Tier; 2] = [Tier::Free, Tier::Premium];

/// Asks for a market (and a tier for crypto), then builds the client.
pub fn pick_api_client(factory: &ClientFactory, args: &Args) -> Result<Client> {
    let market = match args.market {
        Some(market) => market,
        None => {
            let markets: Vec<Market> = Market::iter().collect();
            let index = select(
                "Pick one of the following to find out some of the prices",
                &markets,
            )?;
            markets[index]
        }
    };

    let tier = match market {
        Market::Stocks => {
            if let Some(tier) = args.tier {
                debug!("pick_api_client: tier {tier} has no effect on stocks");
            }
            Tier::Default
        }
        Market::Crypto => match args.tier {
            Some(tier) => tier,
            None => CRYPTO_TIERS[select("Pick a CoinGecko subscription", &CRYPTO_TIERS)?],
        },
    };

    debug!("pick_api_client: {market} / {tier}");
    Ok(factory.build(market, tier)?)
}

/// Asks for the symbol to price, unless one was passed on the command line.
pub fn prompt_for_symbol(args: &Args) -> Result<String> {
    if let Some(symbol) = &args.symbol {
        return Ok(symbol.trim().to_lowercase());
    }

    let symbol = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Please enter the symbol to find the last recorded price")
        .interact_text()?;
    Ok(symbol.trim().to_lowercase())
}

/// Prints the price line for one symbol.
pub fn display_price(symbol: &str, price: f64) {
    println!("{}", format_price(symbol, price));
}

/// `The last recorded price of 'BTC' is $ 65000.1.`
pub fn format_price(symbol: &str, price: f64) -> String {
    format!(
        "The last recorded price of '{}' is $ {:?}.",
        symbol.to_uppercase(),
        price
    )
}

fn select<T: ToString>(prompt: &str, options: &[T]) -> Result<usize> {
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(options)
        .default(0)
        .interact_opt()?;

    let index = selection.ok_or(CliError::NoSelection)?;
    debug!("select: '{}'", options[index].to_string());
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_line_uppercases_the_symbol() {
        assert_eq!(
            format_price("btc", 65000.1),
            "The last recorded price of 'BTC' is $ 65000.1."
        );
        assert_eq!(
            format_price("ibm", 170.0),
            "The last recorded price of 'IBM' is $ 170.0."
        );
    }

    #[test]
    fn symbol_flag_skips_the_prompt() {
        let args = Args {
            market: None,
            tier: None,
            symbol: Some(String::from("  ETH ")),
        };
        assert_eq!(prompt_for_symbol(&args).unwrap(), "eth");
    }
}
