//! Errors raised by the interactive front end.
use price_common::PriceError;
use thiserror::Error;

/// Anything that can stop a lookup, from the prompts down to the providers.
#[derive(Error, Debug)]
pub enum CliError {
    /// Failure reported by a price client, the factory or the settings.
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Terminal interaction failed.
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// The menu was dismissed without picking an option.
    #[error("No option selected")]
    NoSelection,
}
