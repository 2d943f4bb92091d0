//! Result alias for the front end.
use crate::error::CliError;

/// `Result` with `CliError` as the default error.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
