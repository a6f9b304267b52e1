//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of every value
//! (`default`, `file`, or `env`).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "seats": {
//!     "value": 4,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "seats": {
            "value": config.seats,
            "source": sources.seats,
        },
        "iterations": {
            "value": config.iterations,
            "source": sources.iterations,
        },
        "starting_stack": {
            "value": config.starting_stack,
            "source": sources.starting_stack,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
