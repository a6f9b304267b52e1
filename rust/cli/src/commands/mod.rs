//! Command handler modules for the holdem CLI.
//!
//! Each command lives in its own module with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed as parameters
//! - All errors propagated via `CliError`

pub mod advise;
pub mod cfg;
pub mod deal;
pub mod eval;
pub mod sim;

pub use advise::{AdviseArgs, handle_advise_command};
pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use sim::handle_sim_command;
