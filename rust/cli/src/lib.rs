//! # holdem CLI Library
//!
//! Command-line driver for the Hold'em engine and advisor.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Available Subcommands
//!
//! - `deal`: Deal one hand to showdown
//! - `eval`: Rank 5 to 7 cards
//! - `advise`: Recommend an action with the regret-matching advisor
//! - `sim`: Play advisor-driven hands and write JSONL hand history
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;
pub mod cli;
pub mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
mod logging;
pub mod ui;

use cli::{Commands, HoldemCli};
use commands::{
    AdviseArgs, handle_advise_command, handle_cfg_command, handle_deal_command,
    handle_eval_command, handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["deal", "eval", "advise", "sim", "cfg"];

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["holdem", "eval", "--cards", "As Ks Qs Js Ts"];
/// let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    write_or_exit!(out, "{}", e);
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Usage: holdem <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: holdem --help");
                    exit_code::ERROR
                }
            };
        }
    };

    logging::init_logging(cli.verbose);

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Deal { seed, seats } => handle_deal_command(seed, seats, out),
        Commands::Eval { cards } => handle_eval_command(&cards, out),
        Commands::Advise {
            hole,
            board,
            pot,
            to_call,
            player_bet,
            stack,
            raise,
            opponents,
            iterations,
            seed,
            allow,
            regrets,
            json,
        } => handle_advise_command(
            AdviseArgs {
                hole,
                board,
                pot,
                to_call,
                player_bet,
                stack,
                raise,
                opponents,
                iterations,
                seed,
                allow,
                regrets,
                json,
            },
            out,
            err,
        ),
        Commands::Sim {
            hands,
            seats,
            seed,
            bet,
            output,
        } => handle_sim_command(hands, seats, seed, bet, output, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_types_preserve_all_subcommands() {
        let commands = vec![
            vec!["holdem", "cfg"],
            vec!["holdem", "deal"],
            vec!["holdem", "deal", "--seed", "1", "--seats", "2"],
            vec!["holdem", "eval", "--cards", "As Ks Qs Js Ts"],
            vec!["holdem", "advise", "--hole", "Ah Kh"],
            vec![
                "holdem", "advise", "--hole", "Ah Kh", "--board", "7h 2h 9c", "--pot", "100",
                "--to-call", "50", "--allow", "call,fold", "--json",
            ],
            vec!["holdem", "sim", "--hands", "1"],
            vec!["holdem", "-v", "sim", "--hands", "1", "--bet", "50"],
        ];
        for cmd_args in commands {
            let result = HoldemCli::try_parse_from(&cmd_args);
            assert!(result.is_ok(), "Failed to parse: {:?}", cmd_args);
        }
        assert_eq!(COMMANDS.len(), 5);
    }

    #[test]
    fn test_seat_range_is_enforced_by_clap() {
        assert!(HoldemCli::try_parse_from(["holdem", "deal", "--seats", "1"]).is_err());
        assert!(HoldemCli::try_parse_from(["holdem", "deal", "--seats", "5"]).is_err());
        assert!(HoldemCli::try_parse_from(["holdem", "sim", "--hands", "1", "--seats", "4"]).is_ok());
    }
}
