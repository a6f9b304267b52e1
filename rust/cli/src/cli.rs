//! Command-line definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "Hold'em hand evaluator, showdown resolver, and regret-matching advisor"
)]
pub struct HoldemCli {
    /// Print debug diagnostics to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal one hand to showdown and show every seat's best hand
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        /// Number of seats (2-4)
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=4))]
        seats: Option<u8>,
    },
    /// Evaluate 5 to 7 cards, e.g. --cards "As Ks Qs Js Ts"
    Eval {
        #[arg(long)]
        cards: String,
    },
    /// Recommend an action for one decision
    Advise {
        /// Two hole cards, e.g. "Ah Kh"
        #[arg(long)]
        hole: String,
        /// Visible community cards (0, 3, 4 or 5)
        #[arg(long, default_value = "")]
        board: String,
        #[arg(long, default_value_t = 0)]
        pot: u32,
        #[arg(long, default_value_t = 0)]
        to_call: u32,
        /// Chips already committed this hand (lost on a fold)
        #[arg(long, default_value_t = 0)]
        player_bet: u32,
        /// Remaining stack; defaults to the configured starting stack
        #[arg(long)]
        stack: Option<u32>,
        /// Raise size on top of the call; defaults to half the pot, at least 1
        #[arg(long)]
        raise: Option<u32>,
        #[arg(long, default_value_t = 1)]
        opponents: usize,
        #[arg(long)]
        iterations: Option<u32>,
        #[arg(long)]
        seed: Option<u64>,
        /// Legal actions, comma separated (e.g. "check,raise,fold");
        /// derived from stack and to-call when omitted
        #[arg(long)]
        allow: Option<String>,
        /// Regret file to resume from and save back to
        #[arg(long)]
        regrets: Option<PathBuf>,
        /// Emit the recommendation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play advisor-driven hands and write JSONL hand history
    Sim {
        #[arg(long)]
        hands: u64,
        #[arg(long, value_parser = clap::value_parser!(u8).range(2..=4))]
        seats: Option<u8>,
        #[arg(long)]
        seed: Option<u64>,
        /// Chips each seat must put in per street to stay in
        #[arg(long, default_value_t = 100)]
        bet: u32,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
