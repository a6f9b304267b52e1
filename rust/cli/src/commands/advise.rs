//! Advise command handler: one regret-matching recommendation.
//!
//! Regrets can be carried between invocations with `--regrets FILE`; the file
//! is created on first use and rewritten after every run.

use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

use holdem_advisor::action::Action;
use holdem_advisor::advisor::Advisor;
use holdem_advisor::regret::RegretState;
use holdem_advisor::reward::DecisionContext;
use holdem_engine::cards::{Card, parse_cards};
use holdem_engine::errors::EngineError;
use holdem_engine::rules::Capabilities;

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_board, format_distribution};
use crate::ui;

/// Parsed `advise` arguments.
#[derive(Debug, Clone, Default)]
pub struct AdviseArgs {
    pub hole: String,
    pub board: String,
    pub pot: u32,
    pub to_call: u32,
    pub player_bet: u32,
    pub stack: Option<u32>,
    pub raise: Option<u32>,
    pub opponents: usize,
    pub iterations: Option<u32>,
    pub seed: Option<u64>,
    pub allow: Option<String>,
    pub regrets: Option<PathBuf>,
    pub json: bool,
}

pub fn handle_advise_command(
    args: AdviseArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;

    let hole = parse_cards(&args.hole)?;
    let hole: [Card; 2] = hole.as_slice().try_into().map_err(|_| {
        CliError::InvalidInput(format!("--hole needs exactly 2 cards, got {}", hole.len()))
    })?;
    let board = parse_cards(&args.board)?;
    if !matches!(board.len(), 0 | 3 | 4 | 5) {
        return Err(CliError::InvalidInput(format!(
            "--board needs 0, 3, 4 or 5 cards, got {}",
            board.len()
        )));
    }
    check_unique(&hole, &board)?;
    if args.opponents == 0 {
        return Err(CliError::InvalidInput("--opponents must be >= 1".into()));
    }

    let stack = args.stack.unwrap_or(cfg.starting_stack);
    let raise = args.raise.unwrap_or((args.pot / 2).max(1));
    let capabilities = match &args.allow {
        Some(list) => parse_allow(list)?,
        None => Capabilities::for_spot(stack, args.to_call, raise),
    };

    let mut ctx = DecisionContext::new(capabilities).with_hand(&hole, &board)?;
    ctx.pot = args.pot;
    ctx.to_call = args.to_call;
    ctx.player_bet = args.player_bet;
    ctx.stack = stack;
    ctx.raise_amount = raise;
    ctx.opponents = args.opponents;

    let state = match &args.regrets {
        Some(path) if path.exists() => RegretState::load(path)?,
        Some(path) => {
            ui::display_warning(
                err,
                &format!("{} not found, starting from zero regrets", path.display()),
            )?;
            RegretState::new()
        }
        None => RegretState::new(),
    };
    let iterations = args.iterations.unwrap_or(cfg.iterations);
    let seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);

    let mut advisor = Advisor::with_state(state, seed);
    let rec = advisor.advise(&ctx, iterations)?;
    if let Some(path) = &args.regrets {
        advisor.state().save(path)?;
        tracing::debug!(path = %path.display(), "regrets saved");
    }

    if args.json {
        let distribution: serde_json::Map<String, serde_json::Value> = Action::ALL
            .iter()
            .map(|a| (a.name().to_string(), rec.distribution[a.index()].into()))
            .collect();
        let report = serde_json::json!({
            "action": rec.action,
            "probability": rec.probability,
            "confidence": rec.confidence(),
            "distribution": distribution,
            "strength": ctx.strength,
            "improvement": ctx.improvement,
            "capabilities": ctx.capabilities,
        });
        let json_str = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
        writeln!(out, "{}", json_str)?;
        return Ok(());
    }

    writeln!(out, "Hole: {}  Board: {}", format_board(&hole), format_board(&board))?;
    writeln!(
        out,
        "Strength: {:.3}  Improvement: {:.3}",
        ctx.strength, ctx.improvement
    )?;
    writeln!(out, "Recommendation: {}", rec)?;
    for line in format_distribution(&rec) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn check_unique(hole: &[Card; 2], board: &[Card]) -> Result<(), CliError> {
    let mut seen = HashSet::new();
    for &c in hole.iter().chain(board) {
        if !seen.insert(c) {
            return Err(EngineError::DuplicateCard(c).into());
        }
    }
    Ok(())
}

/// Turns "check,raise,fold" into capability flags.
fn parse_allow(list: &str) -> Result<Capabilities, CliError> {
    let mut caps = Capabilities::default();
    for token in list.split(',').filter(|t| !t.trim().is_empty()) {
        match token.parse::<Action>()? {
            Action::Check => caps.can_check = true,
            Action::Call => caps.can_call = true,
            Action::Raise => caps.can_raise = true,
            Action::AllIn => caps.can_all_in = true,
            Action::Fold => caps.can_fold = true,
        }
    }
    Ok(caps)
}
