//! Simulation command handler: advisor-driven hands with optional JSONL
//! hand history.
//!
//! Every street each contesting seat must put in `bet` chips (or whatever it
//! has left) to stay in the hand. The seat's own advisor decides whether to
//! continue or fold; any non-fold recommendation pays the street bet.
//!
//! # Examples
//!
//! ```no_run
//! use std::io;
//! let code = holdem_cli::run(
//!     vec!["holdem", "sim", "--hands", "100", "--seed", "42", "--output", "data/sim.jsonl"],
//!     &mut io::stdout(),
//!     &mut io::stderr(),
//! );
//! assert_eq!(code, 0);
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use holdem_advisor::action::{Action, NUM_ACTIONS};
use holdem_advisor::advisor::Advisor;
use holdem_advisor::reward::DecisionContext;
use holdem_engine::engine::Engine;
use holdem_engine::errors::GameError;
use holdem_engine::hand::Category;
use holdem_engine::logger::{HandLogger, HandRecord};
use holdem_engine::player::PlayerStatus;
use holdem_engine::rules::Capabilities;

use crate::config;
use crate::error::CliError;

type Deal = fn(&mut Engine) -> Result<(), GameError>;

/// Running totals printed at the end of a simulation.
#[derive(Debug, Default)]
struct SimSummary {
    hands: u64,
    /// Pots won per seat, fractional for splits
    pots_won: Vec<f64>,
    split: u64,
    uncontested: u64,
    categories: BTreeMap<Category, u64>,
    advice: [u64; NUM_ACTIONS],
}

/// Plays `hands` hands and prints a summary; writes every hand to `output`
/// as JSONL when given.
pub fn handle_sim_command(
    hands: u64,
    seats: Option<u8>,
    seed: Option<u64>,
    bet: u32,
    output: Option<PathBuf>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    if bet == 0 {
        return Err(CliError::InvalidInput("bet must be >= 1".to_string()));
    }

    let cfg = config::load()?;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let seats = seats.map(usize::from).unwrap_or(cfg.seats);

    let mut eng = Engine::with_stack(Some(base_seed), seats, cfg.starting_stack)?;
    let mut advisors: Vec<Advisor> = (0..seats)
        .map(|i| Advisor::new(base_seed.wrapping_add(i as u64 + 1)))
        .collect();
    let mut logger = match &output {
        Some(path) => Some(HandLogger::create(path)?),
        None => None,
    };
    let mut summary = SimSummary {
        pots_won: vec![0.0; seats],
        ..SimSummary::default()
    };

    let streets: [Deal; 3] = [Engine::deal_flop, Engine::deal_turn, Engine::deal_river];
    for _ in 0..hands {
        eng.start_hand()?;
        betting_round(&mut eng, &mut advisors, bet, cfg.iterations, &mut summary)?;
        for deal in streets {
            if eng.active_count() < 2 {
                break;
            }
            deal(&mut eng)?;
            betting_round(&mut eng, &mut advisors, bet, cfg.iterations, &mut summary)?;
        }

        let record = logger.as_mut().map(|l| HandRecord::capture(l.next_id(), &eng));
        let result = eng.showdown()?;
        summary.hands += 1;
        for (id, share) in &result.shares {
            summary.pots_won[*id] += share;
        }
        match result.category {
            None => summary.uncontested += 1,
            Some(c) => *summary.categories.entry(c).or_default() += 1,
        }
        if result.is_split() {
            summary.split += 1;
        }
        if let (Some(logger), Some(record)) = (logger.as_mut(), record) {
            let mut record = record.with_showdown(&result);
            record.meta = Some(serde_json::json!({ "street_bet": bet }));
            logger.write(&record)?;
        }
    }

    write_summary(&summary, &eng, base_seed, out)?;
    if let Some(path) = &output {
        writeln!(out, "Hand history: {}", path.display())?;
    }
    Ok(())
}

/// Asks each contesting seat, in seat order, whether to pay the street bet.
fn betting_round(
    eng: &mut Engine,
    advisors: &mut [Advisor],
    bet: u32,
    iterations: u32,
    summary: &mut SimSummary,
) -> Result<(), CliError> {
    for id in 0..advisors.len() {
        // the last contender never folds
        if eng.active_count() < 2 {
            break;
        }
        let p = eng.player(id)?;
        if !p.is_active() || p.status == PlayerStatus::AllIn {
            continue;
        }
        let Some(hole) = p.hole else {
            continue;
        };
        let (stack, wagered) = (p.stack, p.wagered);

        let mut ctx = DecisionContext::new(Capabilities::for_spot(stack, bet, bet))
            .with_hand(&hole, eng.board())?;
        ctx.pot = eng.pot();
        ctx.to_call = bet;
        ctx.player_bet = wagered;
        ctx.stack = stack;
        ctx.raise_amount = bet;
        ctx.opponents = eng.active_count() - 1;

        let rec = advisors[id].advise(&ctx, iterations)?;
        summary.advice[rec.action.index()] += 1;
        tracing::debug!(player = id, action = %rec.action, confidence = %rec.confidence(), "advice taken");
        if rec.action == Action::Fold {
            eng.fold(id)?;
        } else {
            eng.commit(id, bet.min(stack))?;
        }
    }
    Ok(())
}

fn write_summary(
    summary: &SimSummary,
    eng: &Engine,
    seed: u64,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    writeln!(
        out,
        "Simulated {} hands ({} seats, seed {})",
        summary.hands,
        eng.players().len(),
        seed
    )?;
    for p in eng.players() {
        writeln!(
            out,
            "P{}: pots won {:.2}, stack {}",
            p.id + 1,
            summary.pots_won[p.id],
            p.stack
        )?;
    }
    writeln!(
        out,
        "Split pots: {}, uncontested: {}",
        summary.split, summary.uncontested
    )?;
    for (category, count) in summary.categories.iter().rev() {
        writeln!(out, "  {}: {}", category, count)?;
    }
    let advice: Vec<String> = Action::ALL
        .iter()
        .map(|a| format!("{} {}", a.name(), summary.advice[a.index()]))
        .collect();
    writeln!(out, "Advice: {}", advice.join(", "))?;
    Ok(())
}
