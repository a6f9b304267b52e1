//! Deal command handler: one hand from hole cards to showdown.

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_board, format_card};
use holdem_engine::engine::Engine;
use std::io::Write;

/// Deals a hand for 2 to 4 seats, resolves it, and prints each seat's hole
/// cards and best hand followed by the board and the winner(s).
///
/// Seed and seat count fall back to the configuration.
pub fn handle_deal_command(
    seed: Option<u64>,
    seats: Option<u8>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let base_seed = seed.or(cfg.seed).unwrap_or_else(rand::random);
    let seats = seats.map(usize::from).unwrap_or(cfg.seats);

    let mut eng = Engine::with_stack(Some(base_seed), seats, cfg.starting_stack)?;
    eng.deal_hand()?;
    let result = eng.showdown()?;

    for p in eng.players() {
        let hole = p
            .hole
            .ok_or_else(|| CliError::Engine(format!("P{} has no hole cards", p.id + 1)))?;
        let hand = p.score.as_ref().map(|s| s.describe()).unwrap_or_default();
        writeln!(
            out,
            "Hole P{}: {} {}  {}",
            p.id + 1,
            format_card(&hole[0]),
            format_card(&hole[1]),
            hand
        )?;
    }
    writeln!(out, "Board: {}", format_board(eng.board()))?;

    let names: Vec<String> = result.winners.iter().map(|id| format!("P{}", id + 1)).collect();
    let category = result.category.map(|c| c.name()).unwrap_or("uncontested");
    if result.is_split() {
        writeln!(out, "Split: {} ({})", names.join(", "), category)?;
    } else {
        writeln!(out, "Winner: {} ({})", names.join(", "), category)?;
    }
    Ok(())
}
