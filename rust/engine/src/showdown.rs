//! Showdown resolution: winners and split-pot shares among active players.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::hand::{Category, HandScore};
use crate::player::PlayerState;

/// Outcome of a showdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowdownResult {
    /// Winning seat ids, ascending
    pub winners: Vec<usize>,
    /// Fraction of the pot owed to each winner
    pub shares: BTreeMap<usize, f64>,
    /// Winning category; `None` when the pot was uncontested
    pub category: Option<Category>,
}

impl ShowdownResult {
    pub fn is_split(&self) -> bool {
        self.winners.len() > 1
    }

    pub fn is_uncontested(&self) -> bool {
        self.category.is_none()
    }

    fn sharing(winners: Vec<usize>, category: Option<Category>) -> Self {
        let share = 1.0 / winners.len() as f64;
        let shares = winners.iter().map(|&id| (id, share)).collect();
        Self {
            winners,
            shares,
            category,
        }
    }
}

/// Resolves the pot among the non-folded players in `players`.
///
/// A lone remaining player wins outright without comparing scores. Otherwise
/// the best category is kept, then the best tie-break key, and whoever is left
/// splits the pot evenly.
///
/// # Errors
///
/// - [`EngineError::NoActivePlayers`] when everybody folded
/// - [`EngineError::MissingScore`] when a contender has not been scored
pub fn resolve(players: &[PlayerState]) -> Result<ShowdownResult, EngineError> {
    let active: Vec<&PlayerState> = players.iter().filter(|p| p.is_active()).collect();
    match active.as_slice() {
        [] => return Err(EngineError::NoActivePlayers),
        [only] => {
            tracing::debug!(player = only.id, "uncontested pot");
            return Ok(ShowdownResult::sharing(vec![only.id], None));
        }
        _ => {}
    }

    let mut scored: Vec<(usize, &HandScore)> = Vec::with_capacity(active.len());
    for p in &active {
        let score = p.score.as_ref().ok_or(EngineError::MissingScore(p.id))?;
        scored.push((p.id, score));
    }

    let winning_category = scored
        .iter()
        .map(|(_, s)| s.category)
        .max()
        .ok_or(EngineError::NoActivePlayers)?;
    scored.retain(|(_, s)| s.category == winning_category);

    if scored.len() > 1 {
        let best_key = scored
            .iter()
            .map(|(_, s)| &s.tiebreak)
            .max()
            .cloned()
            .unwrap_or_default();
        scored.retain(|(_, s)| s.tiebreak == best_key);
    }

    let mut winners: Vec<usize> = scored.into_iter().map(|(id, _)| id).collect();
    winners.sort_unstable();
    tracing::debug!(?winners, category = %winning_category, "showdown resolved");
    Ok(ShowdownResult::sharing(winners, Some(winning_category)))
}

/// Splits `pot` chips between the winners of `result`.
///
/// Each winner gets `pot / n`; leftover odd chips go one each to the winners
/// in seat order.
pub fn split_pot(pot: u32, result: &ShowdownResult) -> Vec<(usize, u32)> {
    let n = result.winners.len() as u32;
    if n == 0 {
        return Vec::new();
    }
    let base = pot / n;
    let mut odd = pot % n;
    result
        .winners
        .iter()
        .map(|&id| {
            let extra = if odd > 0 {
                odd -= 1;
                1
            } else {
                0
            };
            (id, base + extra)
        })
        .collect()
}
