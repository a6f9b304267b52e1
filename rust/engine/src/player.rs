use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::HandScore;

/// Where a seat stands in the current betting round.
/// Everything except [`PlayerStatus::Folded`] still contests the pot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    #[default]
    Active,
    Checking,
    Betting,
    Folded,
    AllIn,
}

/// Default starting stack size for each player in chips
pub const STARTING_STACK: u32 = 20_000;

/// One seat's view of the current hand.
///
/// Created at deal time; `score` is refreshed at every street boundary as
/// community cards arrive and cleared on the next deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Seat identifier (0..=3)
    pub id: usize,
    pub hole: Option<[Card; 2]>,
    pub status: PlayerStatus,
    /// Score of the best hand over the currently visible cards
    pub score: Option<HandScore>,
    /// Hole rank indices, higher first
    pub best_hole_ranks: Option<(u8, u8)>,
    pub stack: u32,
    /// Chips committed to the pot this hand
    pub wagered: u32,
}

impl PlayerState {
    pub fn new(id: usize, stack: u32) -> Self {
        Self {
            id,
            hole: None,
            status: PlayerStatus::Active,
            score: None,
            best_hole_ranks: None,
            stack,
            wagered: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status != PlayerStatus::Folded
    }

    pub fn give_hole(&mut self, hole: [Card; 2]) {
        let (a, b) = (hole[0].rank.index(), hole[1].rank.index());
        self.best_hole_ranks = Some((a.max(b), a.min(b)));
        self.hole = Some(hole);
    }

    /// Clears per-hand state ahead of the next deal.
    pub fn reset_for_hand(&mut self) {
        self.hole = None;
        self.status = PlayerStatus::Active;
        self.score = None;
        self.best_hole_ranks = None;
        self.wagered = 0;
    }

    pub fn add_chips(&mut self, amount: u32) -> Result<(), GameError> {
        self.stack = self.stack.checked_add(amount).ok_or_else(|| {
            GameError::ChipOverflow(format!("player {} stack {} + {}", self.id, self.stack, amount))
        })?;
        Ok(())
    }

    /// Moves chips from the stack into this hand's wager.
    pub fn bet(&mut self, amount: u32) -> Result<(), GameError> {
        if amount > self.stack {
            return Err(GameError::InsufficientChips {
                player: self.id,
                stack: self.stack,
                amount,
            });
        }
        self.stack -= amount;
        self.wagered += amount;
        if self.stack == 0 && amount > 0 {
            self.status = PlayerStatus::AllIn;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crediting_past_u32_is_an_error_not_a_clamp() {
        let mut p = PlayerState::new(2, u32::MAX - 5);
        p.add_chips(5).unwrap();
        assert_eq!(p.stack, u32::MAX);
        assert!(matches!(p.add_chips(1), Err(GameError::ChipOverflow(_))));
        assert_eq!(p.stack, u32::MAX);
    }

    #[test]
    fn betting_whole_stack_goes_all_in() {
        let mut p = PlayerState::new(0, 300);
        p.bet(100).unwrap();
        assert_eq!(p.status, PlayerStatus::Active);
        p.bet(200).unwrap();
        assert_eq!((p.stack, p.wagered, p.status), (0, 300, PlayerStatus::AllIn));
    }
}
