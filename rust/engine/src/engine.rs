use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::score_visible;
use crate::logger::Street;
use crate::player::{PlayerState, PlayerStatus, STARTING_STACK};
use crate::showdown::{resolve, split_pot, ShowdownResult};

pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 4;

/// Core hand driver for a 2 to 4 seat table.
/// Owns the deck, the seats, the community cards, and the pot for one hand at a time.
///
/// # Examples
///
/// ```
/// use holdem_engine::engine::Engine;
///
/// let mut engine = Engine::new(Some(12345), 4).unwrap();
/// engine.start_hand().unwrap();
/// engine.deal_flop().unwrap();
/// engine.deal_turn().unwrap();
/// engine.deal_river().unwrap();
/// assert_eq!(engine.board().len(), 5);
///
/// let result = engine.showdown().unwrap();
/// assert!(!result.winners.is_empty());
/// ```
#[derive(Debug)]
pub struct Engine {
    deck: Deck,
    seed: u64,
    players: Vec<PlayerState>,
    /// Community cards, append-only within a hand
    board: Vec<Card>,
    /// `None` between hands
    street: Option<Street>,
    pot: u32,
}

impl Engine {
    pub fn new(seed: Option<u64>, seats: usize) -> Result<Self, GameError> {
        Self::with_stack(seed, seats, STARTING_STACK)
    }

    pub fn with_stack(seed: Option<u64>, seats: usize, stack: u32) -> Result<Self, GameError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&seats) {
            return Err(GameError::InvalidSeatCount(seats));
        }
        if (seats as u64) * u64::from(stack) > u64::from(u32::MAX) {
            return Err(GameError::ChipOverflow(format!(
                "{} seats x {} chips",
                seats, stack
            )));
        }
        let seed = seed.unwrap_or(0xA1A2_A3A4);
        Ok(Self {
            deck: Deck::new_with_seed(seed),
            seed,
            players: (0..seats).map(|id| PlayerState::new(id, stack)).collect(),
            board: Vec::with_capacity(5),
            street: None,
            pot: 0,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn player(&self, id: usize) -> Result<&PlayerState, GameError> {
        self.players.get(id).ok_or(GameError::UnknownPlayer(id))
    }

    fn player_mut(&mut self, id: usize) -> Result<&mut PlayerState, GameError> {
        self.players.get_mut(id).ok_or(GameError::UnknownPlayer(id))
    }

    /// Shuffles, clears the previous hand, and deals two hole cards per seat.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        self.deck.shuffle();
        self.board.clear();
        self.pot = 0;
        for p in &mut self.players {
            p.reset_for_hand();
        }
        let n = self.players.len();
        // one card per seat per pass, as at a real table
        let cards = self.deck.draw_n(2 * n)?;
        for (i, p) in self.players.iter_mut().enumerate() {
            p.give_hole([cards[i], cards[i + n]]);
        }
        self.street = Some(Street::Preflop);
        self.rescore()?;
        tracing::debug!(seats = n, "hole cards dealt");
        Ok(())
    }

    fn advance(
        &mut self,
        from: Street,
        to: Street,
        count: usize,
    ) -> Result<(), GameError> {
        match self.street {
            None => return Err(GameError::NoHandInProgress),
            Some(s) if s != from => {
                return Err(GameError::OutOfOrderDeal {
                    requested: to.name(),
                    expected: s.next().map_or("showdown", Street::name),
                })
            }
            Some(_) => {}
        }
        let cards = self.deck.draw_n(count)?;
        self.board.extend(cards);
        self.street = Some(to);
        self.rescore()?;
        tracing::debug!(street = to.name(), board = ?self.board, "community cards dealt");
        Ok(())
    }

    pub fn deal_flop(&mut self) -> Result<(), GameError> {
        self.advance(Street::Preflop, Street::Flop, 3)
    }

    pub fn deal_turn(&mut self) -> Result<(), GameError> {
        self.advance(Street::Flop, Street::Turn, 1)
    }

    pub fn deal_river(&mut self) -> Result<(), GameError> {
        self.advance(Street::Turn, Street::River, 1)
    }

    /// Deals a complete hand: hole cards, flop, turn, and river.
    pub fn deal_hand(&mut self) -> Result<(), GameError> {
        self.start_hand()?;
        self.deal_flop()?;
        self.deal_turn()?;
        self.deal_river()
    }

    /// Recomputes every active seat's score over the visible cards.
    fn rescore(&mut self) -> Result<(), GameError> {
        for p in self.players.iter_mut().filter(|p| p.is_active()) {
            if let Some(hole) = p.hole {
                p.score = Some(score_visible(&hole, &self.board)?);
            }
        }
        Ok(())
    }

    /// Folds a seat. The last seat still in the hand cannot fold.
    pub fn fold(&mut self, id: usize) -> Result<(), GameError> {
        if self.street.is_none() {
            return Err(GameError::NoHandInProgress);
        }
        if self.player(id)?.status == PlayerStatus::Folded {
            return Err(GameError::PlayerAlreadyFolded(id));
        }
        if self.active_count() == 1 {
            return Err(GameError::LastActivePlayer(id));
        }
        self.player_mut(id)?.status = PlayerStatus::Folded;
        tracing::debug!(player = id, "player folded");
        Ok(())
    }

    /// Records a seat's betting-round status. Folding goes through [`Engine::fold`].
    pub fn set_status(&mut self, id: usize, status: PlayerStatus) -> Result<(), GameError> {
        if status == PlayerStatus::Folded {
            return self.fold(id);
        }
        let p = self.player_mut(id)?;
        if p.status == PlayerStatus::Folded {
            return Err(GameError::PlayerAlreadyFolded(id));
        }
        p.status = status;
        Ok(())
    }

    /// Moves `amount` from a seat's stack into the pot.
    /// Chips stay in the pot even if the seat folds later.
    pub fn commit(&mut self, id: usize, amount: u32) -> Result<(), GameError> {
        if self.street.is_none() {
            return Err(GameError::NoHandInProgress);
        }
        let pot = self
            .pot
            .checked_add(amount)
            .ok_or_else(|| GameError::ChipOverflow(format!("pot {} + {}", self.pot, amount)))?;
        let p = self.player_mut(id)?;
        if p.status == PlayerStatus::Folded {
            return Err(GameError::PlayerAlreadyFolded(id));
        }
        p.bet(amount)?;
        self.pot = pot;
        Ok(())
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Resolves the hand and credits the pot.
    ///
    /// Allowed once a single seat remains or after the river; never mid-hand.
    pub fn showdown(&mut self) -> Result<ShowdownResult, GameError> {
        let street = self.street.ok_or(GameError::NoHandInProgress)?;
        let active = self.active_count();
        if active > 1 && street != Street::River {
            return Err(GameError::HandNotComplete { active });
        }
        let result = resolve(&self.players)?;
        for (id, chips) in split_pot(self.pot, &result) {
            self.player_mut(id)?.add_chips(chips)?;
        }
        tracing::debug!(pot = self.pot, winners = ?result.winners, "pot awarded");
        self.pot = 0;
        self.street = None;
        Ok(result)
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn street(&self) -> Option<Street> {
        self.street
    }

    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn is_hand_complete(&self) -> bool {
        self.board.len() == 5
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }
}
