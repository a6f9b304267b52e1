use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::EngineError;

/// Returns true when `card` is already in `used`.
pub fn is_duplicate(card: &Card, used: &HashSet<Card>) -> bool {
    used.contains(card)
}

/// A seeded 52-card deck with per-hand used-card tracking.
///
/// Draws walk the shuffled order and skip anything already used or explicitly
/// excluded, so every draw is uniform over the fresh cards and terminates
/// without retry loops.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    used: HashSet<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    /// Builds a deck around an injected random source.
    pub fn with_rng(rng: ChaCha20Rng) -> Self {
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            used: HashSet::with_capacity(52),
            rng,
        }
    }

    /// Restores all 52 cards, clears the used set, and shuffles.
    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
        self.used.clear();
        tracing::trace!(first = %self.cards[0], "deck shuffled");
    }

    /// Draws the next fresh card that is not in `excluding`.
    pub fn draw(&mut self, excluding: &HashSet<Card>) -> Result<Card, EngineError> {
        let found = (self.position..self.cards.len()).find(|&i| {
            let c = &self.cards[i];
            !is_duplicate(c, &self.used) && !excluding.contains(c)
        });
        let Some(i) = found else {
            return Err(EngineError::ExhaustedDeck {
                requested: 1,
                remaining: self.remaining(),
            });
        };
        self.cards.swap(self.position, i);
        let card = self.cards[self.position];
        self.position += 1;
        self.used.insert(card);
        Ok(card)
    }

    /// Draws `n` cards, or nothing at all when fewer than `n` fresh cards remain.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        let remaining = self.remaining();
        if remaining < n {
            return Err(EngineError::ExhaustedDeck {
                requested: n,
                remaining,
            });
        }
        let none = HashSet::new();
        (0..n).map(|_| self.draw(&none)).collect()
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        self.draw(&HashSet::new()).ok()
    }

    /// Registers a card dealt from outside this deck so it is never drawn.
    pub fn mark_used(&mut self, card: Card) {
        self.used.insert(card);
    }

    pub fn used(&self) -> &HashSet<Card> {
        &self.used
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
        self.used.clear();
    }

    /// Number of cards that can still be drawn this hand.
    pub fn remaining(&self) -> usize {
        self.cards[self.position..]
            .iter()
            .filter(|c| !self.used.contains(c))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn exclusions_are_skipped_but_not_lost() {
        let mut deck = Deck::new_with_seed(3);
        deck.reset();
        let first = deck.cards[0];
        let excluded: HashSet<Card> = [first].into_iter().collect();
        let drawn = deck.draw(&excluded).unwrap();
        assert_ne!(drawn, first);
        // the excluded card is still available to a later unrestricted draw
        assert_eq!(deck.draw(&HashSet::new()).unwrap(), first);
    }

    #[test]
    fn marked_cards_are_never_dealt() {
        let mut deck = Deck::new_with_seed(9);
        deck.shuffle();
        let ace = Card::new(Rank::Ace, Suit::Spades);
        deck.mark_used(ace);
        assert_eq!(deck.remaining(), 51);
        let all = deck.draw_n(51).unwrap();
        assert!(!all.contains(&ace));
        assert!(deck.deal_card().is_none());
    }

    #[test]
    fn draw_n_is_all_or_nothing() {
        let mut deck = Deck::new_with_seed(1);
        deck.shuffle();
        deck.draw_n(50).unwrap();
        let err = deck.draw_n(3).unwrap_err();
        assert_eq!(
            err,
            EngineError::ExhaustedDeck {
                requested: 3,
                remaining: 2
            }
        );
        assert_eq!(deck.remaining(), 2);
    }

    #[test]
    fn draw_fails_when_everything_is_excluded() {
        let mut deck = Deck::new_with_seed(5);
        deck.shuffle();
        let everything: HashSet<Card> = full_deck().into_iter().collect();
        assert_eq!(
            deck.draw(&everything),
            Err(EngineError::ExhaustedDeck {
                requested: 1,
                remaining: 52
            })
        );
        // nothing was consumed by the failed draw
        assert_eq!(deck.remaining(), 52);
    }

    #[test]
    fn is_duplicate_checks_membership() {
        let c = Card::new(Rank::Two, Suit::Hearts);
        let mut used = HashSet::new();
        assert!(!is_duplicate(&c, &used));
        used.insert(c);
        assert!(is_duplicate(&c, &used));
    }
}
