use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card, Rank};
use crate::errors::EngineError;

/// Poker hand classes in strength order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category plus tie-break key.
///
/// The key holds rank indices (two = 0 .. ace = 12), primary group ranks first
/// and kickers after, highest first. Field order matters: the derived `Ord`
/// compares the category before the key, which is exactly showdown order.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandScore {
    pub category: Category,
    pub tiebreak: Vec<u8>,
}

impl HandScore {
    fn new(category: Category, tiebreak: Vec<u8>) -> Self {
        Self { category, tiebreak }
    }

    fn rank_at(&self, i: usize) -> Option<Rank> {
        self.tiebreak.get(i).and_then(|&r| Rank::from_index(r))
    }

    fn rank_names(&self, from: usize) -> Vec<&'static str> {
        self.tiebreak
            .iter()
            .skip(from)
            .filter_map(|&r| Rank::from_index(r))
            .map(Rank::name)
            .collect()
    }

    /// Human-readable category and kicker description, e.g.
    /// `Two Pair, Kings and Nines, Ace kicker`.
    pub fn describe(&self) -> String {
        let name = self.category.name();
        let Some(primary) = self.rank_at(0) else {
            return name.to_string();
        };
        let kickers = |from: usize| -> String {
            let names = self.rank_names(from);
            match names.len() {
                0 => String::new(),
                1 => format!(", {} kicker", names[0]),
                _ => format!(", {} kickers", names.join(" ")),
            }
        };
        match self.category {
            Category::RoyalFlush => name.to_string(),
            Category::StraightFlush | Category::Straight => {
                format!("{}, {} high", name, primary.name())
            }
            Category::FullHouse => match self.rank_at(1) {
                Some(pair) => format!("{}, {} full of {}", name, primary.plural(), pair.plural()),
                None => format!("{}, {}", name, primary.plural()),
            },
            Category::Flush => format!("{}, {} high", name, primary.name()),
            Category::FourOfAKind | Category::ThreeOfAKind | Category::OnePair => {
                format!("{}, {}{}", name, primary.plural(), kickers(1))
            }
            Category::TwoPair => match self.rank_at(1) {
                Some(low) => format!(
                    "{}, {} and {}{}",
                    name,
                    primary.plural(),
                    low.plural(),
                    kickers(2)
                ),
                None => format!("{}, {}", name, primary.plural()),
            },
            Category::HighCard => format!("{}, {}", name, self.rank_names(0).join(" ")),
        }
    }
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

pub fn compare_hands(a: &HandScore, b: &HandScore) -> Ordering {
    a.cmp(b)
}

/// Per-hand tallies shared by the full and preliminary evaluators.
struct Tally {
    rank_counts: [u8; 13],
    suit_counts: [u8; 4],
    // bit i set when rank index i is present in that suit
    suit_masks: [u16; 4],
    rank_mask: u16,
}

impl Tally {
    fn of(cards: &[Card]) -> Result<Self, EngineError> {
        let mut seen = HashSet::with_capacity(cards.len());
        let mut t = Tally {
            rank_counts: [0; 13],
            suit_counts: [0; 4],
            suit_masks: [0; 4],
            rank_mask: 0,
        };
        for &c in cards {
            if !seen.insert(c) {
                return Err(EngineError::DuplicateCard(c));
            }
            let r = c.rank.index() as usize;
            let s = c.suit.index();
            t.rank_counts[r] += 1;
            t.suit_counts[s] += 1;
            t.suit_masks[s] |= 1 << r;
            t.rank_mask |= 1 << r;
        }
        Ok(t)
    }

    /// Rank indices with exactly `n` copies, highest first.
    fn ranks_with(&self, n: u8) -> Vec<u8> {
        (0..13u8)
            .rev()
            .filter(|&r| self.rank_counts[r as usize] == n)
            .collect()
    }

    /// Highest `n` present ranks not in `exclude`.
    fn kickers(&self, exclude: &[u8], n: usize) -> Vec<u8> {
        (0..13u8)
            .rev()
            .filter(|&r| self.rank_counts[r as usize] > 0 && !exclude.contains(&r))
            .take(n)
            .collect()
    }
}

fn top_ranks(mask: u16, n: usize) -> Vec<u8> {
    (0..13u8).rev().filter(|&r| mask & (1 << r) != 0).take(n).collect()
}

/// Top rank index of the highest straight in `mask`, if any.
///
/// The mask is shifted up one bit and the ace copied into bit 0, which plays
/// the role of rank -1 so the wheel (A-2-3-4-5) tops out at the five.
fn straight_top(mask: u16) -> Option<u8> {
    let ace = (mask >> Rank::Ace.index()) & 1;
    let ext = (mask << 1) | ace;
    (3..=12u8).rev().find(|&top| {
        let window = 0b11111u16 << (top - 3);
        ext & window == window
    })
}

/// Ranks 5 to 7 cards into a category and tie-break key.
///
/// Categories are tested top-down and the first match wins.
///
/// # Errors
///
/// - [`EngineError::InvalidHand`] when fewer than 5 or more than 7 cards are given
/// - [`EngineError::DuplicateCard`] when a card appears twice
///
/// # Examples
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::hand::{evaluate, Category};
///
/// let cards = parse_cards("As 2d 3c 4h 5s Kd").unwrap();
/// let score = evaluate(&cards).unwrap();
/// assert_eq!(score.category, Category::Straight);
/// assert_eq!(score.tiebreak, vec![3]); // five-high
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandScore, EngineError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EngineError::InvalidHand { count: cards.len() });
    }
    let t = Tally::of(cards)?;

    // at most one suit can reach five with seven cards
    let flush_suit = (0..4).find(|&s| t.suit_counts[s] >= 5);

    if let Some(s) = flush_suit {
        if let Some(top) = straight_top(t.suit_masks[s]) {
            let category = if top == Rank::Ace.index() {
                Category::RoyalFlush
            } else {
                Category::StraightFlush
            };
            return Ok(HandScore::new(category, vec![top]));
        }
    }

    let quads = t.ranks_with(4);
    if let Some(&q) = quads.first() {
        let mut key = vec![q];
        key.extend(t.kickers(&[q], 1));
        return Ok(HandScore::new(Category::FourOfAKind, key));
    }

    let trips = t.ranks_with(3);
    let pairs = t.ranks_with(2);
    if let Some(&triple) = trips.first() {
        // a second triple only contributes a pair
        let pair = trips[1..].iter().chain(pairs.iter()).copied().max();
        if let Some(pair) = pair {
            return Ok(HandScore::new(Category::FullHouse, vec![triple, pair]));
        }
    }

    if let Some(s) = flush_suit {
        return Ok(HandScore::new(
            Category::Flush,
            top_ranks(t.suit_masks[s], 5),
        ));
    }

    if let Some(top) = straight_top(t.rank_mask) {
        return Ok(HandScore::new(Category::Straight, vec![top]));
    }

    Ok(grouped_score(&t, &trips, &pairs, 5))
}

/// Trips / two pair / pair / high card, keeping at most `width` cards in play.
fn grouped_score(t: &Tally, trips: &[u8], pairs: &[u8], width: usize) -> HandScore {
    if let Some(&triple) = trips.first() {
        let mut key = vec![triple];
        key.extend(t.kickers(&[triple], width.saturating_sub(3)));
        return HandScore::new(Category::ThreeOfAKind, key);
    }
    if pairs.len() >= 2 {
        let (hi, lo) = (pairs[0], pairs[1]);
        let mut key = vec![hi, lo];
        key.extend(t.kickers(&[hi, lo], width.saturating_sub(4)));
        return HandScore::new(Category::TwoPair, key);
    }
    if let Some(&p) = pairs.first() {
        let mut key = vec![p];
        key.extend(t.kickers(&[p], width.saturating_sub(2)));
        return HandScore::new(Category::OnePair, key);
    }
    HandScore::new(Category::HighCard, t.kickers(&[], width))
}

/// Reduced-precision score for 1 to 4 cards (hole cards before the flop).
///
/// Only rank groups and high cards are considered; this is a betting heuristic
/// and must not be used to decide a showdown.
pub fn preliminary_score(cards: &[Card]) -> Result<HandScore, EngineError> {
    if cards.is_empty() || cards.len() > 4 {
        return Err(EngineError::InvalidHand { count: cards.len() });
    }
    let t = Tally::of(cards)?;
    if let Some(&q) = t.ranks_with(4).first() {
        return Ok(HandScore::new(Category::FourOfAKind, vec![q]));
    }
    Ok(grouped_score(
        &t,
        &t.ranks_with(3),
        &t.ranks_with(2),
        cards.len(),
    ))
}

/// Scores whatever is visible: a full evaluation from five cards up, the
/// preliminary score before that.
pub fn score_visible(hole: &[Card; 2], board: &[Card]) -> Result<HandScore, EngineError> {
    let mut cards = Vec::with_capacity(2 + board.len());
    cards.extend_from_slice(hole);
    cards.extend_from_slice(board);
    if cards.len() >= 5 {
        evaluate(&cards)
    } else {
        preliminary_score(&cards)
    }
}

/// Maps a score onto [0, 1]: the category supplies the integer part, the top
/// tie-break rank the fraction within it.
pub fn hand_strength(score: &HandScore) -> f64 {
    let top = score.tiebreak.first().copied().unwrap_or(0) as f64;
    let within = (top + 1.0) / 13.0;
    ((score.category.value() as f64 + within) / 10.0).min(1.0)
}

/// Hand strength usable at any street.
///
/// With a board this is [`hand_strength`] of the visible cards. With hole
/// cards only it is a lighter approximation: pairs land in [0.5, 1.0],
/// unpaired hands below 0.5 scaled by rank with small suited and connector
/// bonuses.
pub fn calculate_hand_strength(hole: &[Card; 2], board: &[Card]) -> Result<f64, EngineError> {
    if !board.is_empty() {
        return Ok(hand_strength(&score_visible(hole, board)?));
    }
    if hole[0] == hole[1] {
        return Err(EngineError::DuplicateCard(hole[0]));
    }
    let (a, b) = (hole[0].rank.index(), hole[1].rank.index());
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    if hi == lo {
        return Ok(0.5 + 0.5 * hi as f64 / 12.0);
    }
    let mut strength = (hi + lo) as f64 / 24.0 * 0.4;
    if hole[0].suit == hole[1].suit {
        strength += 0.06;
    }
    strength += match hi - lo {
        1 => 0.04,
        2 => 0.02,
        _ => 0.0,
    };
    Ok(strength.clamp(0.0, 1.0))
}

/// Counts unseen cards that would lift the hand into a higher category.
///
/// Only meaningful on the flop and turn; returns 0 for any other board size.
pub fn count_outs(hole: &[Card; 2], board: &[Card]) -> Result<usize, EngineError> {
    if !(3..=4).contains(&board.len()) {
        return Ok(0);
    }
    let mut known = Vec::with_capacity(7);
    known.extend_from_slice(hole);
    known.extend_from_slice(board);
    let base = evaluate(&known)?.category;
    let seen: HashSet<Card> = known.iter().copied().collect();

    let mut outs = 0;
    for card in full_deck().into_iter().filter(|c| !seen.contains(c)) {
        known.push(card);
        if evaluate(&known)?.category > base {
            outs += 1;
        }
        known.pop();
    }
    Ok(outs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn score(s: &str) -> HandScore {
        evaluate(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn straight_top_handles_wheel_and_broadway() {
        // A 2 3 4 5
        let wheel = (1 << 12) | 0b1111;
        assert_eq!(straight_top(wheel), Some(3));
        // T J Q K A
        let broadway = 0b1_1111_0000_0000;
        assert_eq!(straight_top(broadway), Some(12));
        // 2 3 4 5 6 7: six-card run tops at seven
        assert_eq!(straight_top(0b11_1111), Some(5));
        assert_eq!(straight_top(0b1_0111_0111), None);
    }

    #[test]
    fn two_triples_make_full_house_with_higher_triple() {
        let s = score("Kh Kd Kc 9s 9h 9d 2c");
        assert_eq!(s.category, Category::FullHouse);
        assert_eq!(s.tiebreak, vec![Rank::King.index(), Rank::Nine.index()]);
    }

    #[test]
    fn full_house_pair_uses_best_available() {
        // trips of fives, pairs of queens and threes
        let s = score("5h 5d 5c Qs Qh 3d 3c");
        assert_eq!(s.tiebreak, vec![Rank::Five.index(), Rank::Queen.index()]);
    }

    #[test]
    fn three_pairs_keep_the_two_highest_and_best_kicker() {
        let s = score("Ah Ad 8c 8s 4h 4d Kc");
        assert_eq!(s.category, Category::TwoPair);
        assert_eq!(
            s.tiebreak,
            vec![Rank::Ace.index(), Rank::Eight.index(), Rank::King.index()]
        );
        // third pair outranks the single card
        let s = score("Ah Ad 8c 8s 6h 6d 2c");
        assert_eq!(s.tiebreak[2], Rank::Six.index());
    }

    #[test]
    fn flush_key_is_five_highest_suited() {
        let s = score("2h 7h Jh Qh 9h 3h Ac");
        assert_eq!(s.category, Category::Flush);
        assert_eq!(
            s.tiebreak,
            vec![
                Rank::Queen.index(),
                Rank::Jack.index(),
                Rank::Nine.index(),
                Rank::Seven.index(),
                Rank::Three.index()
            ]
        );
    }

    #[test]
    fn straight_flush_needs_suited_run() {
        // straight plus flush, but the run is not all hearts
        let s = score("5h 6h 7h 8h 9c 2h Kd");
        assert_eq!(s.category, Category::Flush);
        let s = score("5h 6h 7h 8h 9h 2c Kd");
        assert_eq!(s.category, Category::StraightFlush);
        assert_eq!(s.tiebreak, vec![Rank::Nine.index()]);
    }

    #[test]
    fn steel_wheel_is_a_five_high_straight_flush() {
        let s = score("Ad 2d 3d 4d 5d Kd Qc");
        assert_eq!(s.category, Category::StraightFlush);
        assert_eq!(s.tiebreak, vec![Rank::Five.index()]);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            evaluate(&parse_cards("As Ks Qs Js").unwrap()),
            Err(EngineError::InvalidHand { count: 4 })
        );
        assert_eq!(
            evaluate(&parse_cards("As Ks Qs Js Ts 9s 8s 7s").unwrap()),
            Err(EngineError::InvalidHand { count: 8 })
        );
        let dup = parse_cards("As Ks Qs Js As").unwrap();
        assert!(matches!(
            evaluate(&dup),
            Err(EngineError::DuplicateCard(_))
        ));
    }

    #[test]
    fn preliminary_scores_hole_cards() {
        let pair = preliminary_score(&parse_cards("Qh Qd").unwrap()).unwrap();
        assert_eq!(pair.category, Category::OnePair);
        assert_eq!(pair.tiebreak, vec![Rank::Queen.index()]);
        let high = preliminary_score(&parse_cards("Ah 7d").unwrap()).unwrap();
        assert_eq!(high.category, Category::HighCard);
        assert_eq!(high.tiebreak, vec![Rank::Ace.index(), Rank::Seven.index()]);
        assert!(preliminary_score(&[]).is_err());
    }

    #[test]
    fn describe_names_category_and_kickers() {
        assert_eq!(
            score("Kh Kd 9c 9s Ah 3d 2c").describe(),
            "Two Pair, Kings and Nines, Ace kicker"
        );
        assert_eq!(
            score("Kh Kd Kc 9s 9h 2d 3c").describe(),
            "Full House, Kings full of Nines"
        );
        assert_eq!(score("Ts Js Qs Ks As").describe(), "Royal Flush");
        assert_eq!(score("Ah 2d 3c 4s 5h").describe(), "Straight, Five high");
        assert_eq!(
            score("Jh Jd Ac Ks 9h 3d 2c").describe(),
            "One Pair, Jacks, Ace King Nine kickers"
        );
    }

    #[test]
    fn strength_is_monotone_in_category() {
        let high = hand_strength(&score("Ah Kd 9c 7s 3h"));
        let pair = hand_strength(&score("2h 2d 9c 7s 3h"));
        let royal = hand_strength(&score("Ts Js Qs Ks As"));
        assert!(high < pair);
        assert!(pair < royal);
        assert!((royal - 1.0).abs() < 1e-12);
    }

    #[test]
    fn preflop_strength_ranks_pairs_above_unpaired() {
        let strength = |a: &str, b: &str| {
            calculate_hand_strength(&[a.parse().unwrap(), b.parse().unwrap()], &[]).unwrap()
        };
        let aa = strength("Ah", "Ad");
        let aks = strength("As", "Ks");
        let deuces = strength("2s", "2c");
        let trash = strength("7s", "2c");
        assert!((aa - 1.0).abs() < 1e-12);
        assert!(deuces >= 0.5);
        assert!(aks < deuces);
        assert!(trash < aks);
    }

    #[test]
    fn flush_draw_has_outs_on_the_flop() {
        let hole = ["Ah".parse().unwrap(), "Kh".parse().unwrap()];
        let board = parse_cards("7h 2h 9c").unwrap();
        let outs = count_outs(&hole, &board).unwrap();
        // nine hearts, then the off-suit pairing cards:
        // 3 aces, 3 kings, 3 sevens, 3 deuces, 2 nines (9h is a heart)
        assert_eq!(outs, 9 + 3 + 3 + 3 + 3 + 2);
        assert_eq!(count_outs(&hole, &[]).unwrap(), 0);
    }
}
