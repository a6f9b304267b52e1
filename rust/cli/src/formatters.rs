//! Card, board, and advice formatters for terminal display.
//!
//! Cards render with Unicode suit symbols where the terminal supports them
//! and fall back to ASCII letters elsewhere.
//!
//! - **Unicode mode**: Uses ♥ ♦ ♣ ♠ symbols
//! - **ASCII mode**: Uses h d c s letters
//!
//! ## Example
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_cli::formatters::{format_card, format_board};
//!
//! let ace_spades = Card { rank: Rank::Ace, suit: Suit::Spades };
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//!
//! let board = vec![ace_spades];
//! assert!(format_board(&board).starts_with("[A"));
//! ```

use holdem_advisor::action::Action;
use holdem_advisor::regret::Recommendation;
use holdem_engine::cards::{Card, Rank, Suit};

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.letter().to_string()
    }
}

/// Format a Rank as a single character (2-9, T, J, Q, K, A).
pub fn format_rank(rank: &Rank) -> String {
    rank.symbol().to_string()
}

/// Format a Card as a string combining rank and suit, e.g. "A♠" or "As".
pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Format a board (list of cards) as a string in bracket notation.
///
/// # Example
///
/// ```rust
/// use holdem_engine::cards::{Card, Rank, Suit};
/// # use holdem_cli::formatters::format_board;
///
/// let flop = vec![
///     Card { rank: Rank::Ace, suit: Suit::Spades },
///     Card { rank: Rank::King, suit: Suit::Hearts },
///     Card { rank: Rank::Queen, suit: Suit::Diamonds },
/// ];
/// let formatted = format_board(&flop);
/// assert!(formatted.starts_with("[A"));
/// assert!(formatted.ends_with("]"));
/// ```
pub fn format_board(cards: &[Card]) -> String {
    if cards.is_empty() {
        "[]".to_string()
    } else {
        let formatted_cards: Vec<String> = cards.iter().map(format_card).collect();
        format!("[{}]", formatted_cards.join(" "))
    }
}

/// One line per action, e.g. `  raise    62.50%`, with the pick marked.
pub fn format_distribution(rec: &Recommendation) -> Vec<String> {
    Action::ALL
        .iter()
        .map(|&a| {
            let marker = if a == rec.action { "*" } else { " " };
            format!(
                "{} {:<7} {:>7.2}%",
                marker,
                a.name(),
                rec.distribution[a.index()] * 100.0
            )
        })
        .collect()
}
