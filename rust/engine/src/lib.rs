//! # holdem-engine: Hand Evaluation and Showdown Core
//!
//! A deterministic Texas Hold'em engine for 2 to 4 seats. Ranks 5 to 7 card
//! hands into a category and tie-break key, resolves showdowns including
//! split pots, and drives a hand through its streets with a seeded deck.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card), parsing, and deck construction
//! - [`deck`] - Seeded deck with used-card tracking
//! - [`hand`] - Hand evaluation, hand strength, and outs
//! - [`showdown`] - Winner selection and pot splitting
//! - [`engine`] - Per-hand driver: deal, streets, folds, showdown
//! - [`player`] - Seat state and status
//! - [`rules`] - Capability flags offered by the betting controller
//! - [`logger`] - Streets and JSONL hand records
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let score = evaluate(&cards).unwrap();
//! assert_eq!(score.category, Category::RoyalFlush);
//! println!("{}", score.describe());
//! ```
//!
//! ## Deterministic Dealing
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.deal_card(), b.deal_card());
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod player;
pub mod rules;
pub mod showdown;
