//! # holdem-advisor: Regret-Matching Action Advisor
//!
//! Recommends a betting action from accumulated regrets and a heuristic
//! reward model. Advice is non-binding; the betting controller decides which
//! actions are legal and passes them in as
//! [`Capabilities`](holdem_engine::rules::Capabilities).
//!
//! ## Core Modules
//!
//! - [`action`] - The five actions and legality masks
//! - [`regret`] - Regret/strategy sums, sampling, recommendations, persistence
//! - [`reward`] - Decision context and per-action reward estimates
//! - [`advisor`] - Seeded advisory session tying the above together
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_advisor::action::Action;
//! use holdem_advisor::advisor::Advisor;
//! use holdem_advisor::reward::DecisionContext;
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::rules::Capabilities;
//!
//! let hole = parse_cards("As Ad").unwrap();
//! let board = parse_cards("Ac 7d 2s").unwrap();
//! let mut ctx = DecisionContext::new(Capabilities::for_spot(2000, 0, 100))
//!     .with_hand(&[hole[0], hole[1]], &board)
//!     .unwrap();
//! ctx.pot = 300;
//! ctx.stack = 2000;
//! ctx.raise_amount = 100;
//!
//! let mut advisor = Advisor::new(42);
//! let rec = advisor.advise(&ctx, 1000).unwrap();
//! assert_ne!(rec.action, Action::Call); // nothing to call
//! println!("{} with {}", rec.action.label(), rec.confidence());
//! ```

pub mod action;
pub mod advisor;
pub mod errors;
pub mod regret;
pub mod reward;

pub use action::Action;
pub use advisor::Advisor;
pub use errors::AdvisorError;
pub use regret::{Recommendation, RegretState};
pub use reward::DecisionContext;
