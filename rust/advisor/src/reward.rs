//! Heuristic reward model for the five betting actions.

use holdem_engine::cards::Card;
use holdem_engine::hand::{calculate_hand_strength, count_outs};
use holdem_engine::rules::Capabilities;
use serde::{Deserialize, Serialize};

use crate::action::{Action, Distribution};
use crate::errors::AdvisorError;

/// Everything the reward model needs to know about one decision.
///
/// Chip amounts are from the deciding player's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionContext {
    /// Hand strength in `[0, 1]`
    pub strength: f64,
    pub pot: u32,
    pub to_call: u32,
    /// Chips this player already put in the pot this hand
    pub player_bet: u32,
    pub stack: u32,
    /// Raise size on top of the call
    pub raise_amount: u32,
    /// Opponents still contesting the pot
    pub opponents: usize,
    /// Draw bonus in `[0, 2]`, see [`improvement_factor`]
    pub improvement: f64,
    pub capabilities: Capabilities,
}

impl DecisionContext {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            strength: 0.0,
            pot: 0,
            to_call: 0,
            player_bet: 0,
            stack: 0,
            raise_amount: 0,
            opponents: 1,
            improvement: 0.0,
            capabilities,
        }
    }

    /// Fills `strength` and `improvement` from the player's visible cards.
    pub fn with_hand(mut self, hole: &[Card; 2], board: &[Card]) -> Result<Self, AdvisorError> {
        self.strength = calculate_hand_strength(hole, board)?;
        let outs = count_outs(hole, board)?;
        let undealt = 52 - hole.len() - board.len();
        self.improvement = improvement_factor(outs, undealt);
        tracing::debug!(
            strength = self.strength,
            outs,
            improvement = self.improvement,
            "decision context scored"
        );
        Ok(self)
    }
}

/// `min(outs / undealt, 1) * 2`, zero when nothing is left to deal.
pub fn improvement_factor(outs: usize, undealt: usize) -> f64 {
    if undealt == 0 {
        return 0.0;
    }
    (outs as f64 / undealt as f64).min(1.0) * 2.0
}

/// Expected value estimate for taking `action` in `ctx`.
///
/// Winning amounts are scaled by `strength`, divided by the opponent count and
/// multiplied by `1 + improvement`; chips put at risk are lost with
/// probability `1 - strength`. Folding always costs the chips already bet.
/// Returns `f64::NEG_INFINITY` when the capability flags forbid the action.
///
/// # Examples
///
/// ```
/// use holdem_advisor::action::Action;
/// use holdem_advisor::reward::{estimate_reward, DecisionContext};
/// use holdem_engine::rules::Capabilities;
///
/// let mut ctx = DecisionContext::new(Capabilities::for_spot(1000, 50, 100));
/// ctx.player_bet = 30;
/// assert_eq!(estimate_reward(&ctx, Action::Fold), -30.0);
/// assert_eq!(estimate_reward(&ctx, Action::Check), f64::NEG_INFINITY);
/// ```
pub fn estimate_reward(ctx: &DecisionContext, action: Action) -> f64 {
    if !action.is_legal(&ctx.capabilities) {
        return f64::NEG_INFINITY;
    }
    let s = ctx.strength.clamp(0.0, 1.0);
    let lose = 1.0 - s;
    let discount = 1.0 / ctx.opponents.max(1) as f64;
    let multiplier = 1.0 + ctx.improvement;
    let win = |amount: f64| s * amount * discount * multiplier;

    let pot = f64::from(ctx.pot);
    let to_call = f64::from(ctx.to_call);
    let stack = f64::from(ctx.stack);
    match action {
        Action::Check => win(pot),
        Action::Call => win(pot + to_call) - lose * to_call,
        Action::Raise => {
            let risk = to_call + f64::from(ctx.raise_amount);
            win(pot + risk) - lose * risk
        }
        Action::AllIn => win(pot + stack) - lose * stack,
        Action::Fold => -f64::from(ctx.player_bet),
    }
}

/// Rewards for every action in declared order.
pub fn counterfactual_rewards(ctx: &DecisionContext) -> Distribution {
    Action::ALL.map(|a| estimate_reward(ctx, a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::parse_cards;

    #[test]
    fn improvement_is_capped_and_scaled() {
        assert_eq!(improvement_factor(0, 47), 0.0);
        assert!((improvement_factor(9, 47) - 18.0 / 47.0).abs() < 1e-12);
        assert_eq!(improvement_factor(60, 47), 2.0);
        assert_eq!(improvement_factor(3, 0), 0.0);
    }

    #[test]
    fn more_opponents_discount_the_win() {
        let mut ctx = DecisionContext::new(Capabilities::all());
        ctx.strength = 0.5;
        ctx.pot = 400;
        let heads_up = estimate_reward(&ctx, Action::Check);
        ctx.opponents = 3;
        let three_way = estimate_reward(&ctx, Action::Check);
        assert_eq!(heads_up, 200.0);
        assert!((three_way - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn draws_boost_the_win() {
        let mut ctx = DecisionContext::new(Capabilities::all());
        ctx.strength = 0.5;
        ctx.pot = 100;
        ctx.improvement = 0.5;
        assert_eq!(estimate_reward(&ctx, Action::Check), 75.0);
    }

    #[test]
    fn each_action_has_its_own_formula() {
        let mut ctx = DecisionContext::new(Capabilities::all());
        ctx.strength = 0.25;
        ctx.pot = 200;
        ctx.to_call = 40;
        ctx.raise_amount = 60;
        ctx.stack = 400;
        ctx.player_bet = 10;
        let r = counterfactual_rewards(&ctx);
        assert_eq!(r[Action::Check.index()], 50.0);
        assert_eq!(r[Action::Call.index()], 0.25 * 240.0 - 0.75 * 40.0);
        assert_eq!(r[Action::Raise.index()], 0.25 * 300.0 - 0.75 * 100.0);
        assert_eq!(r[Action::AllIn.index()], 0.25 * 600.0 - 0.75 * 400.0);
        assert_eq!(r[Action::Fold.index()], -10.0);
    }

    #[test]
    fn with_hand_scores_the_flush_draw() {
        let hole = parse_cards("Ah Kh").unwrap();
        let board = parse_cards("7h 2h 9c").unwrap();
        let ctx = DecisionContext::new(Capabilities::all())
            .with_hand(&[hole[0], hole[1]], &board)
            .unwrap();
        assert!(ctx.strength > 0.0 && ctx.strength <= 1.0);
        assert!((ctx.improvement - improvement_factor(23, 47)).abs() < 1e-12);
    }
}
