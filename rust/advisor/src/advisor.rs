use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::action::legal_mask;
use crate::errors::AdvisorError;
use crate::regret::{select_action, Recommendation, RegretState};
use crate::reward::{counterfactual_rewards, DecisionContext};

/// An advisory session: one player's regret state plus its own random source.
///
/// Regrets persist across calls to [`Advisor::advise`] until
/// [`Advisor::reset`] is called.
///
/// # Examples
///
/// ```
/// use holdem_advisor::advisor::Advisor;
/// use holdem_advisor::reward::DecisionContext;
/// use holdem_engine::rules::Capabilities;
///
/// let mut ctx = DecisionContext::new(Capabilities::for_spot(1000, 100, 100));
/// ctx.strength = 0.05;
/// ctx.pot = 150;
/// ctx.to_call = 100;
/// ctx.stack = 1000;
///
/// let mut advisor = Advisor::new(7);
/// let rec = advisor.advise(&ctx, 500).unwrap();
/// println!("{}", rec); // e.g. "Fold (97.10%)"
/// ```
#[derive(Debug)]
pub struct Advisor {
    state: RegretState,
    rng: ChaCha20Rng,
}

impl Advisor {
    pub fn new(seed: u64) -> Self {
        Self::with_state(RegretState::new(), seed)
    }

    /// Resumes a session from previously saved regrets.
    pub fn with_state(state: RegretState, seed: u64) -> Self {
        Self {
            state,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &RegretState {
        &self.state
    }

    pub fn into_state(self) -> RegretState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Runs `iterations` rounds of regret matching against the reward model
    /// and recommends a legal action from the resulting average strategy.
    ///
    /// With zero iterations the recommendation comes from the regrets
    /// accumulated so far.
    ///
    /// # Errors
    ///
    /// [`AdvisorError::NoLegalAction`] when every capability flag is off.
    pub fn advise(
        &mut self,
        ctx: &DecisionContext,
        iterations: u32,
    ) -> Result<Recommendation, AdvisorError> {
        if !ctx.capabilities.any() {
            return Err(AdvisorError::NoLegalAction);
        }
        let legal = legal_mask(&ctx.capabilities);
        let rewards = counterfactual_rewards(ctx);

        for _ in 0..iterations {
            let strategy = self.state.compute_masked(&legal);
            self.state.accumulate(&strategy);
            let taken = select_action(&strategy, &mut self.rng);
            self.state.update_regrets(taken, rewards[taken.index()], &rewards);
        }

        let rec = self.state.recommend_masked(&legal);
        tracing::debug!(
            iterations,
            action = %rec.action,
            confidence = %rec.confidence(),
            "advice ready"
        );
        Ok(rec)
    }
}
