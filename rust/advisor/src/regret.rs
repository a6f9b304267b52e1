//! Regret and strategy accumulators for one advisory session.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::action::{Action, Distribution, NUM_ACTIONS};
use crate::errors::AdvisorError;

/// Every action allowed.
pub const ALL_LEGAL: [bool; NUM_ACTIONS] = [true; NUM_ACTIONS];

/// Normalizes the positive, legal entries of `weights` into a distribution.
///
/// Falls back to uniform over the legal actions when no legal entry is
/// positive. Illegal actions always get zero mass.
pub fn regret_match(weights: &Distribution, legal: &[bool; NUM_ACTIONS]) -> Distribution {
    let mut out = [0.0; NUM_ACTIONS];
    let positive_sum: f64 = (0..NUM_ACTIONS)
        .filter(|&i| legal[i] && weights[i] > 0.0)
        .map(|i| weights[i])
        .sum();

    if positive_sum > 0.0 {
        for i in 0..NUM_ACTIONS {
            if legal[i] && weights[i] > 0.0 {
                out[i] = weights[i] / positive_sum;
            }
        }
    } else {
        let n = legal.iter().filter(|&&l| l).count();
        if n > 0 {
            let uniform = 1.0 / n as f64;
            for i in 0..NUM_ACTIONS {
                if legal[i] {
                    out[i] = uniform;
                }
            }
        }
    }
    out
}

/// Samples an action from `strategy` with a single uniform draw.
///
/// Walks the cumulative mass in declared order and returns the first action
/// whose running total exceeds the draw. Rounding leftovers go to the last
/// action that carries any mass, or [`Action::Fold`] if none does.
pub fn select_action<R: Rng + ?Sized>(strategy: &Distribution, rng: &mut R) -> Action {
    let draw: f64 = rng.random();
    let mut cumulative = 0.0;
    for a in Action::ALL {
        cumulative += strategy[a.index()];
        if draw < cumulative {
            return a;
        }
    }
    Action::ALL
        .into_iter()
        .rev()
        .find(|a| strategy[a.index()] > 0.0)
        .unwrap_or(Action::Fold)
}

/// Cumulative regret and strategy sums, one entry per action.
///
/// Both tables stay finite, so the state always serializes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredRegrets", into = "StoredRegrets")]
pub struct RegretState {
    regret_sum: Distribution,
    strategy_sum: Distribution,
}

impl RegretState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state from raw sums, rejecting non-finite entries.
    pub fn from_sums(
        regret_sum: Distribution,
        strategy_sum: Distribution,
    ) -> Result<Self, AdvisorError> {
        let state = Self {
            regret_sum,
            strategy_sum,
        };
        state.check_finite()?;
        Ok(state)
    }

    pub fn regret_sum(&self) -> &Distribution {
        &self.regret_sum
    }

    pub fn strategy_sum(&self) -> &Distribution {
        &self.strategy_sum
    }

    pub fn regret(&self, action: Action) -> f64 {
        self.regret_sum[action.index()]
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Strategy implied by current regrets. Does not touch `strategy_sum`.
    pub fn compute_strategy(&self) -> Distribution {
        self.compute_masked(&ALL_LEGAL)
    }

    /// [`compute_strategy`](Self::compute_strategy) restricted to legal actions.
    pub fn compute_masked(&self, legal: &[bool; NUM_ACTIONS]) -> Distribution {
        regret_match(&self.regret_sum, legal)
    }

    /// Adds `strategy` into the running strategy sum.
    pub fn accumulate(&mut self, strategy: &Distribution) {
        for (sum, p) in self.strategy_sum.iter_mut().zip(strategy) {
            *sum += p;
        }
    }

    /// Computes the current strategy and accumulates it in one step.
    pub fn current_strategy(&mut self) -> Distribution {
        let strategy = self.compute_strategy();
        self.accumulate(&strategy);
        strategy
    }

    /// Normalized strategy sum; uniform before anything was accumulated.
    pub fn average_strategy(&self) -> Distribution {
        self.average_masked(&ALL_LEGAL)
    }

    pub fn average_masked(&self, legal: &[bool; NUM_ACTIONS]) -> Distribution {
        regret_match(&self.strategy_sum, legal)
    }

    /// Applies `regret[a] += counterfactual[a] - reward` for every action.
    ///
    /// `reward` is the payoff of the action actually taken, so its own regret
    /// is unchanged. A non-finite counterfactual (an illegal action) can only
    /// pull its regret down to zero; a non-finite `reward` skips the update.
    pub fn update_regrets(&mut self, taken: Action, reward: f64, counterfactual: &Distribution) {
        if !reward.is_finite() {
            tracing::warn!(action = %taken, reward, "skipping regret update for non-finite reward");
            return;
        }
        for (i, regret) in self.regret_sum.iter_mut().enumerate() {
            let cf = counterfactual[i];
            let next = *regret + (cf - reward);
            *regret = if next.is_finite() { next } else { regret.min(0.0) };
        }
        tracing::trace!(action = %taken, reward, regrets = ?self.regret_sum, "regrets updated");
    }

    /// Arg-max of the average strategy.
    pub fn recommend(&self) -> Recommendation {
        Recommendation::from_distribution(self.average_strategy())
    }

    pub fn recommend_masked(&self, legal: &[bool; NUM_ACTIONS]) -> Recommendation {
        Recommendation::from_distribution(self.average_masked(legal))
    }

    fn check_finite(&self) -> Result<(), AdvisorError> {
        for a in Action::ALL {
            if !self.regret_sum[a.index()].is_finite() {
                return Err(AdvisorError::NonFinite {
                    table: "regret_sum",
                    action: a,
                });
            }
            if !self.strategy_sum[a.index()].is_finite() {
                return Err(AdvisorError::NonFinite {
                    table: "strategy_sum",
                    action: a,
                });
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, AdvisorError> {
        self.check_finite()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, AdvisorError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Writes the state as a JSON action-to-value map.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AdvisorError> {
        let json = self.to_json()?;
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AdvisorError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// On-disk form: `{"regret_sum": {"check": 0.0, ...}, "strategy_sum": {...}}`.
/// Missing actions load as zero.
#[derive(Serialize, Deserialize)]
struct StoredRegrets {
    #[serde(default)]
    regret_sum: BTreeMap<Action, f64>,
    #[serde(default)]
    strategy_sum: BTreeMap<Action, f64>,
}

fn to_table(values: &Distribution) -> BTreeMap<Action, f64> {
    Action::ALL.iter().map(|&a| (a, values[a.index()])).collect()
}

fn from_table(table: &BTreeMap<Action, f64>) -> Distribution {
    Action::ALL.map(|a| table.get(&a).copied().unwrap_or(0.0))
}

impl From<RegretState> for StoredRegrets {
    fn from(state: RegretState) -> Self {
        Self {
            regret_sum: to_table(&state.regret_sum),
            strategy_sum: to_table(&state.strategy_sum),
        }
    }
}

impl TryFrom<StoredRegrets> for RegretState {
    type Error = AdvisorError;

    fn try_from(stored: StoredRegrets) -> Result<Self, Self::Error> {
        RegretState::from_sums(
            from_table(&stored.regret_sum),
            from_table(&stored.strategy_sum),
        )
    }
}

/// The advisor's suggestion plus the distribution it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub action: Action,
    pub probability: f64,
    pub distribution: Distribution,
}

impl Recommendation {
    /// Picks the most probable action; the earlier declared action wins ties.
    pub fn from_distribution(distribution: Distribution) -> Self {
        let mut best = Action::ALL[0];
        for a in Action::ALL {
            if distribution[a.index()] > distribution[best.index()] {
                best = a;
            }
        }
        Self {
            action: best,
            probability: distribution[best.index()],
            distribution,
        }
    }

    /// Probability as a percentage with two decimals, e.g. `62.50%`.
    pub fn confidence(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.action.label(), self.confidence())
    }
}
