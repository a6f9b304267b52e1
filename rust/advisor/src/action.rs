use std::fmt;
use std::str::FromStr;

use holdem_engine::rules::Capabilities;
use serde::{Deserialize, Serialize};

use crate::errors::AdvisorError;

pub const NUM_ACTIONS: usize = 5;

/// Probability (or reward) per action, indexed by [`Action::index`].
pub type Distribution = [f64; NUM_ACTIONS];

/// Betting actions the advisor reasons about.
///
/// Declaration order is significant: it is the walk order for sampling and the
/// tie-break order for recommendations.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Check,
    Call,
    Raise,
    AllIn,
    Fold,
}

impl Action {
    pub const ALL: [Action; NUM_ACTIONS] = [
        Action::Check,
        Action::Call,
        Action::Raise,
        Action::AllIn,
        Action::Fold,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Check => "check",
            Action::Call => "call",
            Action::Raise => "raise",
            Action::AllIn => "all-in",
            Action::Fold => "fold",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Check => "Check",
            Action::Call => "Call",
            Action::Raise => "Raise",
            Action::AllIn => "All-In",
            Action::Fold => "Fold",
        }
    }

    /// Whether the betting controller's flags permit this action.
    pub fn is_legal(self, caps: &Capabilities) -> bool {
        match self {
            Action::Check => caps.can_check,
            Action::Call => caps.can_call,
            Action::Raise => caps.can_raise,
            Action::AllIn => caps.can_all_in,
            Action::Fold => caps.can_fold,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "check" => Ok(Action::Check),
            "call" => Ok(Action::Call),
            "raise" | "bet" => Ok(Action::Raise),
            "all-in" | "allin" | "all_in" | "shove" => Ok(Action::AllIn),
            "fold" => Ok(Action::Fold),
            other => Err(AdvisorError::UnknownAction(other.to_string())),
        }
    }
}

/// Legality mask in declared action order.
pub fn legal_mask(caps: &Capabilities) -> [bool; NUM_ACTIONS] {
    Action::ALL.map(|a| a.is_legal(caps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_declaration_order() {
        for (i, a) in Action::ALL.iter().enumerate() {
            assert_eq!(a.index(), i);
        }
        assert!(Action::Check < Action::Fold);
    }

    #[test]
    fn parses_common_spellings() {
        assert_eq!("All-In".parse::<Action>().unwrap(), Action::AllIn);
        assert_eq!("shove".parse::<Action>().unwrap(), Action::AllIn);
        assert_eq!(" Fold ".parse::<Action>().unwrap(), Action::Fold);
        assert!("limp".parse::<Action>().is_err());
    }

    #[test]
    fn serializes_with_kebab_case() {
        assert_eq!(serde_json::to_string(&Action::AllIn).unwrap(), "\"all-in\"");
    }

    #[test]
    fn mask_mirrors_capabilities() {
        let caps = Capabilities {
            can_check: true,
            can_fold: true,
            ..Capabilities::default()
        };
        assert_eq!(legal_mask(&caps), [true, false, false, false, true]);
    }
}
