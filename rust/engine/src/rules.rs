use serde::{Deserialize, Serialize};

/// Which actions the betting controller currently allows a seat to take.
///
/// The decision engine never infers legality on its own; it is always handed
/// one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_check: bool,
    pub can_call: bool,
    pub can_raise: bool,
    pub can_all_in: bool,
    pub can_fold: bool,
}

impl Capabilities {
    pub fn all() -> Self {
        Self {
            can_check: true,
            can_call: true,
            can_raise: true,
            can_all_in: true,
            can_fold: true,
        }
    }

    /// Derives the flags a no-limit controller would offer.
    ///
    /// # Arguments
    ///
    /// * `stack` - Player's remaining chip stack
    /// * `to_call` - Amount needed to call the current bet
    /// * `min_raise` - Minimum allowed raise on top of the call
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_engine::rules::Capabilities;
    ///
    /// // facing nothing: check is free, call is meaningless
    /// let caps = Capabilities::for_spot(1000, 0, 100);
    /// assert!(caps.can_check && !caps.can_call);
    ///
    /// // a call that needs the whole stack is an all-in, not a call
    /// let caps = Capabilities::for_spot(50, 50, 100);
    /// assert!(!caps.can_call && !caps.can_raise && caps.can_all_in);
    /// ```
    pub fn for_spot(stack: u32, to_call: u32, min_raise: u32) -> Self {
        Self {
            can_check: to_call == 0,
            can_call: to_call > 0 && stack > to_call,
            can_raise: stack > to_call.saturating_add(min_raise),
            can_all_in: stack > 0,
            can_fold: true,
        }
    }

    pub fn any(&self) -> bool {
        self.can_check || self.can_call || self.can_raise || self.can_all_in || self.can_fold
    }
}
