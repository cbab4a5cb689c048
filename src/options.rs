//! Table configuration options.
//!
//! House rules are fixed: the dealer stands on all 17s, one split per round,
//! blackjack pays 3:2, insurance returns twice its stake and surrender is
//! only offered before the first hit. Options cover how a session is seeded.

use serde::{Deserialize, Serialize};

/// Bankroll a new or reset session starts with.
pub const DEFAULT_BANKROLL: usize = 1000;

/// Remaining-card count below which the deck is replaced before a deal.
pub const DEFAULT_RESHUFFLE_THRESHOLD: usize = 15;

/// Configuration options for a blackjack table session.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjtable::TableOptions;
///
/// let options = TableOptions::default()
///     .with_starting_bankroll(500)
///     .with_reshuffle_threshold(20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOptions {
    /// Bankroll for a fresh session and after a reset.
    pub starting_bankroll: usize,
    /// A new deck is shuffled before a deal when fewer cards remain.
    /// 0 disables the check; an empty deck is always replaced on draw.
    pub reshuffle_threshold: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            starting_bankroll: DEFAULT_BANKROLL,
            reshuffle_threshold: DEFAULT_RESHUFFLE_THRESHOLD,
        }
    }
}

impl TableOptions {
    /// Sets the starting bankroll.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_starting_bankroll(250);
    /// assert_eq!(options.starting_bankroll, 250);
    /// ```
    #[must_use]
    pub const fn with_starting_bankroll(mut self, bankroll: usize) -> Self {
        self.starting_bankroll = bankroll;
        self
    }

    /// Sets the reshuffle threshold.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_reshuffle_threshold(0);
    /// assert_eq!(options.reshuffle_threshold, 0);
    /// ```
    #[must_use]
    pub const fn with_reshuffle_threshold(mut self, threshold: usize) -> Self {
        self.reshuffle_threshold = threshold;
        self
    }
}
