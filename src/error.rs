//! Error types for table operations.

use thiserror::Error;

/// Errors that can occur when placing a bet.
///
/// Both variants are the "invalid bet" case: the amount must satisfy
/// `0 < amount <= bankroll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Bet amount is zero.
    #[error("invalid bet: amount is zero")]
    ZeroBet,
    /// Bet amount exceeds the bankroll.
    #[error("invalid bet: amount exceeds bankroll")]
    InsufficientFunds,
}

/// Errors that can occur during player actions.
///
/// [`ActionError::NotAllowed`] is absorbed silently by
/// [`Game::perform`](crate::Game::perform). The other variants are refusals
/// whose `Display` text becomes the round message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action is not legal in the current state.
    #[error("action is not available")]
    NotAllowed,
    /// Bankroll does not cover the extra stake for a double down.
    #[error("Not enough bankroll to double.")]
    CannotAffordDouble,
    /// Bankroll does not cover the stake for the second split hand.
    #[error("Not enough bankroll to split.")]
    CannotAffordSplit,
    /// Insurance stake is zero or exceeds the bankroll.
    #[error("Cannot take insurance.")]
    CannotInsure,
}

impl ActionError {
    /// Returns whether this error should be reported to the player.
    #[must_use]
    pub const fn is_refusal(self) -> bool {
        !matches!(self, Self::NotAllowed)
    }
}
