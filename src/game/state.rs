//! Round phase.

use serde::{Deserialize, Serialize};

/// Phase of the current round.
///
/// Rounds move through the phases in order: `Betting`, `Playing`, `Dealer`,
/// `Payout`, then back to `Betting` when the next bet is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No hands dealt, awaiting a wager.
    #[default]
    Betting,
    /// The player acts on the active hand.
    Playing,
    /// The dealer plays out and the round is settled.
    Dealer,
    /// The round is resolved.
    Payout,
}

impl Phase {
    /// Returns whether the dealer's hole card is shown in this phase.
    #[must_use]
    pub const fn reveals_hole_card(self) -> bool {
        matches!(self, Self::Dealer | Self::Payout)
    }
}
