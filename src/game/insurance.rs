use crate::error::ActionError;

use super::Game;

impl Game {
    /// Returns whether insurance is still on offer this round.
    ///
    /// The offer is made at deal time when the dealer's up card is an Ace and
    /// withdrawn once insurance is taken.
    #[must_use]
    pub const fn is_insurance_offered(&self) -> bool {
        self.insurance_offered
    }

    /// Takes insurance.
    ///
    /// The stake is half the first hand's bet, rounded down. It is settled
    /// before the hands: a dealer blackjack returns twice the stake, anything
    /// else forfeits it.
    ///
    /// Returns the insurance stake.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotAllowed`] if insurance is not on offer or the
    /// active hand no longer holds two cards, or [`ActionError::CannotInsure`]
    /// if the stake would be zero or exceeds the bankroll.
    pub fn take_insurance(&mut self) -> Result<usize, ActionError> {
        if !self.flags().can_insure {
            return Err(ActionError::NotAllowed);
        }

        let stake = self.hands.first().map_or(0, |hand| hand.bet()) / 2;
        if stake == 0 || stake > self.bankroll {
            return Err(ActionError::CannotInsure);
        }

        self.bankroll -= stake;
        self.insurance_bet = stake;
        self.insurance_offered = false;

        tracing::debug!(stake, bankroll = self.bankroll, "insurance taken");
        Ok(stake)
    }
}
