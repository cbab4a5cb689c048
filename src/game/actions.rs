use alloc::string::ToString;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::ActionError;
use crate::hand::Hand;
use crate::view::Snapshot;

use super::Game;

/// A player action on the live round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Draw a card onto the active hand.
    Hit,
    /// Finish the active hand.
    Stand,
    /// Double the stake, take exactly one card and stand.
    Double,
    /// Split a pair into two hands.
    Split,
    /// Give up the active hand for half its stake.
    Surrender,
    /// Take insurance against a dealer blackjack.
    Insurance,
}

impl Game {
    /// Applies an action and returns the resulting snapshot.
    ///
    /// Illegal actions leave the state untouched. Refusals for lack of
    /// bankroll also leave it untouched apart from the message.
    pub fn perform(&mut self, action: Action) -> Snapshot {
        let result = match action {
            Action::Hit => self.hit().map(|_| ()),
            Action::Stand => self.stand(),
            Action::Double => self.double_down().map(|_| ()),
            Action::Split => self.split(),
            Action::Surrender => self.surrender().map(|_| ()),
            Action::Insurance => self.take_insurance().map(|_| ()),
        };

        match result {
            Ok(()) => {}
            Err(err) if err.is_refusal() => {
                tracing::debug!(?action, %err, bankroll = self.bankroll, "action refused");
                self.message = err.to_string();
            }
            Err(err) => {
                tracing::debug!(?action, %err, phase = ?self.phase, "action ignored");
            }
        }

        self.snapshot()
    }

    fn active_hand_mut(&mut self) -> Result<&mut Hand, ActionError> {
        self.hands
            .get_mut(self.active_hand)
            .ok_or(ActionError::NotAllowed)
    }

    /// Player action: Hit (draw a card).
    ///
    /// A bust finishes the hand.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotAllowed`] unless the active hand is below 21
    /// during play.
    pub fn hit(&mut self) -> Result<Card, ActionError> {
        if !self.flags().can_hit {
            return Err(ActionError::NotAllowed);
        }

        let card = self.draw();
        let hand = self.active_hand_mut()?;
        hand.add_card(card);

        if hand.is_bust() {
            self.advance_after_hand();
        }

        Ok(card)
    }

    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotAllowed`] unless the active hand is dealt and
    /// not bust during play.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        if !self.flags().can_stand {
            return Err(ActionError::NotAllowed);
        }

        self.advance_after_hand();
        Ok(())
    }

    /// Player action: Double down (double bet, receive one card, then stand).
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotAllowed`] unless the active hand holds
    /// exactly two cards, or [`ActionError::CannotAffordDouble`] if the
    /// bankroll does not cover the hand's bet.
    pub fn double_down(&mut self) -> Result<Card, ActionError> {
        if !self.flags().can_double {
            return Err(ActionError::NotAllowed);
        }

        let bet = self.active_hand_mut()?.bet();
        if self.bankroll < bet {
            return Err(ActionError::CannotAffordDouble);
        }

        self.bankroll -= bet;
        let card = self.draw();
        let hand = self.active_hand_mut()?;
        hand.double_bet();
        hand.add_card(card);

        self.advance_after_hand();
        Ok(card)
    }

    /// Player action: Split (split a pair into two hands).
    ///
    /// Each original card seeds a new hand that is dealt one more card, first
    /// hand first. Play resumes on the first hand. Only one split is allowed
    /// per round.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotAllowed`] unless the only hand is a pair, or
    /// [`ActionError::CannotAffordSplit`] if the bankroll does not cover a
    /// second stake.
    pub fn split(&mut self) -> Result<(), ActionError> {
        if !self.flags().can_split {
            return Err(ActionError::NotAllowed);
        }

        let hand = self.active_hand_mut()?;
        let bet = hand.bet();
        let &[first, second] = hand.cards() else {
            return Err(ActionError::NotAllowed);
        };

        if self.bankroll < bet {
            return Err(ActionError::CannotAffordSplit);
        }

        self.bankroll -= bet;

        let mut first_hand = Hand::from_split(first, bet);
        first_hand.add_card(self.draw());
        let mut second_hand = Hand::from_split(second, bet);
        second_hand.add_card(self.draw());

        self.hands = alloc::vec![first_hand, second_hand];
        self.active_hand = 0;

        tracing::debug!(bet, bankroll = self.bankroll, "hand split");
        Ok(())
    }

    /// Player action: Surrender (forfeit half the bet).
    ///
    /// Half the stake, rounded down, returns to the bankroll. The hand is left
    /// empty with a zero bet and takes no further part in the round.
    ///
    /// Returns the refunded amount.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NotAllowed`] unless the active hand holds
    /// exactly two cards.
    pub fn surrender(&mut self) -> Result<usize, ActionError> {
        if !self.flags().can_surrender {
            return Err(ActionError::NotAllowed);
        }

        let refund = self.active_hand_mut()?.surrender() / 2;
        self.bankroll += refund;

        self.advance_after_hand();
        Ok(refund)
    }
}
