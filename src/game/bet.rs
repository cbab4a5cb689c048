use crate::error::BetError;
use crate::hand::Hand;

use super::{Game, Phase};

impl Game {
    /// Places a bet and deals a new round.
    ///
    /// The stake leaves the bankroll immediately. The dealer receives two
    /// cards (the first is the up card), then the player receives two. When
    /// the deck is below the reshuffle threshold it is replaced before any
    /// card is dealt. Insurance is offered when the dealer's up card is an Ace.
    ///
    /// Betting while a round is live abandons that round and its stakes.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is zero or exceeds the bankroll. No
    /// state changes in that case.
    pub fn bet(&mut self, amount: usize) -> Result<(), BetError> {
        if amount == 0 {
            return Err(BetError::ZeroBet);
        }

        if amount > self.bankroll {
            return Err(BetError::InsufficientFunds);
        }

        if self.phase == Phase::Playing {
            tracing::warn!(
                hands = self.hands.len(),
                staked = self.bets().iter().sum::<usize>(),
                "bet placed during a live round; abandoning it"
            );
        }

        self.clear_round();
        self.bankroll -= amount;
        self.deal(amount);

        Ok(())
    }

    fn deal(&mut self, bet: usize) {
        if self.deck.len() < self.options.reshuffle_threshold {
            self.reshuffle();
        }

        let up_card = self.draw();
        let hole_card = self.draw();
        self.dealer.add_card(up_card);
        self.dealer.add_card(hole_card);

        let mut hand = Hand::new(bet);
        hand.add_card(self.draw());
        hand.add_card(self.draw());
        self.hands.push(hand);

        self.active_hand = 0;
        self.phase = Phase::Playing;
        self.finished = false;
        self.insurance_offered = up_card.is_ace();

        tracing::debug!(
            bet,
            bankroll = self.bankroll,
            up_card = %up_card,
            insurance_offered = self.insurance_offered,
            cards_remaining = self.deck.len(),
            "round dealt"
        );
    }
}
