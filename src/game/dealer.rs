use alloc::vec::Vec;

use crate::card::Card;
use crate::hand::{BLACKJACK, Hand};
use crate::result::{HandOutcome, HandResult, RoundResult};

use super::{Game, Phase};

/// The dealer draws below this total and stands on every 17, soft or hard.
const DEALER_STANDS_ON: u16 = 17;

/// Stake plus three-to-two winnings, rounded down.
const fn blackjack_payout(bet: usize) -> usize {
    let winnings = (bet / 2).saturating_mul(3).saturating_add(bet % 2 * 3 / 2);
    bet.saturating_add(winnings)
}

fn resolve_hand(hand_index: usize, hand: &Hand, dealer_value: u16) -> HandResult {
    let bet = hand.bet();
    let player_value = hand.value();

    let (outcome, payout) = if hand.is_surrendered() {
        // Already refunded half during surrender
        (HandOutcome::Surrendered, 0)
    } else if player_value > BLACKJACK {
        (HandOutcome::Lose, 0)
    } else if hand.is_blackjack() {
        (HandOutcome::Blackjack, blackjack_payout(bet))
    } else if dealer_value > BLACKJACK || player_value > dealer_value {
        (HandOutcome::Win, bet.saturating_mul(2))
    } else if player_value < dealer_value {
        (HandOutcome::Lose, 0)
    } else {
        (HandOutcome::Push, bet)
    };

    HandResult {
        hand_index,
        outcome,
        bet,
        payout,
        player_value,
        dealer_value,
    }
}

impl Game {
    /// Dealer draws until reaching 17 or higher.
    ///
    /// Returns the cards drawn.
    fn dealer_play(&mut self) -> Vec<Card> {
        let mut drawn = Vec::new();
        while self.dealer.value() < DEALER_STANDS_ON {
            let card = self.draw();
            self.dealer.add_card(card);
            drawn.push(card);
        }
        drawn
    }

    /// Settles the round once every hand is finished.
    ///
    /// Insurance is resolved first. A dealer blackjack ends the round without
    /// further draws: player blackjacks push and every other hand loses.
    /// Otherwise the dealer plays out and each hand is compared in order.
    /// Stakes were taken at bet time, so a losing hand credits nothing.
    pub(super) fn settle(&mut self) {
        self.phase = Phase::Dealer;

        let dealer_blackjack = self.dealer.is_blackjack();

        let insurance_bet = core::mem::take(&mut self.insurance_bet);
        let insurance_payout = if dealer_blackjack {
            insurance_bet.saturating_mul(2)
        } else {
            0
        };

        let hands = if dealer_blackjack {
            let dealer_value = self.dealer.value();
            self.hands
                .iter()
                .enumerate()
                .map(|(hand_index, hand)| {
                    let (outcome, payout) = if hand.is_surrendered() {
                        (HandOutcome::Surrendered, 0)
                    } else if hand.is_blackjack() {
                        (HandOutcome::Push, hand.bet())
                    } else {
                        (HandOutcome::Lose, 0)
                    };
                    HandResult {
                        hand_index,
                        outcome,
                        bet: hand.bet(),
                        payout,
                        player_value: hand.value(),
                        dealer_value,
                    }
                })
                .collect()
        } else {
            let drawn = self.dealer_play();
            tracing::debug!(
                drawn = drawn.len(),
                dealer_value = self.dealer.value(),
                "dealer played"
            );

            let dealer_value = self.dealer.value();
            self.hands
                .iter()
                .enumerate()
                .map(|(hand_index, hand)| resolve_hand(hand_index, hand, dealer_value))
                .collect()
        };

        let result = RoundResult {
            hands,
            dealer_value: self.dealer.value(),
            dealer_bust: self.dealer.is_bust(),
            dealer_blackjack,
            insurance_bet,
            insurance_payout,
        };

        self.bankroll = self.bankroll.saturating_add(result.total_payout());
        self.message = result.message();
        self.finished = true;
        self.phase = Phase::Payout;

        tracing::info!(
            bankroll = self.bankroll,
            payout = result.total_payout(),
            dealer_value = result.dealer_value,
            dealer_blackjack,
            insurance_payout,
            "round settled"
        );

        self.last_result = Some(result);
    }
}
