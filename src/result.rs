//! Round result types for settlement.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

use serde::{Deserialize, Serialize};

use crate::hand::BLACKJACK;

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has higher value).
    Win,
    /// Player loses (player busts or dealer has higher value).
    Lose,
    /// Push (tie).
    Push,
    /// Player has blackjack.
    Blackjack,
    /// Player surrendered.
    Surrendered,
}

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    /// The hand index (for split hands).
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The bet amount for this hand.
    pub bet: usize,
    /// The amount returned to the bankroll, stake included.
    pub payout: usize,
    /// The player's hand value.
    pub player_value: u16,
    /// The dealer's hand value.
    pub dealer_value: u16,
}

impl HandResult {
    /// Net result for this hand (positive = profit, negative = loss).
    #[must_use]
    #[expect(clippy::cast_possible_wrap, reason = "payout values fit in isize")]
    pub const fn net(&self) -> isize {
        self.payout as isize - self.bet as isize
    }
}

impl fmt::Display for HandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hand {}: ", self.hand_index + 1)?;
        match self.outcome {
            HandOutcome::Lose if self.player_value > BLACKJACK => {
                f.write_str("Player busts, loses.")
            }
            HandOutcome::Lose => f.write_str("Dealer wins."),
            HandOutcome::Blackjack => {
                write!(f, "Blackjack! Win {}.", self.payout.saturating_sub(self.bet))
            }
            HandOutcome::Win if self.dealer_value > BLACKJACK => {
                f.write_str("Dealer busts, player wins.")
            }
            HandOutcome::Win => f.write_str("Player wins."),
            HandOutcome::Push => f.write_str("Push (tie)."),
            HandOutcome::Surrendered => f.write_str("Surrendered."),
        }
    }
}

/// Result of the entire round after settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Results for each player hand, in hand order.
    pub hands: Vec<HandResult>,
    /// The dealer's final hand value.
    pub dealer_value: u16,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// Insurance bet amount (0 if no insurance taken).
    pub insurance_bet: usize,
    /// Insurance payout (0 if dealer didn't have blackjack or no insurance taken).
    pub insurance_payout: usize,
}

impl RoundResult {
    /// Total credited to the bankroll at settlement, insurance included.
    #[must_use]
    pub fn total_payout(&self) -> usize {
        self.hands
            .iter()
            .fold(self.insurance_payout, |total, hand| total.saturating_add(hand.payout))
    }

    /// Human-readable summary shown as the round message.
    #[must_use]
    pub fn message(&self) -> String {
        if self.dealer_blackjack {
            return String::from("Dealer has blackjack.");
        }

        let mut message = String::new();
        for hand in &self.hands {
            if !message.is_empty() {
                message.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = write!(message, "{hand}");
        }
        message
    }
}
