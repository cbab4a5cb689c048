//! Action legality and the externally visible table state.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::game::{Game, Phase};
use crate::hand::{BLACKJACK, hand_value};

/// Which actions are currently legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionFlags {
    /// Hit is legal.
    pub can_hit: bool,
    /// Stand is legal.
    pub can_stand: bool,
    /// Double down is legal.
    pub can_double: bool,
    /// Split is legal.
    pub can_split: bool,
    /// Surrender is legal.
    pub can_surrender: bool,
    /// Insurance is legal.
    pub can_insure: bool,
}

/// The state returned to the host after every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Money not currently staked.
    pub bankroll: usize,
    /// Bet on each hand.
    pub bets: Vec<usize>,
    /// Card tokens of each hand, such as `"A♠"` or `"10♦"`.
    pub hands: Vec<Vec<String>>,
    /// Total of each hand.
    pub hand_totals: Vec<u16>,
    /// Index of the hand receiving actions.
    pub active_hand_index: usize,
    /// Dealer cards the player may see.
    pub dealer_visible: Vec<String>,
    /// Total of the visible dealer cards.
    pub dealer_total: u16,
    /// Whether no round is live.
    pub finished: bool,
    /// Current phase.
    pub phase: Phase,
    /// Last outcome or refusal message.
    pub message: String,
    /// Hit is legal.
    pub can_hit: bool,
    /// Stand is legal.
    pub can_stand: bool,
    /// Double down is legal.
    pub can_double: bool,
    /// Split is legal.
    pub can_split: bool,
    /// Surrender is legal.
    pub can_surrender: bool,
    /// Insurance is legal.
    pub can_insure: bool,
}

impl Snapshot {
    /// Returns the legality flags carried by this snapshot.
    #[must_use]
    pub const fn flags(&self) -> ActionFlags {
        ActionFlags {
            can_hit: self.can_hit,
            can_stand: self.can_stand,
            can_double: self.can_double,
            can_split: self.can_split,
            can_surrender: self.can_surrender,
            can_insure: self.can_insure,
        }
    }
}

fn tokens(cards: &[Card]) -> Vec<String> {
    cards.iter().map(ToString::to_string).collect()
}

impl Game {
    /// Computes which actions are legal right now.
    ///
    /// Nothing is legal outside the playing phase. Hit needs the active hand
    /// below 21; stand needs it dealt and not bust. Double and surrender need
    /// exactly two cards, split additionally needs a pair and no earlier split,
    /// and insurance needs the round's offer still open.
    ///
    /// Stand stays legal at exactly 21, where hit is not, so a natural or a
    /// hand drawn to 21 can always be finished and settled.
    #[must_use]
    pub fn flags(&self) -> ActionFlags {
        let Some(hand) = self.active_hand() else {
            return ActionFlags::default();
        };

        let value = hand.value();
        let two_cards = hand.len() == 2;

        ActionFlags {
            can_hit: !hand.is_empty() && value < BLACKJACK,
            can_stand: !hand.is_empty() && value <= BLACKJACK,
            can_double: two_cards,
            can_split: two_cards && self.hands().len() == 1 && hand.can_split(),
            can_surrender: two_cards,
            can_insure: two_cards && self.is_insurance_offered(),
        }
    }

    /// Returns whether the dealer's hole card is shown.
    #[must_use]
    pub const fn hole_revealed(&self) -> bool {
        self.phase().reveals_hole_card() || self.is_finished()
    }

    /// Returns the dealer cards the player may see.
    #[must_use]
    pub fn dealer_visible(&self) -> &[Card] {
        self.dealer_hand().visible_cards(self.hole_revealed())
    }

    /// Builds the externally visible state.
    ///
    /// The dealer's hole card and the total it contributes stay hidden until
    /// the dealer plays.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let flags = self.flags();
        let dealer_visible = self.dealer_visible();

        Snapshot {
            bankroll: self.bankroll(),
            bets: self.bets(),
            hands: self.hands().iter().map(|hand| tokens(hand.cards())).collect(),
            hand_totals: self.hands().iter().map(|hand| hand.value()).collect(),
            active_hand_index: self.active_hand_index(),
            dealer_visible: tokens(dealer_visible),
            dealer_total: hand_value(dealer_visible),
            finished: self.is_finished(),
            phase: self.phase(),
            message: String::from(self.message()),
            can_hit: flags.can_hit,
            can_stand: flags.can_stand,
            can_double: flags.can_double,
            can_split: flags.can_split,
            can_surrender: flags.can_surrender,
            can_insure: flags.can_insure,
        }
    }
}
