//! Round engine and per-session state.

use alloc::string::String;
use alloc::vec::Vec;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::deck::Deck;
use crate::hand::{DealerHand, Hand};
use crate::options::TableOptions;
use crate::result::RoundResult;

mod actions;
mod bet;
mod dealer;
mod insurance;
pub mod state;

pub use actions::Action;
pub use state::Phase;

/// A single-player blackjack table.
///
/// One `Game` is the whole state of one session: deck, RNG, bankroll and the
/// round in progress. It is plain data, so a host can clone it, persist it
/// with serde between requests and hand it back for the next action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// Session options.
    pub options: TableOptions,
    /// Cards left in the deck.
    pub deck: Deck,
    /// Random number generator used for every shuffle.
    rng: ChaCha8Rng,
    /// Player money not currently staked.
    bankroll: usize,
    /// Dealer's hand.
    dealer: DealerHand,
    /// Player hands; two after a split.
    hands: Vec<Hand>,
    /// Index of the hand receiving actions.
    active_hand: usize,
    /// Insurance stake for the current round.
    insurance_bet: usize,
    /// Whether insurance may still be taken this round.
    insurance_offered: bool,
    /// Current phase.
    phase: Phase,
    /// Whether no round is live.
    finished: bool,
    /// Last outcome or refusal message.
    message: String,
    /// Settlement of the most recent round.
    last_result: Option<RoundResult>,
}

impl Game {
    /// Creates a new session with the given seed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{Game, Phase, TableOptions};
    ///
    /// let game = Game::new(TableOptions::default(), 42);
    /// assert_eq!(game.bankroll(), 1000);
    /// assert_eq!(game.phase(), Phase::Betting);
    /// ```
    #[must_use]
    pub fn new(options: TableOptions, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let deck = Deck::shuffled(&mut rng);
        let bankroll = options.starting_bankroll;

        Self {
            options,
            deck,
            rng,
            bankroll,
            dealer: DealerHand::new(),
            hands: Vec::new(),
            active_hand: 0,
            insurance_bet: 0,
            insurance_offered: false,
            phase: Phase::Betting,
            finished: true,
            message: String::new(),
            last_result: None,
        }
    }

    /// Replaces the deck with a freshly shuffled one.
    pub fn reshuffle(&mut self) {
        self.deck = Deck::shuffled(&mut self.rng);
        tracing::debug!(cards = self.deck.len(), "deck reshuffled");
    }

    /// Draws a card, replacing the deck first if it is empty.
    fn draw(&mut self) -> Card {
        loop {
            if let Some(card) = self.deck.draw() {
                return card;
            }
            self.reshuffle();
        }
    }

    /// Finishes the active hand: moves to the next one or settles the round.
    fn advance_after_hand(&mut self) {
        if self.active_hand + 1 < self.hands.len() {
            self.active_hand += 1;
        } else {
            self.settle();
        }
    }

    /// Clears the round and returns to the betting phase.
    ///
    /// The bankroll and deck are kept. Stakes on an unfinished round are not
    /// refunded.
    pub fn clear_round(&mut self) {
        self.hands.clear();
        self.dealer.clear();
        self.active_hand = 0;
        self.insurance_bet = 0;
        self.insurance_offered = false;
        self.phase = Phase::Betting;
        self.finished = true;
        self.message.clear();
        self.last_result = None;
    }

    /// Clears the round, restores the starting bankroll and shuffles a new deck.
    pub fn reset(&mut self) {
        self.clear_round();
        self.bankroll = self.options.starting_bankroll;
        self.reshuffle();
        tracing::info!(bankroll = self.bankroll, "session reset");
    }

    /// Returns the current bankroll.
    #[must_use]
    pub const fn bankroll(&self) -> usize {
        self.bankroll
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns whether no round is live.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the player's hands.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Returns the bet on each hand, parallel to [`Game::hands`].
    #[must_use]
    pub fn bets(&self) -> Vec<usize> {
        self.hands.iter().map(Hand::bet).collect()
    }

    /// Returns the index of the hand receiving actions.
    #[must_use]
    pub const fn active_hand_index(&self) -> usize {
        self.active_hand
    }

    /// Returns the hand receiving actions while the player is acting.
    #[must_use]
    pub fn active_hand(&self) -> Option<&Hand> {
        if self.phase == Phase::Playing && !self.finished {
            self.hands.get(self.active_hand)
        } else {
            None
        }
    }

    /// Returns the dealer's full hand, hole card included.
    #[must_use]
    pub const fn dealer_hand(&self) -> &DealerHand {
        &self.dealer
    }

    /// Returns the insurance stake for the current round.
    #[must_use]
    pub const fn insurance_bet(&self) -> usize {
        self.insurance_bet
    }

    /// Returns the last outcome or refusal message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the settlement of the most recent round, if it was settled.
    #[must_use]
    pub const fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    /// Returns the number of cards remaining in the deck.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }
}
