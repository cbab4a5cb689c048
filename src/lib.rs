//! A single-player blackjack table engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type holding one session's whole state:
//! bankroll, deck and the round in progress. Each request (bet, hit, stand,
//! double, split, surrender, insurance, reset) is applied to completion,
//! settling the round when the last hand finishes, and answered with a
//! [`Snapshot`] that hides the dealer's hole card while the player acts.
//! [`SessionHost`] runs many such sessions against a [`SessionStore`].
//!
//! # Example
//!
//! ```
//! use bjtable::{Action, Game, Phase, TableOptions};
//!
//! let mut game = Game::new(TableOptions::default(), 42);
//! game.bet(100).unwrap();
//! assert_eq!(game.bankroll(), 900);
//!
//! let snapshot = game.perform(Action::Stand);
//! assert_eq!(snapshot.phase, Phase::Payout);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod result;
pub mod session;
mod sync;
pub mod view;

// Re-export main types
pub use card::{ACE, Card, DECK_SIZE, Suit};
pub use deck::Deck;
pub use error::{ActionError, BetError};
pub use game::{Action, Game, Phase};
pub use hand::{BLACKJACK, DealerHand, Hand, HandStatus, hand_value};
pub use options::{DEFAULT_BANKROLL, DEFAULT_RESHUFFLE_THRESHOLD, TableOptions};
pub use result::{HandOutcome, HandResult, RoundResult};
pub use session::{MemoryStore, Request, SessionHost, SessionStore};
pub use view::{ActionFlags, Snapshot};
