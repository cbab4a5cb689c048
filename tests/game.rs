//! Round engine integration tests.

use bjtable::{
    Action, ActionError, BetError, Card, DECK_SIZE, Deck, Game, HandOutcome, Phase, Suit,
    TableOptions,
};

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

/// Builds a game whose deck yields `draws` in order.
///
/// Deal order is dealer up card, dealer hole card, then the player's two cards.
fn stacked_game(draws: &[Card]) -> Game {
    let options = TableOptions::default().with_reshuffle_threshold(0);
    let mut game = Game::new(options, 7);
    let mut deck = draws.to_vec();
    deck.reverse();
    game.deck = Deck::from_cards(deck);
    game
}

#[test]
fn bet_deals_a_round() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 9),    // dealer up
        card(Suit::Spades, 12),  // dealer hole
        card(Suit::Hearts, 5),   // player
        card(Suit::Diamonds, 6), // player
    ]);

    game.bet(100).unwrap();
    let snapshot = game.snapshot();

    assert_eq!(snapshot.bankroll, 900);
    assert_eq!(snapshot.bets, vec![100]);
    assert_eq!(snapshot.phase, Phase::Playing);
    assert!(!snapshot.finished);
    assert_eq!(snapshot.hands, vec![vec!["5♥".to_string(), "6♦".to_string()]]);
    assert_eq!(snapshot.hand_totals, vec![11]);
    assert_eq!(snapshot.active_hand_index, 0);
    assert_eq!(game.dealer_hand().len(), 2);
    assert_eq!(snapshot.dealer_visible, vec!["9♣".to_string()]);
    assert_eq!(snapshot.dealer_total, 9);
    assert!(snapshot.can_hit);
    assert!(snapshot.can_stand);
    assert!(snapshot.can_double);
    assert!(snapshot.can_surrender);
    assert!(!snapshot.can_split);
    assert!(!snapshot.can_insure);
}

#[test]
fn insurance_offered_only_against_an_ace() {
    for seed in 0..40 {
        let mut game = Game::new(TableOptions::default(), seed);
        game.bet(100).unwrap();
        let snapshot = game.snapshot();

        let up_card = *game.dealer_hand().up_card().unwrap();
        assert_eq!(snapshot.bankroll, 900);
        assert_eq!(snapshot.phase, Phase::Playing);
        assert_eq!(snapshot.dealer_visible.len(), 1);
        assert_eq!(snapshot.hands[0].len(), 2);
        assert_eq!(snapshot.can_insure, up_card.is_ace());
    }
}

#[test]
fn bet_rejects_invalid_amounts() {
    let mut game = Game::new(TableOptions::default(), 1);
    let before = game.snapshot();

    assert_eq!(game.bet(0).unwrap_err(), BetError::ZeroBet);
    assert_eq!(game.bet(1001).unwrap_err(), BetError::InsufficientFunds);
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.cards_remaining(), DECK_SIZE);

    game.bet(1000).unwrap();
    assert_eq!(game.bankroll(), 0);
}

#[test]
fn fresh_session_defaults() {
    let game = Game::new(TableOptions::default(), 3);
    let snapshot = game.snapshot();

    assert_eq!(snapshot.bankroll, 1000);
    assert!(snapshot.hands.is_empty());
    assert!(snapshot.bets.is_empty());
    assert!(snapshot.dealer_visible.is_empty());
    assert_eq!(snapshot.dealer_total, 0);
    assert_eq!(snapshot.phase, Phase::Betting);
    assert!(snapshot.finished);
    assert_eq!(snapshot.flags(), bjtable::ActionFlags::default());
}

#[test]
fn deck_replaced_before_deal_when_low() {
    let mut game = Game::new(TableOptions::default(), 5);
    game.deck = Deck::from_cards(vec![card(Suit::Hearts, 2); 5]);

    game.bet(10).unwrap();
    assert_eq!(game.cards_remaining(), DECK_SIZE - 4);
}

#[test]
fn dealer_blackjack_ends_round_without_drawing() {
    let mut game = stacked_game(&[
        card(Suit::Spades, 1),   // dealer up
        card(Suit::Hearts, 13),  // dealer hole
        card(Suit::Clubs, 9),    // player
        card(Suit::Diamonds, 7), // player
        card(Suit::Clubs, 2),    // unused
    ]);

    game.bet(100).unwrap();
    let snapshot = game.perform(Action::Stand);

    assert_eq!(snapshot.phase, Phase::Payout);
    assert!(snapshot.finished);
    assert_eq!(snapshot.message, "Dealer has blackjack.");
    assert_eq!(game.dealer_hand().len(), 2);
    assert_eq!(snapshot.dealer_visible.len(), 2);
    assert_eq!(snapshot.dealer_total, 21);
    assert_eq!(snapshot.bankroll, 900);
    assert_eq!(game.cards_remaining(), 1);
}

#[test]
fn insurance_returns_twice_the_stake_on_dealer_blackjack() {
    let mut game = stacked_game(&[
        card(Suit::Spades, 1),
        card(Suit::Hearts, 13),
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 9),
    ]);

    game.bet(100).unwrap();
    let snapshot = game.perform(Action::Insurance);
    assert_eq!(snapshot.bankroll, 850);
    assert_eq!(game.insurance_bet(), 50);
    assert!(!snapshot.can_insure);

    let snapshot = game.perform(Action::Stand);
    assert_eq!(snapshot.bankroll, 950);
    assert_eq!(game.insurance_bet(), 0);

    let result = game.last_result().unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.insurance_bet, 50);
    assert_eq!(result.insurance_payout, 100);
    assert_eq!(result.hands[0].outcome, HandOutcome::Lose);
}

#[test]
fn insurance_forfeited_without_dealer_blackjack() {
    let mut game = stacked_game(&[
        card(Suit::Spades, 1),  // dealer soft 18
        card(Suit::Hearts, 7),
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 9),
    ]);

    game.bet(100).unwrap();
    assert_eq!(game.take_insurance(), Ok(50));
    assert_eq!(game.take_insurance(), Err(ActionError::NotAllowed));

    let snapshot = game.perform(Action::Stand);
    assert_eq!(snapshot.bankroll, 1050);
    assert_eq!(snapshot.message, "Hand 1: Player wins.");
    assert_eq!(game.last_result().unwrap().insurance_payout, 0);
}

#[test]
fn insurance_refused_when_stake_rounds_to_zero() {
    let mut game = stacked_game(&[
        card(Suit::Spades, 1),
        card(Suit::Hearts, 7),
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 9),
    ]);

    game.bet(1).unwrap();
    let snapshot = game.perform(Action::Insurance);

    assert_eq!(snapshot.message, "Cannot take insurance.");
    assert_eq!(snapshot.bankroll, 999);
    assert!(snapshot.can_insure);
    assert_eq!(game.insurance_bet(), 0);
}

#[test]
fn blackjack_pays_three_to_two() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 1),
        card(Suit::Hearts, 13),
    ]);

    game.bet(100).unwrap();
    let snapshot = game.snapshot();
    assert!(!snapshot.can_hit);
    assert!(snapshot.can_stand);

    let snapshot = game.perform(Action::Stand);
    assert_eq!(snapshot.bankroll, 1150);
    assert_eq!(snapshot.message, "Hand 1: Blackjack! Win 150.");
    assert_eq!(game.last_result().unwrap().hands[0].net(), 150);
}

#[test]
fn blackjack_winnings_truncate() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 1),
        card(Suit::Hearts, 12),
    ]);

    game.bet(5).unwrap();
    game.stand().unwrap();

    assert_eq!(game.bankroll(), 1007);
    assert_eq!(game.message(), "Hand 1: Blackjack! Win 7.");
}

#[test]
fn player_blackjack_pushes_dealer_blackjack() {
    let mut game = stacked_game(&[
        card(Suit::Spades, 1),
        card(Suit::Hearts, 13),
        card(Suit::Clubs, 1),
        card(Suit::Diamonds, 12),
    ]);

    game.bet(100).unwrap();
    game.stand().unwrap();

    assert_eq!(game.bankroll(), 1000);
    assert_eq!(game.message(), "Dealer has blackjack.");
    assert_eq!(
        game.last_result().unwrap().hands[0].outcome,
        HandOutcome::Push
    );
}

#[test]
fn equal_totals_push() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 8),
        card(Suit::Spades, 10),
        card(Suit::Hearts, 8),
    ]);

    game.bet(40).unwrap();
    assert_eq!(game.bankroll(), 960);

    game.stand().unwrap();
    assert_eq!(game.bankroll(), 1000);
    assert_eq!(game.message(), "Hand 1: Push (tie).");
}

#[test]
fn losing_hand_forfeits_only_its_stake() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 9),
        card(Suit::Spades, 10),
        card(Suit::Hearts, 7),
    ]);

    game.bet(1000).unwrap();
    game.stand().unwrap();

    assert_eq!(game.bankroll(), 0);
    assert_eq!(game.message(), "Hand 1: Dealer wins.");
    assert_eq!(game.last_result().unwrap().hands[0].net(), -1000);
}

#[test]
fn bust_settles_immediately() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 10),
        card(Suit::Hearts, 6),
        card(Suit::Hearts, 13), // player hit
    ]);

    game.bet(100).unwrap();
    let snapshot = game.perform(Action::Hit);

    assert_eq!(snapshot.phase, Phase::Payout);
    assert_eq!(snapshot.hand_totals, vec![26]);
    assert_eq!(snapshot.bankroll, 900);
    assert_eq!(snapshot.message, "Hand 1: Player busts, loses.");
}

#[test]
fn dealer_draws_below_seventeen() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 6),
        card(Suit::Spades, 10),
        card(Suit::Hearts, 8),
        card(Suit::Hearts, 9), // dealer draw
    ]);

    game.bet(100).unwrap();
    game.stand().unwrap();

    assert_eq!(game.dealer_hand().len(), 3);
    assert_eq!(game.dealer_hand().value(), 25);
    assert_eq!(game.bankroll(), 1100);
    assert_eq!(game.message(), "Hand 1: Dealer busts, player wins.");
    assert!(game.last_result().unwrap().dealer_bust);
}

#[test]
fn dealer_stands_on_soft_seventeen() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 1),
        card(Suit::Diamonds, 6),
        card(Suit::Spades, 10),
        card(Suit::Hearts, 8),
        card(Suit::Hearts, 2), // unused
    ]);

    game.bet(100).unwrap();
    // The insurance offer stays open but is not taken.
    game.stand().unwrap();

    assert_eq!(game.dealer_hand().len(), 2);
    assert_eq!(game.bankroll(), 1100);
}

#[test]
fn empty_deck_is_replaced_mid_draw() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 2),
        card(Suit::Spades, 10),
        card(Suit::Hearts, 9),
    ]);

    game.bet(100).unwrap();
    assert_eq!(game.cards_remaining(), 0);

    game.stand().unwrap();
    let dealer = game.dealer_hand();
    assert!(dealer.len() >= 3);
    assert!(dealer.value() >= 17);
    assert_eq!(game.cards_remaining(), DECK_SIZE - (dealer.len() - 2));
}

#[test]
fn hole_card_hidden_until_dealer_plays() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 1),
        card(Suit::Diamonds, 9),
        card(Suit::Spades, 10),
        card(Suit::Hearts, 9),
    ]);

    game.bet(100).unwrap();
    let snapshot = game.snapshot();
    assert!(!game.hole_revealed());
    assert_eq!(snapshot.dealer_visible, vec!["A♣".to_string()]);
    assert_eq!(snapshot.dealer_total, 11);

    let snapshot = game.perform(Action::Stand);
    assert!(game.hole_revealed());
    assert_eq!(
        snapshot.dealer_visible,
        vec!["A♣".to_string(), "9♦".to_string()]
    );
    assert_eq!(snapshot.dealer_total, 20);
}

#[test]
fn split_pair_into_two_hands() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 8),
        card(Suit::Hearts, 8),
        card(Suit::Clubs, 13),   // first split hand
        card(Suit::Diamonds, 10), // second split hand
    ]);

    game.bet(100).unwrap();
    assert!(game.snapshot().can_split);

    let snapshot = game.perform(Action::Split);
    assert_eq!(snapshot.bankroll, 800);
    assert_eq!(snapshot.bets, vec![100, 100]);
    assert_eq!(
        snapshot.hands,
        vec![
            vec!["8♠".to_string(), "K♣".to_string()],
            vec!["8♥".to_string(), "10♦".to_string()],
        ]
    );
    assert_eq!(snapshot.active_hand_index, 0);
    assert!(!snapshot.can_split);
    assert_eq!(game.split(), Err(ActionError::NotAllowed));

    let snapshot = game.perform(Action::Stand);
    assert_eq!(snapshot.phase, Phase::Playing);
    assert_eq!(snapshot.active_hand_index, 1);

    let snapshot = game.perform(Action::Stand);
    assert_eq!(snapshot.phase, Phase::Payout);
    assert_eq!(snapshot.bankroll, 1200);
    assert_eq!(snapshot.message, "Hand 1: Player wins. Hand 2: Player wins.");
}

#[test]
fn split_refused_without_bankroll() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 8),
        card(Suit::Hearts, 8),
    ]);

    game.bet(600).unwrap();
    let before = game.snapshot();
    let snapshot = game.perform(Action::Split);

    assert_eq!(snapshot.message, "Not enough bankroll to split.");
    assert_eq!(snapshot.bankroll, before.bankroll);
    assert_eq!(snapshot.hands, before.hands);
    assert_eq!(snapshot.bets, before.bets);
    assert!(snapshot.can_split);
}

#[test]
fn surrender_returns_half_the_stake() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 10),
        card(Suit::Hearts, 6),
    ]);

    game.bet(100).unwrap();
    let snapshot = game.perform(Action::Surrender);

    assert_eq!(snapshot.bankroll, 950);
    assert_eq!(snapshot.hands, vec![Vec::<String>::new()]);
    assert_eq!(snapshot.bets, vec![0]);
    assert_eq!(snapshot.hand_totals, vec![0]);
    assert_eq!(snapshot.phase, Phase::Payout);
    assert_eq!(snapshot.message, "Hand 1: Surrendered.");

    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Surrendered);
    assert_eq!(result.total_payout(), 0);
    assert!(game.hands()[0].is_surrendered());
}

#[test]
fn surrender_first_split_hand_then_play_second() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 8),
        card(Suit::Hearts, 8),
        card(Suit::Clubs, 3),    // first split hand: 11
        card(Suit::Diamonds, 9), // second split hand: 17
    ]);

    game.bet(100).unwrap();
    game.split().unwrap();
    assert_eq!(game.surrender(), Ok(50));
    assert_eq!(game.bankroll(), 850);
    assert_eq!(game.bets(), vec![0, 100]);
    assert_eq!(game.active_hand_index(), 1);

    game.stand().unwrap();
    assert_eq!(game.bankroll(), 950);
    assert_eq!(game.message(), "Hand 1: Surrendered. Hand 2: Push (tie).");
}

#[test]
fn double_down_takes_one_card_and_stands() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 5),
        card(Suit::Hearts, 6),
        card(Suit::Hearts, 10), // double draw
    ]);

    game.bet(100).unwrap();
    let drawn = game.double_down().unwrap();

    assert_eq!(drawn, card(Suit::Hearts, 10));
    assert_eq!(game.bets(), vec![200]);
    assert_eq!(game.phase(), Phase::Payout);
    assert_eq!(game.bankroll(), 1200);
}

#[test]
fn double_refused_without_bankroll() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 5),
        card(Suit::Hearts, 6),
    ]);

    game.bet(600).unwrap();
    let snapshot = game.perform(Action::Double);

    assert_eq!(snapshot.message, "Not enough bankroll to double.");
    assert_eq!(snapshot.bankroll, 400);
    assert_eq!(snapshot.bets, vec![600]);
    assert_eq!(snapshot.hands[0].len(), 2);
    assert!(snapshot.can_double);
    assert_eq!(snapshot.phase, Phase::Playing);
}

#[test]
fn hitting_to_twenty_one_leaves_only_stand() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 5),
        card(Suit::Hearts, 6),
        card(Suit::Hearts, 13),
    ]);

    game.bet(100).unwrap();
    let snapshot = game.perform(Action::Hit);
    assert_eq!(snapshot.hand_totals, vec![21]);
    assert_eq!(snapshot.phase, Phase::Playing);
    assert!(!snapshot.can_hit);
    assert!(snapshot.can_stand);
    assert!(!snapshot.can_double);
    assert!(!snapshot.can_surrender);

    let snapshot = game.perform(Action::Stand);
    assert_eq!(snapshot.bankroll, 1100);
}

#[test]
fn stand_allowed_on_multi_card_hand() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 8),
        card(Suit::Spades, 2),
        card(Suit::Hearts, 3),
        card(Suit::Hearts, 4),
        card(Suit::Clubs, 5),
    ]);

    game.bet(10).unwrap();
    game.hit().unwrap();
    game.hit().unwrap();
    assert_eq!(game.hands()[0].len(), 4);
    assert!(game.flags().can_stand);

    game.stand().unwrap();
    assert_eq!(game.phase(), Phase::Payout);
    assert_eq!(game.message(), "Hand 1: Dealer wins.");
}

#[test]
fn illegal_actions_are_no_ops() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 10),
        card(Suit::Hearts, 9),
    ]);

    let before = game.snapshot();
    for action in [
        Action::Hit,
        Action::Stand,
        Action::Double,
        Action::Split,
        Action::Surrender,
        Action::Insurance,
    ] {
        assert_eq!(game.perform(action), before);
    }

    game.bet(100).unwrap();
    assert_eq!(game.split(), Err(ActionError::NotAllowed));
    assert_eq!(game.take_insurance(), Err(ActionError::NotAllowed));
    game.stand().unwrap();

    let settled = game.snapshot();
    assert_eq!(game.perform(Action::Hit), settled);
    assert_eq!(game.perform(Action::Surrender), settled);
    assert_eq!(game.hit(), Err(ActionError::NotAllowed));
}

#[test]
fn next_bet_starts_a_new_round() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 10),
        card(Suit::Hearts, 9),
        card(Suit::Clubs, 9),
        card(Suit::Diamonds, 8),
        card(Suit::Spades, 4),
        card(Suit::Hearts, 5),
    ]);

    game.bet(100).unwrap();
    game.stand().unwrap();
    assert_eq!(game.bankroll(), 1100);
    assert!(game.last_result().is_some());

    game.bet(50).unwrap();
    let snapshot = game.snapshot();
    assert_eq!(snapshot.bankroll, 1050);
    assert_eq!(snapshot.phase, Phase::Playing);
    assert!(snapshot.message.is_empty());
    assert_eq!(snapshot.hands, vec![vec!["4♠".to_string(), "5♥".to_string()]]);
    assert!(game.last_result().is_none());
}

#[test]
fn bet_during_live_round_abandons_it() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 10),
        card(Suit::Hearts, 9),
        card(Suit::Clubs, 9),
        card(Suit::Diamonds, 8),
        card(Suit::Spades, 4),
        card(Suit::Hearts, 5),
    ]);

    game.bet(100).unwrap();
    game.bet(50).unwrap();

    assert_eq!(game.bankroll(), 850);
    assert_eq!(game.bets(), vec![50]);
    assert_eq!(game.phase(), Phase::Playing);
}

#[test]
fn reset_restores_defaults() {
    let mut game = stacked_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 10),
        card(Suit::Hearts, 9),
    ]);

    game.bet(300).unwrap();
    game.reset();
    let snapshot = game.snapshot();

    assert_eq!(snapshot.bankroll, 1000);
    assert!(snapshot.hands.is_empty());
    assert_eq!(snapshot.phase, Phase::Betting);
    assert!(snapshot.finished);
    assert_eq!(game.cards_remaining(), DECK_SIZE);
}

fn high_roller_game(draws: &[Card]) -> Game {
    let options = TableOptions::default()
        .with_starting_bankroll(usize::MAX)
        .with_reshuffle_threshold(0);
    let mut game = Game::new(options, 9);
    let mut deck = draws.to_vec();
    deck.reverse();
    game.deck = Deck::from_cards(deck);
    game
}

#[test]
fn huge_blackjack_payout_saturates() {
    let mut game = high_roller_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 1),
        card(Suit::Hearts, 13),
    ]);

    game.bet(usize::MAX).unwrap();
    assert_eq!(game.bankroll(), 0);

    game.stand().unwrap();
    assert_eq!(game.bankroll(), usize::MAX);
    let result = game.last_result().unwrap();
    assert_eq!(result.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.total_payout(), usize::MAX);
}

#[test]
fn huge_win_payout_saturates() {
    let mut game = high_roller_game(&[
        card(Suit::Clubs, 10),
        card(Suit::Diamonds, 7),
        card(Suit::Spades, 10),
        card(Suit::Hearts, 9),
    ]);

    game.bet(usize::MAX).unwrap();
    game.stand().unwrap();

    assert_eq!(game.bankroll(), usize::MAX);
    assert_eq!(game.message(), "Hand 1: Player wins.");
}
