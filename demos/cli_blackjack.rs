//! Terminal blackjack table.
//!
//! Set `RUST_LOG=bjtable=debug` to see the engine's log events.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjtable::{Action, Game, Phase, Snapshot, TableOptions};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    println!("Blackjack (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let mut game = Game::new(TableOptions::default(), seed);

    loop {
        let bankroll = game.bankroll();
        if bankroll == 0 {
            println!("You are out of money. Game over.");
            break;
        }

        let Some(bet) = prompt_usize(&format!("Bet amount (1-{bankroll}, 0 to quit): ")) else {
            break;
        };

        if bet == 0 {
            println!("Goodbye.");
            break;
        }

        if let Err(err) = game.bet(bet) {
            println!("{err}");
            continue;
        }

        let mut snapshot = game.snapshot();
        while snapshot.phase == Phase::Playing {
            print_table(&snapshot, game.cards_remaining());
            println!("{}", format_actions(&snapshot));

            let action = match prompt_line("Action: ").as_str() {
                "h" | "hit" => Action::Hit,
                "s" | "stand" => Action::Stand,
                "d" | "double" => Action::Double,
                "p" | "split" => Action::Split,
                "u" | "surrender" => Action::Surrender,
                "i" | "insurance" => Action::Insurance,
                "q" | "quit" => return,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            let before = snapshot;
            snapshot = game.perform(action);
            if snapshot == before {
                println!("That action is not available.");
            } else if snapshot.phase == Phase::Playing && !snapshot.message.is_empty() {
                println!("{}", snapshot.message);
            }
        }

        print_table(&snapshot, game.cards_remaining());
        println!("{}", snapshot.message);
        if let Some(result) = game.last_result() {
            if result.insurance_bet > 0 {
                println!("Insurance payout: {}", result.insurance_payout);
            }
            println!("Returned to bankroll: {}", result.total_payout());
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_usize(prompt: &str) -> Option<usize> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(snapshot: &Snapshot, remaining: usize) {
    println!("\nDeck: {remaining} cards remaining");

    let mut dealer = snapshot.dealer_visible.join(" ");
    if !snapshot.finished && snapshot.phase == Phase::Playing {
        dealer.push_str(" ??");
    }
    println!("Dealer: {dealer} (value {})", snapshot.dealer_total);

    for (index, cards) in snapshot.hands.iter().enumerate() {
        let marker = if index == snapshot.active_hand_index && !snapshot.finished {
            "*"
        } else {
            " "
        };
        let cards = if cards.is_empty() {
            "(surrendered)".to_string()
        } else {
            cards.join(" ")
        };
        println!(
            "{marker} Hand {}: {cards} | value {} | bet {}",
            index + 1,
            snapshot.hand_totals[index],
            snapshot.bets[index],
        );
    }
    println!("Bankroll: {}\n", snapshot.bankroll);
}

fn format_actions(snapshot: &Snapshot) -> String {
    let flags = snapshot.flags();
    let parts = [
        format_action("hit", "h", flags.can_hit),
        format_action("stand", "s", flags.can_stand),
        format_action("double", "d", flags.can_double),
        format_action("split", "p", flags.can_split),
        format_action("surrender", "u", flags.can_surrender),
        format_action("insurance", "i", flags.can_insure),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let code = if allowed { "32" } else { "90" };
    format!("\u{1b}[{code}m[{key}]{label}\u{1b}[0m")
}
