//! Play one game against the trained agent.
//!
//! Usage:
//!   cargo run --release --bin play -- [OPTIONS]
//!
//! Options:
//!   --cards <N>      Hand size (default: 8)
//!   --table <FILE>   Q-table checkpoint to load (default: q_table.json)
//!   --seed <N>       Random seed (optional)

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use sushigo_rl::agent::{HandPrompt, Player, QLearner, QTable, Strategy};
use sushigo_rl::game::{Card, GameError, GameSession, SessionConfig};

/// The agent keeps a sliver of exploration so repeated games vary a little.
const PLAY_EPSILON: f64 = 0.01;

/// Stdin-backed card prompt. Re-asks until the input parses to an index
/// inside the displayed hand, so the game core never sees a bad index.
struct StdinPrompt;

impl HandPrompt for StdinPrompt {
    fn choose_index(&mut self, hand: &[Card]) -> Result<usize, GameError> {
        println!();
        println!("Your hand:");
        for (i, card) in hand.iter().enumerate() {
            println!("  {}) {}", i, card);
        }

        loop {
            print!("Which card would you like to play? ");
            let _ = io::stdout().flush();

            let mut line = String::new();
            match io::stdin().read_line(&mut line) {
                Ok(0) => {
                    println!();
                    println!("No more input; quitting.");
                    std::process::exit(0);
                }
                Ok(_) => {}
                Err(err) => {
                    eprintln!("Input error: {}", err);
                    std::process::exit(1);
                }
            }

            match line.trim().parse::<usize>() {
                Ok(index) if index < hand.len() => return Ok(index),
                _ => println!("Enter a number between 0 and {}.", hand.len() - 1),
            }
        }
    }
}

fn main() {
    let mut cards = 8usize;
    let mut table_path = PathBuf::from("q_table.json");
    let mut seed: Option<u64> = None;

    let argv: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--cards" | "-c" => {
                i += 1;
                if i < argv.len() {
                    cards = argv[i].parse().unwrap_or(cards);
                }
            }
            "--table" | "-t" => {
                i += 1;
                if i < argv.len() {
                    table_path = PathBuf::from(&argv[i]);
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < argv.len() {
                    seed = argv[i].parse().ok();
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", argv[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    let table = match QTable::load_json(&table_path) {
        Ok(table) => {
            println!("Loaded Q-table with {} states", table.len());
            table
        }
        Err(err) => {
            println!(
                "Playing with an untrained agent ({}: {})",
                table_path.display(),
                err
            );
            QTable::new()
        }
    };

    let players = vec![
        Player::new(
            "AI1",
            Strategy::Learning(QLearner::with_table(table, PLAY_EPSILON, 0.05, 0.9)),
        ),
        Player::human("You", Box::new(StdinPrompt)),
    ];

    let mut config = SessionConfig::default()
        .with_num_cards(cards)
        .with_print_info(true)
        .with_record_updates(false);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let mut session = match GameSession::new(players, config) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("Error creating game: {}", err);
            return;
        }
    };

    session.shuffle_seating();
    if let Err(err) = session.deal_cards() {
        eprintln!("Error dealing: {}", err);
        return;
    }
    if let Err(err) = session.play_round() {
        eprintln!("Error during the draft: {}", err);
        return;
    }

    println!();
    session.score_round();

    let standings = session.standings();
    let score_of = |name: &str| {
        standings
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, score)| score)
            .unwrap_or(0)
    };
    let ai_score = score_of("AI1");
    let your_score = score_of("You");

    println!();
    if ai_score > your_score {
        println!("The AI beat you {} points to {}", ai_score, your_score);
    } else if your_score > ai_score {
        println!("You beat the AI {} points to {}", your_score, ai_score);
    } else {
        println!("A tie at {} points", your_score);
    }
}

fn print_help() {
    println!("Play one game of Sushi Go against the trained agent");
    println!();
    println!("Usage: play [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --cards <N>      Hand size (default: 8)");
    println!("  -t, --table <FILE>   Q-table checkpoint to load (default: q_table.json)");
    println!("  -s, --seed <N>       Random seed");
    println!("  -h, --help           Show this help");
}
