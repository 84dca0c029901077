//! Q-table training binary.
//!
//! Usage:
//!   cargo run --release --bin train -- [OPTIONS]
//!
//! Options:
//!   --rounds <N>           Training games to play (default: 100000)
//!   --cards <N>            Hand size per round (default: 5)
//!   --rounds-per-game <N>  Deal/draft/score rounds per game (default: 1)
//!   --opponents <N>        Random opponents at the table (default: 2)
//!   --epsilon <F>          Starting exploration rate (default: 0.9)
//!   --alpha <F>            Learning rate (default: 0.05)
//!   --gamma <F>            Discount factor (default: 0.9)
//!   --eval-every <N>       Games between greedy evaluations (default: 10000)
//!   --eval-games <N>       Games per evaluation (default: 1000)
//!   --table <FILE>         Checkpoint file (default: q_table.json)
//!   --seed <N>             Random seed for the training session (optional)

use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use sushigo_rl::agent::{Player, QLearner, QTable, Strategy};
use sushigo_rl::game::{GameError, GameSession, SessionConfig, DECK_SIZE};

/// Exploration never decays below this floor.
const EPSILON_FLOOR: f64 = 0.1;

/// Per-game multiplicative epsilon decay.
const EPSILON_DECAY: f64 = 0.999_999_5;

struct TrainArgs {
    rounds: usize,
    cards: usize,
    rounds_per_game: usize,
    opponents: usize,
    epsilon: f64,
    alpha: f64,
    gamma: f64,
    eval_every: usize,
    eval_games: usize,
    table: PathBuf,
    seed: Option<u64>,
}

impl Default for TrainArgs {
    fn default() -> Self {
        Self {
            rounds: 100_000,
            cards: 5,
            rounds_per_game: 1,
            opponents: 2,
            epsilon: 0.9,
            alpha: 0.05,
            gamma: 0.9,
            eval_every: 10_000,
            eval_games: 1_000,
            table: PathBuf::from("q_table.json"),
            seed: None,
        }
    }
}

fn main() {
    let args = match parse_args() {
        Some(args) => args,
        None => return,
    };

    let num_players = args.opponents + 1;
    let cards_per_game = args.rounds_per_game * args.cards * num_players;
    if cards_per_game > DECK_SIZE {
        eprintln!(
            "{} rounds of {} cards for {} players needs {} cards; the deck has {}",
            args.rounds_per_game, args.cards, num_players, cards_per_game, DECK_SIZE
        );
        return;
    }

    println!("=================================================");
    println!("  Sushi Go Q-Learning Trainer");
    println!("=================================================");
    println!();
    println!("Cards per hand: {}", args.cards);
    println!("Training games: {}", args.rounds);
    println!("Opponents: {} random", args.opponents);
    println!(
        "Epsilon: {} (decay {} / game, floor {})",
        args.epsilon, EPSILON_DECAY, EPSILON_FLOOR
    );
    println!("Alpha: {}  Gamma: {}", args.alpha, args.gamma);
    if let Some(seed) = args.seed {
        println!("Seed: {}", seed);
    }
    println!("Checkpoint: {}", args.table.display());
    println!();

    let table = match QTable::load_json(&args.table) {
        Ok(table) => {
            println!("Loaded Q-table with {} states", table.len());
            table
        }
        Err(err) => {
            println!(
                "Starting with an empty Q-table ({}: {})",
                args.table.display(),
                err
            );
            QTable::new()
        }
    };

    let mut session = match build_session(table, &args, true) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("Error creating session: {}", err);
            return;
        }
    };

    let start_time = Instant::now();
    let progress = ProgressBar::new(args.rounds as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} [{elapsed_precise}<{eta_precise}, {per_sec}]")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut save_to_primary = true;
    for game in 0..args.rounds {
        session.reset();

        let epsilon = (args.epsilon * EPSILON_DECAY.powi(game as i32)).max(EPSILON_FLOOR);
        if let Some(learner) = session.player_mut(0).learner_mut() {
            learner.epsilon = epsilon;
        }

        if let Err(err) = play_game(&mut session, args.rounds_per_game) {
            progress.finish_and_clear();
            eprintln!("Training game {} failed: {}", game + 1, err);
            return;
        }
        progress.inc(1);

        if (game + 1) % args.eval_every == 0 {
            checkpoint(&mut session, &args, game + 1, &progress, &mut save_to_primary);
        }
    }
    progress.finish_and_clear();

    let learner = session.player(0).learner().expect("seat 0 is the learner");
    if let Err(err) = learner.table().save_json(&args.table) {
        eprintln!("Error saving {}: {}", args.table.display(), err);
    }

    println!();
    println!("Training complete!");
    println!("Total time: {:.2}s", start_time.elapsed().as_secs_f64());
    println!("Q-table size: {} states", learner.table().len());
    println!("Saved to {}", args.table.display());
}

/// Evaluate greedily, report, and save the table to alternating files so an
/// interrupted save never destroys the only good checkpoint.
fn checkpoint(
    session: &mut GameSession,
    args: &TrainArgs,
    games_done: usize,
    progress: &ProgressBar,
    save_to_primary: &mut bool,
) {
    let learner = session.player_mut(0).learner_mut().expect("seat 0 is the learner");
    let deltas = learner.take_update_deltas();
    let mean_delta = if deltas.is_empty() {
        0.0
    } else {
        deltas.iter().sum::<f64>() / deltas.len() as f64
    };

    progress.println(format!(
        "Games {:>8} | epsilon {:.3} | states {:>8} | mean |dQ| {:.4}",
        games_done,
        learner.epsilon,
        learner.table().len(),
        mean_delta
    ));

    let frozen = learner.table().clone();
    let (wins, ties) = run_evaluation(&frozen, args);
    let mut summary = String::new();
    for (name, count) in &wins {
        summary.push_str(&format!("{}: {}  ", name, count));
    }
    progress.println(format!("Wins over {} games: {}Ties: {}", args.eval_games, summary, ties));

    let path = if *save_to_primary {
        args.table.clone()
    } else {
        alternate_path(&args.table)
    };
    *save_to_primary = !*save_to_primary;
    match frozen.save_json(&path) {
        Ok(()) => progress.println(format!("Saved checkpoint to {}", path.display())),
        Err(err) => progress.println(format!("Error saving {}: {}", path.display(), err)),
    }
}

/// Play greedy (epsilon = 0, no updates) evaluation games in parallel.
///
/// Every game is an independent session over a frozen copy of the table, so
/// fan-out never touches the training state.
fn run_evaluation(table: &QTable, args: &TrainArgs) -> (Vec<(String, usize)>, usize) {
    let rounds_per_game = args.rounds_per_game;
    let results: Vec<Option<usize>> = (0..args.eval_games)
        .into_par_iter()
        .map_init(
            || {
                build_session(table.clone(), args, false)
                    .expect("evaluation session mirrors the validated training session")
            },
            |session, _| play_eval_game(session, rounds_per_game),
        )
        .collect();

    let mut wins = vec![0usize; args.opponents + 1];
    let mut ties = 0usize;
    for result in results {
        match result {
            Some(player) => wins[player] += 1,
            None => ties += 1,
        }
    }

    let named = wins
        .into_iter()
        .enumerate()
        .map(|(i, count)| (roster_name(i), count))
        .collect();
    (named, ties)
}

/// One evaluation game; returns the winning player's roster index, or `None`
/// on a tie for first place.
fn play_eval_game(session: &mut GameSession, rounds_per_game: usize) -> Option<usize> {
    session.reset();
    play_game(session, rounds_per_game).expect("evaluation game cannot fail without a human");

    let scores = session.scores();
    let mut best_pos = 0;
    let mut tie = false;
    for (pos, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best_pos] {
            best_pos = pos;
            tie = false;
        } else if score == scores[best_pos] {
            tie = true;
        }
    }

    if tie {
        None
    } else {
        Some(session.seating()[best_pos])
    }
}

/// Shuffle seats, then deal, draft and score `rounds_per_game` times.
fn play_game(session: &mut GameSession, rounds_per_game: usize) -> Result<(), GameError> {
    for _ in 0..rounds_per_game {
        session.shuffle_seating();
        session.deal_cards()?;
        session.play_round()?;
        session.score_round();
    }
    Ok(())
}

fn build_session(
    table: QTable,
    args: &TrainArgs,
    training: bool,
) -> Result<GameSession, GameError> {
    let epsilon = if training { args.epsilon } else { 0.0 };
    let mut players = vec![Player::new(
        roster_name(0),
        Strategy::Learning(QLearner::with_table(table, epsilon, args.alpha, args.gamma)),
    )];
    for i in 1..=args.opponents {
        players.push(Player::random(roster_name(i)));
    }

    let mut config = SessionConfig::default()
        .with_num_cards(args.cards)
        .with_record_updates(training);
    if training {
        if let Some(seed) = args.seed {
            config = config.with_seed(seed);
        }
    }
    GameSession::new(players, config)
}

fn roster_name(index: usize) -> String {
    if index == 0 {
        "AI1".to_string()
    } else {
        format!("Random{}", index)
    }
}

/// `q_table.json` alternates with `q_table1.json`.
fn alternate_path(path: &Path) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("q_table");
    let alt = match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{}1.{}", stem, ext),
        None => format!("{}1", stem),
    };
    path.with_file_name(alt)
}

fn parse_args() -> Option<TrainArgs> {
    let argv: Vec<String> = env::args().collect();
    let mut args = TrainArgs::default();

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--rounds" | "-r" => {
                i += 1;
                if i < argv.len() {
                    args.rounds = argv[i].parse().unwrap_or(args.rounds);
                }
            }
            "--cards" | "-c" => {
                i += 1;
                if i < argv.len() {
                    args.cards = argv[i].parse().unwrap_or(args.cards);
                }
            }
            "--rounds-per-game" => {
                i += 1;
                if i < argv.len() {
                    args.rounds_per_game = argv[i].parse().unwrap_or(args.rounds_per_game);
                }
            }
            "--opponents" => {
                i += 1;
                if i < argv.len() {
                    args.opponents = argv[i].parse().unwrap_or(args.opponents);
                }
            }
            "--epsilon" => {
                i += 1;
                if i < argv.len() {
                    args.epsilon = argv[i].parse().unwrap_or(args.epsilon);
                }
            }
            "--alpha" => {
                i += 1;
                if i < argv.len() {
                    args.alpha = argv[i].parse().unwrap_or(args.alpha);
                }
            }
            "--gamma" => {
                i += 1;
                if i < argv.len() {
                    args.gamma = argv[i].parse().unwrap_or(args.gamma);
                }
            }
            "--eval-every" => {
                i += 1;
                if i < argv.len() {
                    args.eval_every = argv[i].parse().unwrap_or(args.eval_every);
                }
            }
            "--eval-games" => {
                i += 1;
                if i < argv.len() {
                    args.eval_games = argv[i].parse().unwrap_or(args.eval_games);
                }
            }
            "--table" | "-t" => {
                i += 1;
                if i < argv.len() {
                    args.table = PathBuf::from(&argv[i]);
                }
            }
            "--seed" | "-s" => {
                i += 1;
                if i < argv.len() {
                    args.seed = argv[i].parse().ok();
                }
            }
            "--help" | "-h" => {
                print_help();
                return None;
            }
            _ => {
                eprintln!("Unknown argument: {}", argv[i]);
                print_help();
                return None;
            }
        }
        i += 1;
    }

    Some(args)
}

fn print_help() {
    println!("Sushi Go Q-Learning Trainer");
    println!();
    println!("Usage: train [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -r, --rounds <N>         Training games to play (default: 100000)");
    println!("  -c, --cards <N>          Hand size per round (default: 5)");
    println!("  --rounds-per-game <N>    Deal/draft/score rounds per game (default: 1)");
    println!("  --opponents <N>          Random opponents at the table (default: 2)");
    println!("  --epsilon <F>            Starting exploration rate (default: 0.9)");
    println!("  --alpha <F>              Learning rate (default: 0.05)");
    println!("  --gamma <F>              Discount factor (default: 0.9)");
    println!("  --eval-every <N>         Games between greedy evaluations (default: 10000)");
    println!("  --eval-games <N>         Games per evaluation (default: 1000)");
    println!("  -t, --table <FILE>       Checkpoint file (default: q_table.json)");
    println!("  -s, --seed <N>           Random seed for the training session");
    println!("  -h, --help               Show this help");
    println!();
    println!("Examples:");
    println!("  # Quick run with frequent evaluations");
    println!("  train --rounds 50000 --eval-every 5000 --eval-games 500");
    println!();
    println!("  # Reproducible long run with bigger hands");
    println!("  train --rounds 1000000 --cards 8 --seed 42");
}
