//! Tournament mode: many seeded AI-vs-AI matches in parallel
//!
//! Every game gets its own seed derived from the tournament seed and the game index, so a
//! tournament is reproducible regardless of how rayon schedules it.

use crate::core::Deck;
use crate::game::{Difficulty, GameEndReason, GameLoop, GameState, MatchConfig, Seat};
use crate::Result;
use rayon::prelude::*;
use std::time::{Duration, Instant};

const GAME_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Settings for a tournament batch
#[derive(Debug, Clone)]
pub struct TournamentConfig {
    pub games: usize,
    pub p1: Difficulty,
    pub p2: Difficulty,
    pub seed: u64,
    pub max_turns: u32,
    pub decks: [Deck; 2],
}

/// Statistics collected during a tournament
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TournamentStats {
    pub p1_wins: usize,
    pub p2_wins: usize,
    pub draws: usize,
    pub wins_by_decking: usize,
    pub total_turns: u64,
    pub failed: usize,
}

impl TournamentStats {
    pub fn games(&self) -> usize {
        self.p1_wins + self.p2_wins + self.draws
    }

    pub fn average_turns(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            n => self.total_turns as f64 / n as f64,
        }
    }

    fn record(&mut self, outcome: &GameOutcome) {
        match outcome.winner {
            Some(0) => self.p1_wins += 1,
            Some(_) => self.p2_wins += 1,
            None => self.draws += 1,
        }
        if outcome.by_decking {
            self.wins_by_decking += 1;
        }
        self.total_turns += u64::from(outcome.turns);
    }
}

#[derive(Debug, Clone, Copy)]
struct GameOutcome {
    /// Seat index of the winner
    winner: Option<usize>,
    turns: u32,
    by_decking: bool,
}

/// Seed for game `index` of a tournament seeded with `seed`
pub fn game_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add((index as u64).wrapping_mul(GAME_SEED_STRIDE))
}

fn play_one(config: &TournamentConfig, index: usize) -> Result<GameOutcome> {
    let mut match_config = MatchConfig::default()
        .with_seed(game_seed(config.seed, index))
        .quiet();
    match_config.max_turns = config.max_turns;

    let seats = [Seat::Automated(config.p1), Seat::Automated(config.p2)];
    let mut game = GameState::new(match_config, config.decks.clone(), seats)?;
    let result = GameLoop::new(&mut game).run_game()?;

    let winner = result
        .winner
        .and_then(|id| game.duelists().iter().position(|d| d.id() == id));
    Ok(GameOutcome {
        winner,
        turns: result.turns_played,
        by_decking: matches!(result.end_reason, GameEndReason::Decking(_)),
    })
}

/// Run every game and fold the outcomes. Games that error are counted in `failed`.
pub fn run_tourney(config: &TournamentConfig) -> TournamentStats {
    let outcomes: Vec<Result<GameOutcome>> = (0..config.games)
        .into_par_iter()
        .map(|index| play_one(config, index))
        .collect();

    let mut stats = TournamentStats::default();
    for (index, outcome) in outcomes.iter().enumerate() {
        match outcome {
            Ok(outcome) => stats.record(outcome),
            Err(e) => {
                eprintln!("Warning: Game {} failed: {}", index, e);
                stats.failed += 1;
            }
        }
    }
    stats
}

/// Run a tournament and print the report
pub fn run_and_report(config: &TournamentConfig) -> TournamentStats {
    println!("=== Card Duel - Tournament Mode ===\n");
    println!("Running {} games", config.games);
    println!("Using tournament seed: {}", config.seed);
    println!("Controllers: P1={}, P2={}\n", config.p1, config.p2);

    let start = Instant::now();
    let stats = run_tourney(config);
    print_report(&stats, start.elapsed());
    stats
}

fn print_report(stats: &TournamentStats, elapsed: Duration) {
    let total = stats.games();
    println!("=== Tournament Complete ===");
    println!("Total games played: {}", total);
    println!("Elapsed time: {:.2}s", elapsed.as_secs_f64());
    if elapsed.as_secs_f64() > 0.0 {
        println!("Games per second: {:.2}", total as f64 / elapsed.as_secs_f64());
    }
    println!("Average turns: {:.1}\n", stats.average_turns());

    println!("=== Player Position Statistics ===");
    if total > 0 {
        let pct = |n: usize| 100.0 * n as f64 / total as f64;
        println!("P1 wins: {} ({:.1}%)", stats.p1_wins, pct(stats.p1_wins));
        println!("P2 wins: {} ({:.1}%)", stats.p2_wins, pct(stats.p2_wins));
        println!("Draws: {} ({:.1}%)", stats.draws, pct(stats.draws));
        println!("Won by decking: {}", stats.wins_by_decking);
    }
    if stats.failed > 0 {
        println!("Failed games: {}", stats.failed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::CardCatalog;

    fn config(games: usize, seed: u64) -> TournamentConfig {
        let catalog = CardCatalog::starter().unwrap();
        TournamentConfig {
            games,
            p1: Difficulty::Hard,
            p2: Difficulty::Easy,
            seed,
            max_turns: 200,
            decks: [catalog.starter_deck().unwrap(), catalog.starter_deck().unwrap()],
        }
    }

    #[test]
    fn test_game_seeds_differ() {
        assert_ne!(game_seed(1, 0), game_seed(1, 1));
        assert_eq!(game_seed(1, 0), 1);
    }

    #[test]
    fn test_tourney_counts_every_game() {
        let stats = run_tourney(&config(8, 99));
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.games(), 8);
        assert!(stats.average_turns() > 0.0);
    }

    #[test]
    fn test_tourney_is_reproducible() {
        assert_eq!(run_tourney(&config(6, 5)), run_tourney(&config(6, 5)));
    }
}
