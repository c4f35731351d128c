//! Card Duel - command-line driver
//!
//! Plays AI-vs-AI matches with readable logs, or runs tournaments in parallel.

use anyhow::Context;
use card_duel::{
    core::{Deck, PlayerId},
    game::{
        Difficulty, EventSubscriber, GameEvent, GameLoop, GameState, MatchConfig, OutputFormat,
        Seat, VerbosityLevel,
    },
    loader::{CardCatalog, DeckLoader},
    tournament::{self, TournamentConfig},
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Decision policy tier for an automated seat
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    /// Random legal choices
    Easy,
    /// Greedy single-step heuristics
    Medium,
    /// Threat-aware play with lethal checks
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "duel")]
#[command(about = "Card Duel - two-player trading card game engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one AI-vs-AI match with logs
    Play {
        /// Player 1 policy
        #[arg(long, value_enum, default_value = "hard")]
        p1: DifficultyArg,

        /// Player 2 policy
        #[arg(long, value_enum, default_value = "medium")]
        p2: DifficultyArg,

        /// Deck list for player 1 (default: the starter deck)
        #[arg(long, value_name = "DECK_FILE")]
        deck1: Option<PathBuf>,

        /// Deck list for player 2 (default: the starter deck)
        #[arg(long, value_name = "DECK_FILE")]
        deck2: Option<PathBuf>,

        /// Set random seed for deterministic games
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Stop after this many turns without a winner
        #[arg(long, default_value_t = 200)]
        max_turns: u32,

        /// Print every engine event as a JSON line
        #[arg(long)]
        events_json: bool,

        /// Emit log lines as JSON objects
        #[arg(long)]
        json_logs: bool,
    },

    /// Run many seeded AI-vs-AI matches in parallel and report win rates
    Tourney {
        /// Number of games to run
        #[arg(long, default_value_t = 100)]
        games: usize,

        /// Player 1 policy
        #[arg(long, value_enum, default_value = "hard")]
        p1: DifficultyArg,

        /// Player 2 policy
        #[arg(long, value_enum, default_value = "easy")]
        p2: DifficultyArg,

        /// Tournament seed (each game derives its own)
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Stop each game after this many turns
        #[arg(long, default_value_t = 200)]
        max_turns: u32,

        /// Deck list for player 1 (default: the starter deck)
        #[arg(long, value_name = "DECK_FILE")]
        deck1: Option<PathBuf>,

        /// Deck list for player 2 (default: the starter deck)
        #[arg(long, value_name = "DECK_FILE")]
        deck2: Option<PathBuf>,
    },

    /// List the built-in card set
    Cards,
}

/// Prints each event as one JSON object per line
struct JsonEventPrinter;

impl EventSubscriber for JsonEventPrinter {
    fn on_event(&mut self, owner: Option<PlayerId>, event: &GameEvent) {
        let line = serde_json::json!({
            "owner": owner.map(|id| id.as_u32()),
            "event": event,
        });
        println!("{line}");
    }
}

fn load_deck(catalog: &CardCatalog, path: Option<&Path>) -> anyhow::Result<Deck> {
    match path {
        Some(path) => {
            let list = DeckLoader::load_from_file(path)
                .with_context(|| format!("reading deck list {}", path.display()))?;
            list.build(catalog)
                .with_context(|| format!("building deck from {}", path.display()))
        }
        None => Ok(catalog.starter_deck()?),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let catalog = CardCatalog::starter()?;

    match cli.command {
        Commands::Play {
            p1,
            p2,
            deck1,
            deck2,
            seed,
            verbosity,
            max_turns,
            events_json,
            json_logs,
        } => {
            let decks = [
                load_deck(&catalog, deck1.as_deref())?,
                load_deck(&catalog, deck2.as_deref())?,
            ];
            let mut config = MatchConfig {
                seed,
                verbosity: verbosity.into(),
                max_turns,
                record_events: events_json,
                ..MatchConfig::default()
            };
            if json_logs {
                config.output_format = OutputFormat::Json;
            }
            let p1: Difficulty = p1.into();
            let p2: Difficulty = p2.into();
            config.player_names = [format!("Player 1 ({p1})"), format!("Player 2 ({p2})")];

            let seats = [Seat::Automated(p1), Seat::Automated(p2)];
            let mut game = GameState::new(config, decks, seats)?;

            let mut printer = JsonEventPrinter;
            let game_loop = GameLoop::new(&mut game);
            let result = if events_json {
                game_loop.with_subscriber(&mut printer).run_game()?
            } else {
                let mut game_loop = game_loop;
                game_loop.run_game()?
            };

            if VerbosityLevel::from(verbosity) >= VerbosityLevel::Minimal {
                println!("\nSeed: {}", game.seed());
                println!("Result: {:?} after {} turns", result.end_reason, result.turns_played);
                for duelist in game.duelists() {
                    println!("  {}: {} life", duelist.name(), duelist.player().life());
                }
            }
        }

        Commands::Tourney {
            games,
            p1,
            p2,
            seed,
            max_turns,
            deck1,
            deck2,
        } => {
            let config = TournamentConfig {
                games,
                p1: p1.into(),
                p2: p2.into(),
                seed,
                max_turns,
                decks: [
                    load_deck(&catalog, deck1.as_deref())?,
                    load_deck(&catalog, deck2.as_deref())?,
                ],
            };
            let stats = tournament::run_and_report(&config);
            if stats.failed > 0 {
                anyhow::bail!("{} games failed", stats.failed);
            }
        }

        Commands::Cards => {
            for card in catalog.iter() {
                println!("{card}");
            }
        }
    }

    Ok(())
}
