//! Game loop implementation
//!
//! Drives a match by advancing phases until one duelist is left standing or the turn limit
//! is reached. Automated seats act from inside the phase transitions; human seats pass.

use crate::core::PlayerId;
use crate::game::events::EventSubscriber;
use crate::game::phase::Phase;
use crate::game::GameState;
use crate::{DuelError, Result};

/// Verbosity level for game output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - turns, phases, and key actions (default)
    #[default]
    Normal = 2,
    /// Verbose - all actions and state changes
    Verbose = 3,
}

/// Result of running a game to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// Winner of the game (None if the turn limit hit or both fell together)
    pub winner: Option<PlayerId>,
    /// Turns begun, counting each player's turn
    pub turns_played: u32,
    pub end_reason: GameEndReason,
}

/// Reason the game ended; the id is the duelist who lost
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEndReason {
    /// Life total reached 0
    PlayerDeath(PlayerId),
    /// Tried to draw from an empty deck
    Decking(PlayerId),
    /// Game reached maximum turn limit
    TurnLimit,
}

/// Game loop manager
pub struct GameLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    /// Maximum turns before stopping without a winner
    max_turns: u32,
    subscriber: Option<&'a mut dyn EventSubscriber>,
}

impl<'a> GameLoop<'a> {
    /// Create a new game loop; the turn limit comes from the match config
    pub fn new(game: &'a mut GameState) -> Self {
        let max_turns = game.config().max_turns;
        GameLoop {
            game,
            max_turns,
            subscriber: None,
        }
    }

    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Deliver events to `subscriber` after every phase transition
    pub fn with_subscriber(mut self, subscriber: &'a mut dyn EventSubscriber) -> Self {
        self.subscriber = Some(subscriber);
        self
    }

    /// Run the match to completion. Sets the match up first if needed.
    pub fn run_game(&mut self) -> Result<GameResult> {
        if !self.game.turn().is_started() {
            self.game.setup()?;
            self.flush_events();
        }

        loop {
            if let Some(result) = self.check_win_condition() {
                self.announce(&result);
                return Ok(result);
            }

            let turn = self.game.turn();
            if turn.phase() == Phase::End && turn.turn_number() >= self.max_turns {
                let result = GameResult {
                    winner: None,
                    turns_played: turn.turn_number(),
                    end_reason: GameEndReason::TurnLimit,
                };
                self.announce(&result);
                return Ok(result);
            }

            if self.game.advance_phase().is_none() {
                return Err(DuelError::InvalidAction(
                    "phase advance rejected: transition in progress".to_string(),
                ));
            }
            self.flush_events();
        }
    }

    /// Advance exactly one full turn (or less if the match ends)
    pub fn run_turn_once(&mut self) -> Result<Option<GameResult>> {
        if !self.game.turn().is_started() {
            self.game.setup()?;
            self.flush_events();
        }
        let start = self.game.turn().turn_number();
        while self.game.turn().turn_number() == start {
            if let Some(result) = self.check_win_condition() {
                return Ok(Some(result));
            }
            if self.game.advance_phase().is_none() {
                return Err(DuelError::InvalidAction(
                    "phase advance rejected: transition in progress".to_string(),
                ));
            }
            self.flush_events();
        }
        Ok(self.check_win_condition())
    }

    /// Hand pending events to the subscriber, or drop them when nobody listens
    fn flush_events(&mut self) {
        match self.subscriber.as_deref_mut() {
            Some(subscriber) => self.game.dispatch_events(subscriber),
            None => self.game.discard_events(),
        }
    }

    fn announce(&self, result: &GameResult) {
        let logger = self.game.logger();
        let name = |id: PlayerId| {
            self.game
                .duelists()
                .iter()
                .find(|d| d.id() == id)
                .map(|d| d.name().to_string())
                .unwrap_or_else(|| format!("Player {id}"))
        };
        let message = match (&result.winner, &result.end_reason) {
            (_, GameEndReason::TurnLimit) => {
                format!("=== Turn limit reached after {} turns ===", result.turns_played)
            }
            (Some(winner), reason) => {
                let how = match reason {
                    GameEndReason::Decking(_) => "decking",
                    _ => "damage",
                };
                format!(
                    "=== {} wins by {} on turn {} ===",
                    name(*winner),
                    how,
                    result.turns_played
                )
            }
            (None, _) => format!("=== Both duelists fell on turn {} ===", result.turns_played),
        };
        logger.minimal(&message);
    }

    fn check_win_condition(&self) -> Option<GameResult> {
        let loser = self.game.duelists().iter().find(|d| d.is_defeated())?;
        let end_reason = if loser.player().is_dead() {
            GameEndReason::PlayerDeath(loser.id())
        } else {
            GameEndReason::Decking(loser.id())
        };
        Some(GameResult {
            winner: self.game.winner(),
            turns_played: self.game.turn().turn_number(),
            end_reason,
        })
    }
}
