//! Turn phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four phases of a player's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Draw,
    Main,
    Battle,
    End,
}

impl Phase {
    /// Next phase in turn order; End wraps to the next player's Draw
    pub fn next(&self) -> Phase {
        match self {
            Phase::Draw => Phase::Main,
            Phase::Main => Phase::Battle,
            Phase::Battle => Phase::End,
            Phase::End => Phase::Draw,
        }
    }

    /// Does leaving this phase hand the turn to the next player?
    pub fn ends_turn(&self) -> bool {
        matches!(self, Phase::End)
    }

    /// Phases in which an automated seat makes decisions
    pub fn is_decision_phase(&self) -> bool {
        matches!(self, Phase::Main | Phase::Battle)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Draw => "Draw",
            Phase::Main => "Main",
            Phase::Battle => "Battle",
            Phase::End => "End",
        };
        f.write_str(name)
    }
}

/// Whose turn it is and where in the turn we are
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnState {
    /// Current turn number (starts at 1, counts every player's turn)
    pub turn_number: u32,

    pub current_phase: Phase,

    pub current_player_idx: usize,

    pub player_count: usize,
}

impl TurnState {
    pub fn new(player_count: usize) -> Self {
        TurnState {
            turn_number: 1,
            current_phase: Phase::Draw,
            current_player_idx: 0,
            player_count,
        }
    }

    /// Advance the active player index cyclically
    pub fn next_player(&mut self) {
        self.current_player_idx = (self.current_player_idx + 1) % self.player_count;
        self.turn_number += 1;
    }

    /// Index of the player after the active one
    pub fn opponent_idx(&self) -> usize {
        (self.current_player_idx + 1) % self.player_count
    }
}
