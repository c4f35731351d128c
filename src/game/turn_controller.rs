//! Turn controller: the phase state machine and whose turn it is
//!
//! A transition in progress blocks any other advance; blocked requests are logged and ignored.
//! [`crate::game::GameState`] holds the transition open while it runs the new phase's work
//! (draws, decision policies), so nothing triggered from inside a phase can advance the turn.

use crate::game::events::{EventLog, GameEvent};
use crate::game::logger::SharedLogger;
use crate::game::phase::{Phase, TurnState};
use crate::game::VerbosityLevel;
use crate::{DuelError, Result};

#[derive(Debug)]
pub struct TurnController {
    state: TurnState,
    started: bool,
    transitioning: bool,
    events: EventLog,
    logger: SharedLogger,
}

impl TurnController {
    pub fn new(player_count: usize, logger: SharedLogger) -> Result<Self> {
        if player_count == 0 {
            return Err(DuelError::InvalidAction(
                "turn controller needs at least one player".to_string(),
            ));
        }
        Ok(TurnController {
            state: TurnState::new(player_count),
            started: false,
            transitioning: false,
            events: EventLog::new(None),
            logger,
        })
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.current_phase
    }

    pub fn current_player_idx(&self) -> usize {
        self.state.current_player_idx
    }

    pub fn opponent_idx(&self) -> usize {
        self.state.opponent_idx()
    }

    pub fn turn_number(&self) -> u32 {
        self.state.turn_number
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventLog {
        &mut self.events
    }

    fn announce_phase(&mut self) {
        self.logger.tagged(
            VerbosityLevel::Normal,
            "turn",
            "PHASE",
            &format!(
                "turn {} player {} -> {}",
                self.state.turn_number, self.state.current_player_idx, self.state.current_phase
            ),
        );
        self.events.push(GameEvent::PhaseChanged {
            phase: self.state.current_phase,
            player_index: self.state.current_player_idx,
        });
    }

    /// Enter the first player's Draw phase
    pub fn start_game(&mut self) {
        if self.transitioning {
            self.logger.warn("start_game ignored: phase transition in progress");
            return;
        }
        self.start_held();
    }

    /// Enter the first Draw phase while the guard is held by the caller
    pub(crate) fn start_held(&mut self) {
        self.started = true;
        self.state.current_phase = Phase::Draw;
        self.events.push(GameEvent::GameStarted);
        self.announce_phase();
    }

    /// Claim the transition guard; false if a transition is already running
    pub fn try_begin_transition(&mut self) -> bool {
        if self.transitioning {
            self.logger.warn("phase advance ignored: transition in progress");
            return false;
        }
        self.transitioning = true;
        true
    }

    pub fn end_transition(&mut self) {
        self.transitioning = false;
    }

    /// Move to the successor phase while the guard is held by the caller
    pub(crate) fn advance_held(&mut self) -> Phase {
        let next = self.state.current_phase.next();
        if self.state.current_phase.ends_turn() {
            self.state.next_player();
            self.events.push(GameEvent::TurnSwitched {
                player_index: self.state.current_player_idx,
            });
        }
        self.state.current_phase = next;
        self.announce_phase();
        next
    }

    /// Advance one phase. Returns `None` when the request was rejected by the guard.
    pub fn next_phase(&mut self) -> Option<Phase> {
        if !self.try_begin_transition() {
            return None;
        }
        let phase = self.advance_held();
        self.end_transition();
        Some(phase)
    }

    /// Jump straight to `phase` without the successor table (test and debug harnesses)
    pub fn force_set_phase(&mut self, phase: Phase) -> bool {
        if !self.try_begin_transition() {
            return false;
        }
        self.state.current_phase = phase;
        self.announce_phase();
        self.end_transition();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::logger::GameLogger;

    fn controller(players: usize) -> TurnController {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
        logger.enable_capture();
        TurnController::new(players, logger.shared()).unwrap()
    }

    #[test]
    fn test_zero_players_rejected() {
        let logger = GameLogger::new().shared();
        assert!(TurnController::new(0, logger).is_err());
    }

    #[test]
    fn test_start_game_events() {
        let mut tc = controller(2);
        tc.start_game();
        assert_eq!(
            tc.events_mut().drain(),
            vec![
                GameEvent::GameStarted,
                GameEvent::PhaseChanged {
                    phase: Phase::Draw,
                    player_index: 0
                }
            ]
        );
    }

    #[test]
    fn test_turn_switch_precedes_draw() {
        let mut tc = controller(2);
        tc.start_game();
        for _ in 0..3 {
            tc.next_phase();
        }
        tc.events_mut().drain();

        assert_eq!(tc.next_phase(), Some(Phase::Draw));
        assert_eq!(
            tc.events_mut().drain(),
            vec![
                GameEvent::TurnSwitched { player_index: 1 },
                GameEvent::PhaseChanged {
                    phase: Phase::Draw,
                    player_index: 1
                }
            ]
        );
        assert_eq!(tc.turn_number(), 2);
    }

    #[test]
    fn test_guard_rejects_nested_advance() {
        let mut tc = controller(2);
        tc.start_game();
        assert!(tc.try_begin_transition());
        assert_eq!(tc.next_phase(), None);
        assert!(!tc.force_set_phase(Phase::End));
        assert_eq!(tc.phase(), Phase::Draw);
        tc.end_transition();
        assert_eq!(tc.next_phase(), Some(Phase::Main));
    }

    #[test]
    fn test_start_under_held_guard() {
        let mut tc = controller(2);
        assert!(tc.try_begin_transition());
        tc.start_game();
        assert!(!tc.is_started());
        assert!(tc.events().is_empty());

        tc.start_held();
        tc.end_transition();
        assert!(tc.is_started());
        assert_eq!(tc.events().len(), 2);
    }

    #[test]
    fn test_force_set_phase() {
        let mut tc = controller(2);
        tc.start_game();
        assert!(tc.force_set_phase(Phase::Battle));
        assert_eq!(tc.phase(), Phase::Battle);
        assert_eq!(tc.current_player_idx(), 0);
    }
}
