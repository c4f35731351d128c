//! Match state: two duelists, their seats, the turn controller and the match RNG

use crate::core::{Deck, PlayerId, DEFAULT_LIFE_POINTS};
use crate::game::controller::{policy_for, DecisionPolicy, PhaseContext, Seat};
use crate::game::duelist::Duelist;
use crate::game::events::EventSubscriber;
use crate::game::logger::{GameLogger, OutputFormat, OutputMode, SharedLogger};
use crate::game::phase::Phase;
use crate::game::turn_controller::TurnController;
use crate::game::VerbosityLevel;
use crate::{DuelError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// Cards drawn by each duelist before the first turn
pub const DEFAULT_HAND_SIZE: usize = 4;
/// Turn limit used by auto-play when none is configured
pub const DEFAULT_MAX_TURNS: u32 = 200;

/// Match-wide settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub player_names: [String; 2],
    pub starting_life: i32,
    pub hand_size: usize,
    /// Seed for the match RNG; a random seed is drawn when unset
    pub seed: Option<u64>,
    pub verbosity: VerbosityLevel,
    pub output_mode: OutputMode,
    pub output_format: OutputFormat,
    pub max_turns: u32,
    /// Keep per-source event logs (off for tournament batches)
    pub record_events: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            starting_life: DEFAULT_LIFE_POINTS,
            hand_size: DEFAULT_HAND_SIZE,
            seed: None,
            verbosity: VerbosityLevel::Normal,
            output_mode: OutputMode::Stdout,
            output_format: OutputFormat::Text,
            max_turns: DEFAULT_MAX_TURNS,
            record_events: true,
        }
    }
}

impl MatchConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Silent, memory-only logging and no event recording
    pub fn quiet(mut self) -> Self {
        self.verbosity = VerbosityLevel::Silent;
        self.output_mode = OutputMode::Memory;
        self.record_events = false;
        self
    }
}

/// One two-seat match
pub struct GameState {
    duelists: Vec<Duelist>,
    seats: [Seat; 2],
    policies: Vec<Option<Box<dyn DecisionPolicy>>>,
    turn: TurnController,
    rng: ChaCha12Rng,
    seed: u64,
    logger: SharedLogger,
    config: MatchConfig,
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("duelists", &self.duelists)
            .field("seats", &self.seats)
            .field("turn", &self.turn)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl GameState {
    pub fn new(config: MatchConfig, decks: [Deck; 2], seats: [Seat; 2]) -> Result<Self> {
        if config.starting_life <= 0 {
            return Err(DuelError::InvalidAction(format!(
                "starting life must be positive, got {}",
                config.starting_life
            )));
        }

        let mut logger = GameLogger::with_verbosity(config.verbosity);
        logger.set_output_mode(config.output_mode);
        logger.set_output_format(config.output_format);
        let logger = logger.shared();

        let mut duelists = Vec::with_capacity(2);
        for (idx, deck) in decks.into_iter().enumerate() {
            let mut duelist = Duelist::new(
                PlayerId::new(idx as u32),
                config.player_names[idx].as_str(),
                deck,
                config.starting_life,
                logger.clone(),
            )?;
            duelist.events_mut().set_enabled(config.record_events);
            duelists.push(duelist);
        }

        let mut turn = TurnController::new(duelists.len(), logger.clone())?;
        turn.events_mut().set_enabled(config.record_events);

        let policies = seats
            .iter()
            .map(|seat| match seat {
                Seat::Human => None,
                Seat::Automated(difficulty) => Some(policy_for(*difficulty)),
            })
            .collect();

        let seed = config.seed.unwrap_or_else(rand::random);

        Ok(GameState {
            duelists,
            seats,
            policies,
            turn,
            rng: ChaCha12Rng::seed_from_u64(seed),
            seed,
            logger,
            config,
        })
    }

    /// Shuffle both decks, deal starting hands and enter the first Draw phase
    pub fn setup(&mut self) -> Result<()> {
        if self.turn.is_started() {
            return Err(DuelError::InvalidAction("match already started".to_string()));
        }
        self.logger.normal(&format!("=== Match start (seed {}) ===", self.seed));
        for duelist in &mut self.duelists {
            duelist.shuffle_deck(&mut self.rng);
            duelist.draw_starting_hand(self.config.hand_size);
        }

        if !self.turn.try_begin_transition() {
            return Err(DuelError::InvalidAction("phase transition in progress".to_string()));
        }
        self.turn.start_held();
        self.run_phase_work();
        self.turn.end_transition();
        Ok(())
    }

    /// Advance one phase and run its work (draw or policy). `None` if the guard rejected it.
    pub fn advance_phase(&mut self) -> Option<Phase> {
        if !self.turn.try_begin_transition() {
            return None;
        }
        let phase = self.turn.advance_held();
        self.run_phase_work();
        self.turn.end_transition();
        Some(phase)
    }

    fn run_phase_work(&mut self) {
        let current = self.turn.current_player_idx();
        match self.turn.phase() {
            Phase::Draw => {
                let duelist = &mut self.duelists[current];
                duelist.reset_turn_state();
                duelist.draw_card();
            }
            phase @ (Phase::Main | Phase::Battle) => self.run_policy(current, phase),
            Phase::End => {}
        }
    }

    fn run_policy(&mut self, idx: usize, phase: Phase) {
        let Some(policy) = self.policies.get_mut(idx).and_then(|p| p.as_mut()) else {
            return;
        };
        let (left, right) = self.duelists.split_at_mut(1);
        let (me, opponent) = match idx {
            0 => (&mut left[0], &mut right[0]),
            _ => (&mut right[0], &mut left[0]),
        };
        if me.is_defeated() || opponent.is_defeated() {
            return;
        }
        let mut ctx = PhaseContext::new(me, opponent, &mut self.rng);
        policy.handle_phase(phase, &mut ctx);
    }

    pub fn duelists(&self) -> &[Duelist] {
        &self.duelists
    }

    pub fn duelist(&self, idx: usize) -> Option<&Duelist> {
        self.duelists.get(idx)
    }

    /// Mutable access for a human seat's caller
    pub fn duelist_mut(&mut self, idx: usize) -> Option<&mut Duelist> {
        self.duelists.get_mut(idx)
    }

    /// Both duelists at once, as (active, opponent)
    pub fn active_and_opponent(&mut self) -> (&mut Duelist, &mut Duelist) {
        let (left, right) = self.duelists.split_at_mut(1);
        match self.turn.current_player_idx() {
            0 => (&mut left[0], &mut right[0]),
            _ => (&mut right[0], &mut left[0]),
        }
    }

    pub fn seat(&self, idx: usize) -> Option<Seat> {
        self.seats.get(idx).copied()
    }

    pub fn turn(&self) -> &TurnController {
        &self.turn
    }

    pub fn turn_mut(&mut self) -> &mut TurnController {
        &mut self.turn
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    /// True once at most one duelist is left standing
    pub fn is_game_over(&self) -> bool {
        self.duelists.iter().filter(|d| !d.is_defeated()).count() <= 1
    }

    /// The only duelist still standing, if the match is decided
    pub fn winner(&self) -> Option<PlayerId> {
        let mut alive = self.duelists.iter().filter(|d| !d.is_defeated());
        match (alive.next(), alive.next()) {
            (Some(d), None) => Some(d.id()),
            _ => None,
        }
    }

    /// Drop every pending event without delivering it
    pub fn discard_events(&mut self) {
        self.turn.events_mut().drain();
        for duelist in &mut self.duelists {
            duelist.events_mut().drain();
        }
    }

    /// Deliver pending events: turn controller first, then each duelist in seat order
    pub fn dispatch_events(&mut self, subscriber: &mut dyn EventSubscriber) {
        self.turn.events_mut().dispatch(subscriber);
        for duelist in &mut self.duelists {
            duelist.events_mut().dispatch(subscriber);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board;
    use crate::game::controller::Difficulty;
    use crate::game::duelist::MAX_SUMMON_LEVEL;
    use crate::game::events::{EventRecorder, GameEvent};
    use crate::loader::CardCatalog;

    fn decks() -> [Deck; 2] {
        let catalog = CardCatalog::starter().unwrap();
        [catalog.starter_deck().unwrap(), catalog.starter_deck().unwrap()]
    }

    fn quiet(seed: u64) -> MatchConfig {
        let mut config = MatchConfig::default().with_seed(seed).quiet();
        config.record_events = true;
        config
    }

    #[test]
    fn test_rejects_non_positive_life() {
        let mut config = quiet(1);
        config.starting_life = 0;
        assert!(GameState::new(config, decks(), [Seat::Human, Seat::Human]).is_err());
    }

    #[test]
    fn test_setup_deals_hands_and_first_draw() {
        let mut game = GameState::new(quiet(7), decks(), [Seat::Human, Seat::Human]).unwrap();
        game.setup().unwrap();

        assert_eq!(game.phase(), Phase::Draw);
        assert_eq!(game.duelist(0).unwrap().player().hand().len(), 5);
        assert_eq!(game.duelist(1).unwrap().player().hand().len(), 4);
        assert_eq!(game.duelist(0).unwrap().deck().len(), 15);
        assert!(game.setup().is_err());
    }

    #[test]
    fn test_turn_events_come_first() {
        let mut game = GameState::new(quiet(7), decks(), [Seat::Human, Seat::Human]).unwrap();
        game.setup().unwrap();
        let mut recorder = EventRecorder::new();
        game.dispatch_events(&mut recorder);

        assert_eq!(recorder.events[0], (None, GameEvent::GameStarted));
        assert_eq!(recorder.count(|e| *e == GameEvent::DeckShuffled), 2);
        assert_eq!(recorder.count(|e| matches!(e, GameEvent::CardDrawn { .. })), 9);
        assert!(game.duelist(0).unwrap().events().is_empty());
    }

    #[test]
    fn test_automated_seat_tries_its_strongest_monster() {
        let seats = [Seat::Automated(Difficulty::Medium), Seat::Human];
        let mut game = GameState::new(quiet(11), decks(), seats).unwrap();
        game.setup().unwrap();
        let pick = board::highest_attack_in_hand(game.duelist(0).unwrap().player())
            .cloned()
            .unwrap();

        assert_eq!(game.advance_phase(), Some(Phase::Main));

        let me = game.duelist(0).unwrap().player();
        let level = pick.as_monster().map(|m| m.level).unwrap();
        if level > MAX_SUMMON_LEVEL {
            // a rejected summon is not retried with another monster
            assert!(me.hand().contains(pick.id));
            assert!(!me.has_monsters());
            assert!(!me.has_summoned_this_turn());
        } else {
            assert!(!me.hand().contains(pick.id));
            assert!(me.monster_row().occupied().any(|(_, c)| c.id == pick.id));
        }
    }

    #[test]
    fn test_full_cycle_hands_turn_over() {
        let mut game = GameState::new(quiet(3), decks(), [Seat::Human, Seat::Human]).unwrap();
        game.setup().unwrap();
        for _ in 0..4 {
            game.advance_phase();
        }
        assert_eq!(game.phase(), Phase::Draw);
        assert_eq!(game.turn().current_player_idx(), 1);
        assert_eq!(game.duelist(1).unwrap().player().hand().len(), 5);
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
    }
}
