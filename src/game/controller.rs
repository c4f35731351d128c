//! Decision policy trait and the phase context handed to it
//!
//! A policy reads both sides of the board through [`PhaseContext`] and acts only through the
//! same summon/play/attack operations a human caller uses. The opponent is visible as a
//! read-only [`Player`]; the context itself routes attacks to the opposing duelist.

use crate::core::{CardRef, Player, PlayerId};
use crate::game::combat::AttackOutcome;
use crate::game::duelist::Duelist;
use crate::game::easy_controller::EasyController;
use crate::game::hard_controller::HardController;
use crate::game::logger::SharedLogger;
use crate::game::medium_controller::MediumController;
use crate::game::phase::Phase;
use crate::game::VerbosityLevel;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decision policy tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

/// Who makes the decisions for a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    /// Driven by the caller through [`crate::game::GameState::duelist_mut`] and friends
    Human,
    Automated(Difficulty),
}

/// What an automated seat does when its Main or Battle phase begins
pub trait DecisionPolicy {
    fn difficulty(&self) -> Difficulty;

    fn main_phase(&mut self, ctx: &mut PhaseContext<'_>);

    fn battle_phase(&mut self, ctx: &mut PhaseContext<'_>);

    /// Dispatch on phase; Draw and End need no decisions
    fn handle_phase(&mut self, phase: Phase, ctx: &mut PhaseContext<'_>) {
        match phase {
            Phase::Main => self.main_phase(ctx),
            Phase::Battle => self.battle_phase(ctx),
            Phase::Draw | Phase::End => {}
        }
    }
}

/// Build the policy for a tier
pub fn policy_for(difficulty: Difficulty) -> Box<dyn DecisionPolicy> {
    match difficulty {
        Difficulty::Easy => Box::new(EasyController::new()),
        Difficulty::Medium => Box::new(MediumController::new()),
        Difficulty::Hard => Box::new(HardController::new()),
    }
}

/// The acting duelist, a read-only opponent, and the match RNG for one phase invocation
pub struct PhaseContext<'a> {
    me: &'a mut Duelist,
    opponent: &'a mut Duelist,
    rng: &'a mut dyn RngCore,
    label: String,
}

impl<'a> PhaseContext<'a> {
    pub fn new(me: &'a mut Duelist, opponent: &'a mut Duelist, rng: &'a mut dyn RngCore) -> Self {
        PhaseContext {
            label: me.name().to_string(),
            me,
            opponent,
            rng,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.me.id()
    }

    pub fn me(&self) -> &Player {
        self.me.player()
    }

    pub fn opponent(&self) -> &Player {
        self.opponent.player()
    }

    pub fn rng(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }

    pub fn logger(&self) -> &SharedLogger {
        self.me.logger()
    }

    pub(crate) fn log(&self, level: VerbosityLevel, tag: &str, message: &str) {
        self.me.logger().tagged(level, &self.label, tag, message);
    }

    /// Record a policy decision
    pub fn choice(&self, message: &str) {
        self.me.logger().controller_choice(&self.label, message);
    }

    pub fn summon_monster(&mut self, card: &CardRef) -> bool {
        self.me.summon_monster(card)
    }

    /// Play a card from hand; a rejected play is logged and reported as false
    pub fn play_card(&mut self, card: &CardRef, slot: usize) -> bool {
        match self.me.play_card(card, slot) {
            Ok(()) => true,
            Err(e) => {
                log_tagged!(self, VerbosityLevel::Normal, "AI", "play {} rejected: {}", card.name, e);
                false
            }
        }
    }

    /// Attack the opponent; a rejected declaration is logged and reported as `None`
    pub fn attack(&mut self, attacker_slot: usize, target_slot: usize) -> Option<AttackOutcome> {
        match self.me.attack(attacker_slot, target_slot, &mut *self.opponent) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                log_tagged!(
                    self,
                    VerbosityLevel::Normal,
                    "AI",
                    "attack {} -> {} rejected: {}",
                    attacker_slot,
                    target_slot,
                    e
                );
                None
            }
        }
    }
}
