//! Easy tier: uniform random choices with a few coin flips
//!
//! Makes no attempt to evaluate the board beyond "pick something legal". Serves as the
//! baseline the other tiers are measured against.

use crate::core::CardRef;
use crate::game::board;
use crate::game::controller::{DecisionPolicy, Difficulty, PhaseContext};
use rand::Rng;
use smallvec::SmallVec;

const SUBOPTIMAL_LOG_CHANCE: f64 = 0.5;
const SKIP_BACKROW_CHANCE: f64 = 0.3;
const ATTACK_STRONGEST_CHANCE: f64 = 0.4;

#[derive(Debug, Default)]
pub struct EasyController;

impl EasyController {
    pub fn new() -> Self {
        EasyController
    }
}

fn pick<T: Clone>(ctx: &mut PhaseContext<'_>, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let index = ctx.rng().gen_range(0..items.len());
    Some(items[index].clone())
}

impl DecisionPolicy for EasyController {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }

    fn main_phase(&mut self, ctx: &mut PhaseContext<'_>) {
        let monsters: Vec<CardRef> = board::hand_monsters(ctx.me()).cloned().collect();
        if let Some(monster) = pick(ctx, &monsters) {
            if ctx.rng().gen_bool(SUBOPTIMAL_LOG_CHANCE) {
                ctx.choice(&format!("summon {} in a suboptimal position", monster.name));
            } else {
                ctx.choice(&format!("summon {}", monster.name));
            }
            ctx.summon_monster(&monster);
        }

        if ctx.rng().gen_bool(SKIP_BACKROW_CHANCE) {
            ctx.choice("skip spells and traps");
            return;
        }

        let spells: Vec<CardRef> = board::hand_spells(ctx.me()).cloned().collect();
        if let Some(slot) = board::first_empty_spell_trap_slot(ctx.me()) {
            if let Some(spell) = pick(ctx, &spells) {
                ctx.choice(&format!("play spell {} in slot {}", spell.name, slot));
                ctx.play_card(&spell, slot);
            }
        }

        let traps: Vec<CardRef> = board::hand_traps(ctx.me()).cloned().collect();
        if let Some(slot) = board::first_empty_spell_trap_slot(ctx.me()) {
            if let Some(trap) = pick(ctx, &traps) {
                ctx.choice(&format!("set trap {} in slot {}", trap.name, slot));
                ctx.play_card(&trap, slot);
            }
        }
    }

    fn battle_phase(&mut self, ctx: &mut PhaseContext<'_>) {
        let attackers = board::own_monster_slots(ctx.me());
        let Some(attacker) = pick(ctx, &attackers) else {
            return;
        };

        let defenders: SmallVec<[usize; 3]> = board::own_monster_slots(ctx.opponent());
        if defenders.is_empty() {
            ctx.choice(&format!("slot {attacker} attacks directly"));
            ctx.attack(attacker, 0);
            return;
        }

        let target = if ctx.rng().gen_bool(ATTACK_STRONGEST_CHANCE) {
            board::strongest_slot(ctx.opponent())
        } else {
            pick(ctx, &defenders)
        };
        if let Some(target) = target {
            ctx.choice(&format!("slot {attacker} attacks slot {target}"));
            ctx.attack(attacker, target);
        }
    }
}
