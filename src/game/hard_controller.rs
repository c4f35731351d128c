//! Hard tier: threat-aware play
//!
//! Looks for one-turn kills, turtles when low or facing a loaded backrow, conserves spells
//! with a thin hand, and scores the opponent's board before committing to attacks.

use crate::core::{CardRef, SpellCategory};
use crate::game::board;
use crate::game::controller::{DecisionPolicy, Difficulty, PhaseContext};
use crate::game::medium_controller::{medium_battle, play_spell_then_trap};
use crate::zones::FIELD_SIZE;

/// Below this life the policy plays defensively
pub const CRITICAL_LIFE: i32 = 2000;
/// Behind on life and below this: prefer defense
pub const LOW_LIFE: i32 = 4000;
/// Above this life (and low threat) the policy presses attacks
pub const COMFORTABLE_LIFE: i32 = 3000;
/// Set-card count that counts as a loaded backrow
pub const BACKROW_WARNING: usize = 2;
/// Threat score at which attacking is skipped
pub const THREAT_RETREAT: i32 = 5;
/// Threat score below which the policy presses
pub const THREAT_PRESS: i32 = 3;
/// Spells are held while the hand is this small or smaller
pub const CONSERVE_HAND_SIZE: usize = 2;

const THREAT_PER_STRONGER_MONSTER: i32 = 3;
const THREAT_PER_SET_CARD: i32 = 2;
const THREAT_PER_HAND_MONSTER: i32 = 1;

#[derive(Debug, Default)]
pub struct HardController;

impl HardController {
    pub fn new() -> Self {
        HardController
    }
}

/// Scalar threat estimate for the battle phase
pub fn threat_level(ctx: &PhaseContext<'_>) -> i32 {
    let me = ctx.me();
    let opponent = ctx.opponent();
    let my_strongest = board::strongest_attack(me);

    let stronger = opponent
        .monster_row()
        .occupied()
        .filter(|(_, m)| my_strongest.map_or(true, |mine| m.attack().unwrap_or(0) > mine))
        .count() as i32;
    let set_cards = board::set_card_count(opponent) as i32;
    let hand_threats = board::count_hand_monsters_above(opponent, board::best_field_defense(me)) as i32;

    stronger * THREAT_PER_STRONGER_MONSTER
        + set_cards * THREAT_PER_SET_CARD
        + hand_threats * THREAT_PER_HAND_MONSTER
}

/// Can an empty-boarded opponent be finished with what is on the field plus one summon?
fn can_one_turn_kill(ctx: &PhaseContext<'_>) -> bool {
    let opponent = ctx.opponent();
    if opponent.has_monsters() {
        return false;
    }
    let Some(best) = board::highest_attack_in_hand(ctx.me()) else {
        return false;
    };
    let potential = board::total_effective_attack(ctx.me())
        .saturating_add(best.attack().unwrap_or(0));
    potential >= opponent.life()
}

fn choose_summon(ctx: &PhaseContext<'_>) -> Option<(CardRef, &'static str)> {
    let me = ctx.me();
    let opponent = ctx.opponent();
    let defensive = |card: Option<&CardRef>| card.cloned().map(|c| (c, "defense"));
    let offensive = |card: Option<&CardRef>, why| card.cloned().map(|c| (c, why));

    if can_one_turn_kill(ctx) {
        offensive(board::highest_attack_in_hand(me), "one-turn kill")
    } else if me.life() < CRITICAL_LIFE
        || board::set_card_count(opponent) >= BACKROW_WARNING
        || (me.life() < opponent.life() && me.life() < LOW_LIFE)
    {
        defensive(board::highest_defense_in_hand(me))
    } else {
        offensive(board::highest_attack_in_hand(me), "attack")
    }
}

/// Does the opponent's strongest monster outrank ours? False if either side has none.
fn opponent_outclasses(ctx: &PhaseContext<'_>) -> bool {
    match (board::strongest_attack(ctx.opponent()), board::strongest_attack(ctx.me())) {
        (Some(theirs), Some(mine)) => theirs > mine,
        _ => false,
    }
}

fn choose_spell(ctx: &PhaseContext<'_>) -> Option<CardRef> {
    let me = ctx.me();
    if me.hand().len() <= CONSERVE_HAND_SIZE {
        return None;
    }
    let removal = board::hand_spells(me)
        .find(|s| s.as_spell().is_some_and(|st| st.category == SpellCategory::Destroy));
    let buff = board::hand_spells(me).find(|s| {
        s.as_spell()
            .is_some_and(|st| matches!(st.category, SpellCategory::Buff | SpellCategory::Debuff))
    });

    if let (Some(removal), true) = (removal, opponent_outclasses(ctx)) {
        return Some(removal.clone());
    }
    if let (Some(buff), true) = (buff, me.has_monsters()) {
        return Some(buff.clone());
    }
    None
}

impl DecisionPolicy for HardController {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Hard
    }

    fn main_phase(&mut self, ctx: &mut PhaseContext<'_>) {
        if let Some((monster, why)) = choose_summon(ctx) {
            ctx.choice(&format!("summon {} ({})", monster.name, why));
            ctx.summon_monster(&monster);
        }

        let spell = choose_spell(ctx);
        if spell.is_none() && ctx.me().hand().len() <= CONSERVE_HAND_SIZE {
            ctx.choice("conserve spells");
        }
        play_spell_then_trap(ctx, spell);
    }

    fn battle_phase(&mut self, ctx: &mut PhaseContext<'_>) {
        if !ctx.me().has_monsters() {
            return;
        }

        let threat = threat_level(ctx);
        let me = ctx.me();
        let opponent = ctx.opponent();
        let opponent_empty = !opponent.has_monsters();
        let lethal = opponent_empty && board::total_effective_attack(me) >= opponent.life();

        if lethal {
            ctx.choice("all-in for lethal");
            for slot in 0..FIELD_SIZE {
                if ctx.me().monster_at(slot).is_some() {
                    ctx.attack(slot, 0);
                }
            }
            return;
        }

        if threat >= THREAT_RETREAT || me.life() < CRITICAL_LIFE {
            ctx.choice(&format!("defensive turn (threat {threat})"));
            return;
        }

        let my_strongest = board::strongest_attack(me);
        let all_stronger = opponent
            .monster_row()
            .occupied()
            .all(|(_, m)| my_strongest.map_or(true, |mine| m.attack().unwrap_or(0) > mine));
        if !opponent_empty && all_stronger {
            ctx.choice("hold: every opposing monster is stronger");
            return;
        }

        if board::set_card_count(opponent) >= BACKROW_WARNING {
            if let Some(bait) = board::weakest_slot(me) {
                let target = board::weakest_slot(opponent).unwrap_or(0);
                ctx.choice(&format!("bait traps with slot {bait}"));
                ctx.attack(bait, target);
            }
            return;
        }

        if threat < THREAT_PRESS && me.life() > COMFORTABLE_LIFE {
            let Some(attacker) = board::strongest_slot(me) else {
                return;
            };
            if let Some(target) = board::weakest_slot(opponent) {
                ctx.choice(&format!("press: slot {attacker} attacks slot {target}"));
                ctx.attack(attacker, target);
            } else if board::hand_monster_above(opponent, board::best_field_defense(me)) {
                ctx.choice("hold direct attack: hand threat");
            } else {
                ctx.choice(&format!("press: slot {attacker} attacks directly"));
                ctx.attack(attacker, 0);
            }
            return;
        }

        medium_battle(ctx);
    }
}
