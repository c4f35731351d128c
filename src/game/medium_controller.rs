//! Medium tier: greedy single-step heuristics
//!
//! Summons the best monster for the current life race, plays at most one spell that has a
//! use right now, sets one trap, and attacks with its best monster into the opponent's weakest.

use crate::core::{CardRef, Player, SpellEffect};
use crate::game::board;
use crate::game::controller::{DecisionPolicy, Difficulty, PhaseContext};

#[derive(Debug, Default)]
pub struct MediumController;

impl MediumController {
    pub fn new() -> Self {
        MediumController
    }
}

/// Would this spell do anything if played now?
pub fn spell_is_useful(spell: &CardRef, me: &Player, opponent: &Player) -> bool {
    let Some(stats) = spell.as_spell() else {
        return false;
    };
    match stats.effect {
        SpellEffect::BoostAttack | SpellEffect::BoostDefense => me.has_monsters(),
        SpellEffect::DestroyWeak => opponent
            .monster_row()
            .occupied()
            .any(|(_, m)| m.attack().unwrap_or(0) < stats.value),
        SpellEffect::ReduceAttack | SpellEffect::ReduceDefense => opponent.has_monsters(),
    }
}

/// Main-phase backrow step: one useful spell, then one trap, each into the first free slot
pub(crate) fn play_spell_then_trap(ctx: &mut PhaseContext<'_>, spell: Option<CardRef>) {
    if let (Some(spell), Some(slot)) = (spell, board::first_empty_spell_trap_slot(ctx.me())) {
        ctx.choice(&format!("play spell {} in slot {}", spell.name, slot));
        ctx.play_card(&spell, slot);
    }

    let trap = board::hand_traps(ctx.me()).next().cloned();
    if let (Some(trap), Some(slot)) = (trap, board::first_empty_spell_trap_slot(ctx.me())) {
        ctx.choice(&format!("set trap {} in slot {}", trap.name, slot));
        ctx.play_card(&trap, slot);
    }
}

/// Medium battle step, also the fallback of the Hard tier
pub(crate) fn medium_battle(ctx: &mut PhaseContext<'_>) {
    let Some(attacker) = board::strongest_slot(ctx.me()) else {
        return;
    };

    if let Some(target) = board::weakest_slot(ctx.opponent()) {
        ctx.choice(&format!("slot {attacker} attacks weakest slot {target}"));
        ctx.attack(attacker, target);
        return;
    }

    let attack = ctx.me().effective_attack(attacker).unwrap_or(0);
    let defense = ctx.me().effective_defense(attacker).unwrap_or(0);
    let opponent = ctx.opponent();
    let lethal = attack >= opponent.life();
    let hand_threat = board::hand_monster_above(opponent, defense);
    let backrow_threat = board::set_card_count(opponent) > 0;

    if lethal {
        ctx.choice(&format!("slot {attacker} attacks directly for lethal"));
        ctx.attack(attacker, 0);
    } else if hand_threat || backrow_threat {
        ctx.choice("hold attack: latent threat");
    } else {
        ctx.choice(&format!("slot {attacker} attacks directly"));
        ctx.attack(attacker, 0);
    }
}

impl DecisionPolicy for MediumController {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }

    fn main_phase(&mut self, ctx: &mut PhaseContext<'_>) {
        let behind = ctx.me().life() < ctx.opponent().life();
        let pick = if behind {
            board::sturdiest_in_hand(ctx.me()).cloned()
        } else {
            board::highest_attack_in_hand(ctx.me()).cloned()
        };
        if let Some(monster) = pick {
            ctx.choice(&format!(
                "summon {} ({})",
                monster.name,
                if behind { "defense" } else { "attack" }
            ));
            ctx.summon_monster(&monster);
        }

        let spell = board::hand_spells(ctx.me())
            .find(|s| spell_is_useful(s, ctx.me(), ctx.opponent()))
            .cloned();
        play_spell_then_trap(ctx, spell);
    }

    fn battle_phase(&mut self, ctx: &mut PhaseContext<'_>) {
        medium_battle(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Card, EntityId, SpellCategory, TrapEffect, TrapTrigger};
    use crate::game::test_support::{bare_duelist, field_monster, hand_card, monster_card, set_card};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::sync::Arc;

    fn spell(id: u32, effect: SpellEffect, value: i32) -> CardRef {
        Arc::new(Card::spell(EntityId::new(id), "S", SpellCategory::Buff, effect, value))
    }

    fn trap(id: u32) -> CardRef {
        Arc::new(Card::trap(EntityId::new(id), "T", TrapTrigger::OnAttack, TrapEffect::DamagePlayer, 0))
    }

    #[test]
    fn test_spell_usefulness() {
        let mut me = bare_duelist(0);
        let mut opp = bare_duelist(1);
        let boost = spell(1, SpellEffect::BoostAttack, 20);
        let destroy = spell(2, SpellEffect::DestroyWeak, 1000);
        let reduce = spell(3, SpellEffect::ReduceDefense, 20);

        assert!(!spell_is_useful(&boost, me.player(), opp.player()));
        assert!(!spell_is_useful(&reduce, me.player(), opp.player()));

        field_monster(&mut me, 0, 1000, 1000);
        field_monster(&mut opp, 0, 1000, 1000);
        assert!(spell_is_useful(&boost, me.player(), opp.player()));
        assert!(spell_is_useful(&reduce, me.player(), opp.player()));
        assert!(!spell_is_useful(&destroy, me.player(), opp.player()));

        field_monster(&mut opp, 1, 999, 1000);
        assert!(spell_is_useful(&destroy, me.player(), opp.player()));
    }

    #[test]
    fn test_behind_summons_sturdiest() {
        let mut me = bare_duelist(0);
        let mut opp = bare_duelist(1);
        me.take_damage(1000);
        hand_card(&mut me, monster_card(71, 4, 1900, 600));
        hand_card(&mut me, monster_card(72, 4, 800, 1700));
        hand_card(&mut me, monster_card(73, 4, 1000, 1700));

        let mut rng = ChaCha12Rng::seed_from_u64(0);
        let mut ctx = PhaseContext::new(&mut me, &mut opp, &mut rng);
        MediumController::new().main_phase(&mut ctx);
        assert_eq!(me.player().monster_at(0).map(|c| c.id), Some(EntityId::new(73)));
    }

    #[test]
    fn test_holds_useless_spell_and_sets_trap() {
        let mut me = bare_duelist(0);
        let mut opp = bare_duelist(1);
        let useless = spell(80, SpellEffect::ReduceAttack, 30);
        hand_card(&mut me, useless.clone());
        hand_card(&mut me, trap(81));

        let mut rng = ChaCha12Rng::seed_from_u64(0);
        let mut ctx = PhaseContext::new(&mut me, &mut opp, &mut rng);
        MediumController::new().main_phase(&mut ctx);

        assert!(me.player().hand().contains(useless.id));
        assert_eq!(me.player().spell_trap_at(0).map(|c| c.id), Some(EntityId::new(81)));
    }

    #[test]
    fn test_holds_direct_attack_against_set_cards() {
        let mut me = bare_duelist(0);
        let mut opp = bare_duelist(1);
        field_monster(&mut me, 0, 1500, 1000);
        set_card(&mut opp, 0, trap(90));

        let mut rng = ChaCha12Rng::seed_from_u64(0);
        let mut ctx = PhaseContext::new(&mut me, &mut opp, &mut rng);
        MediumController::new().battle_phase(&mut ctx);
        assert_eq!(opp.player().life(), 8000);
        assert!(!me.player().has_monster_attacked(0));
    }

    #[test]
    fn test_holds_direct_attack_against_hand_threat() {
        for (hand_attack, expected_life) in [(1100, 8000), (1000, 6500)] {
            let mut me = bare_duelist(0);
            let mut opp = bare_duelist(1);
            field_monster(&mut me, 0, 1500, 1000);
            hand_card(&mut opp, monster_card(95, 4, hand_attack, 500));

            let mut rng = ChaCha12Rng::seed_from_u64(0);
            let mut ctx = PhaseContext::new(&mut me, &mut opp, &mut rng);
            MediumController::new().battle_phase(&mut ctx);
            assert_eq!(opp.player().life(), expected_life, "hand attack {hand_attack}");
        }
    }

    #[test]
    fn test_lethal_ignores_threats() {
        let mut me = bare_duelist(0);
        let mut opp = bare_duelist(1);
        field_monster(&mut me, 0, 1500, 1000);
        set_card(&mut opp, 0, Arc::new(Card::trap(
            EntityId::new(91),
            "Snare",
            TrapTrigger::OnSummon,
            TrapEffect::DamagePlayer,
            0,
        )));
        opp.take_damage(6600);

        let mut rng = ChaCha12Rng::seed_from_u64(0);
        let mut ctx = PhaseContext::new(&mut me, &mut opp, &mut rng);
        MediumController::new().battle_phase(&mut ctx);
        assert_eq!(opp.player().life(), 0);
    }
}
