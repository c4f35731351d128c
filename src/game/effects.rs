//! Effect resolver: spells aimed at a monster slot and traps fired during an attack

use crate::core::{Card, SpellEffect, TrapEffect, TrapStats, TrapTrigger};
use crate::game::duelist::Duelist;
use crate::game::VerbosityLevel;
use crate::zones::FIELD_SIZE;
use crate::{DuelError, Result};
use smallvec::SmallVec;

/// What a spell did to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellOutcome {
    /// Target was destroyed
    Destroyed,
    /// A modifier percent was added to the target slot
    Modified,
    /// Target did not meet the effect's condition
    NoEffect,
}

/// Apply `spell` to the monster in `slot` on `target`'s field
pub fn apply_spell_to_monster(spell: &Card, target: &mut Duelist, slot: usize) -> Result<SpellOutcome> {
    let stats = spell
        .as_spell()
        .ok_or_else(|| DuelError::WrongCardKind(format!("{} is not a spell", spell.name)))?;
    if slot >= FIELD_SIZE {
        return Err(DuelError::SlotOutOfRange(slot));
    }
    let base_attack = target
        .player()
        .monster_at(slot)
        .and_then(|m| m.attack())
        .ok_or(DuelError::EmptySlot(slot))?;

    let magnitude = stats.value.saturating_abs();
    let outcome = match stats.effect {
        SpellEffect::DestroyWeak => {
            if base_attack < stats.value {
                target.destroy_monster(slot)?;
                SpellOutcome::Destroyed
            } else {
                SpellOutcome::NoEffect
            }
        }
        SpellEffect::ReduceAttack => {
            target.player_mut().add_attack_modifier_percent(slot, -magnitude)?;
            SpellOutcome::Modified
        }
        SpellEffect::BoostAttack => {
            target.player_mut().add_attack_modifier_percent(slot, magnitude)?;
            SpellOutcome::Modified
        }
        SpellEffect::ReduceDefense => {
            target.player_mut().add_defense_modifier_percent(slot, -magnitude)?;
            SpellOutcome::Modified
        }
        SpellEffect::BoostDefense => {
            target.player_mut().add_defense_modifier_percent(slot, magnitude)?;
            SpellOutcome::Modified
        }
    };
    log_tagged!(
        target,
        VerbosityLevel::Normal,
        "SPELL",
        "{} on slot {}: {:?}",
        spell.name,
        slot,
        outcome
    );
    Ok(outcome)
}

/// Apply one trap's effect. `attacker` declared the attack, `defender` owns the trap.
pub fn apply_trap_effect(trap: &TrapStats, attacker: &mut Duelist, defender: &mut Duelist) -> Result<()> {
    match trap.effect {
        TrapEffect::DamageAttacker | TrapEffect::DamagePlayer => {
            let damage = trap.effect.fixed_damage(trap.value).unwrap_or(0);
            let victim = if trap.effect == TrapEffect::DamageAttacker {
                attacker
            } else {
                defender
            };
            victim.take_damage(damage);
        }
        TrapEffect::ReduceIncomingDamage => {
            defender.player_mut().enable_battle_damage_immunity();
        }
        TrapEffect::DebuffSummonedMonster => {
            let first = attacker.player().monster_row().occupied().next().map(|(i, _)| i);
            if let Some(slot) = first {
                attacker
                    .player_mut()
                    .add_attack_modifier_percent(slot, -trap.value.saturating_abs())?;
            }
        }
        TrapEffect::NegateSpell => {
            defender.log(VerbosityLevel::Normal, "TRAP", "negate has nothing to negate");
        }
    }
    Ok(())
}

/// Fire every OnAttack trap on the defender's field in slot order, sending each to the graveyard
pub fn trigger_attack_traps(
    attacker: &mut Duelist,
    defender: &mut Duelist,
) -> Result<SmallVec<[TrapEffect; FIELD_SIZE]>> {
    let mut fired = SmallVec::new();
    for slot in 0..FIELD_SIZE {
        let Some(card) = defender.player().spell_trap_at(slot).cloned() else {
            continue;
        };
        let Some(trap) = card.as_trap().filter(|t| t.trigger == TrapTrigger::OnAttack) else {
            continue;
        };
        log_tagged!(defender, VerbosityLevel::Normal, "TRAP", "{} ({:?})", card.name, trap.effect);
        apply_trap_effect(trap, attacker, defender)?;
        defender.remove_spell_trap(slot)?;
        fired.push(trap.effect);
    }
    Ok(fired)
}
