//! Combat resolver
//!
//! Validates one attack declaration, fires the defender's OnAttack traps, then settles the
//! direct hit or the monster battle using post-trap effective stats.

use crate::game::duelist::Duelist;
use crate::game::effects;
use crate::game::VerbosityLevel;
use crate::zones::FIELD_SIZE;
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};

/// How an attack declaration resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// The attacker had already attacked this turn; nothing happened
    AlreadyAttacked,
    /// Defender had no monsters. `blocked` is true when immunity absorbed the damage.
    Direct { damage: i32, blocked: bool },
    DefenderDestroyed,
    /// Attacker lost; the defending monster keeps `defense_damage` of wear
    AttackerDestroyed { defense_damage: i32 },
    BothDestroyed,
}

/// Deal battle damage to `target`, unless its one-shot immunity absorbs it.
///
/// Returns true if immunity was consumed.
pub fn apply_battle_damage(target: &mut Duelist, damage: i32) -> bool {
    if damage <= 0 {
        return false;
    }
    if target.player_mut().consume_battle_damage_immunity() {
        log_tagged!(target, VerbosityLevel::Normal, "BATTLE", "immunity absorbed {} damage", damage);
        return true;
    }
    target.take_damage(damage);
    false
}

pub(crate) fn resolve_attack(
    attacker: &mut Duelist,
    attacker_slot: usize,
    target_slot: usize,
    defender: &mut Duelist,
) -> Result<AttackOutcome> {
    if attacker_slot >= FIELD_SIZE {
        return Err(DuelError::SlotOutOfRange(attacker_slot));
    }
    if attacker.player().has_monster_attacked(attacker_slot) {
        log_tagged!(
            attacker,
            VerbosityLevel::Normal,
            "BATTLE",
            "slot {} already attacked this turn",
            attacker_slot
        );
        return Ok(AttackOutcome::AlreadyAttacked);
    }
    let attacker_card = attacker
        .player()
        .monster_at(attacker_slot)
        .cloned()
        .ok_or(DuelError::NoAttacker(attacker_slot))?;
    if target_slot >= FIELD_SIZE {
        return Err(DuelError::SlotOutOfRange(target_slot));
    }
    let defender_has_monsters = defender.player().has_monsters();
    if defender_has_monsters && defender.player().monster_at(target_slot).is_none() {
        return Err(DuelError::InvalidTarget(target_slot));
    }

    effects::trigger_attack_traps(attacker, defender)?;

    let attack = attacker.player().effective_attack(attacker_slot)?;

    if !defender_has_monsters {
        log_tagged!(attacker, VerbosityLevel::Normal, "BATTLE", "{} attacks directly for {}", attacker_card.name, attack);
        let blocked = apply_battle_damage(defender, attack);
        attacker.player_mut().mark_monster_attacked(attacker_slot)?;
        return Ok(AttackOutcome::Direct {
            damage: if blocked { 0 } else { attack },
            blocked,
        });
    }

    let defense = defender.player().effective_defense(target_slot)?;
    log_tagged!(
        attacker,
        VerbosityLevel::Normal,
        "BATTLE",
        "{} ({}) attacks slot {} ({})",
        attacker_card.name,
        attack,
        target_slot,
        defense
    );

    let outcome = match attack.cmp(&defense) {
        std::cmp::Ordering::Greater => {
            defender.destroy_monster(target_slot)?;
            AttackOutcome::DefenderDestroyed
        }
        std::cmp::Ordering::Less => {
            attacker.destroy_monster(attacker_slot)?;
            defender.player_mut().apply_defense_damage(target_slot, attack)?;
            AttackOutcome::AttackerDestroyed {
                defense_damage: attack,
            }
        }
        std::cmp::Ordering::Equal => {
            defender.destroy_monster(target_slot)?;
            attacker.destroy_monster(attacker_slot)?;
            AttackOutcome::BothDestroyed
        }
    };

    // a destroyed attacker leaves an empty slot with cleared state
    if attacker.player().monster_at(attacker_slot).is_some() {
        attacker.player_mut().mark_monster_attacked(attacker_slot)?;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::{bare_duelist, field_monster};

    #[test]
    fn test_slot_checks_in_order() {
        let mut a = bare_duelist(0);
        let mut d = bare_duelist(1);
        assert!(matches!(a.attack(3, 0, &mut d), Err(DuelError::SlotOutOfRange(3))));
        assert!(matches!(a.attack(0, 0, &mut d), Err(DuelError::NoAttacker(0))));

        field_monster(&mut a, 0, 1000, 1000);
        field_monster(&mut d, 1, 500, 500);
        assert!(matches!(a.attack(0, 0, &mut d), Err(DuelError::InvalidTarget(0))));
        assert!(matches!(a.attack(0, 5, &mut d), Err(DuelError::SlotOutOfRange(5))));
    }

    #[test]
    fn test_second_declaration_is_noop() {
        let mut a = bare_duelist(0);
        let mut d = bare_duelist(1);
        field_monster(&mut a, 0, 1000, 1000);

        let first = a.attack(0, 0, &mut d).unwrap();
        assert_eq!(first, AttackOutcome::Direct { damage: 1000, blocked: false });
        let life = d.player().life();

        assert_eq!(a.attack(0, 0, &mut d).unwrap(), AttackOutcome::AlreadyAttacked);
        assert_eq!(d.player().life(), life);
    }

    #[test]
    fn test_immunity_blocks_then_expires() {
        let mut d = bare_duelist(1);
        d.player_mut().enable_battle_damage_immunity();

        assert!(apply_battle_damage(&mut d, 700));
        assert_eq!(d.player().life(), 8000);
        assert!(!apply_battle_damage(&mut d, 700));
        assert_eq!(d.player().life(), 7300);

        d.player_mut().enable_battle_damage_immunity();
        assert!(!apply_battle_damage(&mut d, 0));
        assert!(d.player().has_battle_damage_immunity());
    }

    #[test]
    fn test_tie_does_not_wear_defender() {
        let mut a = bare_duelist(0);
        let mut d = bare_duelist(1);
        field_monster(&mut a, 0, 1200, 800);
        field_monster(&mut d, 0, 900, 1200);

        assert_eq!(a.attack(0, 0, &mut d).unwrap(), AttackOutcome::BothDestroyed);
        assert!(!a.player().has_monsters());
        assert!(!d.player().has_monsters());
        assert_eq!(a.player().life(), 8000);
        assert_eq!(d.player().life(), 8000);
    }
}
