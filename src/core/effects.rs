//! Spell and trap effect kinds

use serde::{Deserialize, Serialize};

/// Broad spell category, used by decision policies to classify removal vs. buffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellCategory {
    Destroy,
    Buff,
    Debuff,
}

/// What a spell does to the monster it targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellEffect {
    /// Destroy the target if its base attack is below the effect value
    DestroyWeak,
    ReduceAttack,
    BoostAttack,
    ReduceDefense,
    BoostDefense,
}

/// Condition that fires a set trap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapTrigger {
    OnAttack,
    OnSummon,
    OnSpellActivation,
}

/// What a trap does once it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapEffect {
    /// Fixed damage to the attacking player (100 when the value is not positive)
    DamageAttacker,
    /// Arm the defender's one-shot battle damage immunity
    ReduceIncomingDamage,
    /// Lower the attack percent of the attacker's first occupied monster slot
    DebuffSummonedMonster,
    /// No activation hook exists yet; firing only logs
    NegateSpell,
    /// Fixed damage to the defending player (80 when the value is not positive)
    DamagePlayer,
}

pub const DAMAGE_ATTACKER_DEFAULT: i32 = 100;
pub const DAMAGE_PLAYER_DEFAULT: i32 = 80;

impl TrapEffect {
    /// Fixed damage dealt by the damage-type traps, applying the default for non-positive values
    pub fn fixed_damage(self, value: i32) -> Option<i32> {
        let default = match self {
            TrapEffect::DamageAttacker => DAMAGE_ATTACKER_DEFAULT,
            TrapEffect::DamagePlayer => DAMAGE_PLAYER_DEFAULT,
            _ => return None,
        };
        Some(if value > 0 { value } else { default })
    }
}
