//! Card definitions
//!
//! A card is an immutable definition shared through [`CardRef`]. Every copy of a card in a deck
//! points at the same definition; all runtime state (modifiers, damage, flags) lives in the
//! slot-indexed arrays of [`crate::core::Player`].

use crate::core::{CardId, EntityId, FieldRow, GameEntity, SpellCategory, SpellEffect, TrapEffect, TrapTrigger};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Shared, read-only handle to a card definition
pub type CardRef = Arc<Card>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterStats {
    pub level: u8,
    pub attack: i32,
    pub defense: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellStats {
    pub category: SpellCategory,
    pub effect: SpellEffect,
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapStats {
    pub trigger: TrapTrigger,
    pub effect: TrapEffect,
    pub value: i32,
}

/// The three card kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Monster(MonsterStats),
    Spell(SpellStats),
    Trap(TrapStats),
}

/// Represents a card definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub kind: CardKind,
}

impl Card {
    pub fn new(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Card {
            id,
            name: name.into(),
            kind,
        }
    }

    pub fn monster(id: CardId, name: impl Into<String>, level: u8, attack: i32, defense: i32) -> Self {
        Card::new(
            id,
            name,
            CardKind::Monster(MonsterStats {
                level,
                attack,
                defense,
            }),
        )
    }

    pub fn spell(
        id: CardId,
        name: impl Into<String>,
        category: SpellCategory,
        effect: SpellEffect,
        value: i32,
    ) -> Self {
        Card::new(
            id,
            name,
            CardKind::Spell(SpellStats {
                category,
                effect,
                value,
            }),
        )
    }

    pub fn trap(
        id: CardId,
        name: impl Into<String>,
        trigger: TrapTrigger,
        effect: TrapEffect,
        value: i32,
    ) -> Self {
        Card::new(
            id,
            name,
            CardKind::Trap(TrapStats {
                trigger,
                effect,
                value,
            }),
        )
    }

    pub fn as_monster(&self) -> Option<&MonsterStats> {
        match &self.kind {
            CardKind::Monster(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn as_spell(&self) -> Option<&SpellStats> {
        match &self.kind {
            CardKind::Spell(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn as_trap(&self) -> Option<&TrapStats> {
        match &self.kind {
            CardKind::Trap(stats) => Some(stats),
            _ => None,
        }
    }

    pub fn is_monster(&self) -> bool {
        matches!(self.kind, CardKind::Monster(_))
    }

    pub fn is_spell(&self) -> bool {
        matches!(self.kind, CardKind::Spell(_))
    }

    pub fn is_trap(&self) -> bool {
        matches!(self.kind, CardKind::Trap(_))
    }

    /// Row this card goes to when played onto the field
    pub fn field_row(&self) -> FieldRow {
        match self.kind {
            CardKind::Monster(_) => FieldRow::Monster,
            CardKind::Spell(_) | CardKind::Trap(_) => FieldRow::SpellTrap,
        }
    }

    /// Base attack for monsters, `None` otherwise
    pub fn attack(&self) -> Option<i32> {
        self.as_monster().map(|m| m.attack)
    }

    /// Base defense for monsters, `None` otherwise
    pub fn defense(&self) -> Option<i32> {
        self.as_monster().map(|m| m.defense)
    }
}

impl GameEntity for Card {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            CardKind::Monster(m) => write!(
                f,
                "{} (Lv{} {}/{})",
                self.name, m.level, m.attack, m.defense
            ),
            CardKind::Spell(s) => write!(f, "{} ({:?} {})", self.name, s.effect, s.value),
            CardKind::Trap(t) => write!(f, "{} ({:?} {})", self.name, t.effect, t.value),
        }
    }
}
