//! Player field state
//!
//! Hand, graveyard, the two 3-slot field rows, per-monster-slot runtime modifiers, life total
//! and per-turn flags. This is pure state: notifications are raised by
//! [`crate::game::Duelist`], which owns a `Player` and is the only writer the rest of the
//! engine sees.

use crate::core::{CardId, CardRef, FieldRow, PlayerId, PlayerName};
use crate::zones::{CardZone, FieldZone, Zone, FIELD_SIZE};
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};

/// Starting life total when none is configured
pub const DEFAULT_LIFE_POINTS: i32 = 8000;

/// Runtime state of one monster slot
///
/// Only meaningful while the slot is occupied; reset whenever the occupant changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotState {
    pub attack_modifier_percent: i32,
    pub defense_modifier_percent: i32,
    pub defense_damage: i32,
    pub attacked_this_turn: bool,
}

/// Scale a base stat by a percent modifier, flooring the multiplier at zero
pub fn apply_percent(base: i32, modifier_percent: i32) -> i32 {
    let factor = i64::from(100i32.saturating_add(modifier_percent).max(0));
    (i64::from(base) * factor / 100).clamp(0, i64::from(i32::MAX)) as i32
}

/// Represents a player's side of the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: PlayerName,
    life: i32,
    hand: CardZone,
    graveyard: CardZone,
    monsters: FieldZone,
    spell_traps: FieldZone,
    slot_state: [SlotState; FIELD_SIZE],
    summoned_this_turn: bool,
    battle_damage_immunity: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>, starting_life: i32) -> Result<Self> {
        if starting_life <= 0 {
            return Err(DuelError::InvalidAction(format!(
                "starting life must be positive, got {starting_life}"
            )));
        }
        Ok(Player {
            id,
            name: name.into(),
            life: starting_life,
            hand: CardZone::new(Zone::Hand, id),
            graveyard: CardZone::new(Zone::Graveyard, id),
            monsters: FieldZone::new(FieldRow::Monster),
            spell_traps: FieldZone::new(FieldRow::SpellTrap),
            slot_state: [SlotState::default(); FIELD_SIZE],
            summoned_this_turn: false,
            battle_damage_immunity: false,
        })
    }

    pub fn life(&self) -> i32 {
        self.life
    }

    pub fn is_dead(&self) -> bool {
        self.life <= 0
    }

    pub fn hand(&self) -> &CardZone {
        &self.hand
    }

    pub fn graveyard(&self) -> &CardZone {
        &self.graveyard
    }

    pub fn monster_row(&self) -> &FieldZone {
        &self.monsters
    }

    pub fn spell_trap_row(&self) -> &FieldZone {
        &self.spell_traps
    }

    pub fn row(&self, row: FieldRow) -> &FieldZone {
        match row {
            FieldRow::Monster => &self.monsters,
            FieldRow::SpellTrap => &self.spell_traps,
        }
    }

    pub fn monster_at(&self, slot: usize) -> Option<&CardRef> {
        self.monsters.get(slot)
    }

    pub fn spell_trap_at(&self, slot: usize) -> Option<&CardRef> {
        self.spell_traps.get(slot)
    }

    pub fn slot_state(&self, slot: usize) -> Option<&SlotState> {
        self.monsters.get(slot).and(self.slot_state.get(slot))
    }

    pub fn has_monsters(&self) -> bool {
        !self.monsters.is_empty()
    }

    // ---- hand and graveyard ----

    pub fn add_to_hand(&mut self, card: CardRef) {
        self.hand.add(card);
    }

    pub fn remove_from_hand(&mut self, card_id: CardId) -> Result<CardRef> {
        self.hand
            .remove(card_id)
            .ok_or_else(|| DuelError::CardNotInHand(card_id.to_string()))
    }

    pub fn add_to_graveyard(&mut self, card: CardRef) {
        self.graveyard.add(card);
    }

    // ---- field ----

    pub fn place_monster(&mut self, card: CardRef, slot: usize) -> Result<()> {
        if !card.is_monster() {
            return Err(DuelError::WrongCardKind(format!("{} is not a monster", card.name)));
        }
        self.monsters.place(card, slot)?;
        self.slot_state[slot] = SlotState::default();
        Ok(())
    }

    pub fn place_spell_trap(&mut self, card: CardRef, slot: usize) -> Result<()> {
        if card.is_monster() {
            return Err(DuelError::WrongCardKind(format!(
                "{} cannot go in the spell/trap row",
                card.name
            )));
        }
        self.spell_traps.place(card, slot)
    }

    /// Clear a slot, returning its card; clearing a monster slot also clears its runtime state
    pub fn remove_from_field(&mut self, slot: usize, row: FieldRow) -> Result<Option<CardRef>> {
        match row {
            FieldRow::Monster => {
                let removed = self.monsters.take(slot)?;
                self.slot_state[slot] = SlotState::default();
                Ok(removed)
            }
            FieldRow::SpellTrap => self.spell_traps.take(slot),
        }
    }

    fn occupied_state(&self, slot: usize) -> Result<(&CardRef, &SlotState)> {
        let card = self
            .monsters
            .get_checked(slot)?
            .ok_or(DuelError::EmptySlot(slot))?;
        Ok((card, &self.slot_state[slot]))
    }

    fn occupied_state_mut(&mut self, slot: usize) -> Result<&mut SlotState> {
        if self.monsters.get_checked(slot)?.is_none() {
            return Err(DuelError::EmptySlot(slot));
        }
        Ok(&mut self.slot_state[slot])
    }

    pub fn effective_attack(&self, slot: usize) -> Result<i32> {
        let (card, state) = self.occupied_state(slot)?;
        let base = card.attack().unwrap_or(0);
        Ok(apply_percent(base, state.attack_modifier_percent))
    }

    pub fn effective_defense(&self, slot: usize) -> Result<i32> {
        let (card, state) = self.occupied_state(slot)?;
        let base = card.defense().unwrap_or(0);
        let scaled = apply_percent(base, state.defense_modifier_percent);
        Ok(scaled.saturating_sub(state.defense_damage).max(0))
    }

    pub fn add_attack_modifier_percent(&mut self, slot: usize, delta: i32) -> Result<()> {
        let state = self.occupied_state_mut(slot)?;
        state.attack_modifier_percent = state.attack_modifier_percent.saturating_add(delta);
        Ok(())
    }

    pub fn add_defense_modifier_percent(&mut self, slot: usize, delta: i32) -> Result<()> {
        let state = self.occupied_state_mut(slot)?;
        state.defense_modifier_percent = state.defense_modifier_percent.saturating_add(delta);
        Ok(())
    }

    pub fn apply_defense_damage(&mut self, slot: usize, amount: i32) -> Result<()> {
        let state = self.occupied_state_mut(slot)?;
        if amount > 0 {
            state.defense_damage = state.defense_damage.saturating_add(amount);
        }
        Ok(())
    }

    // ---- per-turn flags ----

    pub fn mark_summoned_this_turn(&mut self) {
        self.summoned_this_turn = true;
    }

    pub fn has_summoned_this_turn(&self) -> bool {
        self.summoned_this_turn
    }

    pub fn mark_monster_attacked(&mut self, slot: usize) -> Result<()> {
        self.occupied_state_mut(slot)?.attacked_this_turn = true;
        Ok(())
    }

    pub fn has_monster_attacked(&self, slot: usize) -> bool {
        self.slot_state(slot).is_some_and(|s| s.attacked_this_turn)
    }

    /// Clear the summon flag, every attacked flag and the immunity flag
    pub fn reset_turn_state(&mut self) {
        self.summoned_this_turn = false;
        self.battle_damage_immunity = false;
        for state in self.slot_state.iter_mut() {
            state.attacked_this_turn = false;
        }
    }

    // ---- life ----

    /// Lower life, clamped at zero. Returns true if the total changed.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if amount <= 0 {
            return false;
        }
        let before = self.life;
        self.life = self.life.saturating_sub(amount).max(0);
        self.life != before
    }

    /// Raise life, unbounded above. Returns true if the total changed.
    pub fn heal(&mut self, amount: i32) -> bool {
        if amount <= 0 {
            return false;
        }
        self.life = self.life.saturating_add(amount);
        true
    }

    pub fn enable_battle_damage_immunity(&mut self) {
        self.battle_damage_immunity = true;
    }

    pub fn has_battle_damage_immunity(&self) -> bool {
        self.battle_damage_immunity
    }

    /// Read and clear the one-shot immunity flag
    pub fn consume_battle_damage_immunity(&mut self) -> bool {
        std::mem::replace(&mut self.battle_damage_immunity, false)
    }
}
