//! Game zones: hand and graveyard lists, and the two fixed field rows

use crate::core::{CardId, CardRef, FieldRow, PlayerId};
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of slots in each field row
pub const FIELD_SIZE: usize = 3;

/// Different zones where cards can exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Hand,
    Graveyard,
}

/// An ordered list of cards (hand or graveyard)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardZone {
    pub zone_type: Zone,

    /// Owner of this zone (each player has their own zones)
    pub owner: PlayerId,

    /// Cards in this zone, in arrival order
    pub cards: Vec<CardRef>,
}

impl CardZone {
    pub fn new(zone_type: Zone, owner: PlayerId) -> Self {
        CardZone {
            zone_type,
            owner,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card: CardRef) {
        self.cards.push(card);
    }

    /// Remove the first card with this id, keeping the order of the rest
    pub fn remove(&mut self, card_id: CardId) -> Option<CardRef> {
        let pos = self.cards.iter().position(|c| c.id == card_id)?;
        Some(self.cards.remove(pos))
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CardRef> {
        self.cards.iter()
    }
}

/// A fixed row of [`FIELD_SIZE`] slots, each empty or holding one card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldZone {
    pub row: FieldRow,
    slots: [Option<CardRef>; FIELD_SIZE],
}

impl FieldZone {
    pub fn new(row: FieldRow) -> Self {
        FieldZone {
            row,
            slots: Default::default(),
        }
    }

    fn check_range(slot: usize) -> Result<()> {
        if slot < FIELD_SIZE {
            Ok(())
        } else {
            Err(DuelError::SlotOutOfRange(slot))
        }
    }

    /// Card in a slot; out-of-range indices read as empty
    pub fn get(&self, slot: usize) -> Option<&CardRef> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    /// Card in a slot, failing for out-of-range indices
    pub fn get_checked(&self, slot: usize) -> Result<Option<&CardRef>> {
        Self::check_range(slot)?;
        Ok(self.slots[slot].as_ref())
    }

    pub fn is_free(&self, slot: usize) -> Result<bool> {
        Ok(self.get_checked(slot)?.is_none())
    }

    pub fn place(&mut self, card: CardRef, slot: usize) -> Result<()> {
        Self::check_range(slot)?;
        if self.slots[slot].is_some() {
            return Err(DuelError::SlotOccupied(slot));
        }
        self.slots[slot] = Some(card);
        Ok(())
    }

    pub fn take(&mut self, slot: usize) -> Result<Option<CardRef>> {
        Self::check_range(slot)?;
        Ok(self.slots[slot].take())
    }

    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_none())
    }

    /// Occupied slots in index order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &CardRef)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|c| (i, c)))
    }

    pub fn occupied_slots(&self) -> SmallVec<[usize; FIELD_SIZE]> {
        self.occupied().map(|(i, _)| i).collect()
    }

    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }
}
