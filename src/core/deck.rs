//! Deck: ordered card list with composition check, shuffle and draw-from-front

use crate::core::{CardKind, CardRef};
use crate::{DuelError, Result};
use serde::{Deserialize, Serialize};

pub const DECK_SIZE: usize = 20;
pub const DECK_MONSTERS: usize = 10;
pub const DECK_SPELLS: usize = 5;
pub const DECK_TRAPS: usize = 5;

/// Card counts by kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckComposition {
    pub monsters: usize,
    pub spells: usize,
    pub traps: usize,
}

impl DeckComposition {
    pub fn of<'a>(cards: impl IntoIterator<Item = &'a CardRef>) -> Self {
        let mut composition = DeckComposition::default();
        for card in cards {
            match card.kind {
                CardKind::Monster(_) => composition.monsters += 1,
                CardKind::Spell(_) => composition.spells += 1,
                CardKind::Trap(_) => composition.traps += 1,
            }
        }
        composition
    }

    pub fn total(&self) -> usize {
        self.monsters + self.spells + self.traps
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardRef>,
}

impl Deck {
    /// Build a deck, requiring exactly 20 cards split 10 Monster / 5 Spell / 5 Trap
    pub fn new(cards: Vec<CardRef>) -> Result<Self> {
        if cards.len() != DECK_SIZE {
            return Err(DuelError::InvalidDeckSize {
                expected: DECK_SIZE,
                actual: cards.len(),
            });
        }
        let composition = DeckComposition::of(&cards);
        if composition.monsters != DECK_MONSTERS
            || composition.spells != DECK_SPELLS
            || composition.traps != DECK_TRAPS
        {
            return Err(DuelError::InvalidDeckComposition {
                monsters: composition.monsters,
                spells: composition.spells,
                traps: composition.traps,
            });
        }
        Ok(Deck { cards })
    }

    /// Fisher-Yates shuffle, walking from the last index down
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        for i in (1..self.cards.len()).rev() {
            let j = rng.gen_range(0..=i);
            self.cards.swap(i, j);
        }
    }

    /// Remove and return the front card
    pub fn draw(&mut self) -> Result<CardRef> {
        if self.cards.is_empty() {
            return Err(DuelError::EmptyDeck);
        }
        Ok(self.cards.remove(0))
    }

    pub fn peek(&self) -> Option<&CardRef> {
        self.cards.first()
    }

    pub fn cards(&self) -> &[CardRef] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
