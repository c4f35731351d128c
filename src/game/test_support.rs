//! Board-building helpers for unit tests

use crate::core::{Card, CardRef, EntityId, PlayerId};
use crate::game::duelist::Duelist;
use crate::game::logger::GameLogger;
use crate::game::VerbosityLevel;
use crate::loader::CardCatalog;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

static NEXT_TEST_CARD: AtomicU32 = AtomicU32::new(10_000);

/// A duelist with an unshuffled starter deck, an empty hand and a capturing logger
pub(crate) fn bare_duelist(id: u32) -> Duelist {
    let mut logger = GameLogger::with_verbosity(VerbosityLevel::Verbose);
    logger.enable_capture();
    let deck = CardCatalog::starter().unwrap().starter_deck().unwrap();
    Duelist::new(PlayerId::new(id), format!("P{id}"), deck, 8000, logger.shared()).unwrap()
}

pub(crate) fn monster_card(id: u32, level: u8, attack: i32, defense: i32) -> CardRef {
    Arc::new(Card::monster(EntityId::new(id), format!("Monster {id}"), level, attack, defense))
}

/// Put a fresh level-3 monster straight onto the field
pub(crate) fn field_monster(duelist: &mut Duelist, slot: usize, attack: i32, defense: i32) -> CardRef {
    let id = NEXT_TEST_CARD.fetch_add(1, Ordering::Relaxed);
    let card = monster_card(id, 3, attack, defense);
    duelist.player_mut().place_monster(card.clone(), slot).unwrap();
    card
}

pub(crate) fn set_card(duelist: &mut Duelist, slot: usize, card: CardRef) {
    duelist.player_mut().place_spell_trap(card, slot).unwrap();
}

pub(crate) fn hand_card(duelist: &mut Duelist, card: CardRef) {
    duelist.player_mut().add_to_hand(card);
}
