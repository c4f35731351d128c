//! Shared fixtures for the integration tests
#![allow(dead_code)]

use card_duel::core::{
    Card, CardId, CardRef, Deck, PlayerId, SpellCategory, SpellEffect, TrapEffect, TrapTrigger,
    DEFAULT_LIFE_POINTS,
};
use card_duel::game::{Duelist, GameLogger, OutputMode, SharedLogger, VerbosityLevel};
use std::sync::Arc;

pub fn quiet_logger() -> SharedLogger {
    let mut logger = GameLogger::with_verbosity(VerbosityLevel::Silent);
    logger.set_output_mode(OutputMode::Memory);
    logger.shared()
}

pub fn monster(id: u32, attack: i32, defense: i32) -> CardRef {
    Arc::new(Card::monster(CardId::new(id), format!("Monster {id}"), 3, attack, defense))
}

pub fn trap(id: u32, trigger: TrapTrigger, effect: TrapEffect, value: i32) -> CardRef {
    Arc::new(Card::trap(CardId::new(id), format!("Trap {id}"), trigger, effect, value))
}

pub fn spell(id: u32, category: SpellCategory, effect: SpellEffect, value: i32) -> CardRef {
    Arc::new(Card::spell(CardId::new(id), format!("Spell {id}"), category, effect, value))
}

/// A legal 10/5/5 deck whose front cards are `front`, padded with inert filler
pub fn deck_with_front(front: &[CardRef]) -> Deck {
    let count = |pred: fn(&CardRef) -> bool| front.iter().filter(|c| pred(c)).count();
    let monsters = count(|c| c.is_monster());
    let spells = count(|c| c.is_spell());
    let traps = count(|c| c.is_trap());

    let mut cards = front.to_vec();
    let mut id = 9000;
    for _ in monsters..10 {
        cards.push(monster(id, 100, 100));
        id += 1;
    }
    for _ in spells..5 {
        cards.push(spell(id, SpellCategory::Buff, SpellEffect::BoostAttack, 10));
        id += 1;
    }
    for _ in traps..5 {
        cards.push(trap(id, TrapTrigger::OnSummon, TrapEffect::DamagePlayer, 0));
        id += 1;
    }
    Deck::new(cards).expect("fixture deck is 10/5/5")
}

/// A duelist who has drawn `front` into hand, in order
pub fn duelist_holding(id: u32, life: i32, front: &[CardRef]) -> Duelist {
    let mut duelist = Duelist::new(
        PlayerId::new(id),
        format!("P{id}"),
        deck_with_front(front),
        life,
        quiet_logger(),
    )
    .expect("valid duelist");
    for _ in front {
        duelist.draw_card().expect("deck has cards");
    }
    duelist.events_mut().drain();
    duelist
}

/// A duelist with `cards` played into consecutive slots of their rows
pub fn duelist_with_field(id: u32, life: i32, cards: &[CardRef]) -> Duelist {
    let mut duelist = duelist_holding(id, life, cards);
    let (mut monster_slot, mut back_slot) = (0, 0);
    for card in cards {
        let slot = if card.is_monster() {
            monster_slot += 1;
            monster_slot - 1
        } else {
            back_slot += 1;
            back_slot - 1
        };
        duelist.play_card(card, slot).expect("slot is free");
    }
    duelist.events_mut().drain();
    duelist
}

pub fn default_life() -> i32 {
    DEFAULT_LIFE_POINTS
}
