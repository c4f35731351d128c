//! In-memory card catalog
//!
//! Holds the immutable card definitions a match draws from. Lookups go by id or by exact name.

use crate::core::{
    Card, CardId, CardRef, Deck, EntityStore, SpellCategory, SpellEffect, TrapEffect, TrapTrigger,
};
use crate::{DuelError, Result};
use rustc_hash::FxHashMap;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct CardCatalog {
    cards: EntityStore<CardRef>,
    by_name: FxHashMap<String, CardId>,
    /// Insertion order, used to build the starter deck
    order: Vec<CardId>,
}

impl CardCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Fails if the id or the name is already taken.
    pub fn add(&mut self, card: Card) -> Result<CardRef> {
        if self.cards.contains(card.id) || self.by_name.contains_key(&card.name) {
            return Err(DuelError::InvalidAction(format!(
                "duplicate catalog entry: {} ({})",
                card.name, card.id
            )));
        }
        let card = Arc::new(card);
        self.by_name.insert(card.name.clone(), card.id);
        self.order.push(card.id);
        self.cards.insert(card.id, card.clone());
        Ok(card)
    }

    pub fn get(&self, id: CardId) -> Result<&CardRef> {
        self.cards.get(id)
    }

    pub fn by_name(&self, name: &str) -> Result<&CardRef> {
        let id = self
            .by_name
            .get(name)
            .ok_or_else(|| DuelError::UnknownCard(name.to_string()))?;
        self.cards.get(*id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &CardRef> {
        self.order.iter().filter_map(|id| self.cards.get(*id).ok())
    }

    /// Built-in set: 10 monsters (three above summon level), 5 spells, 5 traps
    pub fn starter() -> Result<Self> {
        let mut catalog = CardCatalog::new();
        let mut next = 1u32;
        let mut id = || {
            let id = CardId::new(next);
            next += 1;
            id
        };

        let monsters: [(&str, u8, i32, i32); 10] = [
            ("Ember Fox", 3, 1400, 900),
            ("Stone Sentry", 4, 800, 2000),
            ("Marsh Lurker", 2, 1000, 700),
            ("Iron Hound", 4, 1800, 1000),
            ("Gale Sprite", 1, 500, 400),
            ("Dune Raider", 4, 1600, 1200),
            ("Thorn Warden", 3, 1200, 1500),
            ("Storm Drake", 6, 2400, 1800),
            ("Abyss Colossus", 7, 2700, 2300),
            ("Sky Titan", 8, 3000, 2500),
        ];
        let spells: [(&str, SpellCategory, SpellEffect, i32); 5] = [
            ("Shatter", SpellCategory::Destroy, SpellEffect::DestroyWeak, 1500),
            ("War Cry", SpellCategory::Buff, SpellEffect::BoostAttack, 30),
            ("Bulwark", SpellCategory::Buff, SpellEffect::BoostDefense, 40),
            ("Enfeeble", SpellCategory::Debuff, SpellEffect::ReduceAttack, 25),
            ("Corrode", SpellCategory::Debuff, SpellEffect::ReduceDefense, 30),
        ];
        let traps: [(&str, TrapTrigger, TrapEffect, i32); 5] = [
            ("Spike Pit", TrapTrigger::OnAttack, TrapEffect::DamageAttacker, 300),
            ("Mirror Ward", TrapTrigger::OnAttack, TrapEffect::ReduceIncomingDamage, 0),
            ("Binding Vines", TrapTrigger::OnAttack, TrapEffect::DebuffSummonedMonster, 30),
            ("Backfire", TrapTrigger::OnAttack, TrapEffect::DamagePlayer, 0),
            ("Silence Seal", TrapTrigger::OnSpellActivation, TrapEffect::NegateSpell, 0),
        ];

        for (name, level, attack, defense) in monsters {
            catalog.add(Card::monster(id(), name, level, attack, defense))?;
        }
        for (name, category, effect, value) in spells {
            catalog.add(Card::spell(id(), name, category, effect, value))?;
        }
        for (name, trigger, effect, value) in traps {
            catalog.add(Card::trap(id(), name, trigger, effect, value))?;
        }
        Ok(catalog)
    }

    /// One copy of every registered card, in registration order
    pub fn starter_deck(&self) -> Result<Deck> {
        Deck::new(self.iter().cloned().collect())
    }
}
