//! Core game types and entities

pub mod card;
pub mod deck;
pub mod effects;
pub mod entity;
pub mod player;
pub mod types;

pub use card::{Card, CardKind, CardRef, MonsterStats, SpellStats, TrapStats};
pub use deck::{Deck, DeckComposition, DECK_SIZE};
pub use effects::{SpellCategory, SpellEffect, TrapEffect, TrapTrigger};
pub use entity::{EntityId, EntityStore, GameEntity};
pub use player::{Player, SlotState, DEFAULT_LIFE_POINTS};
pub use types::{CardId, FieldRow, PlayerId, PlayerName};
