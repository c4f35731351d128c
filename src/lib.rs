//! Card Duel - rules engine for a two-player trading card game
//!
//! Deck and field state, summon and combat resolution, spell and trap effects, the turn
//! phase machine, and three tiers of automated opponents.

pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod tournament;
pub mod zones;

pub use error::{DuelError, Result};
