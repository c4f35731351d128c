//! Error types for the duel engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Deck must contain exactly {expected} cards, got {actual}")]
    InvalidDeckSize { expected: usize, actual: usize },

    #[error("Invalid deck composition: Monster={monsters}, Spell={spells}, Trap={traps}")]
    InvalidDeckComposition {
        monsters: usize,
        spells: usize,
        traps: usize,
    },

    #[error("Slot index {0} out of range")]
    SlotOutOfRange(usize),

    #[error("Slot {0} is already occupied")]
    SlotOccupied(usize),

    #[error("Slot {0} has no monster")]
    EmptySlot(usize),

    #[error("Card not in hand: {0}")]
    CardNotInHand(String),

    #[error("No attacker monster in slot {0}")]
    NoAttacker(usize),

    #[error("Invalid attack target in slot {0}")]
    InvalidTarget(usize),

    #[error("Wrong card kind: {0}")]
    WrongCardKind(String),

    #[error("Deck is empty")]
    EmptyDeck,

    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Entity not found: {0}")]
    EntityNotFound(u32),

    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DuelError>;
