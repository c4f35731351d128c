//! Card catalog and deck list loader

pub mod catalog;
pub mod deck;

pub use catalog::CardCatalog;
pub use deck::{DeckEntry, DeckList, DeckLoader};
