//! Deck list loader ("N Card Name" per line)

use crate::core::{CardRef, Deck};
use crate::loader::CardCatalog;
use crate::{DuelError, Result};
use std::fs;
use std::path::Path;

/// Deck loader for plain-text deck lists
pub struct DeckLoader;

impl DeckLoader {
    /// Load a deck list from a text file
    pub fn load_from_file(path: &Path) -> Result<DeckList> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a deck list. Blank lines and `#` comments are skipped.
    pub fn parse(content: &str) -> Result<DeckList> {
        let mut entries = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (count_str, name) = line.split_once(' ').ok_or_else(|| {
                DuelError::InvalidDeckFormat(format!("line {}: expected \"N Card Name\"", line_no + 1))
            })?;
            let count = count_str.parse::<u8>().map_err(|_| {
                DuelError::InvalidDeckFormat(format!("line {}: bad count {:?}", line_no + 1, count_str))
            })?;
            let card_name = name.trim();
            if count == 0 || card_name.is_empty() {
                return Err(DuelError::InvalidDeckFormat(format!(
                    "line {}: empty entry",
                    line_no + 1
                )));
            }

            entries.push(DeckEntry {
                card_name: card_name.to_string(),
                count,
            });
        }

        if entries.is_empty() {
            return Err(DuelError::InvalidDeckFormat("Empty deck".to_string()));
        }

        Ok(DeckList { entries })
    }
}

/// Represents a deck entry (card name and count)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub card_name: String,
    pub count: u8,
}

/// Represents a complete deck list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckList {
    pub entries: Vec<DeckEntry>,
}

impl DeckList {
    /// Total cards in the list
    pub fn total_cards(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// Resolve names against `catalog` and build a validated deck, in list order
    pub fn build(&self, catalog: &CardCatalog) -> Result<Deck> {
        let mut cards: Vec<CardRef> = Vec::with_capacity(self.total_cards());
        for entry in &self.entries {
            let card = catalog.by_name(&entry.card_name)?;
            cards.extend(std::iter::repeat(card).take(entry.count as usize).cloned());
        }
        Deck::new(cards)
    }
}
