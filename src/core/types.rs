//! Strongly-typed wrappers for game concepts

use crate::core::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type CardId = EntityId;
pub type PlayerId = EntityId;

/// Display label for a duelist (e.g. "Player 1", "AI")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: impl Into<String>) -> Self {
        PlayerName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PlayerName {
    fn from(s: String) -> Self {
        PlayerName(s)
    }
}

impl From<&str> for PlayerName {
    fn from(s: &str) -> Self {
        PlayerName(s.to_string())
    }
}

/// Field row a card occupies once played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldRow {
    Monster,
    SpellTrap,
}

impl FieldRow {
    pub fn is_monster(self) -> bool {
        matches!(self, FieldRow::Monster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_name() {
        let name = PlayerName::new("Alice");
        assert_eq!(name.as_str(), "Alice");
        assert_eq!(name.to_string(), "Alice");
        assert_eq!(PlayerName::from("Bob").as_str(), "Bob");
    }
}
