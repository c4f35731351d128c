//! Board queries shared by the decision policies
//!
//! "Strongest"/"weakest" compare *base* stats with strict comparisons, so the first card in
//! hand or slot order wins ties.

use crate::core::{CardRef, Player};
use crate::zones::FIELD_SIZE;
use smallvec::SmallVec;

/// Monsters currently in hand, in hand order
pub fn hand_monsters(player: &Player) -> impl Iterator<Item = &CardRef> {
    player.hand().iter().filter(|c| c.is_monster())
}

pub fn hand_spells(player: &Player) -> impl Iterator<Item = &CardRef> {
    player.hand().iter().filter(|c| c.is_spell())
}

pub fn hand_traps(player: &Player) -> impl Iterator<Item = &CardRef> {
    player.hand().iter().filter(|c| c.is_trap())
}

/// First card maximizing `key` under a strict comparison
fn first_max_by<'a, K: PartialOrd>(
    cards: impl Iterator<Item = &'a CardRef>,
    key: impl Fn(&CardRef) -> K,
) -> Option<&'a CardRef> {
    let mut best: Option<(&CardRef, K)> = None;
    for card in cards {
        let k = key(card);
        if best.as_ref().map_or(true, |(_, b)| k > *b) {
            best = Some((card, k));
        }
    }
    best.map(|(c, _)| c)
}

pub fn highest_attack_in_hand(player: &Player) -> Option<&CardRef> {
    first_max_by(hand_monsters(player), |c| c.attack().unwrap_or(0))
}

pub fn highest_defense_in_hand(player: &Player) -> Option<&CardRef> {
    first_max_by(hand_monsters(player), |c| c.defense().unwrap_or(0))
}

/// Highest defense, ties broken by higher attack
pub fn sturdiest_in_hand(player: &Player) -> Option<&CardRef> {
    first_max_by(hand_monsters(player), |c| {
        (c.defense().unwrap_or(0), c.attack().unwrap_or(0))
    })
}

/// Slot of the on-field monster with the highest base attack
pub fn strongest_slot(player: &Player) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for (slot, card) in player.monster_row().occupied() {
        let attack = card.attack().unwrap_or(0);
        if best.map_or(true, |(_, b)| attack > b) {
            best = Some((slot, attack));
        }
    }
    best.map(|(s, _)| s)
}

/// Slot of the on-field monster with the lowest base attack
pub fn weakest_slot(player: &Player) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for (slot, card) in player.monster_row().occupied() {
        let attack = card.attack().unwrap_or(0);
        if best.map_or(true, |(_, b)| attack < b) {
            best = Some((slot, attack));
        }
    }
    best.map(|(s, _)| s)
}

/// Base attack of the monster in `slot`
pub fn base_attack_at(player: &Player, slot: usize) -> Option<i32> {
    player.monster_at(slot).and_then(|c| c.attack())
}

/// Highest base attack on the field
pub fn strongest_attack(player: &Player) -> Option<i32> {
    strongest_slot(player).and_then(|s| base_attack_at(player, s))
}

/// Number of face-down spells and traps
pub fn set_card_count(player: &Player) -> usize {
    player.spell_trap_row().count()
}

/// Sum of effective attack over every monster on the field
pub fn total_effective_attack(player: &Player) -> i32 {
    player
        .monster_row()
        .occupied_slots()
        .iter()
        .map(|&s| player.effective_attack(s).unwrap_or(0))
        .fold(0i32, |acc, a| acc.saturating_add(a))
}

/// Highest base defense on the field, 0 with an empty field
pub fn best_field_defense(player: &Player) -> i32 {
    player
        .monster_row()
        .occupied()
        .filter_map(|(_, c)| c.defense())
        .fold(0, i32::max)
}

/// Does the hand hold a monster with base attack above `threshold`?
pub fn hand_monster_above(player: &Player, threshold: i32) -> bool {
    hand_monsters(player).any(|c| c.attack().unwrap_or(0) > threshold)
}

pub fn count_hand_monsters_above(player: &Player, threshold: i32) -> usize {
    hand_monsters(player)
        .filter(|c| c.attack().unwrap_or(0) > threshold)
        .count()
}

pub fn first_empty_spell_trap_slot(player: &Player) -> Option<usize> {
    player.spell_trap_row().first_empty()
}

pub fn own_monster_slots(player: &Player) -> SmallVec<[usize; FIELD_SIZE]> {
    player.monster_row().occupied_slots()
}
