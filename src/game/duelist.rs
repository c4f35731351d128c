//! Duelist: one seat's state plus the operations callers use on it
//!
//! Human input and decision policies go through the same methods here. Each method commits its
//! state change, appends the matching notifications to the duelist's [`EventLog`], and reports
//! rule violations as `false`/`Err` without partially applying anything.

use crate::core::{CardRef, Deck, FieldRow, Player, PlayerId, PlayerName};
use crate::game::combat::{self, AttackOutcome};
use crate::game::events::{EventLog, GameEvent};
use crate::game::logger::SharedLogger;
use crate::game::VerbosityLevel;
use crate::{DuelError, Result};

/// Highest level that can be summoned
pub const MAX_SUMMON_LEVEL: u8 = 4;

/// Why a summon request was turned down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummonRejection {
    AlreadySummoned,
    NotAMonster,
    LevelTooHigh,
    NotInHand,
    NoEmptySlot,
}

#[derive(Debug)]
pub struct Duelist {
    player: Player,
    deck: Deck,
    decked_out: bool,
    events: EventLog,
    logger: SharedLogger,
}

impl Duelist {
    pub fn new(
        id: PlayerId,
        name: impl Into<PlayerName>,
        deck: Deck,
        starting_life: i32,
        logger: SharedLogger,
    ) -> Result<Self> {
        Ok(Duelist {
            player: Player::new(id, name, starting_life)?,
            deck,
            decked_out: false,
            events: EventLog::new(Some(id)),
            logger,
        })
    }

    pub fn id(&self) -> PlayerId {
        self.player.id
    }

    pub fn name(&self) -> &str {
        self.player.name.as_str()
    }

    /// Read-only view of the field state
    pub fn player(&self) -> &Player {
        &self.player
    }

    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn is_decked_out(&self) -> bool {
        self.decked_out
    }

    /// Out of the match: life at zero or tried to draw from an empty deck
    pub fn is_defeated(&self) -> bool {
        self.player.is_dead() || self.decked_out
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventLog {
        &mut self.events
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    pub(crate) fn log(&self, level: VerbosityLevel, tag: &str, message: &str) {
        self.logger.tagged(level, self.player.name.as_str(), tag, message);
    }

    fn hand_changed(&mut self) {
        let hand_size = self.player.hand().len();
        self.events.push(GameEvent::HandChanged { hand_size });
    }

    // ---- deck ----

    pub fn shuffle_deck(&mut self, rng: &mut impl rand::Rng) {
        self.deck.shuffle(rng);
        log_tagged!(self, VerbosityLevel::Verbose, "SHUFFLE", "{} cards", self.deck.len());
        self.events.push(GameEvent::DeckShuffled);
    }

    /// Draw the front card into hand. An empty deck ends this duelist's match.
    pub fn draw_card(&mut self) -> Option<CardRef> {
        match self.deck.draw() {
            Ok(card) => {
                self.player.add_to_hand(card.clone());
                log_tagged!(self, VerbosityLevel::Normal, "DRAW", "{}", card);
                self.events.push(GameEvent::CardDrawn { card: card.clone() });
                self.hand_changed();
                Some(card)
            }
            Err(_) => {
                if !self.decked_out {
                    self.decked_out = true;
                    self.log(VerbosityLevel::Minimal, "DRAW", "deck is empty");
                    self.events.push(GameEvent::PlayerDied);
                }
                None
            }
        }
    }

    /// Draw up to `count` cards, stopping early on an empty deck
    pub fn draw_starting_hand(&mut self, count: usize) -> usize {
        (0..count).map_while(|_| self.draw_card()).count()
    }

    // ---- hand ----

    /// Check the summon rules in order; first failing rule wins
    pub fn check_summon(&self, card: &CardRef) -> std::result::Result<(), SummonRejection> {
        if self.player.has_summoned_this_turn() {
            return Err(SummonRejection::AlreadySummoned);
        }
        let stats = card.as_monster().ok_or(SummonRejection::NotAMonster)?;
        if stats.level > MAX_SUMMON_LEVEL {
            return Err(SummonRejection::LevelTooHigh);
        }
        if !self.player.hand().contains(card.id) {
            return Err(SummonRejection::NotInHand);
        }
        if self.player.monster_row().first_empty().is_none() {
            return Err(SummonRejection::NoEmptySlot);
        }
        Ok(())
    }

    /// Summon a monster from hand into the first empty monster slot
    pub fn summon_monster(&mut self, card: &CardRef) -> bool {
        if let Err(reason) = self.check_summon(card) {
            log_tagged!(self, VerbosityLevel::Normal, "SUMMON", "{} rejected: {:?}", card.name, reason);
            return false;
        }
        let Some(slot) = self.player.monster_row().first_empty() else {
            return false;
        };
        if let Err(e) = self.play_card(card, slot) {
            log_tagged!(self, VerbosityLevel::Normal, "SUMMON", "{} failed: {}", card.name, e);
            return false;
        }
        self.player.mark_summoned_this_turn();
        log_tagged!(self, VerbosityLevel::Normal, "SUMMON", "{} -> slot {}", card, slot);
        true
    }

    /// Move a card from hand into a field slot of the row its kind belongs to
    pub fn play_card(&mut self, card: &CardRef, slot: usize) -> Result<()> {
        if !self.player.hand().contains(card.id) {
            return Err(DuelError::CardNotInHand(card.name.clone()));
        }
        let row = card.field_row();
        if !self.player.row(row).is_free(slot)? {
            return Err(DuelError::SlotOccupied(slot));
        }
        let card = self.player.remove_from_hand(card.id)?;
        match row {
            FieldRow::Monster => self.player.place_monster(card.clone(), slot)?,
            FieldRow::SpellTrap => self.player.place_spell_trap(card.clone(), slot)?,
        }
        log_tagged!(self, VerbosityLevel::Verbose, "PLACE", "{} -> {:?} slot {}", card.name, row, slot);
        self.hand_changed();
        self.events.push(GameEvent::CardPlaced {
            card,
            slot,
            is_monster: row.is_monster(),
        });
        Ok(())
    }

    pub fn discard_card(&mut self, card: &CardRef) -> Result<()> {
        let card = self.player.remove_from_hand(card.id)?;
        log_tagged!(self, VerbosityLevel::Normal, "DISCARD", "{}", card.name);
        self.player.add_to_graveyard(card);
        self.hand_changed();
        Ok(())
    }

    // ---- field removal ----

    /// Send the monster in `slot` to the graveyard
    pub(crate) fn destroy_monster(&mut self, slot: usize) -> Result<Option<CardRef>> {
        self.send_to_graveyard(slot, FieldRow::Monster)
    }

    /// Send the spell/trap in `slot` to the graveyard
    pub(crate) fn remove_spell_trap(&mut self, slot: usize) -> Result<Option<CardRef>> {
        self.send_to_graveyard(slot, FieldRow::SpellTrap)
    }

    fn send_to_graveyard(&mut self, slot: usize, row: FieldRow) -> Result<Option<CardRef>> {
        let removed = self.player.remove_from_field(slot, row)?;
        if let Some(card) = &removed {
            log_tagged!(self, VerbosityLevel::Normal, "GRAVEYARD", "{} from {:?} slot {}", card.name, row, slot);
            self.player.add_to_graveyard(card.clone());
            self.events.push(GameEvent::CardRemovedFromField {
                slot,
                is_monster: row.is_monster(),
                card: card.clone(),
            });
        }
        Ok(removed)
    }

    // ---- life ----

    pub fn take_damage(&mut self, amount: i32) {
        let was_dead = self.player.is_dead();
        if self.player.take_damage(amount) {
            log_tagged!(self, VerbosityLevel::Normal, "DAMAGE", "-{} (life {})", amount, self.player.life());
            self.events.push(GameEvent::LifeChanged {
                life: self.player.life(),
            });
        }
        if self.player.is_dead() && !was_dead {
            self.log(VerbosityLevel::Minimal, "DIED", "life reached 0");
            self.events.push(GameEvent::PlayerDied);
        }
    }

    pub fn heal(&mut self, amount: i32) {
        if self.player.heal(amount) {
            log_tagged!(self, VerbosityLevel::Normal, "HEAL", "+{} (life {})", amount, self.player.life());
            self.events.push(GameEvent::LifeChanged {
                life: self.player.life(),
            });
        }
    }

    pub fn reset_turn_state(&mut self) {
        self.player.reset_turn_state();
    }

    // ---- combat ----

    /// Declare an attack from `attacker_slot` against `defender`
    pub fn attack(
        &mut self,
        attacker_slot: usize,
        target_slot: usize,
        defender: &mut Duelist,
    ) -> Result<AttackOutcome> {
        combat::resolve_attack(self, attacker_slot, target_slot, defender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::logger::GameLogger;
    use crate::game::test_support::{bare_duelist, field_monster, hand_card, monster_card};
    use crate::loader::CardCatalog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn duelist() -> Duelist {
        let mut logger = GameLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();
        let catalog = CardCatalog::starter().unwrap();
        let deck = catalog.starter_deck().unwrap();
        Duelist::new(PlayerId::new(0), "Tester", deck, 8000, logger.shared()).unwrap()
    }

    fn first_monster(d: &Duelist, max_level: u8) -> CardRef {
        d.player()
            .hand()
            .iter()
            .find(|c| c.as_monster().is_some_and(|m| m.level <= max_level))
            .cloned()
            .unwrap()
    }

    fn draw_until_hand_has_low_monster(d: &mut Duelist) {
        while !d
            .player()
            .hand()
            .iter()
            .any(|c| c.as_monster().is_some_and(|m| m.level <= MAX_SUMMON_LEVEL))
        {
            d.draw_card().unwrap();
        }
    }

    #[test]
    fn test_draw_emits_events() {
        let mut d = duelist();
        let card = d.draw_card().unwrap();
        let events = d.events_mut().drain();
        assert_eq!(
            events,
            vec![
                GameEvent::CardDrawn { card },
                GameEvent::HandChanged { hand_size: 1 }
            ]
        );
    }

    #[test]
    fn test_empty_deck_draw_is_terminal() {
        let mut d = duelist();
        assert_eq!(d.draw_starting_hand(25), 20);
        assert!(d.is_decked_out());
        assert!(d.is_defeated());
        let died = d
            .events()
            .pending()
            .iter()
            .filter(|e| **e == GameEvent::PlayerDied)
            .count();
        assert_eq!(died, 1);
        assert!(d.draw_card().is_none());
    }

    #[test]
    fn test_summon_once_per_turn() {
        let mut d = duelist();
        d.shuffle_deck(&mut ChaCha12Rng::seed_from_u64(3));
        d.draw_starting_hand(4);
        draw_until_hand_has_low_monster(&mut d);

        let first = first_monster(&d, MAX_SUMMON_LEVEL);
        let hand_before = d.player().hand().len();
        assert!(d.summon_monster(&first));
        assert_eq!(d.player().monster_at(0).map(|c| c.id), Some(first.id));
        assert_eq!(d.player().hand().len(), hand_before - 1);

        draw_until_hand_has_low_monster(&mut d);
        let second = first_monster(&d, MAX_SUMMON_LEVEL);
        let hand_before = d.player().hand().len();
        assert_eq!(d.check_summon(&second), Err(SummonRejection::AlreadySummoned));
        assert!(!d.summon_monster(&second));
        assert_eq!(d.player().hand().len(), hand_before);

        d.reset_turn_state();
        assert!(d.summon_monster(&second));
        assert!(d.player().monster_at(1).is_some());
    }

    #[test]
    fn test_summon_rejections() {
        let mut d = bare_duelist(0);
        let giant = monster_card(1, 6, 2600, 2000);
        let stray = monster_card(2, 3, 900, 900);
        let spare = monster_card(3, 4, 1200, 1000);
        hand_card(&mut d, giant.clone());
        hand_card(&mut d, spare.clone());

        assert_eq!(d.check_summon(&giant), Err(SummonRejection::LevelTooHigh));
        assert_eq!(d.check_summon(&stray), Err(SummonRejection::NotInHand));
        assert!(!d.summon_monster(&giant));
        assert!(!d.summon_monster(&stray));

        for slot in 0..3 {
            field_monster(&mut d, slot, 500, 500);
        }
        assert_eq!(d.check_summon(&spare), Err(SummonRejection::NoEmptySlot));
        assert!(!d.summon_monster(&spare));

        assert_eq!(d.player().hand().len(), 2);
        assert!(!d.player().has_summoned_this_turn());
    }

    #[test]
    fn test_play_card_validates_before_removing() {
        let mut d = duelist();
        d.draw_starting_hand(20);
        let spells: Vec<CardRef> = d.player().hand().iter().filter(|c| !c.is_monster()).take(2).cloned().collect();

        d.play_card(&spells[0], 1).unwrap();
        let hand_before = d.player().hand().len();
        assert!(matches!(d.play_card(&spells[1], 1), Err(DuelError::SlotOccupied(1))));
        assert!(matches!(d.play_card(&spells[1], 3), Err(DuelError::SlotOutOfRange(3))));
        assert_eq!(d.player().hand().len(), hand_before);
    }

    #[test]
    fn test_discard_moves_to_graveyard() {
        let mut d = duelist();
        let card = d.draw_card().unwrap();
        d.discard_card(&card).unwrap();
        assert!(d.player().hand().is_empty());
        assert_eq!(d.player().graveyard().len(), 1);
        assert!(d.discard_card(&card).is_err());
    }

    #[test]
    fn test_damage_events() {
        let mut d = duelist();
        d.take_damage(0);
        assert!(d.events().is_empty());

        d.take_damage(3000);
        d.take_damage(6000);
        d.take_damage(100);
        assert_eq!(
            d.events_mut().drain(),
            vec![
                GameEvent::LifeChanged { life: 5000 },
                GameEvent::LifeChanged { life: 0 },
                GameEvent::PlayerDied,
            ]
        );
        assert!(d.is_defeated());
    }
}
