//! State-change notifications
//!
//! Engine operations append [`GameEvent`]s to an [`EventLog`] as they commit. The caller drains
//! the log once the operation has returned and hands the events to an [`EventSubscriber`]
//! (a presentation layer, a recorder, a JSON printer). Subscribers never run inside an
//! operation, so they cannot re-enter it.

use crate::core::{CardRef, PlayerId};
use crate::game::Phase;
use serde::{Deserialize, Serialize};

/// Everything the engine reports to observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    PhaseChanged { phase: Phase, player_index: usize },
    TurnSwitched { player_index: usize },
    DeckShuffled,
    CardDrawn { card: CardRef },
    HandChanged { hand_size: usize },
    CardPlaced { card: CardRef, slot: usize, is_monster: bool },
    CardRemovedFromField { slot: usize, is_monster: bool, card: CardRef },
    LifeChanged { life: i32 },
    PlayerDied,
}

/// Receives drained events; `owner` is the duelist the event belongs to, `None` for turn events
pub trait EventSubscriber {
    fn on_event(&mut self, owner: Option<PlayerId>, event: &GameEvent);
}

/// Subscriber that keeps every event, mostly for tests and the CLI's JSON dump
#[derive(Debug, Default, Clone)]
pub struct EventRecorder {
    pub events: Vec<(Option<PlayerId>, GameEvent)>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|(_, e)| pred(e)).count()
    }
}

impl EventSubscriber for EventRecorder {
    fn on_event(&mut self, owner: Option<PlayerId>, event: &GameEvent) {
        self.events.push((owner, event.clone()));
    }
}

/// Ordered, append-only buffer of pending events for one source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLog {
    owner: Option<PlayerId>,
    events: Vec<GameEvent>,
    /// Is logging enabled? (disabled for tournament runs)
    enabled: bool,
}

impl EventLog {
    pub fn new(owner: Option<PlayerId>) -> Self {
        EventLog {
            owner,
            events: Vec::new(),
            enabled: true,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.events.clear();
        }
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub fn push(&mut self, event: GameEvent) {
        if self.enabled {
            self.events.push(event);
        }
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take all pending events, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deliver all pending events to a subscriber and clear the log
    pub fn dispatch(&mut self, subscriber: &mut dyn EventSubscriber) {
        let owner = self.owner;
        for event in self.events.drain(..) {
            subscriber.on_event(owner, &event);
        }
    }
}
