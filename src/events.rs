//! Game event system for decoupled communication between systems.
//!
//! Systems emit events while they run; the driver applies the
//! world-affecting ones at the end of the tick and hands the batch to the
//! caller, so UI, quest logic, etc. can react without tight coupling.

use glam::Vec2;
use hecs::Entity;

use crate::components::BossState;

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// An entity took damage. Fires even when the hit was lethal, after
    /// death processing, so the entity id may already be stale.
    Damaged {
        entity: Entity,
        amount: i32,
        remaining: i32,
    },
    /// An entity died and was removed from the world
    Died {
        entity: Entity,
        position: Vec2,
    },
    /// A boss noticed the player and is starting its intro
    PlayerDetected {
        boss: Entity,
    },
    /// A boss state machine moved to a new state
    BossStateChanged {
        boss: Entity,
        state: BossState,
    },
    /// A money pickup was collected (its death is the collection)
    MoneyCollected {
        entity: Entity,
        value: i32,
    },
    /// A health pickup was collected
    HealthCollected {
        entity: Entity,
        amount: i32,
    },
    /// A shop sold an item
    ItemSold {
        shop: Entity,
        item: String,
        price: i32,
    },
}

/// Simple event queue - events are pushed during update, processed at end of tick
#[derive(Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
