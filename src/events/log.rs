//! The combat log: an append-only record consumed by presentation.
//!
//! ## Sinks
//!
//! `GameState::emit` records every engine event through the log's
//! [`EventSink`] impl. [`CombatLog::drain_into`] forwards a drained log to
//! any other sink, such as a plain `Vec<GameEvent>`.
//!
//! ```
//! use grimoire_duel::events::{CombatLog, EventKind, GameEvent};
//!
//! let mut log = CombatLog::new();
//! log.push(GameEvent::GameInitialized);
//!
//! assert_eq!(log.count(EventKind::GameInitialized), 1);
//! let drained = log.drain();
//! assert_eq!(drained[0].id, 0);
//! assert!(log.is_empty());
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use im::Vector;
use serde::{Deserialize, Serialize};

use super::event::{EventKind, GameEvent};

/// Anything that accepts engine events in order.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// One logged event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLogEntry {
    /// Unique and increasing within one game.
    pub id: u64,
    pub event: GameEvent,
    /// Round the event was logged in. 0 before battle starts.
    pub round: u32,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

impl CombatLogEntry {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Ordered log of combat events.
///
/// Backed by a persistent vector so cloning a whole game state stays cheap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    entries: Vector<CombatLogEntry>,
    next_id: u64,
    round: u32,
}

impl CombatLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, stamping it with the next id and the current round.
    pub fn push(&mut self, event: GameEvent) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_back(CombatLogEntry {
            id,
            event,
            round: self.round,
            timestamp_ms: now_ms(),
        });
        id
    }

    /// Set the round stamped on subsequent entries.
    pub fn set_round(&mut self, round: u32) {
        self.round = round;
    }

    /// Iterate over the entries in order.
    pub fn entries(&self) -> impl Iterator<Item = &CombatLogEntry> {
        self.entries.iter()
    }

    /// Iterate over the events in order.
    pub fn events(&self) -> impl Iterator<Item = &GameEvent> {
        self.entries.iter().map(|e| &e.event)
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&CombatLogEntry> {
        self.entries.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count entries of one kind.
    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        self.entries.iter().filter(|e| e.kind() == kind).count()
    }

    /// Remove and return every entry. Ids keep increasing afterwards.
    pub fn drain(&mut self) -> Vec<CombatLogEntry> {
        std::mem::take(&mut self.entries).into_iter().collect()
    }

    /// Drain every event into a sink, in order.
    pub fn drain_into(&mut self, sink: &mut impl EventSink) {
        for entry in self.drain() {
            sink.emit(entry.event);
        }
    }
}

impl EventSink for CombatLog {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}
