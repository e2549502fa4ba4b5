//! Multi-round delayed casts.
//!
//! A spell with a casting time is paid for when it starts charging, then
//! sits in the tracker for that many end-of-round ticks. When its counter
//! reaches zero it moves to the ready queue and fires at the start of the
//! next execution.

use serde::{Deserialize, Serialize};

use crate::content::{MageId, SpellId};
use crate::core::PlayerId;
use crate::events::ChargeStatus;

/// A spell in flight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargingSpell {
    pub player: PlayerId,
    pub mage: MageId,
    pub spell: SpellId,
    /// End-of-round ticks left before the spell is ready.
    pub remaining_turns: u32,
    pub is_innate: bool,
}

/// What happened to one charging spell during [`ChargingTracker::advance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChargeProgress {
    pub spell: ChargingSpell,
    /// `StillCharging` or `ChargeComplete`.
    pub status: ChargeStatus,
}

/// In-progress and ready charging spells, both in insertion order.
///
/// ```
/// use grimoire_duel::combat::{ChargingSpell, ChargingTracker};
/// use grimoire_duel::content::{MageId, SpellId};
/// use grimoire_duel::core::PlayerId;
///
/// let mut tracker = ChargingTracker::new();
/// tracker.begin(ChargingSpell {
///     player: PlayerId::new(0),
///     mage: MageId::new("narnrokhar_001"),
///     spell: SpellId::new("earthquake_001"),
///     remaining_turns: 1,
///     is_innate: false,
/// });
///
/// tracker.advance();
/// assert_eq!(tracker.take_ready().len(), 1);
/// assert!(tracker.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargingTracker {
    charging: Vec<ChargingSpell>,
    ready: Vec<ChargingSpell>,
}

impl ChargingTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start charging a spell.
    pub fn begin(&mut self, spell: ChargingSpell) {
        self.charging.push(spell);
    }

    /// Tick every charging spell down by one round.
    ///
    /// Spells reaching zero move to the ready queue. Returns one progress
    /// record per spell that was charging, in order.
    pub fn advance(&mut self) -> Vec<ChargeProgress> {
        let mut progress = Vec::with_capacity(self.charging.len());
        let mut still = Vec::with_capacity(self.charging.len());

        for mut spell in self.charging.drain(..) {
            spell.remaining_turns = spell.remaining_turns.saturating_sub(1);
            if spell.remaining_turns == 0 {
                progress.push(ChargeProgress {
                    spell: spell.clone(),
                    status: ChargeStatus::ChargeComplete,
                });
                self.ready.push(spell);
            } else {
                progress.push(ChargeProgress {
                    spell: spell.clone(),
                    status: ChargeStatus::StillCharging {
                        turns_remaining: spell.remaining_turns,
                    },
                });
                still.push(spell);
            }
        }

        self.charging = still;
        progress
    }

    /// Remove and return the ready queue.
    pub fn take_ready(&mut self) -> Vec<ChargingSpell> {
        std::mem::take(&mut self.ready)
    }

    /// Spells still charging.
    #[must_use]
    pub fn charging(&self) -> &[ChargingSpell] {
        &self.charging
    }

    /// Spells waiting to fire.
    #[must_use]
    pub fn ready(&self) -> &[ChargingSpell] {
        &self.ready
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charging.is_empty() && self.ready.is_empty()
    }
}
