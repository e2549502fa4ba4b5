//! Error types for the battle engine.
//!
//! None of these errors cross the public command boundary of
//! [`Battle`](crate::battle::Battle). They exist so internal helpers can use
//! `?` and so absorbed failures can be reported in a
//! [`RoundSummary`](crate::combat::RoundSummary) instead of vanishing.
//!
//! ## Categories
//!
//! Every [`ActionError`] maps onto one of two categories:
//! - **ReferenceMissing**: an id points at nothing (missing mage, spell,
//!   grimoire, opponent). The action is skipped.
//! - **ResourceInsufficient**: not enough magia or no uses left. The action
//!   is skipped with no state mutation.
//!
//! Out-of-range values (health below zero, magia above max) are clamped in
//! place and never become errors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::content::SpellId;
use crate::core::PlayerId;

/// Which content table a lookup was made against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    Mage,
    Spell,
    Grimoire,
}

impl ContentKind {
    /// Lowercase name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mage => "mage",
            Self::Spell => "spell",
            Self::Grimoire => "grimoire",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content table lookup failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("{kind} `{id}` not found")]
    NotFound { kind: ContentKind, id: String },
}

impl ContentError {
    pub(crate) fn not_found(kind: ContentKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

/// Category of a skipped action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// An id pointed at nothing.
    ReferenceMissing,
    /// Not enough magia, or no uses left.
    ResourceInsufficient,
}

/// Why a single action did not take effect.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    ReferenceMissing(#[from] ContentError),

    #[error("{0} has no mage selected")]
    NoMageSelected(PlayerId),

    #[error("{0} has no opponent with a mage")]
    NoOpponent(PlayerId),

    #[error("not enough magia: {required} required, {available} available")]
    InsufficientMagia { required: i64, available: i64 },

    #[error("no uses of `{spell}` remaining")]
    NoUsesRemaining { spell: SpellId },

    #[error("the battle is already decided")]
    BattleOver,
}

impl ActionError {
    /// Map the error onto its category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InsufficientMagia { .. } | Self::NoUsesRemaining { .. } => {
                ErrorCategory::ResourceInsufficient
            }
            Self::ReferenceMissing(_)
            | Self::NoMageSelected(_)
            | Self::NoOpponent(_)
            | Self::BattleOver => ErrorCategory::ReferenceMissing,
        }
    }

    /// True when the action failed for lack of magia or uses.
    #[must_use]
    pub const fn is_resource(&self) -> bool {
        matches!(self.category(), ErrorCategory::ResourceInsufficient)
    }
}

/// Failure to encode or decode a [`GameState`](crate::core::GameState) snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encode(#[source] bincode::Error),

    #[error("snapshot decoding failed: {0}")]
    Decode(#[source] bincode::Error),
}
