//! Game phases.
//!
//! Two levels: the outer [`GamePhase`] and, while in battle, the inner
//! [`BattlePhase`]. Exactly one pair is active at a time.

use serde::{Deserialize, Serialize};

/// Outer game phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Players pick mages and grimoires.
    #[default]
    Preparation,
    /// Rounds of spell selection and execution.
    Battle,
    /// A winner is decided. Terminal.
    Result,
}

impl GamePhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Preparation => "preparation",
            Self::Battle => "battle",
            Self::Result => "result",
        }
    }

    /// True for the terminal phase.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Result)
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-phase within [`GamePhase::Battle`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattlePhase {
    /// Players choose a spell or pass.
    #[default]
    SpellSelection,
    /// The round's actions resolve.
    Execution,
}

impl BattlePhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SpellSelection => "spellSelection",
            Self::Execution => "execution",
        }
    }
}

impl std::fmt::Display for BattlePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
