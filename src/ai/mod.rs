//! Computer-controlled seats.
//!
//! Only a uniform random policy is provided. The `OpponentPolicy` trait is
//! the seam for anything smarter.

pub mod opponent;

pub use opponent::{castable_spells, prepare_seat, select_for_round, OpponentPolicy, RandomOpponent, SpellChoice};
