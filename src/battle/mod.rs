//! Battle controller.
//!
//! `Battle` is the only type hosts need to mutate a game: it accepts the
//! preparation and battle commands, runs the phase machine and invokes the
//! resolver at the right time.

pub mod engine;

pub use engine::Battle;
