//! The battle engine: match state, setup, turn lifecycle and action resolution.
//!
//! Every transition after setup goes through [`apply`], which takes the
//! current state by reference and returns its successor. Nothing in this
//! module holds state between calls.

pub mod engine;
pub mod seed;
pub mod setup;
pub mod turn;
pub mod types;

pub use engine::{apply, can_play, was_rejected};
pub use setup::{build_initial_state, validate_lineup};
pub use types::{Action, BattleMode, BattleState, HeroState, PlayerState, Side, Winner};
