//! The workout builder engine.
//!
//! One [`WorkoutBuilder`] owns one live [`crate::model::WorkoutState`] and
//! applies [`Action`]s atomically. Every action is total: it never panics,
//! unknown ids are no-ops, and invariant-violating requests (removing the
//! last set, moving past a boundary) leave the state untouched.

mod actions;
mod engine;
mod save;

pub use actions::{Action, MoveDirection, SetField};
pub use engine::WorkoutBuilder;
pub use save::{SaveOutcome, save_workout};
