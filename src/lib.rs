//! Top-down arcade racing core.
//!
//! A player car, a seek-steering opponent, checkpoint-based lap tracking and
//! a boost mechanic, updated one fixed tick at a time.  The pure simulation
//! lives in [`race`] and the modules below it; [`simulation`] and [`state`]
//! host it inside a Bevy app.

pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod race;
pub mod session;
pub mod simulation;
pub mod state;
pub mod steering;
pub mod track;
pub mod vehicle;
