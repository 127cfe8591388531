//! Centralised race tuning constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::RaceConfig::default`] is built from these values.
//!
//! ## Units
//!
//! Positions are screen pixels with +Y pointing down.  The player's velocity
//! is in pixels per second; the opponent's velocity is in pixels per tick.

// ── Session ───────────────────────────────────────────────────────────────────

/// Laps to complete.  The race ends once the player's lap counter exceeds this.
pub const MAX_LAPS: u32 = 3;

/// Largest time step (seconds) a single tick may integrate.
///
/// Slow frames are clamped to this so a stall does not launch the cars
/// through a checkpoint they never touched.
pub const MAX_DT: f32 = 1.0 / 12.0;

// ── Vehicle: Player ───────────────────────────────────────────────────────────

/// Player speed cap while on the track surface (px/s per axis).
pub const PLAYER_ON_TRACK_MAX_SPEED: f32 = 500.0;

/// Player speed cap while off the track surface.
pub const PLAYER_OFF_TRACK_MAX_SPEED: f32 = 200.0;

/// Heading change per second while a turn key is held (radians/s).
pub const PLAYER_TURNING_SPEED: f32 = 3.0;

/// Acceleration magnitude along the heading (px/s²).
pub const PLAYER_ACCELERATION_RATE: f32 = 150.0;

/// Per-tick velocity multiplier with no throttle input.  0.95 ≈ 5 % loss per tick.
pub const PLAYER_DECELERATION_RATE: f32 = 0.95;

/// Multiplier on acceleration while boosting; also added to the speed cap.
pub const PLAYER_BOOST_POWER: f32 = 100.0;

/// Boost budget ceiling.
pub const PLAYER_MAX_BOOST: f32 = 500.0;

// ── Vehicle: Opponent ─────────────────────────────────────────────────────────

/// Opponent speed cap on the track surface (px/tick per axis).
pub const AI_ON_TRACK_MAX_SPEED: f32 = 3.0;

/// Opponent speed cap off the track surface.
pub const AI_OFF_TRACK_MAX_SPEED: f32 = 1.0;

pub const AI_TURNING_SPEED: f32 = 3.0;
pub const AI_ACCELERATION_RATE: f32 = 150.0;
pub const AI_DECELERATION_RATE: f32 = 0.95;
pub const AI_BOOST_POWER: f32 = 100.0;
pub const AI_MAX_BOOST: f32 = 500.0;

// ── Vehicle: Shared ───────────────────────────────────────────────────────────

/// Boost drained per tick while the boost key is held.
pub const BOOST_DRAIN: f32 = 4.0;

/// Boost regenerated per tick while not boosting.
pub const BOOST_REGEN: f32 = 1.0;

/// Minimum speed (magnitude) below which turn input is ignored.
///
/// A stationary car cannot pivot on the spot.
pub const MIN_TURN_SPEED: f32 = 0.01;

/// Half of the car sprite's (width, height) before rotation.
pub const VEHICLE_HALF_SIZE: [f32; 2] = [16.0, 8.0];

// ── Start Grid ────────────────────────────────────────────────────────────────

/// Player screen position.  The camera follows the player, so it never moves.
pub const PLAYER_START: [f32; 2] = [480.0, 270.0];

/// Opponent start, one lane below the player.
pub const AI_START: [f32; 2] = [480.0, 315.0];

// ── Track Layout ──────────────────────────────────────────────────────────────

/// Top-left corner of the track surface at the start of the race.
pub const TRACK_ORIGIN: [f32; 2] = [-900.0, -650.0];

/// Size of the track surface.  Anything outside counts as off-track.
pub const TRACK_SIZE: [f32; 2] = [2300.0, 1100.0];

/// Size of a checkpoint spanning a horizontal stretch (top / bottom straights).
pub const CHECKPOINT_SIZE_HORIZONTAL: [f32; 2] = [20.0, 160.0];

/// Size of a checkpoint spanning a vertical stretch (left / right straights).
pub const CHECKPOINT_SIZE_VERTICAL: [f32; 2] = [160.0, 20.0];

/// Reference checkpoint layout as `(origin, size)` in sequence order.
///
/// The last entry is the finish line.  Cars start on the grid just before it,
/// so crossing it the first time opens lap 1.
pub const CHECKPOINT_LAYOUT: [([f32; 2], [f32; 2]); 9] = [
    ([1050.0, 220.0], CHECKPOINT_SIZE_HORIZONTAL),
    ([1150.0, 75.0], CHECKPOINT_SIZE_VERTICAL),
    ([1150.0, -350.0], CHECKPOINT_SIZE_VERTICAL),
    ([1050.0, -579.0], CHECKPOINT_SIZE_HORIZONTAL),
    ([-600.0, -579.0], CHECKPOINT_SIZE_HORIZONTAL),
    ([-815.0, -350.0], CHECKPOINT_SIZE_VERTICAL),
    ([-815.0, 75.0], CHECKPOINT_SIZE_VERTICAL),
    ([-600.0, 220.0], CHECKPOINT_SIZE_HORIZONTAL),
    ([500.0, 220.0], CHECKPOINT_SIZE_HORIZONTAL),
];

// ── Opponent Targeting ────────────────────────────────────────────────────────

/// Re-pick the opponent's aim point inside its target checkpoint every tick.
///
/// `true` reproduces the jittery line of the reference game.  `false` keeps
/// one point per checkpoint until it is reached.
pub const AI_RESAMPLE_TARGET: bool = true;
