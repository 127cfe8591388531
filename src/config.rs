//! Runtime race configuration loaded from `assets/race.toml`.
//!
//! [`RaceConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_race_config`] reads
//! `assets/race.toml` and overwrites the defaults with any values present in
//! the file.  Missing top-level keys fall back to the compile-time defaults,
//! so a minimal TOML can override just the values you care about.
//!
//! The `[player]` and `[ai]` handling tables are the exception: if present
//! they must list all six fields, since the two cars have different defaults.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `RaceConfig::default()`.

use crate::constants::*;
use crate::error::{
    validate_finite, validate_non_negative, validate_positive, RaceError, RaceResult,
};
use crate::vehicle::VehicleParams;
use bevy::prelude::*;
use serde::Deserialize;

/// Path read by [`load_race_config`], relative to the working directory.
pub const RACE_CONFIG_PATH: &str = "assets/race.toml";

/// One checkpoint rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RegionConfig {
    pub origin: [f32; 2],
    pub size: [f32; 2],
}

/// Runtime-tunable race configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    // ── Session ───────────────────────────────────────────────────────────────
    pub max_laps: u32,
    pub max_dt: f32,

    // ── Player ────────────────────────────────────────────────────────────────
    pub player: VehicleParams,
    pub player_on_track_max_speed: f32,
    pub player_off_track_max_speed: f32,
    pub player_start: [f32; 2],

    // ── Opponent ──────────────────────────────────────────────────────────────
    pub ai: VehicleParams,
    pub ai_on_track_max_speed: f32,
    pub ai_off_track_max_speed: f32,
    pub ai_start: [f32; 2],
    pub ai_resample_target: bool,
    /// Fixed seed for the opponent's target sampling; `None` seeds from entropy.
    pub ai_seed: Option<u64>,

    // ── Shared Handling ───────────────────────────────────────────────────────
    pub boost_drain: f32,
    pub boost_regen: f32,
    pub min_turn_speed: f32,
    pub vehicle_half_size: [f32; 2],

    // ── Track ─────────────────────────────────────────────────────────────────
    pub track_origin: [f32; 2],
    pub track_size: [f32; 2],
    /// Checkpoints in sequence order; the last one is the finish line.
    pub checkpoints: Vec<RegionConfig>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            // Session
            max_laps: MAX_LAPS,
            max_dt: MAX_DT,
            // Player
            player: VehicleParams::player(),
            player_on_track_max_speed: PLAYER_ON_TRACK_MAX_SPEED,
            player_off_track_max_speed: PLAYER_OFF_TRACK_MAX_SPEED,
            player_start: PLAYER_START,
            // Opponent
            ai: VehicleParams::ai(),
            ai_on_track_max_speed: AI_ON_TRACK_MAX_SPEED,
            ai_off_track_max_speed: AI_OFF_TRACK_MAX_SPEED,
            ai_start: AI_START,
            ai_resample_target: AI_RESAMPLE_TARGET,
            ai_seed: None,
            // Shared Handling
            boost_drain: BOOST_DRAIN,
            boost_regen: BOOST_REGEN,
            min_turn_speed: MIN_TURN_SPEED,
            vehicle_half_size: VEHICLE_HALF_SIZE,
            // Track
            track_origin: TRACK_ORIGIN,
            track_size: TRACK_SIZE,
            checkpoints: CHECKPOINT_LAYOUT
                .iter()
                .map(|&(origin, size)| RegionConfig { origin, size })
                .collect(),
        }
    }
}

impl RaceConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> RaceResult<Self> {
        let config: RaceConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> RaceResult<()> {
        if self.max_laps == 0 {
            return Err(RaceError::InvalidParameter {
                name: "max_laps",
                value: 0.0,
                expected: "[1, ∞)",
            });
        }
        validate_positive("max_dt", self.max_dt)?;
        validate_finite("max_dt", self.max_dt)?;

        self.player.validate()?;
        validate_positive("player_on_track_max_speed", self.player_on_track_max_speed)?;
        validate_positive("player_off_track_max_speed", self.player_off_track_max_speed)?;
        validate_point("player_start", self.player_start)?;
        self.ai.validate()?;
        validate_positive("ai_on_track_max_speed", self.ai_on_track_max_speed)?;
        validate_positive("ai_off_track_max_speed", self.ai_off_track_max_speed)?;
        validate_point("ai_start", self.ai_start)?;

        validate_non_negative("boost_drain", self.boost_drain)?;
        validate_non_negative("boost_regen", self.boost_regen)?;
        validate_non_negative("min_turn_speed", self.min_turn_speed)?;
        validate_extent("vehicle_half_size", self.vehicle_half_size)?;

        validate_point("track_origin", self.track_origin)?;
        validate_extent("track_size", self.track_size)?;
        if self.checkpoints.is_empty() {
            return Err(RaceError::EmptyCheckpoints);
        }
        for checkpoint in &self.checkpoints {
            validate_point("checkpoints.origin", checkpoint.origin)?;
            validate_extent("checkpoints.size", checkpoint.size)?;
        }
        Ok(())
    }
}

fn validate_point(name: &'static str, point: [f32; 2]) -> RaceResult<()> {
    point.iter().try_for_each(|&v| validate_finite(name, v))
}

/// Sizes must be finite and non-negative.
fn validate_extent(name: &'static str, extent: [f32; 2]) -> RaceResult<()> {
    extent.iter().try_for_each(|&v| {
        validate_non_negative(name, v)?;
        validate_finite(name, v)
    })
}

/// Startup system: attempt to load `assets/race.toml` and overwrite the
/// `RaceConfig` resource with its values.
///
/// A missing file keeps the compiled defaults.  Parse or validation errors are
/// logged and also keep the defaults; the game never aborts over config.
pub fn load_race_config(mut config: ResMut<RaceConfig>) {
    match std::fs::read_to_string(RACE_CONFIG_PATH) {
        Ok(contents) => match RaceConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded race config from {RACE_CONFIG_PATH}");
            }
            Err(e) => {
                warn!("Rejected {RACE_CONFIG_PATH}: {e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {RACE_CONFIG_PATH} found; using compiled defaults");
        }
    }
}
