//! The per-tick race update.
//!
//! [`Race`] owns every piece of mutable race state: the vehicles, the track
//! and the session flags.  One call to [`Race::tick`] advances the whole race
//! by one frame:
//!
//! 1. Clamp `dt` to `max_dt`.
//! 2. Pick each vehicle's speed cap from whether it touches the track surface.
//! 3. Drive the player from [`InputState`].
//! 4. Steer every opponent toward its next checkpoint.
//! 5. Scroll the track opposite the player's velocity.
//! 6. Advance checkpoints and laps for every vehicle.
//! 7. End the session once the player's lap count passes `max_laps`.
//!
//! Nothing happens while the session is paused or ended.

use crate::config::RaceConfig;
use crate::error::{RaceError, RaceResult};
use crate::math::clamp;
use crate::session::Session;
use crate::steering::{update_seek_vehicle, InputState, SteeringPolicy};
use crate::track::{CheckpointAdvance, Region, Track};
use crate::vehicle::{DriveTuning, SpeedCaps, Vehicle};
use bevy::math::Vec2;
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// What one tick changed, for logging and UI.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// `false` when the tick was skipped because the session is not running.
    pub ran: bool,
    /// Time step actually integrated, after clamping.
    pub dt: f32,
    pub advances: Vec<CheckpointAdvance>,
    /// Set on the tick that ended the race.
    pub finished: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct Race {
    vehicles: Vec<Vehicle>,
    player: usize,
    track: Track,
    session: Session,
    tuning: DriveTuning,
    max_dt: f32,
    rng: StdRng,
}

impl Race {
    /// Assemble a race.  Exactly one vehicle must be player-driven and every
    /// vehicle's expected checkpoint must exist on `track`.
    pub fn new(
        vehicles: Vec<Vehicle>,
        track: Track,
        session: Session,
        tuning: DriveTuning,
        max_dt: f32,
        rng: StdRng,
    ) -> RaceResult<Self> {
        let players: Vec<usize> = vehicles
            .iter()
            .enumerate()
            .filter(|(_, vehicle)| vehicle.is_player())
            .map(|(index, _)| index)
            .collect();
        let &[player] = players.as_slice() else {
            return Err(RaceError::PlayerCount {
                found: players.len(),
            });
        };

        let count = track.checkpoint_count();
        if let Some(stray) = vehicles.iter().find(|v| v.current_checkpoint >= count) {
            return Err(RaceError::UnknownCheckpoint {
                index: stray.current_checkpoint,
                count,
            });
        }

        Ok(Self {
            vehicles,
            player,
            track,
            session,
            tuning,
            max_dt,
            rng,
        })
    }

    /// Build the player, one opponent and the track from `config`.
    ///
    /// Both cars start on the grid just before the finish line, so crossing it
    /// opens lap 1.
    pub fn from_config(config: &RaceConfig) -> RaceResult<Self> {
        config.validate()?;

        let checkpoints = config
            .checkpoints
            .iter()
            .enumerate()
            .map(|(order, region)| {
                Region::checkpoint(order, Vec2::from(region.origin), Vec2::from(region.size))
            })
            .collect();
        let track = Track::new(
            Region::surface(Vec2::from(config.track_origin), Vec2::from(config.track_size)),
            checkpoints,
        )?;
        let start = track.finish_index();
        let half_size = Vec2::from(config.vehicle_half_size);

        let player = Vehicle::new(
            SteeringPolicy::PlayerInput,
            config.player,
            SpeedCaps {
                on_track: config.player_on_track_max_speed,
                off_track: config.player_off_track_max_speed,
            },
            Vec2::from(config.player_start),
            half_size,
            start,
        );
        let opponent = Vehicle::new(
            SteeringPolicy::seek(config.ai_resample_target),
            config.ai,
            SpeedCaps {
                on_track: config.ai_on_track_max_speed,
                off_track: config.ai_off_track_max_speed,
            },
            Vec2::from(config.ai_start),
            half_size,
            start,
        );

        let rng = match config.ai_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let tuning = DriveTuning {
            boost_drain: config.boost_drain,
            boost_regen: config.boost_regen,
            min_turn_speed: config.min_turn_speed,
        };

        Self::new(
            vec![player, opponent],
            track,
            Session::new(config.max_laps),
            tuning,
            config.max_dt,
            rng,
        )
    }

    pub fn player(&self) -> &Vehicle {
        &self.vehicles[self.player]
    }

    pub fn player_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicles[self.player]
    }

    pub fn player_index(&self) -> usize {
        self.player
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicles_mut(&mut self) -> &mut [Vehicle] {
        &mut self.vehicles
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Clamp a frame time into `[0, max_dt]`; NaN counts as no time at all.
    pub fn clamp_dt(&self, frame_dt: f32) -> f32 {
        if frame_dt.is_nan() {
            return 0.0;
        }
        clamp(frame_dt, 0.0, self.max_dt)
    }

    /// Advance the race by one frame of `frame_dt` seconds.
    ///
    /// Call once per frame.  The input is read for this tick only.
    pub fn tick(&mut self, frame_dt: f32, input: &InputState) -> TickReport {
        if !self.session.is_running() {
            return TickReport::default();
        }
        let dt = self.clamp_dt(frame_dt);

        for vehicle in &mut self.vehicles {
            let on_track = self.track.is_on_surface(&vehicle.bounds());
            vehicle.params.max_speed = vehicle.speed_caps.for_surface(on_track);
        }

        self.vehicles[self.player].drive(input, dt, &self.tuning);
        let player_velocity = self.vehicles[self.player].velocity;

        for vehicle in &mut self.vehicles {
            if vehicle.is_player() {
                continue;
            }
            let Some(target) = self.track.checkpoint_bounds(vehicle.current_checkpoint) else {
                continue;
            };
            update_seek_vehicle(vehicle, &target, player_velocity, dt, &mut self.rng);
        }

        self.track.scroll_by(player_velocity, dt);
        let advances = self.track.update_checkpoints(&mut self.vehicles);

        let finished = self.session.is_complete(self.player().current_lap);
        if finished {
            self.session.end();
        }

        TickReport {
            ran: true,
            dt,
            advances,
            finished,
        }
    }
}
