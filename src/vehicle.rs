//! Vehicle state and per-tick kinematics.
//!
//! ## Tick pipeline (player-driven vehicles)
//!
//! 1. [`Vehicle::update_boost`] — drain or regenerate the boost budget.
//! 2. [`Vehicle::update_rotation`] — turn the heading, rebuild `direction`.
//! 3. [`Vehicle::update_acceleration`] — heading × rate (× boost power) × dt.
//! 4. [`Vehicle::update_velocity`] — throttle or decay, project onto heading, cap.
//!
//! [`Vehicle::drive`] runs all four in order.  Position is left to the caller:
//! the player stays fixed on screen while the world scrolls, and the opponent
//! integrates its own position in [`crate::steering`].

use crate::constants::*;
use crate::error::{validate_non_negative, validate_positive, validate_unit_interval, RaceResult};
use crate::math::{clamp, clamp_axes, normalize, project, rotated_bounds};
use crate::steering::{InputState, SteeringPolicy};
use bevy::math::{Rect, Vec2};
use serde::Deserialize;

/// Tunable handling parameters of one vehicle.
///
/// `max_speed` is rewritten by the orchestrator every tick from [`SpeedCaps`]
/// depending on whether the car is on the track surface.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct VehicleParams {
    pub max_speed: f32,
    pub turning_speed: f32,
    pub acceleration_rate: f32,
    pub deceleration_rate: f32,
    pub boost_power: f32,
    pub max_boost: f32,
}

impl VehicleParams {
    /// Reference handling for the player's car.
    pub fn player() -> Self {
        Self {
            max_speed: PLAYER_ON_TRACK_MAX_SPEED,
            turning_speed: PLAYER_TURNING_SPEED,
            acceleration_rate: PLAYER_ACCELERATION_RATE,
            deceleration_rate: PLAYER_DECELERATION_RATE,
            boost_power: PLAYER_BOOST_POWER,
            max_boost: PLAYER_MAX_BOOST,
        }
    }

    /// Reference handling for the opponent.
    pub fn ai() -> Self {
        Self {
            max_speed: AI_ON_TRACK_MAX_SPEED,
            turning_speed: AI_TURNING_SPEED,
            acceleration_rate: AI_ACCELERATION_RATE,
            deceleration_rate: AI_DECELERATION_RATE,
            boost_power: AI_BOOST_POWER,
            max_boost: AI_MAX_BOOST,
        }
    }

    pub fn validate(&self) -> RaceResult<()> {
        validate_positive("max_speed", self.max_speed)?;
        validate_non_negative("turning_speed", self.turning_speed)?;
        validate_non_negative("acceleration_rate", self.acceleration_rate)?;
        validate_unit_interval("deceleration_rate", self.deceleration_rate)?;
        validate_non_negative("boost_power", self.boost_power)?;
        validate_non_negative("max_boost", self.max_boost)
    }
}

/// Speed caps applied on and off the track surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedCaps {
    pub on_track: f32,
    pub off_track: f32,
}

impl SpeedCaps {
    pub fn for_surface(&self, on_track: bool) -> f32 {
        if on_track {
            self.on_track
        } else {
            self.off_track
        }
    }
}

/// Race-wide constants consumed by the kinematics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveTuning {
    pub boost_drain: f32,
    pub boost_regen: f32,
    pub min_turn_speed: f32,
}

impl Default for DriveTuning {
    fn default() -> Self {
        Self {
            boost_drain: BOOST_DRAIN,
            boost_regen: BOOST_REGEN,
            min_turn_speed: MIN_TURN_SPEED,
        }
    }
}

/// A car on the track, driven either by the keyboard or by seek steering.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub policy: SteeringPolicy,
    pub params: VehicleParams,
    pub speed_caps: SpeedCaps,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// Unit heading, or zero while a seek-steered car is stationary.
    pub direction: Vec2,
    /// Heading in radians; 0 faces +X, positive turns clockwise on screen.
    pub rotation: f32,
    pub half_size: Vec2,
    /// Boost budget, always within `[0, params.max_boost]`.
    pub current_boost: f32,
    pub is_boosting: bool,
    /// Index of the next checkpoint this car must touch.
    pub current_checkpoint: usize,
    pub current_lap: u32,
}

impl Vehicle {
    /// A stationary car facing +X at `position`, waiting for `start_checkpoint`.
    pub fn new(
        policy: SteeringPolicy,
        params: VehicleParams,
        speed_caps: SpeedCaps,
        position: Vec2,
        half_size: Vec2,
        start_checkpoint: usize,
    ) -> Self {
        Self {
            policy,
            params,
            speed_caps,
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            direction: Vec2::X,
            rotation: 0.0,
            half_size,
            current_boost: 0.0,
            is_boosting: false,
            current_checkpoint: start_checkpoint,
            current_lap: 0,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.policy, SteeringPolicy::PlayerInput)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Screen-space bounds of the rotated car.
    pub fn bounds(&self) -> Rect {
        rotated_bounds(self.position, self.half_size, self.rotation)
    }

    /// Per-axis velocity cap, raised by `boost_power` while boosting.
    pub fn speed_cap(&self) -> f32 {
        if self.is_boosting {
            self.params.max_speed + self.params.boost_power
        } else {
            self.params.max_speed
        }
    }

    /// Run the full kinematics step for one tick.
    ///
    /// Must be called once per tick; a second call integrates the same input again.
    pub fn drive(&mut self, input: &InputState, dt: f32, tuning: &DriveTuning) {
        self.update_boost(input.boost, tuning);
        self.update_rotation(input, dt, tuning);
        self.update_acceleration(dt);
        self.update_velocity(input);
    }

    pub fn update_boost(&mut self, boost_held: bool, tuning: &DriveTuning) {
        if boost_held && self.current_boost > 0.0 {
            self.is_boosting = true;
            self.current_boost -= tuning.boost_drain;
        } else {
            self.is_boosting = false;
            self.current_boost += tuning.boost_regen;
        }
        self.current_boost = clamp(self.current_boost, 0.0, self.params.max_boost);
    }

    pub fn update_rotation(&mut self, input: &InputState, dt: f32, tuning: &DriveTuning) {
        let rolling = self.speed() > tuning.min_turn_speed;
        if input.turn_left && rolling {
            self.rotation -= self.params.turning_speed * dt;
        }
        if input.turn_right && rolling {
            self.rotation += self.params.turning_speed * dt;
        }
        self.direction = normalize(Vec2::from_angle(self.rotation));
    }

    pub fn update_acceleration(&mut self, dt: f32) {
        let mut acceleration = self.direction * self.params.acceleration_rate;
        if self.is_boosting {
            acceleration *= self.params.boost_power;
        }
        self.acceleration = acceleration * dt;
    }

    pub fn update_velocity(&mut self, input: &InputState) {
        if input.forward {
            self.velocity += self.acceleration;
        } else if input.backward {
            self.velocity -= self.acceleration;
        } else {
            self.velocity *= self.params.deceleration_rate;
        }

        // No lateral drift: the car only ever moves along its heading.
        self.velocity = project(self.velocity, self.direction);
        self.velocity = clamp_axes(self.velocity, self.speed_cap());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn player() -> Vehicle {
        Vehicle::new(
            SteeringPolicy::PlayerInput,
            VehicleParams::player(),
            SpeedCaps {
                on_track: PLAYER_ON_TRACK_MAX_SPEED,
                off_track: PLAYER_OFF_TRACK_MAX_SPEED,
            },
            Vec2::new(480.0, 270.0),
            Vec2::new(16.0, 8.0),
            8,
        )
    }

    fn forward() -> InputState {
        InputState {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn throttle_accelerates_along_heading() {
        let mut car = player();
        car.drive(&forward(), DT, &DriveTuning::default());

        let expected = PLAYER_ACCELERATION_RATE * DT;
        assert!((car.velocity.x - expected).abs() < 1e-4, "{:?}", car.velocity);
        assert!(car.velocity.y.abs() < 1e-6);
    }

    #[test]
    fn idle_velocity_decays_exponentially() {
        let mut car = player();
        car.velocity = Vec2::new(100.0, 0.0);
        car.drive(&InputState::default(), DT, &DriveTuning::default());
        assert!((car.velocity.x - 95.0).abs() < 1e-3);
    }

    #[test]
    fn forward_takes_precedence_over_backward() {
        let mut car = player();
        let both = InputState {
            forward: true,
            backward: true,
            ..Default::default()
        };
        car.drive(&both, DT, &DriveTuning::default());
        assert!(car.velocity.x > 0.0);
    }

    #[test]
    fn stationary_car_cannot_turn() {
        let mut car = player();
        let left = InputState {
            turn_left: true,
            ..Default::default()
        };
        car.drive(&left, DT, &DriveTuning::default());
        assert_eq!(car.rotation, 0.0);
    }

    #[test]
    fn rolling_car_turns_and_loses_lateral_velocity() {
        let mut car = player();
        car.velocity = Vec2::new(200.0, 0.0);
        let right = InputState {
            forward: true,
            turn_right: true,
            ..Default::default()
        };
        car.drive(&right, DT, &DriveTuning::default());

        assert!((car.rotation - PLAYER_TURNING_SPEED * DT).abs() < 1e-6);
        // Velocity is parallel to the new heading.
        let cross = car.velocity.x * car.direction.y - car.velocity.y * car.direction.x;
        assert!(cross.abs() < 1e-3, "lateral component {cross}");
    }

    #[test]
    fn velocity_is_capped_per_axis() {
        let mut car = player();
        car.velocity = Vec2::new(10_000.0, 0.0);
        car.drive(&forward(), DT, &DriveTuning::default());
        assert_eq!(car.velocity.x, PLAYER_ON_TRACK_MAX_SPEED);
    }

    #[test]
    fn boost_raises_cap_and_drains_budget() {
        let mut car = player();
        car.current_boost = 100.0;
        car.velocity = Vec2::new(10_000.0, 0.0);
        let boost = InputState {
            forward: true,
            boost: true,
            ..Default::default()
        };
        car.drive(&boost, DT, &DriveTuning::default());

        assert!(car.is_boosting);
        assert_eq!(car.current_boost, 96.0);
        assert_eq!(
            car.velocity.x,
            PLAYER_ON_TRACK_MAX_SPEED + PLAYER_BOOST_POWER
        );
    }

    #[test]
    fn empty_boost_regenerates_instead() {
        let mut car = player();
        let boost = InputState {
            boost: true,
            ..Default::default()
        };
        car.update_boost(boost.boost, &DriveTuning::default());
        assert!(!car.is_boosting);
        assert_eq!(car.current_boost, 1.0);
    }

    #[test]
    fn boost_budget_stays_bounded() {
        let mut car = player();
        let tuning = DriveTuning::default();
        for tick in 0..2_000 {
            // Hold boost in bursts so both drain and regen paths are exercised.
            let held = (tick / 150) % 2 == 0;
            car.update_boost(held, &tuning);
            assert!(
                (0.0..=car.params.max_boost).contains(&car.current_boost),
                "tick {tick}: boost {}",
                car.current_boost
            );
        }
    }

    #[test]
    fn bounds_follow_rotation() {
        let mut car = player();
        let flat = car.bounds();
        car.rotation = std::f32::consts::FRAC_PI_2;
        let upright = car.bounds();
        assert!(flat.width() > flat.height());
        assert!(upright.height() > upright.width());
    }

    #[test]
    fn reference_params_validate() {
        assert!(VehicleParams::player().validate().is_ok());
        assert!(VehicleParams::ai().validate().is_ok());
        let bad = VehicleParams {
            deceleration_rate: 1.5,
            ..VehicleParams::player()
        };
        assert!(bad.validate().is_err());
    }
}
