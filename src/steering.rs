//! Where each vehicle's steering decisions come from.
//!
//! The player's car reads an [`InputState`] sampled from the keyboard; the
//! opponent seeks a point inside its next checkpoint.  Both feed the same
//! acceleration/velocity fields on [`Vehicle`].

use crate::math::{clamp_axes, normalize, random_point_in};
use crate::vehicle::Vehicle;
use bevy::math::{Rect, Vec2};
use bevy::prelude::Resource;
use rand::Rng;

/// Logical driving actions held down this tick.
///
/// Sampled once at the start of a tick and passed by reference into the
/// update; nothing reads the keyboard directly.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub boost: bool,
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

/// Steering capability attached to a [`Vehicle`].
#[derive(Debug, Clone, PartialEq)]
pub enum SteeringPolicy {
    /// Driven by [`InputState`] through [`Vehicle::drive`].
    PlayerInput,
    /// Seeks a point inside its next checkpoint; see [`update_seek_vehicle`].
    SeekAi(SeekTarget),
}

impl SteeringPolicy {
    pub fn seek(resample_each_tick: bool) -> Self {
        SteeringPolicy::SeekAi(SeekTarget::new(resample_each_tick))
    }
}

/// Aim point selection for a seek-steered car.
#[derive(Debug, Clone, PartialEq)]
pub struct SeekTarget {
    /// Pick a fresh random point every tick (jittery line) instead of keeping
    /// one point per checkpoint.
    pub resample_each_tick: bool,
    /// Checkpoint index and the chosen point's offset from that checkpoint's
    /// top-left corner.  Stored relative so it scrolls with the track.
    pinned: Option<(usize, Vec2)>,
}

impl SeekTarget {
    pub fn new(resample_each_tick: bool) -> Self {
        Self {
            resample_each_tick,
            pinned: None,
        }
    }

    /// Screen-space point to steer toward inside `bounds` of checkpoint `index`.
    pub fn desired_position<R: Rng + ?Sized>(
        &mut self,
        index: usize,
        bounds: &Rect,
        rng: &mut R,
    ) -> Vec2 {
        if self.resample_each_tick {
            return random_point_in(bounds, rng);
        }
        match self.pinned {
            Some((pinned_index, offset)) if pinned_index == index => bounds.min + offset,
            _ => {
                let point = random_point_in(bounds, rng);
                self.pinned = Some((index, point - bounds.min));
                point
            }
        }
    }
}

/// Classic seek: full-speed velocity toward `desired_position` minus the
/// current velocity.
pub fn seek_steering(position: Vec2, velocity: Vec2, max_speed: f32, desired_position: Vec2) -> Vec2 {
    let desired_velocity = normalize(desired_position - position) * max_speed;
    desired_velocity - velocity
}

/// Advance a seek-steered vehicle by one tick toward `target` (the screen
/// bounds of its next checkpoint).
///
/// Velocity is in pixels per tick and is not scaled by `dt`; `dt` only
/// applies to the counter-scroll from `player_velocity`, which keeps this car
/// fixed relative to the track while the camera follows the player.
///
/// The seek force is added onto `acceleration`, which is never cleared, so
/// steering builds up across ticks.  Call exactly once per tick.
pub fn update_seek_vehicle<R: Rng + ?Sized>(
    vehicle: &mut Vehicle,
    target: &Rect,
    player_velocity: Vec2,
    dt: f32,
    rng: &mut R,
) {
    let index = vehicle.current_checkpoint;
    let desired_position = match &mut vehicle.policy {
        SteeringPolicy::SeekAi(seek) => seek.desired_position(index, target, rng),
        SteeringPolicy::PlayerInput => return,
    };

    vehicle.acceleration += seek_steering(
        vehicle.position,
        vehicle.velocity,
        vehicle.params.max_speed,
        desired_position,
    );

    vehicle.velocity += vehicle.acceleration * dt;
    vehicle.velocity = clamp_axes(vehicle.velocity, vehicle.params.max_speed);

    vehicle.position += vehicle.velocity;
    vehicle.position -= player_velocity * dt;

    vehicle.direction = normalize(vehicle.velocity);
    vehicle.rotation = vehicle.direction.y.atan2(vehicle.direction.x);
}
