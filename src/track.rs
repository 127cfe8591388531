//! Track surface, ordered checkpoints and lap progress.
//!
//! Regions are stored in world coordinates.  The camera follows the player,
//! so the whole track scrolls by `-player_velocity * dt` each tick and every
//! region's screen bounds are its world bounds shifted by that scroll.

use crate::error::{RaceError, RaceResult};
use crate::math::bounds_overlap;
use crate::vehicle::Vehicle;
use bevy::math::{Rect, Vec2};

/// Marks a [`Region`] as a member of the checkpoint sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointRole {
    /// Position in the sequence, `0..checkpoint_count`.
    pub order_number: usize,
}

/// Fixed rectangle in world space: the track surface or a checkpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Top-left corner in world space.
    pub origin: Vec2,
    pub size: Vec2,
    pub checkpoint: Option<CheckpointRole>,
}

impl Region {
    pub fn surface(origin: Vec2, size: Vec2) -> Self {
        Self {
            origin,
            size,
            checkpoint: None,
        }
    }

    pub fn checkpoint(order_number: usize, origin: Vec2, size: Vec2) -> Self {
        Self {
            origin,
            size,
            checkpoint: Some(CheckpointRole { order_number }),
        }
    }

    /// Where this region currently sits on screen.
    pub fn screen_bounds(&self, scroll: Vec2) -> Rect {
        let min = self.origin + scroll;
        Rect::from_corners(min, min + self.size)
    }
}

/// A checkpoint a vehicle just passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointAdvance {
    /// Index of the vehicle in the race's vehicle list.
    pub vehicle: usize,
    pub reached: usize,
    pub next: usize,
    /// `Some(lap)` when this advance wrapped the sequence and opened a new lap.
    pub new_lap: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Track {
    surface: Region,
    checkpoints: Vec<Region>,
    scroll: Vec2,
}

impl Track {
    /// Build a track from its surface and checkpoints in sequence order.
    ///
    /// Each checkpoint's `order_number` must equal its position in the list.
    pub fn new(surface: Region, checkpoints: Vec<Region>) -> RaceResult<Self> {
        if checkpoints.is_empty() {
            return Err(RaceError::EmptyCheckpoints);
        }
        for (index, region) in checkpoints.iter().enumerate() {
            match region.checkpoint {
                Some(role) if role.order_number == index => {}
                Some(role) => {
                    return Err(RaceError::UnknownCheckpoint {
                        index: role.order_number,
                        count: checkpoints.len(),
                    })
                }
                None => {
                    return Err(RaceError::UnknownCheckpoint {
                        index,
                        count: checkpoints.len(),
                    })
                }
            }
        }
        Ok(Self {
            surface,
            checkpoints,
            scroll: Vec2::ZERO,
        })
    }

    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }

    /// The finish line is the last checkpoint in the sequence.
    pub fn finish_index(&self) -> usize {
        self.checkpoints.len() - 1
    }

    pub fn checkpoints(&self) -> &[Region] {
        &self.checkpoints
    }

    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    pub fn scroll_by(&mut self, player_velocity: Vec2, dt: f32) {
        self.scroll -= player_velocity * dt;
    }

    pub fn surface_bounds(&self) -> Rect {
        self.surface.screen_bounds(self.scroll)
    }

    pub fn checkpoint_bounds(&self, index: usize) -> Option<Rect> {
        self.checkpoints
            .get(index)
            .map(|region| region.screen_bounds(self.scroll))
    }

    pub fn is_on_surface(&self, bounds: &Rect) -> bool {
        bounds_overlap(&self.surface_bounds(), bounds)
    }

    /// Test every vehicle against the checkpoint it expects next.
    ///
    /// A vehicle advances at most one checkpoint per call; touching any other
    /// checkpoint has no effect.
    pub fn update_checkpoints(&self, vehicles: &mut [Vehicle]) -> Vec<CheckpointAdvance> {
        let mut advances = Vec::new();
        for (index, vehicle) in vehicles.iter_mut().enumerate() {
            let Some(region) = self.checkpoints.get(vehicle.current_checkpoint) else {
                continue;
            };
            if let Some(advance) = self.try_advance(index, region, vehicle) {
                advances.push(advance);
            }
        }
        advances
    }

    fn try_advance(
        &self,
        index: usize,
        region: &Region,
        vehicle: &mut Vehicle,
    ) -> Option<CheckpointAdvance> {
        let role = region.checkpoint?;
        if role.order_number != vehicle.current_checkpoint
            || !bounds_overlap(&region.screen_bounds(self.scroll), &vehicle.bounds())
        {
            return None;
        }

        vehicle.current_checkpoint = (role.order_number + 1) % self.checkpoints.len();
        let new_lap = if vehicle.current_checkpoint == 0 {
            vehicle.current_lap += 1;
            Some(vehicle.current_lap)
        } else {
            None
        };

        Some(CheckpointAdvance {
            vehicle: index,
            reached: role.order_number,
            next: vehicle.current_checkpoint,
            new_lap,
        })
    }
}
