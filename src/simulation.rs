//! Simulation plugin: hosts [`Race`] as a Bevy resource and ticks it once per frame.
//!
//! ## Pipeline (runs in order every `Update` frame while `Racing`)
//!
//! 1. [`keyboard_to_input_system`] — samples WASD + Space into [`InputState`].
//! 2. [`race_tick_system`] — runs [`Race::tick`] and logs checkpoint / lap events.
//!
//! The `InputState` resource is the seam tests use: they can press keys on
//! `ButtonInput<KeyCode>` or build an `InputState` and call `Race::tick` directly.

use crate::config::RaceConfig;
use crate::race::Race;
use crate::state::{vehicle_label, GameState};
use crate::steering::InputState;
use bevy::prelude::*;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RaceConfig>()
            .init_resource::<InputState>()
            .add_systems(OnEnter(GameState::Racing), setup_race_system)
            .add_systems(
                Update,
                (keyboard_to_input_system, race_tick_system)
                    .chain()
                    .run_if(in_state(GameState::Racing)),
            );
    }
}

/// Build the [`Race`] from [`RaceConfig`] the first time `Racing` is entered.
///
/// Returning from `Paused` keeps the existing race.  An invalid config is
/// logged and replaced by the compiled defaults.
pub fn setup_race_system(
    mut commands: Commands,
    config: Res<RaceConfig>,
    existing: Option<Res<Race>>,
) {
    if existing.is_some() {
        return;
    }
    let race = match Race::from_config(&config) {
        Ok(race) => race,
        Err(e) => {
            warn!("Invalid race config: {e}; racing with defaults");
            match Race::from_config(&RaceConfig::default()) {
                Ok(race) => race,
                Err(e) => {
                    error!("Default race config rejected: {e}");
                    return;
                }
            }
        }
    };
    info!(
        "Race ready: {} checkpoints, {} laps",
        race.track().checkpoint_count(),
        race.session().max_laps
    );
    commands.insert_resource(race);
}

/// Translate the driving keys into [`InputState`].
///
/// - **Space** → boost
/// - **W** / **S** → forward / backward
/// - **A** / **D** → turn left / right
pub fn keyboard_to_input_system(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<InputState>) {
    *input = InputState {
        boost: keys.pressed(KeyCode::Space),
        forward: keys.pressed(KeyCode::KeyW),
        backward: keys.pressed(KeyCode::KeyS),
        turn_left: keys.pressed(KeyCode::KeyA),
        turn_right: keys.pressed(KeyCode::KeyD),
    };
}

/// Advance the race by this frame's delta and report what happened.
pub fn race_tick_system(
    time: Res<Time>,
    input: Res<InputState>,
    race: Option<ResMut<Race>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(mut race) = race else {
        return;
    };

    let report = race.tick(time.delta_secs(), &input);

    for advance in &report.advances {
        let label = vehicle_label(&race, advance.vehicle);
        debug!(
            "{label} passed checkpoint {} (next {})",
            advance.reached, advance.next
        );
        if let Some(lap) = advance.new_lap {
            if lap <= race.session().max_laps {
                info!("{label} started lap {lap}/{}", race.session().max_laps);
            } else {
                info!("{label} crossed the finish line");
            }
        }
    }

    if report.finished {
        info!("Race over after {} laps", race.session().max_laps);
        next_state.set(GameState::Finished);
    }
}
