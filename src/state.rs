//! Top-level `GameState` and the key-driven transitions between states.
//!
//! ## States
//!
//! | State      | Description                                          |
//! |------------|------------------------------------------------------|
//! | `Start`    | Initial state; waiting for Enter / Space             |
//! | `Racing`   | Race ticking every frame                             |
//! | `Paused`   | Race frozen; Escape / P resumes                      |
//! | `Finished` | Player passed the final lap; terminal                |
//!
//! ## Systems (registered by `GameStatePlugin`)
//!
//! | System                      | Schedule                 | Purpose                          |
//! |-----------------------------|--------------------------|----------------------------------|
//! | `start_race_input_system`   | `Update / in Start`      | Enter / Space → `Racing`         |
//! | `toggle_pause_system`       | `Update / in Racing`     | Escape / P → `Paused`            |
//! | `pause_resume_input_system` | `Update / in Paused`     | Escape / P → `Racing`            |
//! | `pause_race`                | `OnEnter(Paused)`        | Set the session pause flag       |
//! | `resume_race`               | `OnExit(Paused)`         | Clear the session pause flag     |
//! | `announce_results`          | `OnEnter(Finished)`      | Log final lap counts             |

use crate::race::Race;
use bevy::prelude::*;

/// Top-level application state machine.
///
/// The race tick in [`crate::simulation::SimulationPlugin`] runs under
/// `.run_if(in_state(GameState::Racing))`, so it is fully inactive in every
/// other state.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Start,
    Racing,
    Paused,
    Finished,
}

const PAUSE_KEYS: [KeyCode; 2] = [KeyCode::Escape, KeyCode::KeyP];

/// Registers `GameState` and its transitions.
///
/// Add before [`crate::simulation::SimulationPlugin`] so the state exists
/// when its `run_if` conditions are built.
pub struct GameStatePlugin;

impl Plugin for GameStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<ButtonInput<KeyCode>>()
            .add_systems(OnEnter(GameState::Paused), pause_race)
            .add_systems(OnExit(GameState::Paused), resume_race)
            .add_systems(OnEnter(GameState::Finished), announce_results)
            .add_systems(
                Update,
                (
                    start_race_input_system.run_if(in_state(GameState::Start)),
                    toggle_pause_system.run_if(in_state(GameState::Racing)),
                    pause_resume_input_system.run_if(in_state(GameState::Paused)),
                ),
            );
    }
}

/// Enter or Space on the start screen → `Racing`.
pub fn start_race_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.any_just_pressed([KeyCode::Enter, KeyCode::Space]) {
        info!("Race started");
        next_state.set(GameState::Racing);
    }
}

/// Escape / P while in `Racing` → `Paused`.
pub fn toggle_pause_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.any_just_pressed(PAUSE_KEYS) {
        next_state.set(GameState::Paused);
    }
}

/// Escape / P while in `Paused` → back to `Racing`.
pub fn pause_resume_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.any_just_pressed(PAUSE_KEYS) {
        next_state.set(GameState::Racing);
    }
}

/// Mirror the `Paused` state into the session so a direct `Race::tick` is gated too.
pub fn pause_race(race: Option<ResMut<Race>>) {
    if let Some(mut race) = race {
        race.session_mut().paused = true;
        info!("Race paused");
    }
}

pub fn resume_race(race: Option<ResMut<Race>>) {
    if let Some(mut race) = race {
        if !race.session().ended {
            race.session_mut().paused = false;
            info!("Race resumed");
        }
    }
}

pub fn announce_results(race: Option<Res<Race>>) {
    let Some(race) = race else {
        return;
    };
    for (index, vehicle) in race.vehicles().iter().enumerate() {
        info!(
            "Final: {} finished {} laps (checkpoint {})",
            vehicle_label(&race, index),
            vehicle.current_lap,
            vehicle.current_checkpoint
        );
    }
}

/// "player" or "opponent N" for log lines.
pub fn vehicle_label(race: &Race, index: usize) -> String {
    if index == race.player_index() {
        "player".to_string()
    } else {
        format!("opponent {index}")
    }
}
