//! Headless tests for the race plugins and the [`GameState`] flow.
//!
//! These tests use [`MinimalPlugins`] — no window, no rendering — so they run
//! fast and deterministically in CI.  Time advances by a fixed 1/60 s per
//! update and keys are pressed directly on `ButtonInput<KeyCode>`.
//!
//! Covered scenarios:
//! 1. Default initial state is `Start`; Enter moves to `Racing` and builds the race.
//! 2. Holding W drives the player and scrolls the track.
//! 3. Escape pauses (session flag set, race frozen) and resumes.
//! 4. Passing the final lap moves to `Finished` and freezes the race.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;
use topdown_racer::config::RaceConfig;
use topdown_racer::race::Race;
use topdown_racer::simulation::SimulationPlugin;
use topdown_racer::state::{GameState, GameStatePlugin};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn seeded_config() -> RaceConfig {
    RaceConfig {
        ai_seed: Some(11),
        ..RaceConfig::default()
    }
}

/// Build a minimal headless app with both race plugins and a fixed time step.
///
/// `initial` forces the starting state (mirrors skipping the start screen);
/// `None` keeps the default `Start`.
fn build_app(config: RaceConfig, initial: Option<GameState>) -> App {
    let mut app = App::new();
    // `StatesPlugin` adds the `StateTransition` schedule needed by `insert_state`.
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
        1.0 / 60.0,
    )));
    app.insert_resource(config);
    if let Some(state) = initial {
        app.insert_state(state);
    }
    app.add_plugins((GameStatePlugin, SimulationPlugin));
    app
}

fn race_app() -> App {
    build_app(seeded_config(), None)
}

/// Build the app already in `Racing` and run one frame so the race exists.
fn racing_app() -> App {
    let mut app = build_app(seeded_config(), Some(GameState::Racing));
    app.update();
    app
}

fn state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

fn race(app: &App) -> &Race {
    app.world().resource::<Race>()
}

/// Press `key` for one frame, then release it and clear the edge flags.
fn tap(app: &mut App, key: KeyCode) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    app.update();
    let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keys.release(key);
    keys.clear();
}

fn hold(app: &mut App, key: KeyCode, frames: usize) {
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(key);
    for _ in 0..frames {
        app.update();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .clear();
    }
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(key);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn default_state_is_start_without_a_race() {
    let mut app = race_app();
    app.update();
    assert_eq!(state(&app), GameState::Start);
    assert!(app.world().get_resource::<Race>().is_none());
}

#[test]
fn enter_starts_the_race() {
    let mut app = race_app();
    app.update();

    tap(&mut app, KeyCode::Enter);
    app.update(); // StateTransition fires; OnEnter(Racing) builds the race

    assert_eq!(state(&app), GameState::Racing);
    let race = race(&app);
    assert_eq!(race.vehicles().len(), 2);
    assert_eq!(race.player().current_checkpoint, 8);
}

#[test]
fn holding_forward_drives_and_scrolls() {
    let mut app = racing_app();
    hold(&mut app, KeyCode::KeyW, 30);

    let race = race(&app);
    assert!(race.player().velocity.x > 0.0, "{:?}", race.player().velocity);
    assert!(race.track().scroll().x < 0.0);
}

#[test]
fn escape_pauses_and_freezes_the_race() {
    let mut app = racing_app();
    hold(&mut app, KeyCode::KeyW, 10);

    tap(&mut app, KeyCode::Escape);
    app.update();
    assert_eq!(state(&app), GameState::Paused);
    assert!(race(&app).session().paused);

    let scroll = race(&app).track().scroll();
    hold(&mut app, KeyCode::KeyW, 10);
    assert_eq!(race(&app).track().scroll(), scroll);

    tap(&mut app, KeyCode::Escape);
    app.update();
    assert_eq!(state(&app), GameState::Racing);
    assert!(!race(&app).session().paused);
}

#[test]
fn passing_max_laps_finishes_and_freezes() {
    let mut app = racing_app();
    app.world_mut().resource_mut::<Race>().player_mut().current_lap = 4;

    app.update(); // tick ends the session and requests Finished
    app.update(); // StateTransition applies it
    assert_eq!(state(&app), GameState::Finished);
    assert!(race(&app).session().ended);

    let velocity = race(&app).player().velocity;
    let scroll = race(&app).track().scroll();
    hold(&mut app, KeyCode::KeyW, 10);
    assert_eq!(race(&app).player().velocity, velocity);
    assert_eq!(race(&app).track().scroll(), scroll);
    assert_eq!(state(&app), GameState::Finished);
}

#[test]
fn invalid_config_falls_back_to_defaults() {
    let config = RaceConfig {
        checkpoints: Vec::new(),
        ..seeded_config()
    };
    let mut app = build_app(config, Some(GameState::Racing));
    app.update();

    assert_eq!(race(&app).track().checkpoint_count(), 9);
}
