use bevy::math::Rect;
use bevy::prelude::*;
use bevy::window::WindowResolution;

use topdown_racer::config::{self, RaceConfig};
use topdown_racer::race::Race;
use topdown_racer::simulation::SimulationPlugin;
use topdown_racer::state::GameStatePlugin;

/// Window size; the race works in screen pixels with the origin top-left.
const SCREEN_WIDTH: f32 = 960.0;
const SCREEN_HEIGHT: f32 = 540.0;

/// Setup camera for 2D rendering
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Race screen coordinates (origin top-left, +Y down) → Bevy world (centred, +Y up).
fn to_world(p: Vec2) -> Vec2 {
    Vec2::new(p.x - SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0 - p.y)
}

fn draw_outline(gizmos: &mut Gizmos, corners: [Vec2; 4], color: Color) {
    for i in 0..4 {
        gizmos.line_2d(to_world(corners[i]), to_world(corners[(i + 1) % 4]), color);
    }
}

fn rect_corners(rect: Rect) -> [Vec2; 4] {
    [
        rect.min,
        Vec2::new(rect.max.x, rect.min.y),
        rect.max,
        Vec2::new(rect.min.x, rect.max.y),
    ]
}

/// Outline the track, the checkpoints and both cars.
fn draw_race_gizmos(mut gizmos: Gizmos, race: Option<Res<Race>>) {
    let Some(race) = race else {
        return;
    };
    let track = race.track();
    draw_outline(&mut gizmos, rect_corners(track.surface_bounds()), Color::srgb(0.5, 0.5, 0.5));

    let next = race.player().current_checkpoint;
    for index in 0..track.checkpoint_count() {
        let Some(bounds) = track.checkpoint_bounds(index) else {
            continue;
        };
        let color = if index == next {
            Color::srgb(1.0, 0.85, 0.1)
        } else {
            Color::srgb(0.4, 0.4, 0.2)
        };
        draw_outline(&mut gizmos, rect_corners(bounds), color);
    }

    for vehicle in race.vehicles() {
        let heading = Vec2::from_angle(vehicle.rotation);
        let h = vehicle.half_size;
        let corners = [
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
        ]
        .map(|c| vehicle.position + heading.rotate(c));
        let color = if vehicle.is_player() {
            Color::srgb(0.2, 0.6, 1.0)
        } else {
            Color::srgb(1.0, 0.3, 0.3)
        };
        draw_outline(&mut gizmos, corners, color);
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Top-Down Racer".into(),
                resolution: WindowResolution::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.13, 0.38, 0.16)))
        // Compiled defaults; load_race_config overwrites them from assets/race.toml.
        .insert_resource(RaceConfig::default())
        .add_plugins((GameStatePlugin, SimulationPlugin))
        .add_systems(Startup, (config::load_race_config, setup_camera))
        .add_systems(Update, draw_race_gizmos)
        .run();
}
