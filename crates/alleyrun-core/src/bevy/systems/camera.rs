//! Camera systems: orbit input, mode toggle and per-frame pose.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use tracing::info;

use crate::bevy::components::MainCamera;
use crate::bevy::resources::{CameraDirectorRes, SimulationRes};
use crate::bevy::systems::to_vec3;
use crate::camera::OrbitInput;

/// Radians of orbit per pixel of mouse drag.
const ROTATE_SPEED: f32 = 0.005;
/// Scene units of zoom per scroll line.
const ZOOM_SPEED: f32 = 2.0;

/// Toggles between manual orbit and auto-follow on `C`.
pub fn toggle_camera_mode(
    keys: Res<ButtonInput<KeyCode>>,
    mut director: ResMut<CameraDirectorRes>,
) {
    if keys.just_pressed(KeyCode::KeyC) {
        let auto = !director.0.is_auto();
        director.0.set_auto(auto);
        info!(auto, "camera mode toggled");
    }
}

/// Feeds accumulated mouse input into the orbit controller.
///
/// The director drops the input on the floor in auto mode, so this
/// system does not need to know which mode is active.
pub fn collect_orbit_input(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    mut director: ResMut<CameraDirectorRes>,
) {
    let mut input = OrbitInput {
        zoom: -scroll.delta.y * ZOOM_SPEED,
        ..OrbitInput::default()
    };
    if buttons.pressed(MouseButton::Left) {
        input.yaw = -motion.delta.x * ROTATE_SPEED;
        input.pitch = motion.delta.y * ROTATE_SPEED;
    }
    if input != OrbitInput::default() {
        director.0.apply_input(input);
    }
}

/// Drives the director from the animated follow target and writes the
/// resulting pose onto the camera entity.
pub fn apply_camera_pose(
    sim: Res<SimulationRes>,
    mut director: ResMut<CameraDirectorRes>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    let pose = director.0.drive(sim.0.camera_target());
    for mut transform in cameras.iter_mut() {
        transform.translation = to_vec3(pose.position);
        transform.look_at(to_vec3(pose.look_at), Vec3::Y);
    }
}
