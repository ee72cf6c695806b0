//! Fixed-update systems driving the headless simulation.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::bevy::components::{CameraTargetGizmo, SphereVisual};
use crate::bevy::events::{AscentStartedEvent, SphereSpawnedEvent};
use crate::bevy::resources::SimulationRes;
use crate::bevy::systems::{to_quat, to_vec3};
use crate::registry::SphereId;

/// Advances the simulation by one tick and republishes its report as
/// ECS messages.
pub fn run_simulation_tick(
    mut sim: ResMut<SimulationRes>,
    mut spawned_events: MessageWriter<SphereSpawnedEvent>,
    mut ascent_events: MessageWriter<AscentStartedEvent>,
) {
    let report = sim.0.tick();
    if report.ascent_started {
        ascent_events.write(AscentStartedEvent);
    }
    if let Some(id) = report.spawned {
        spawned_events.write(SphereSpawnedEvent { id });
    }
}

/// Spawns a mirror entity for every registered sphere that does not have
/// one yet. Covers both the initial sphere (created before the app ran)
/// and every later spawn.
pub fn spawn_sphere_entities(
    mut commands: Commands,
    sim: Res<SimulationRes>,
    existing: Query<&SphereVisual>,
) {
    let known: HashSet<SphereId> = existing.iter().map(|v| v.0).collect();
    for pair in sim.0.registry().pairs() {
        if known.contains(&pair.id) {
            continue;
        }
        commands.spawn((
            SphereVisual(pair.id),
            Transform::from_translation(to_vec3(pair.visual.translation)),
        ));
    }
}

/// Spawns the invisible entity that mirrors the animated camera target.
pub fn setup_camera_target(mut commands: Commands, sim: Res<SimulationRes>) {
    commands.spawn((
        CameraTargetGizmo,
        Transform::from_translation(to_vec3(sim.0.camera_target())),
    ));
}

/// Keeps the camera-target gizmo on the animated point.
pub fn update_camera_target_gizmo(
    sim: Res<SimulationRes>,
    mut gizmos: Query<&mut Transform, With<CameraTargetGizmo>>,
) {
    for mut transform in gizmos.iter_mut() {
        transform.translation = to_vec3(sim.0.camera_target());
    }
}

/// Copies every synced visual transform onto its mirror entity, verbatim.
pub fn writeback_transforms(
    sim: Res<SimulationRes>,
    mut visuals: Query<(&SphereVisual, &mut Transform)>,
) {
    for (visual, mut transform) in visuals.iter_mut() {
        if let Some(pair) = sim.0.registry().get(visual.0) {
            transform.translation = to_vec3(pair.visual.translation);
            transform.rotation = to_quat(pair.visual.rotation);
        }
    }
}
