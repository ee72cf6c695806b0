//! Bevy plugins for the alley simulation.
//!
//! Provides:
//! - `AlleyHeadlessPlugin`: Logic-only plugin (no rendering/window
//!   dependencies) for headless testing
//! - `AlleyRunPlugin`: Full plugin including `AlleyHeadlessPlugin` +
//!   scene setup and rendering systems

use bevy::prelude::*;

use crate::bevy::events::{AscentStartedEvent, SphereSpawnedEvent};
use crate::bevy::resources::{CameraDirectorRes, SimulationRes};
use crate::bevy::systems;
use crate::physics::PHYSICS_DT;
use crate::scene::AlleyConfig;

// ============================================================================
// Headless Plugin (logic only, no rendering/window dependencies)
// ============================================================================

/// Headless plugin containing the full simulation loop without rendering
/// or window dependencies.
///
/// Use this plugin in tests with `MinimalPlugins` to run the fixed-update
/// tick, entity mirroring and camera logic without a windowing or
/// rendering backend.
pub struct AlleyHeadlessPlugin {
    pub config: AlleyConfig,
}

impl Default for AlleyHeadlessPlugin {
    fn default() -> Self {
        Self {
            config: AlleyConfig::default_alley(),
        }
    }
}

impl Plugin for AlleyHeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_seconds(f64::from(PHYSICS_DT)));

        app.insert_resource(SimulationRes::new(self.config.clone()))
            .init_resource::<CameraDirectorRes>();

        app.add_message::<SphereSpawnedEvent>()
            .add_message::<AscentStartedEvent>();

        app.add_systems(Startup, systems::setup_camera_target);

        // One simulation tick per fixed update, then mirror the results
        // into the ECS.
        app.add_systems(
            FixedUpdate,
            (
                systems::run_simulation_tick,
                systems::spawn_sphere_entities,
                systems::writeback_transforms,
                systems::update_camera_target_gizmo,
            )
                .chain(),
        );

        // Camera logic runs on the render cadence, not the physics one.
        app.add_systems(
            Update,
            (
                systems::toggle_camera_mode,
                systems::collect_orbit_input,
                systems::apply_camera_pose,
            )
                .chain(),
        );
    }
}

// ============================================================================
// Full Plugin (headless + rendering)
// ============================================================================

/// Full plugin: headless logic plus scene geometry, camera, lighting and
/// sphere meshes. Requires the render and PBR plugins.
pub struct AlleyRunPlugin {
    pub config: AlleyConfig,
}

impl Default for AlleyRunPlugin {
    fn default() -> Self {
        Self {
            config: AlleyConfig::default_alley(),
        }
    }
}

impl Plugin for AlleyRunPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AlleyHeadlessPlugin {
            config: self.config.clone(),
        });

        app.add_systems(
            Startup,
            (
                systems::setup_scene,
                systems::setup_camera,
                systems::setup_lighting,
            ),
        );

        app.add_systems(Update, systems::attach_sphere_meshes);
    }
}
