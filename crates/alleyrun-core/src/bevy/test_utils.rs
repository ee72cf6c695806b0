//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `AlleyHeadlessPlugin` for testing simulation logic
//! without a rendering or windowing backend.

use bevy::prelude::*;

use crate::bevy::components::SphereVisual;
use crate::bevy::plugin::AlleyHeadlessPlugin;
use crate::bevy::resources::SimulationRes;
use crate::physics::PHYSICS_DT;
use crate::scene::AlleyConfig;
use crate::sim::Simulation;

/// A headless Bevy app wrapper for testing.
pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Create a new test app with the default alley scene.
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::with_config(AlleyConfig::default_alley())
    }

    /// Create a new test app with a specific scene configuration.
    pub fn with_config(config: AlleyConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::input::InputPlugin);
        app.add_plugins(AlleyHeadlessPlugin { config });
        // Pause virtual time so that only explicit step_physics calls
        // advance the simulation — ensures deterministic behavior.
        app.world_mut().resource_mut::<Time<Virtual>>().pause();
        // Run one update to initialize all resources
        app.update();
        Self { app }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Advance the simulation by exactly `n` fixed timesteps.
    ///
    /// Uses `Time<Fixed>::accumulate_overstep` to feed time directly into
    /// the fixed-timestep accumulator, bypassing virtual time. Combined
    /// with paused virtual time this gives fully deterministic ticks.
    pub fn step_physics(&mut self, n: usize) {
        let dt = std::time::Duration::from_secs_f32(PHYSICS_DT);
        for _ in 0..n {
            self.app
                .world_mut()
                .resource_mut::<Time<Fixed>>()
                .accumulate_overstep(dt);
            self.app.update();
        }
    }

    /// Get a reference to the headless simulation.
    pub fn simulation(&self) -> &Simulation {
        &self.app.world().resource::<SimulationRes>().0
    }

    /// Count the sphere mirror entities currently spawned.
    pub fn sphere_entity_count(&mut self) -> usize {
        let world = self.app.world_mut();
        let mut query = world.query::<&SphereVisual>();
        query.iter(world).count()
    }

    /// Get a mutable reference to the World.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
