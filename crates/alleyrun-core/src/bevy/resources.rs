//! ECS Resources wrapping the headless engine.

use bevy::prelude::*;

use crate::camera::CameraDirector;
use crate::scene::AlleyConfig;
use crate::sim::Simulation;

/// The headless simulation, ticked once per fixed update.
#[derive(Resource, Debug)]
pub struct SimulationRes(pub Simulation);

impl SimulationRes {
    pub fn new(config: AlleyConfig) -> Self {
        Self(Simulation::new(config))
    }
}

/// The camera director, driven once per frame from the follow target.
#[derive(Resource, Debug, Default)]
pub struct CameraDirectorRes(pub CameraDirector);

/// Shared mesh and material handles for sphere visuals.
#[derive(Resource, Debug, Clone)]
pub struct SphereAssets {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}
