//! ECS Messages for the alley simulation.
//!
//! Note: In Bevy 0.18+, buffered events use the Message trait.

use bevy::prelude::*;

use crate::registry::SphereId;

/// Message fired when the simulation spawns a new sphere.
#[derive(Message, Debug, Clone, Copy)]
pub struct SphereSpawnedEvent {
    /// Registry id of the new sphere.
    pub id: SphereId,
}

/// Message fired when the armed sphere touches down and the camera
/// ascent begins.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct AscentStartedEvent;
