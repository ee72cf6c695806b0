//! ECS components for the alley scene.

use bevy::prelude::*;

use crate::registry::SphereId;

/// Marker for the entity mirroring one registered sphere.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SphereVisual(pub SphereId);

/// Marker for the single scene camera.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct MainCamera;

/// Marker for static scene geometry entities.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SlabVisual;

/// Marker for the invisible entity mirroring the camera follow target.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CameraTargetGizmo;
