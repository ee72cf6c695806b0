//! Systems for the alley simulation.
//!
//! Organized by functionality:
//! - simulation: ticking the headless engine and mirroring transforms
//! - camera: orbit input, mode toggle, per-frame camera pose
//! - scene: static geometry, camera and lighting setup (rendering only)

use bevy::prelude::*;
use rapier3d::prelude::{Rotation, Vector};

pub mod camera;
pub mod scene;
pub mod simulation;

pub use camera::*;
pub use scene::*;
pub use simulation::*;

pub(crate) fn to_vec3(v: Vector) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub(crate) fn to_quat(r: Rotation) -> Quat {
    Quat::from_xyzw(r.coords.x, r.coords.y, r.coords.z, r.coords.w)
}
