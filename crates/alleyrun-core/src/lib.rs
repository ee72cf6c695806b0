//! Alleyrun Core Library
//!
//! Headless simulation engine for the bowling-alley scene: deterministic
//! `Rapier3D` physics, verbatim body-to-visual transform sync, the
//! camera-target animation channel and the collision-driven spawn cycle.
//!
//! The engine runs standalone (pure Rust, used by the test suite) or
//! embedded in a Bevy app through the `bevy` module; only windowing
//! (`bevy_winit` + `webgpu`) sits behind the `windowed` feature.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod camera;
pub mod physics;
pub mod registry;
pub mod scene;
pub mod sim;
pub mod spawn;
pub mod tween;

// Bevy integration
pub mod bevy;

pub use camera::{CameraDirector, CameraPose, OrbitInput, OrbitState, FOLLOW_HEIGHT};
pub use physics::{
    default_gravity, PhysicsClock, PhysicsWorld, Surface, MAX_SUBSTEPS, PHYSICS_DT,
};
pub use registry::{BodyRegistry, SphereId, SyncPair, VisualTransform};
pub use scene::{AlleyConfig, Color, SceneError, Slab, SphereParams};
pub use sim::{Simulation, TickReport};
pub use spawn::{SpawnCoordinator, SpawnPhase};
pub use tween::{
    Easing, Tween, TweenChannel, TweenLabel, TweenProgress, ASCENT_DURATION, ASCENT_END,
    DESCENT_DURATION, DESCENT_END, START_DELAY,
};
