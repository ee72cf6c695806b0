//! Bevy integration for the alley simulation.
//!
//! The headless engine in the crate root is wrapped in ECS resources and
//! driven from `FixedUpdate`; rendering systems only read the resulting
//! transforms, so the app and the test suite share the same logic path.

pub mod components;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_utils;

pub use components::*;
pub use events::*;
pub use plugin::{AlleyHeadlessPlugin, AlleyRunPlugin};
pub use resources::*;
