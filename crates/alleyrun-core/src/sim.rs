//! Top-level simulation context: one `tick()` call per rendered frame.
//!
//! Owns the physics world, the body registry, the spawn coordinator and
//! the camera-target animation channel, and sequences them in a fixed
//! order so every subsystem observes a consistent world state.

use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::physics::{PhysicsClock, PhysicsWorld, Surface, PHYSICS_DT};
use crate::registry::{BodyRegistry, SphereId};
use crate::scene::AlleyConfig;
use crate::spawn::{SpawnCoordinator, SpawnPhase};
use crate::tween::{Tween, TweenChannel, TweenLabel, TweenProgress, ASCENT_END};

/// Initial position of the animated camera follow target.
pub fn initial_camera_target() -> Vector {
    Vector::new(0.0, 20.0, 2.0)
}

/// What happened during one tick, for layers that need to react
/// (visual spawning, logging, tests).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// A new sphere was spawned this tick.
    pub spawned: Option<SphereId>,
    /// The armed sphere touched down and the ascent animation began.
    pub ascent_started: bool,
}

/// The complete headless simulation.
#[derive(Debug, Serialize, Deserialize)]
pub struct Simulation {
    world: PhysicsWorld,
    registry: BodyRegistry,
    coordinator: SpawnCoordinator,
    channel: TweenChannel,
    clock: PhysicsClock,
    camera_target: Vector,
    config: AlleyConfig,
}

impl Simulation {
    /// Builds the scene, spawns the first sphere and starts the opening
    /// camera descent.
    pub fn new(config: AlleyConfig) -> Self {
        let mut world = PhysicsWorld::new();
        config.apply_to_world(&mut world);

        let mut sim = Self {
            world,
            registry: BodyRegistry::new(),
            coordinator: SpawnCoordinator::new(),
            channel: TweenChannel::new(),
            clock: PhysicsClock::default(),
            camera_target: initial_camera_target(),
            config,
        };
        sim.spawn_sphere();
        sim.channel.start(Tween::descent());
        sim
    }

    /// Spawns one sphere at the configured spawn point, registers it for
    /// transform sync and arms the coordinator on its collider.
    fn spawn_sphere(&mut self) -> SphereId {
        let params = self.config.sphere;
        let [x, y, z] = params.spawn_point;

        let body = self.world.add_rigid_body(
            RigidBodyBuilder::dynamic()
                .translation(Vector::new(x, y, z))
                .lock_rotations()
                .linear_damping(params.linear_damping)
                .ccd_enabled(true)
                .build(),
        );
        let collider = self.world.add_collider(
            ColliderBuilder::ball(params.radius)
                .mass(params.mass)
                .restitution(params.restitution)
                .friction(params.friction)
                .active_events(ActiveEvents::COLLISION_EVENTS)
                .user_data(Surface::Sphere.to_user_data())
                .build(),
            body,
        );

        let id = self.registry.register(&self.world, body, collider);
        self.coordinator.arm(collider);
        info!(id, "spawned sphere");
        id
    }

    /// Advances the whole simulation by one frame.
    ///
    /// Order matters: step physics, sync visual transforms, react to
    /// collisions, then advance the animation so a completed ascent
    /// spawns its replacement sphere within the same tick.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();

        let events = self.world.step_accumulated(self.clock.delta());
        self.registry.sync_from(&self.world);

        if self.coordinator.observe(&self.world, &events) {
            self.channel.start(Tween::ascent());
            report.ascent_started = true;
        }

        match self.channel.advance(PHYSICS_DT, &mut self.camera_target.y) {
            TweenProgress::Finished(TweenLabel::Ascent) => {
                self.camera_target.y = ASCENT_END;
                self.coordinator.finish_ascent();
                report.spawned = Some(self.spawn_sphere());
                self.channel.start(Tween::descent());
            }
            TweenProgress::Finished(TweenLabel::Descent)
            | TweenProgress::Idle
            | TweenProgress::Delayed
            | TweenProgress::Running => {}
        }

        self.clock.advance();
        report
    }

    /// The animated point the auto camera follows.
    pub fn camera_target(&self) -> Vector {
        self.camera_target
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn config(&self) -> &AlleyConfig {
        &self.config
    }

    pub fn spawn_phase(&self) -> SpawnPhase {
        self.coordinator.phase()
    }

    /// Label of the active camera-target animation, if any.
    pub fn active_animation(&self) -> Option<TweenLabel> {
        self.channel.active_label()
    }
}
