//! Physics simulation using `Rapier3D` with deterministic behavior.

use rapier3d::crossbeam;
use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Fixed timestep for physics simulation (60Hz).
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Maximum number of catch-up substeps per tick.
pub const MAX_SUBSTEPS: u32 = 10;

/// Default gravity vector (downward, in scene units/s²).
///
/// The alley scene uses an exaggerated gravity so spheres roll briskly
/// down the lanes.
pub fn default_gravity() -> Vector {
    Vector::new(0.0, -120.0, 0.0)
}

/// Surface material tag carried in collider `user_data`.
///
/// Collision handling only cares about *what kind* of surface the other
/// body is, not which body it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    /// The alley floor plane.
    Floor,
    /// A lane row wall or deck.
    Lane,
    /// An edge rail or catch pocket.
    Rail,
    /// A rolling sphere.
    Sphere,
}

impl Surface {
    /// Encodes the tag into collider `user_data` (0 = untagged).
    pub fn to_user_data(self) -> u128 {
        match self {
            Self::Floor => 1,
            Self::Lane => 2,
            Self::Rail => 3,
            Self::Sphere => 4,
        }
    }

    /// Decodes a tag from collider `user_data`.
    pub fn from_user_data(user_data: u128) -> Option<Self> {
        match user_data {
            1 => Some(Self::Floor),
            2 => Some(Self::Lane),
            3 => Some(Self::Rail),
            4 => Some(Self::Sphere),
            _ => None,
        }
    }
}

/// Per-frame time bookkeeping for the stepper.
///
/// Both samples are initialized to the same placeholder constant, so the
/// computed delta is zero and [`PhysicsWorld::step_accumulated`] takes its
/// fixed-timestep branch: exactly one substep per rendered frame, never a
/// wall-clock-driven variable timestep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhysicsClock {
    pub time: f32,
    pub last_time: f32,
}

impl Default for PhysicsClock {
    fn default() -> Self {
        Self {
            time: 0.01,
            last_time: 0.01,
        }
    }
}

impl PhysicsClock {
    /// Millisecond-scale sample difference converted to seconds.
    pub fn delta(&self) -> f32 {
        (self.time - self.last_time) / 1000.0
    }

    /// Re-samples `last_time` at the end of a tick.
    pub fn advance(&mut self) {
        self.last_time = self.time;
    }
}

/// Physics world containing all `Rapier3D` components for deterministic simulation.
#[derive(Serialize, Deserialize)]
pub struct PhysicsWorld {
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    #[serde(skip, default = "PhysicsPipeline::new")]
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub gravity: Vector,
    pub frame: u64,
    accumulator: f32,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PhysicsWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsWorld")
            .field("frame", &self.frame)
            .field("rigid_body_count", &self.rigid_body_set.len())
            .field("collider_count", &self.collider_set.len())
            .field("gravity", &self.gravity)
            .finish_non_exhaustive()
    }
}

impl PhysicsWorld {
    /// Creates a new physics world with default settings.
    pub fn new() -> Self {
        Self::with_gravity(default_gravity())
    }

    /// Creates a new physics world with custom gravity.
    pub fn with_gravity(gravity: Vector) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: PHYSICS_DT,
            ..Default::default()
        };

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            gravity,
            frame: 0,
            accumulator: 0.0,
        }
    }

    /// Advances the physics simulation by one fixed timestep,
    /// returning the collision events produced by that step.
    pub fn step(&mut self) -> Vec<CollisionEvent> {
        let (collision_send, collision_recv) = crossbeam::channel::unbounded();
        let (contact_force_send, _contact_force_recv) = crossbeam::channel::unbounded();
        let collector = ChannelEventCollector::new(collision_send, contact_force_send);

        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &collector,
        );
        self.frame += 1;

        let mut events = Vec::new();
        while let Ok(event) = collision_recv.try_recv() {
            events.push(event);
        }
        events
    }

    /// Advances the simulation with an accumulated variable delta.
    ///
    /// A non-positive delta performs exactly one fixed step (the constant
    /// [`PhysicsClock`] always lands here). A positive delta is added to
    /// the internal accumulator and drained in fixed substeps, capped at
    /// [`MAX_SUBSTEPS`]; when the cap is hit the leftover time is dropped,
    /// bounding worst-case CPU at the cost of simulation lag under load.
    pub fn step_accumulated(&mut self, dt: f32) -> Vec<CollisionEvent> {
        if dt <= 0.0 {
            return self.step();
        }

        self.accumulator += dt;
        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= PHYSICS_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.step());
            self.accumulator -= PHYSICS_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        events
    }

    /// Adds a rigid body to the world and returns its handle.
    pub fn add_rigid_body(&mut self, rigid_body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(rigid_body)
    }

    /// Adds a collider attached to a rigid body.
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent, &mut self.rigid_body_set)
    }

    /// Adds a collider without a parent (static collider).
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.collider_set.insert(collider)
    }

    /// Gets an immutable reference to a rigid body.
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Gets a mutable reference to a rigid body.
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Returns the surface tag of a collider, if it carries one.
    pub fn surface_of(&self, handle: ColliderHandle) -> Option<Surface> {
        self.collider_set
            .get(handle)
            .and_then(|c| Surface::from_user_data(c.user_data))
    }

    /// Computes a deterministic hash of the current physics state.
    pub fn compute_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        self.frame.hash(&mut hasher);

        for (handle, body) in self.rigid_body_set.iter() {
            let (index, generation) = handle.into_raw_parts();
            index.hash(&mut hasher);
            generation.hash(&mut hasher);

            let pos = body.translation();
            hash_f32(pos.x, &mut hasher);
            hash_f32(pos.y, &mut hasher);
            hash_f32(pos.z, &mut hasher);

            let rot = body.rotation();
            hash_f32(rot.coords.x, &mut hasher);
            hash_f32(rot.coords.y, &mut hasher);
            hash_f32(rot.coords.z, &mut hasher);
            hash_f32(rot.coords.w, &mut hasher);

            let linvel = body.linvel();
            hash_f32(linvel.x, &mut hasher);
            hash_f32(linvel.y, &mut hasher);
            hash_f32(linvel.z, &mut hasher);

            let angvel = body.angvel();
            hash_f32(angvel.x, &mut hasher);
            hash_f32(angvel.y, &mut hasher);
            hash_f32(angvel.z, &mut hasher);
        }

        hasher.finish()
    }

    /// Returns the current simulation frame number.
    pub fn current_frame(&self) -> u64 {
        self.frame
    }
}

/// Hashes a f32 value by converting to bits.
fn hash_f32(value: f32, hasher: &mut impl Hasher) {
    value.to_bits().hash(hasher);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dynamic_ball(world: &mut PhysicsWorld, y: f32) -> (RigidBodyHandle, ColliderHandle) {
        let body = RigidBodyBuilder::dynamic()
            .translation(Vector::new(0.0, y, 0.0))
            .build();
        let handle = world.add_rigid_body(body);
        let collider = ColliderBuilder::ball(0.5)
            .restitution(0.5)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .user_data(Surface::Sphere.to_user_data())
            .build();
        let collider_handle = world.add_collider(collider, handle);
        (handle, collider_handle)
    }

    #[test]
    fn test_physics_world_creation() {
        let world = PhysicsWorld::new();
        assert_eq!(world.frame, 0);
        assert_eq!(world.integration_parameters.dt, PHYSICS_DT);
        assert_eq!(world.gravity.y, -120.0);
    }

    #[test]
    fn test_zero_delta_steps_exactly_once() {
        let mut world = PhysicsWorld::new();
        dynamic_ball(&mut world, 10.0);

        world.step_accumulated(0.0);
        assert_eq!(world.current_frame(), 1);

        world.step_accumulated(-1.0);
        assert_eq!(world.current_frame(), 2);
    }

    #[test]
    fn test_substep_cap_bounds_catchup() {
        let mut world = PhysicsWorld::new();
        dynamic_ball(&mut world, 10.0);

        // A ten-second spike wants 600 substeps; the cap truncates to 10.
        world.step_accumulated(10.0);
        assert_eq!(world.current_frame(), u64::from(MAX_SUBSTEPS));

        // The leftover accumulator is dropped, so a normal frame delta
        // performs exactly one more substep.
        world.step_accumulated(PHYSICS_DT);
        assert_eq!(world.current_frame(), u64::from(MAX_SUBSTEPS) + 1);
    }

    #[test]
    fn test_small_delta_accumulates() {
        let mut world = PhysicsWorld::new();
        dynamic_ball(&mut world, 10.0);

        // Half a timestep is not enough for a substep.
        world.step_accumulated(PHYSICS_DT / 2.0);
        assert_eq!(world.current_frame(), 0);

        // The second half completes the accumulated timestep.
        world.step_accumulated(PHYSICS_DT / 2.0 + 1.0e-4);
        assert_eq!(world.current_frame(), 1);
    }

    #[test]
    fn test_deterministic_simulation() {
        let mut world1 = PhysicsWorld::new();
        let mut world2 = PhysicsWorld::new();

        dynamic_ball(&mut world1, 10.0);
        dynamic_ball(&mut world2, 10.0);

        for _ in 0..100 {
            world1.step();
            world2.step();
        }

        assert_eq!(world1.compute_hash(), world2.compute_hash());
    }

    #[test]
    fn test_collision_events_reported() {
        let mut world = PhysicsWorld::new();

        let floor = ColliderBuilder::cuboid(10.0, 0.5, 10.0)
            .translation(Vector::new(0.0, -0.5, 0.0))
            .user_data(Surface::Floor.to_user_data())
            .build();
        let floor_handle = world.add_static_collider(floor);

        let (_, ball_collider) = dynamic_ball(&mut world, 1.5);

        let mut started = Vec::new();
        for _ in 0..60 {
            for event in world.step() {
                if let CollisionEvent::Started(a, b, _) = event {
                    started.push((a, b));
                }
            }
        }

        assert!(
            started
                .iter()
                .any(|&(a, b)| (a == ball_collider && b == floor_handle)
                    || (a == floor_handle && b == ball_collider)),
            "ball should contact the floor within a second"
        );
    }

    #[test]
    fn test_surface_tag_roundtrip() {
        for surface in [Surface::Floor, Surface::Lane, Surface::Rail, Surface::Sphere] {
            assert_eq!(Surface::from_user_data(surface.to_user_data()), Some(surface));
        }
        assert_eq!(Surface::from_user_data(0), None);
    }

    #[test]
    fn test_clock_delta_is_zero() {
        let mut clock = PhysicsClock::default();
        assert_eq!(clock.delta(), 0.0);
        clock.advance();
        assert_eq!(clock.delta(), 0.0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut world = PhysicsWorld::new();
        dynamic_ball(&mut world, 5.0);

        for _ in 0..10 {
            world.step();
        }

        let hash_before = world.compute_hash();

        let serialized = serde_json::to_string(&world).expect("Failed to serialize");
        let deserialized: PhysicsWorld =
            serde_json::from_str(&serialized).expect("Failed to deserialize");

        assert_eq!(hash_before, deserialized.compute_hash());
    }
}
