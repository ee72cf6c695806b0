//! Body registry: the rigid-body ↔ visual-object association.

use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};

use crate::physics::PhysicsWorld;

/// Unique identifier for a registered sphere.
pub type SphereId = u32;

/// Render-side transform record for one driven visual object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualTransform {
    pub translation: Vector,
    pub rotation: Rotation,
}

impl VisualTransform {
    fn at(translation: Vector) -> Self {
        Self {
            translation,
            rotation: Rotation::identity(),
        }
    }
}

/// One (rigid body, visual object) association.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SyncPair {
    pub id: SphereId,
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
    pub visual: VisualTransform,
}

/// Append-only registry of sync pairs, iterated once per tick.
///
/// There is intentionally no removal path: every spawn cycle permanently
/// adds a sphere to the world and the registry, so the pile at the floor
/// keeps growing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyRegistry {
    pairs: Vec<SyncPair>,
    next_id: SphereId,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sync pair for a freshly created sphere.
    pub fn register(
        &mut self,
        world: &PhysicsWorld,
        body: RigidBodyHandle,
        collider: ColliderHandle,
    ) -> SphereId {
        let id = self.next_id;
        self.next_id += 1;

        let translation = world
            .get_rigid_body(body)
            .map_or_else(Vector::zeros, |b| *b.translation());
        self.pairs.push(SyncPair {
            id,
            body,
            collider,
            visual: VisualTransform::at(translation),
        });
        id
    }

    /// Copies every registered body's post-step position and orientation
    /// onto its visual transform, verbatim. No interpolation or smoothing.
    pub fn sync_from(&mut self, world: &PhysicsWorld) {
        for pair in &mut self.pairs {
            if let Some(body) = world.get_rigid_body(pair.body) {
                pair.visual.translation = *body.translation();
                pair.visual.rotation = *body.rotation();
            }
        }
    }

    /// All registered pairs, in insertion order.
    pub fn pairs(&self) -> &[SyncPair] {
        &self.pairs
    }

    /// Gets a pair by sphere id.
    pub fn get(&self, id: SphereId) -> Option<&SyncPair> {
        self.pairs.iter().find(|p| p.id == id)
    }

    /// Number of registered pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
