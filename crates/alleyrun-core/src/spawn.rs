//! Spawn coordinator: collision-triggered camera ascent and sphere spawning.
//!
//! Collision events are drained from the stepper once per tick and matched
//! against the single armed sphere, keeping the ordering deterministic
//! instead of relying on engine callback timing.

use rapier3d::prelude::{ColliderHandle, CollisionEvent};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::physics::{PhysicsWorld, Surface};

/// Coordinator state. There is no error state: a sphere that never
/// reports a qualifying collision parks the machine in `Watching`
/// indefinitely, which is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPhase {
    /// Waiting for the armed sphere to hit the floor or another sphere.
    Watching,
    /// The ascent animation is playing; collisions are ignored.
    Ascending,
}

/// Watches collision events for the most recently spawned sphere and
/// sequences the ascend-then-spawn protocol.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnCoordinator {
    phase: SpawnPhase,
    armed: Option<ColliderHandle>,
}

impl Default for SpawnCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnCoordinator {
    pub fn new() -> Self {
        Self {
            phase: SpawnPhase::Watching,
            armed: None,
        }
    }

    pub fn phase(&self) -> SpawnPhase {
        self.phase
    }

    /// Arms collision watching on a freshly spawned sphere's collider.
    pub fn arm(&mut self, collider: ColliderHandle) {
        self.armed = Some(collider);
        self.phase = SpawnPhase::Watching;
    }

    /// Scans one tick's collision events. Returns true when the armed
    /// sphere first contacts a qualifying surface; the listener disarms
    /// itself on that event so each sphere instance fires at most once.
    pub fn observe(&mut self, world: &PhysicsWorld, events: &[CollisionEvent]) -> bool {
        if self.phase != SpawnPhase::Watching {
            return false;
        }
        let Some(armed) = self.armed else {
            return false;
        };

        for event in events {
            let CollisionEvent::Started(a, b, _) = event else {
                continue;
            };
            let other = if *a == armed {
                *b
            } else if *b == armed {
                *a
            } else {
                continue;
            };

            if matches!(
                world.surface_of(other),
                Some(Surface::Floor | Surface::Sphere)
            ) {
                debug!(?other, "armed sphere touched down, starting ascent");
                self.armed = None;
                self.phase = SpawnPhase::Ascending;
                return true;
            }
        }
        false
    }

    /// Called when the ascent animation completes; the caller spawns the
    /// new sphere and re-arms with its collider.
    pub fn finish_ascent(&mut self) {
        self.phase = SpawnPhase::Watching;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapier3d::prelude::*;

    struct Fixture {
        world: PhysicsWorld,
        floor: ColliderHandle,
        lane: ColliderHandle,
        spheres: Vec<ColliderHandle>,
    }

    fn fixture() -> Fixture {
        let mut world = PhysicsWorld::new();
        let floor = world.add_static_collider(
            ColliderBuilder::cuboid(10.0, 0.5, 10.0)
                .user_data(Surface::Floor.to_user_data())
                .build(),
        );
        let lane = world.add_static_collider(
            ColliderBuilder::cuboid(3.0, 0.5, 0.5)
                .user_data(Surface::Lane.to_user_data())
                .build(),
        );

        let mut spheres = Vec::new();
        for i in 0..2 {
            let body = world.add_rigid_body(
                RigidBodyBuilder::dynamic()
                    .translation(Vector::new(i as f32 * 2.0, 22.0, 0.0))
                    .build(),
            );
            spheres.push(world.add_collider(
                ColliderBuilder::ball(0.5)
                    .user_data(Surface::Sphere.to_user_data())
                    .build(),
                body,
            ));
        }

        Fixture {
            world,
            floor,
            lane,
            spheres,
        }
    }

    fn started(a: ColliderHandle, b: ColliderHandle) -> CollisionEvent {
        CollisionEvent::Started(a, b, CollisionEventFlags::empty())
    }

    #[test]
    fn test_qualifying_collision_triggers_once() {
        let f = fixture();
        let mut coordinator = SpawnCoordinator::new();
        coordinator.arm(f.spheres[0]);

        // Three qualifying events in one tick; only the first fires.
        let events = vec![
            started(f.spheres[0], f.floor),
            started(f.floor, f.spheres[0]),
            started(f.spheres[0], f.floor),
        ];
        assert!(coordinator.observe(&f.world, &events));
        assert_eq!(coordinator.phase(), SpawnPhase::Ascending);

        // A bouncing body re-reporting the contact must not re-trigger.
        assert!(!coordinator.observe(&f.world, &events));
    }

    #[test]
    fn test_lane_contact_does_not_trigger() {
        let f = fixture();
        let mut coordinator = SpawnCoordinator::new();
        coordinator.arm(f.spheres[0]);

        let events = vec![started(f.spheres[0], f.lane)];
        assert!(!coordinator.observe(&f.world, &events));
        assert_eq!(coordinator.phase(), SpawnPhase::Watching);
    }

    #[test]
    fn test_sphere_on_sphere_triggers() {
        let f = fixture();
        let mut coordinator = SpawnCoordinator::new();
        coordinator.arm(f.spheres[0]);

        let events = vec![started(f.spheres[0], f.spheres[1])];
        assert!(coordinator.observe(&f.world, &events));
    }

    #[test]
    fn test_only_armed_sphere_is_watched() {
        // Two spheres report qualifying collisions in the same tick;
        // only the armed one starts an ascent, and it starts exactly one.
        let f = fixture();
        let mut coordinator = SpawnCoordinator::new();
        coordinator.arm(f.spheres[1]);

        let events = vec![
            started(f.spheres[0], f.floor),
            started(f.spheres[1], f.floor),
        ];
        assert!(coordinator.observe(&f.world, &events));
        assert_eq!(coordinator.phase(), SpawnPhase::Ascending);
        assert!(!coordinator.observe(&f.world, &events));
    }

    #[test]
    fn test_disarmed_coordinator_is_inert() {
        let f = fixture();
        let mut coordinator = SpawnCoordinator::new();

        let events = vec![started(f.spheres[0], f.floor)];
        assert!(!coordinator.observe(&f.world, &events));
    }

    #[test]
    fn test_finish_ascent_returns_to_watching() {
        let f = fixture();
        let mut coordinator = SpawnCoordinator::new();
        coordinator.arm(f.spheres[0]);
        coordinator.observe(&f.world, &[started(f.spheres[0], f.floor)]);

        coordinator.finish_ascent();
        assert_eq!(coordinator.phase(), SpawnPhase::Watching);

        // Still disarmed until the new sphere is registered.
        assert!(!coordinator.observe(&f.world, &[started(f.spheres[0], f.floor)]));

        coordinator.arm(f.spheres[1]);
        assert!(coordinator.observe(&f.world, &[started(f.spheres[1], f.spheres[0])]));
    }
}
