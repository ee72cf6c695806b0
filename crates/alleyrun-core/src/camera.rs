//! Two-mode camera director: manual orbit or auto-follow.

use rapier3d::prelude::Vector;
use serde::{Deserialize, Serialize};

/// Vertical offset of the camera above the follow target in auto mode.
pub const FOLLOW_HEIGHT: f32 = 2.0;

/// Initial camera vantage point over the alley.
pub fn initial_camera_position() -> Vector {
    Vector::new(20.0, 20.0, 80.0)
}

/// Orbit constraints, in radians / scene units.
const MIN_PITCH: f32 = 0.0;
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2;
const MAX_YAW: f32 = 50.0 * std::f32::consts::PI / 180.0;
const MIN_DISTANCE: f32 = 40.0;
const MAX_DISTANCE: f32 = 90.0;
/// Per-frame interpolation factor toward the orbit input target.
const ORBIT_DAMPING: f32 = 0.02;

/// Spherical orbit coordinates around the scene origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitState {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl OrbitState {
    /// Orbit coordinates that reproduce the initial camera position.
    pub fn initial() -> Self {
        let pos = initial_camera_position();
        let distance = (pos.x * pos.x + pos.y * pos.y + pos.z * pos.z).sqrt();
        Self {
            yaw: pos.x.atan2(pos.z),
            pitch: (pos.y / distance).asin(),
            distance,
        }
    }

    fn clamped(self) -> Self {
        Self {
            yaw: self.yaw.clamp(-MAX_YAW, MAX_YAW),
            pitch: self.pitch.clamp(MIN_PITCH, MAX_PITCH),
            distance: self.distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
        }
    }

    fn position(self) -> Vector {
        let horizontal = self.distance * self.pitch.cos();
        Vector::new(
            horizontal * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            horizontal * self.yaw.cos(),
        )
    }

    fn lerp_toward(&mut self, target: Self, factor: f32) {
        self.yaw += (target.yaw - self.yaw) * factor;
        self.pitch += (target.pitch - self.pitch) * factor;
        self.distance += (target.distance - self.distance) * factor;
    }
}

/// One frame of orbit input deltas (already scaled by the input layer).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrbitInput {
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
}

/// Computed camera placement for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vector,
    pub look_at: Vector,
}

/// Drives the camera from exactly one of two sources per frame:
/// damped orbit input (manual) or the animated follow target (auto).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraDirector {
    auto: bool,
    orbit: OrbitState,
    orbit_target: OrbitState,
    saved: OrbitState,
    position: Vector,
}

impl Default for CameraDirector {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraDirector {
    pub fn new() -> Self {
        let orbit = OrbitState::initial();
        Self {
            auto: false,
            orbit,
            orbit_target: orbit,
            saved: orbit,
            position: initial_camera_position(),
        }
    }

    pub fn is_auto(&self) -> bool {
        self.auto
    }

    /// Switches modes. Entering auto resets the orbit controller to its
    /// saved initial configuration and snaps the camera back to the saved
    /// vantage point, so the follow view always starts from the same x/z.
    pub fn set_auto(&mut self, auto: bool) {
        if auto && !self.auto {
            self.orbit = self.saved;
            self.orbit_target = self.saved;
            self.position = self.saved.position();
        }
        self.auto = auto;
    }

    /// Accumulates manual orbit input. Ignored while auto mode drives
    /// the camera.
    pub fn apply_input(&mut self, input: OrbitInput) {
        if self.auto {
            return;
        }
        self.orbit_target = OrbitState {
            yaw: self.orbit_target.yaw + input.yaw,
            pitch: self.orbit_target.pitch + input.pitch,
            distance: self.orbit_target.distance + input.zoom,
        }
        .clamped();
    }

    /// Computes this frame's camera pose from the follow target.
    pub fn drive(&mut self, focus: Vector) -> CameraPose {
        if self.auto {
            // Keep the horizontal placement, track the target's height.
            self.position.y = focus.y + FOLLOW_HEIGHT;
            CameraPose {
                position: self.position,
                look_at: focus,
            }
        } else {
            self.orbit.lerp_toward(self.orbit_target, ORBIT_DAMPING);
            self.position = self.orbit.position();
            CameraPose {
                position: self.position,
                look_at: Vector::zeros(),
            }
        }
    }
}
