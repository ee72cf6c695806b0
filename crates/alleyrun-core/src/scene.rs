//! Alley scene description: static geometry applied to the physics world.
//!
//! The scene is declarative: lane rows, edge rails, the floor box and the
//! floor flatten into tagged cuboid slabs. The render layer reuses the
//! same slabs for meshes, so physics and visuals cannot drift apart.

use rapier3d::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::physics::{PhysicsWorld, Surface};

/// Errors from loading an alley configuration.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to parse alley config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// RGBA color for slab rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const YELLOW: Color = Color::rgb(251, 255, 14);
    pub const RED: Color = Color::rgb(255, 14, 14);
    pub const GREEN: Color = Color::rgb(21, 255, 71);
    pub const BLUE: Color = Color::rgb(28, 87, 255);
    pub const ORANGE: Color = Color::rgb(255, 84, 3);
    pub const WALL_BLUE: Color = Color::rgb(28, 125, 255);
}

/// One axis-aligned-or-singly-rotated cuboid, shared by colliders and meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slab {
    pub half_extents: [f32; 3],
    pub position: [f32; 3],
    pub z_rot_deg: f32,
    pub y_rot_deg: f32,
    pub surface: Surface,
    pub color: Color,
}

impl Slab {
    fn rotation_axangle(&self) -> Vector {
        Vector::new(
            0.0,
            self.y_rot_deg.to_radians(),
            self.z_rot_deg.to_radians(),
        )
    }
}

/// An angled lane: two side walls and a bottom deck the sphere rolls along.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RowConfig {
    pub length: f32,
    pub tilt_deg: f32,
    pub position: [f32; 3],
    /// Lateral offset of the bottom deck, forming a gutter.
    pub gutter: f32,
}

impl RowConfig {
    fn slabs(&self) -> Vec<Slab> {
        let [x, y, z] = self.position;
        let half_len = self.length / 2.0;
        let wall = |dz: f32| Slab {
            half_extents: [half_len, 0.5, 0.05],
            position: [x, y + 2.5, z + dz],
            z_rot_deg: self.tilt_deg,
            y_rot_deg: 0.0,
            surface: Surface::Lane,
            color: Color::WHITE,
        };
        vec![
            wall(0.5),
            wall(-0.5),
            Slab {
                half_extents: [half_len, 0.05, 0.5],
                position: [x + self.gutter, y + 2.05, z],
                z_rot_deg: self.tilt_deg,
                y_rot_deg: 0.0,
                surface: Surface::Lane,
                color: Color::WHITE,
            },
        ]
    }
}

/// A colored edge rail with a catch pocket at the lane's end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EdgeConfig {
    pub position: [f32; 3],
    pub color: Color,
    /// Absolute position of the pocket base.
    pub pocket_position: [f32; 3],
    /// Absolute position of the tilted pocket lip.
    pub lip_position: [f32; 3],
    pub lip_tilt_deg: f32,
}

impl EdgeConfig {
    fn slabs(&self) -> Vec<Slab> {
        let [x, y, z] = self.position;
        let wall = |dz: f32| Slab {
            half_extents: [1.5, 2.0, 0.05],
            position: [x + 3.0, y + 0.5, z + dz],
            z_rot_deg: 0.0,
            y_rot_deg: 0.0,
            surface: Surface::Rail,
            color: self.color,
        };
        vec![
            wall(0.6),
            wall(-0.6),
            Slab {
                half_extents: [2.0, 0.1, 0.5],
                position: self.pocket_position,
                z_rot_deg: 90.0,
                y_rot_deg: 0.0,
                surface: Surface::Rail,
                color: self.color,
            },
            Slab {
                half_extents: [0.5, 0.05, 0.5],
                position: self.lip_position,
                z_rot_deg: self.lip_tilt_deg,
                y_rot_deg: 0.0,
                surface: Surface::Rail,
                color: self.color,
            },
        ]
    }
}

/// Three-sided catch tray at floor level where spent spheres collect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FloorBoxConfig {
    pub center: [f32; 3],
    pub color: Color,
}

impl Default for FloorBoxConfig {
    fn default() -> Self {
        Self {
            center: [8.2, -4.5, 0.0],
            color: Color::ORANGE,
        }
    }
}

impl FloorBoxConfig {
    fn slabs(&self) -> Vec<Slab> {
        let [x, y, z] = self.center;
        let side = |dz: f32| Slab {
            half_extents: [3.5, 1.0, 0.3],
            position: [x, y, z + dz],
            z_rot_deg: 0.0,
            y_rot_deg: 0.0,
            surface: Surface::Rail,
            color: self.color,
        };
        let cap = |dx: f32| Slab {
            half_extents: [4.0, 1.0, 0.3],
            position: [x + dx, y, z],
            z_rot_deg: 0.0,
            y_rot_deg: 90.0,
            surface: Surface::Rail,
            color: self.color,
        };
        vec![side(4.0), side(-4.0), cap(3.3), cap(-3.6)]
    }
}

/// The floor plane (as a thick slab so fast spheres cannot tunnel).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FloorConfig {
    pub y: f32,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self { y: -5.0 }
    }
}

impl FloorConfig {
    fn slab(&self) -> Slab {
        Slab {
            half_extents: [200.0, 0.5, 75.0],
            position: [0.0, self.y - 0.5, 0.0],
            z_rot_deg: 0.0,
            y_rot_deg: 0.0,
            surface: Surface::Floor,
            color: Color::WHITE,
        }
    }
}

/// Physical parameters of a rolling sphere.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SphereParams {
    pub spawn_point: [f32; 3],
    pub radius: f32,
    pub mass: f32,
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            spawn_point: [0.0, 22.0, 0.0],
            radius: 0.5,
            mass: 2.0,
            restitution: 0.5,
            friction: 0.3,
            linear_damping: 0.09,
        }
    }
}

/// Complete description of the static alley scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlleyConfig {
    pub floor: Option<FloorConfig>,
    pub floor_box: Option<FloorBoxConfig>,
    pub rows: Vec<RowConfig>,
    pub edges: Vec<EdgeConfig>,
    pub sphere: SphereParams,
}

impl Default for AlleyConfig {
    fn default() -> Self {
        Self::default_alley()
    }
}

impl AlleyConfig {
    /// The built-in alley layout.
    pub fn default_alley() -> Self {
        Self {
            floor: Some(FloorConfig::default()),
            floor_box: Some(FloorBoxConfig::default()),
            rows: vec![
                RowConfig {
                    length: 6.0,
                    tilt_deg: -20.0,
                    position: [2.2, 14.0, 0.0],
                    gutter: -0.18,
                },
                RowConfig {
                    length: 12.0,
                    tilt_deg: 10.0,
                    position: [0.25, 10.0, 0.0],
                    gutter: 0.1,
                },
                RowConfig {
                    length: 12.0,
                    tilt_deg: -15.0,
                    position: [-1.0, 5.5, 0.0],
                    gutter: -0.1,
                },
                RowConfig {
                    length: 12.0,
                    tilt_deg: 10.0,
                    position: [0.0, 0.5, 0.0],
                    gutter: 0.1,
                },
                RowConfig {
                    length: 12.0,
                    tilt_deg: -15.0,
                    position: [-1.0, -4.0, 0.0],
                    gutter: -0.1,
                },
            ],
            edges: vec![
                EdgeConfig {
                    position: [2.0, 14.0, 0.0],
                    color: Color::YELLOW,
                    pocket_position: [6.4, 14.5, 0.0],
                    lip_position: [6.0, 14.2, 0.0],
                    lip_tilt_deg: -40.0,
                },
                EdgeConfig {
                    position: [-9.0, 9.8, 0.0],
                    color: Color::RED,
                    pocket_position: [-7.5, 10.0, 0.0],
                    lip_position: [-7.0, 10.5, 0.0],
                    lip_tilt_deg: 35.0,
                },
                EdgeConfig {
                    position: [2.0, 4.8, 0.0],
                    color: Color::GREEN,
                    pocket_position: [6.5, 5.5, 0.0],
                    lip_position: [6.0, 5.2, 0.0],
                    lip_tilt_deg: -40.0,
                },
                EdgeConfig {
                    position: [-9.0, 0.3, 0.0],
                    color: Color::BLUE,
                    pocket_position: [-7.4, 0.8, 0.0],
                    lip_position: [-7.0, 1.0, 0.0],
                    lip_tilt_deg: 40.0,
                },
            ],
            sphere: SphereParams::default(),
        }
    }

    /// A scene with no colliders at all. Spheres fall forever; useful for
    /// exercising the animation path without collision interference.
    pub fn empty() -> Self {
        Self {
            floor: None,
            floor_box: None,
            rows: Vec::new(),
            edges: Vec::new(),
            sphere: SphereParams::default(),
        }
    }

    /// All collider slabs for this scene.
    pub fn collider_slabs(&self) -> Vec<Slab> {
        let mut slabs = Vec::new();
        if let Some(floor) = &self.floor {
            slabs.push(floor.slab());
        }
        for row in &self.rows {
            slabs.extend(row.slabs());
        }
        for edge in &self.edges {
            slabs.extend(edge.slabs());
        }
        if let Some(floor_box) = &self.floor_box {
            slabs.extend(floor_box.slabs());
        }
        slabs
    }

    /// Render-only geometry: the back wall and the wood column slats.
    pub fn decor_slabs(&self) -> Vec<Slab> {
        let column = |dz: f32| Slab {
            half_extents: [0.75, 12.0, 0.1],
            position: [0.0, 7.0, dz],
            z_rot_deg: 0.0,
            y_rot_deg: 0.0,
            surface: Surface::Lane,
            color: Color::WHITE,
        };
        vec![
            Slab {
                half_extents: [200.0, 70.0, 0.05],
                position: [0.0, 0.0, -10.0],
                z_rot_deg: 0.0,
                y_rot_deg: 0.0,
                surface: Surface::Lane,
                color: Color::WALL_BLUE,
            },
            column(0.7),
            column(-0.7),
        ]
    }

    /// Inserts every collider slab into the physics world, tagged with
    /// its surface material.
    pub fn apply_to_world(&self, world: &mut PhysicsWorld) {
        for slab in self.collider_slabs() {
            let [hx, hy, hz] = slab.half_extents;
            let [x, y, z] = slab.position;
            let collider = ColliderBuilder::cuboid(hx, hy, hz)
                .translation(Vector::new(x, y, z))
                .rotation(slab.rotation_axangle())
                .user_data(slab.surface.to_user_data())
                .build();
            world.add_static_collider(collider);
        }
    }

    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
