//! Rendering-only startup systems: static geometry, camera, lighting.

use bevy::prelude::*;

use crate::bevy::components::{MainCamera, SlabVisual, SphereVisual};
use crate::bevy::resources::{SimulationRes, SphereAssets};
use crate::camera::initial_camera_position;
use crate::bevy::systems::to_vec3;
use crate::scene::Slab;

fn to_bevy_color(color: crate::scene::Color) -> Color {
    Color::srgba_u8(color.r, color.g, color.b, color.a)
}

fn slab_transform(slab: &Slab) -> Transform {
    let [x, y, z] = slab.position;
    Transform {
        translation: Vec3::new(x, y, z),
        rotation: Quat::from_rotation_y(slab.y_rot_deg.to_radians())
            * Quat::from_rotation_z(slab.z_rot_deg.to_radians()),
        ..Transform::default()
    }
}

/// Spawns a mesh for every scene slab, collider and decor alike, and
/// prepares the shared sphere assets.
pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim: Res<SimulationRes>,
) {
    let config = sim.0.config().clone();

    let mut slabs = config.collider_slabs();
    slabs.extend(config.decor_slabs());
    for slab in slabs {
        let [hx, hy, hz] = slab.half_extents;
        commands.spawn((
            SlabVisual,
            Mesh3d(meshes.add(Cuboid::new(hx * 2.0, hy * 2.0, hz * 2.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: to_bevy_color(slab.color),
                ..StandardMaterial::default()
            })),
            slab_transform(&slab),
        ));
    }

    commands.insert_resource(SphereAssets {
        mesh: meshes.add(Sphere::new(config.sphere.radius)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb_u8(204, 204, 204),
            metallic: 0.6,
            perceptual_roughness: 0.3,
            ..StandardMaterial::default()
        }),
    });
}

/// Spawns the scene camera at its initial vantage point.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        MainCamera,
        Transform::from_translation(to_vec3(initial_camera_position()))
            .looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Key light plus ambient fill.
pub fn setup_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..DirectionalLight::default()
        },
        Transform::from_xyz(10.0, 30.0, 20.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..AmbientLight::default()
    });
}

/// Attaches the shared sphere mesh to mirror entities spawned by the
/// headless layer.
pub fn attach_sphere_meshes(
    mut commands: Commands,
    assets: Res<SphereAssets>,
    bare: Query<Entity, (With<SphereVisual>, Without<Mesh3d>)>,
) {
    for entity in bare.iter() {
        commands.entity(entity).insert((
            Mesh3d(assets.mesh.clone()),
            MeshMaterial3d(assets.material.clone()),
        ));
    }
}
