use bvh::Vertex;
use maths::{Vec2, Vec3};

use crate::scene::SceneGeometry;

const FLOOR_MATERIAL: u32 = 0;
const LEFT_BOX_MATERIAL: u32 = 1;
const RIGHT_BOX_MATERIAL: u32 = 2;

/// Small scene used when no file is given: a floor spanning the origin and
/// one box on each side of it.
pub fn demo_scene() -> SceneGeometry {
    let mut scene = SceneGeometry::default();

    push_quad(
        &mut scene,
        [
            Vec3::new(-5.0, 0.0, -5.0),
            Vec3::new(-5.0, 0.0, 5.0),
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::new(5.0, 0.0, -5.0),
        ],
        Vec3::Y,
        FLOOR_MATERIAL,
    );
    push_box(&mut scene, Vec3::new(-2.0, 0.5, 0.0), 0.5, LEFT_BOX_MATERIAL);
    push_box(&mut scene, Vec3::new(2.0, 0.75, 1.0), 0.75, RIGHT_BOX_MATERIAL);

    scene
}

/// Two triangles over four corners given counter-clockwise.
fn push_quad(scene: &mut SceneGeometry, corners: [Vec3; 4], normal: Vec3, material: u32) {
    let base = scene.vertices.len() as u32;
    let uvs = [
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(1.0, 0.0),
    ];

    for (corner, uv) in corners.into_iter().zip(uvs) {
        scene.vertices.push(Vertex::new(corner, normal, uv, material));
    }
    scene
        .indices
        .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
}

fn push_box(scene: &mut SceneGeometry, center: Vec3, half: f32, material: u32) {
    let corner = |x: f32, y: f32, z: f32| center + Vec3::new(x, y, z) * half;

    let faces = [
        // +X, -X
        (Vec3::X, [(1.0, -1.0, -1.0), (1.0, 1.0, -1.0), (1.0, 1.0, 1.0), (1.0, -1.0, 1.0)]),
        (-Vec3::X, [(-1.0, -1.0, 1.0), (-1.0, 1.0, 1.0), (-1.0, 1.0, -1.0), (-1.0, -1.0, -1.0)]),
        // +Y, -Y
        (Vec3::Y, [(-1.0, 1.0, -1.0), (-1.0, 1.0, 1.0), (1.0, 1.0, 1.0), (1.0, 1.0, -1.0)]),
        (-Vec3::Y, [(-1.0, -1.0, 1.0), (-1.0, -1.0, -1.0), (1.0, -1.0, -1.0), (1.0, -1.0, 1.0)]),
        // +Z, -Z
        (Vec3::Z, [(1.0, -1.0, 1.0), (1.0, 1.0, 1.0), (-1.0, 1.0, 1.0), (-1.0, -1.0, 1.0)]),
        (-Vec3::Z, [(-1.0, -1.0, -1.0), (-1.0, 1.0, -1.0), (1.0, 1.0, -1.0), (1.0, -1.0, -1.0)]),
    ];

    for (normal, corners) in faces {
        let corners = corners.map(|(x, y, z)| corner(x, y, z));
        push_quad(scene, corners, normal, material);
    }
}
