// Host-side tests for the scene arena and world-matrix resolution.

use glam::{Quat, Vec3};
use hollow_core::error::SceneError;
use hollow_core::scene::{Material, Mesh, NodeId, Scene, TextureId, Transform};
use hollow_core::texture::PixelCanvas;

fn unit_box() -> Mesh {
    Mesh::Cuboid { width: 1.0, height: 1.0, depth: 1.0 }
}

#[test]
fn rejects_unknown_parent_and_missing_texture() {
    let mut scene = Scene::new();
    let err = scene
        .mesh("orphan", Some(NodeId(3)), Transform::default(), unit_box(), Material::solid(0xffffff))
        .unwrap_err();
    assert_eq!(err, SceneError::UnknownParent(NodeId(3)));

    let err = scene
        .mesh("bare", None, Transform::default(), unit_box(), Material::Textured(TextureId(0)))
        .unwrap_err();
    assert_eq!(err, SceneError::MissingTexture(TextureId(0)));
    assert!(scene.is_empty());
}

#[test]
fn children_are_recorded_on_the_parent() {
    let mut scene = Scene::new();
    let root = scene.group("root", None, Transform::default()).unwrap();
    let a = scene.group("a", Some(root), Transform::default()).unwrap();
    let tex = scene.add_texture(PixelCanvas::new(2, 2).unwrap());
    let b = scene
        .mesh("b", Some(root), Transform::default(), unit_box(), Material::Textured(tex))
        .unwrap();
    assert_eq!(scene.node(root).children.as_slice(), &[a, b]);
    assert_eq!(scene.node(b).parent, Some(root));
    assert_eq!(scene.len(), 3);
}

#[test]
fn world_matrices_compose_parent_transforms() {
    let mut scene = Scene::new();
    let parent = scene
        .group("parent", None, Transform::at(1.0, 0.0, 0.0).scaled(2.0))
        .unwrap();
    let child = scene
        .group("child", Some(parent), Transform::at(0.0, 1.0, 0.0))
        .unwrap();
    let turned = scene
        .group(
            "turned",
            Some(child),
            Transform::at(0.0, 0.0, 1.0).rotated(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
        )
        .unwrap();

    let world = scene.world_matrices();
    let p = world[child.0].w_axis.truncate();
    assert!((p - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    let q = world[turned.0].w_axis.truncate();
    assert!((q - Vec3::new(1.0, 2.0, 2.0)).length() < 1e-5);
    assert!((scene.world_position(turned) - q).length() < 1e-5);
}

#[test]
fn translucency_follows_opacity() {
    assert!(!Material::solid(0x123456).is_translucent());
    assert!(Material::translucent(0x00ffff, 0.6).is_translucent());
    assert!(!Material::Textured(TextureId(0)).is_translucent());
    match Material::solid(0xff8000) {
        Material::Color { rgb, opacity } => {
            assert_eq!(rgb, [1.0, 128.0 / 255.0, 0.0]);
            assert_eq!(opacity, 1.0);
        }
        other => panic!("unexpected material {:?}", other),
    }
}
