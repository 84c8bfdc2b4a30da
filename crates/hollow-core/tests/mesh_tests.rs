// Host-side tests for primitive geometry generation.

use hollow_core::mesh::{build, Geometry};
use hollow_core::scene::Mesh;
use std::f32::consts::{FRAC_PI_2, PI};

fn assert_well_formed(g: &Geometry) {
    assert!(!g.vertices.is_empty());
    assert_eq!(g.indices.len() % 3, 0);
    let n = g.vertices.len() as u32;
    assert!(g.indices.iter().all(|&i| i < n));
}

#[test]
fn every_primitive_is_well_formed() {
    let shapes = [
        Mesh::Cuboid { width: 1.0, height: 2.0, depth: 3.0 },
        Mesh::Plane { width: 4.0, height: 4.0 },
        Mesh::Sphere { radius: 0.3, segments: 8, rings: 8, theta_length: PI },
        Mesh::Cylinder { radius_top: 0.5, radius_bottom: 0.7, height: 3.0, segments: 8 },
        Mesh::Cone { radius: 14.0, height: 5.0, segments: 4 },
        Mesh::Icosahedron { radius: 0.5 },
        Mesh::Disc { radius: 0.1, segments: 8 },
    ];
    for shape in &shapes {
        assert_well_formed(&build(shape));
    }
}

#[test]
fn cuboid_has_four_vertices_per_face() {
    let g = build(&Mesh::Cuboid { width: 2.0, height: 2.0, depth: 2.0 });
    assert_eq!(g.vertices.len(), 24);
    assert_eq!(g.indices.len(), 36);
    for v in &g.vertices {
        for c in v.position {
            assert!((c.abs() - 1.0).abs() < 1e-6);
        }
    }
}

#[test]
fn hemisphere_stays_above_its_equator() {
    let g = build(&Mesh::Sphere { radius: 2.0, segments: 8, rings: 8, theta_length: FRAC_PI_2 });
    assert!(g.vertices.iter().all(|v| v.position[1] >= -1e-5));
}

#[test]
fn cone_skips_the_degenerate_top_cap() {
    let g = build(&Mesh::Cone { radius: 1.0, height: 2.0, segments: 4 });
    // side rows (2 x 5) plus the bottom cap (center + 5 rim)
    assert_eq!(g.vertices.len(), 16);
}

#[test]
fn icosahedron_vertices_lie_on_the_sphere() {
    let g = build(&Mesh::Icosahedron { radius: 0.5 });
    assert_eq!(g.vertices.len(), 12);
    assert_eq!(g.indices.len(), 60);
    for v in &g.vertices {
        let r = glam::Vec3::from_array(v.position).length();
        assert!((r - 0.5).abs() < 1e-5);
    }
}
