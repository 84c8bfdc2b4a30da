//! CPU-side geometry for the primitive shapes in [`Mesh`].

use crate::scene::Mesh;
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    fn push(&mut self, p: Vec3, uv: Vec2) -> u32 {
        self.vertices.push(Vertex {
            position: p.to_array(),
            uv: uv.to_array(),
        });
        (self.vertices.len() - 1) as u32
    }

    fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }
}

pub fn build(mesh: &Mesh) -> Geometry {
    match *mesh {
        Mesh::Cuboid { width, height, depth } => cuboid(width, height, depth),
        Mesh::Plane { width, height } => plane(width, height),
        Mesh::Sphere { radius, segments, rings, theta_length } => {
            sphere(radius, segments, rings, theta_length)
        }
        Mesh::Cylinder { radius_top, radius_bottom, height, segments } => {
            cylinder(radius_top, radius_bottom, height, segments)
        }
        Mesh::Cone { radius, height, segments } => cylinder(0.0, radius, height, segments),
        Mesh::Icosahedron { radius } => icosahedron(radius),
        Mesh::Disc { radius, segments } => disc(radius, segments),
    }
}

fn cuboid(w: f32, h: f32, d: f32) -> Geometry {
    let (hx, hy, hz) = (w / 2.0, h / 2.0, d / 2.0);
    // (normal, u axis, v axis) per face; every face gets the full texture.
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let half = Vec3::new(hx, hy, hz);
    let mut g = Geometry::default();
    for (n, u, v) in faces {
        let c = n * half;
        let du = u * half;
        let dv = v * half;
        let a = g.push(c - du - dv, Vec2::new(0.0, 1.0));
        let b = g.push(c + du - dv, Vec2::new(1.0, 1.0));
        let cc = g.push(c + du + dv, Vec2::new(1.0, 0.0));
        let dd = g.push(c - du + dv, Vec2::new(0.0, 0.0));
        g.quad(a, b, cc, dd);
    }
    g
}

fn plane(w: f32, h: f32) -> Geometry {
    let mut g = Geometry::default();
    let a = g.push(Vec3::new(-w / 2.0, -h / 2.0, 0.0), Vec2::new(0.0, 1.0));
    let b = g.push(Vec3::new(w / 2.0, -h / 2.0, 0.0), Vec2::new(1.0, 1.0));
    let c = g.push(Vec3::new(w / 2.0, h / 2.0, 0.0), Vec2::new(1.0, 0.0));
    let d = g.push(Vec3::new(-w / 2.0, h / 2.0, 0.0), Vec2::new(0.0, 0.0));
    g.quad(a, b, c, d);
    g
}

fn sphere(radius: f32, segments: u32, rings: u32, theta_length: f32) -> Geometry {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut g = Geometry::default();
    for r in 0..=rings {
        let v = r as f32 / rings as f32;
        let theta = v * theta_length;
        for s in 0..=segments {
            let u = s as f32 / segments as f32;
            let phi = u * TAU;
            let p = Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            g.push(p, Vec2::new(u, v));
        }
    }
    let stride = segments + 1;
    for r in 0..rings {
        for s in 0..segments {
            let a = r * stride + s;
            let b = a + stride;
            g.quad(a, b, b + 1, a + 1);
        }
    }
    g
}

fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> Geometry {
    let segments = segments.max(3);
    let half = height / 2.0;
    let mut g = Geometry::default();
    for (row, (y, radius)) in [(half, radius_top), (-half, radius_bottom)].into_iter().enumerate() {
        for s in 0..=segments {
            let u = s as f32 / segments as f32;
            let a = u * TAU;
            g.push(
                Vec3::new(radius * a.sin(), y, radius * a.cos()),
                Vec2::new(u, row as f32),
            );
        }
    }
    let stride = segments + 1;
    for s in 0..segments {
        g.quad(s, s + stride, s + stride + 1, s + 1);
    }
    for (y, radius) in [(half, radius_top), (-half, radius_bottom)] {
        if radius <= 0.0 {
            continue;
        }
        let center = g.push(Vec3::new(0.0, y, 0.0), Vec2::splat(0.5));
        let first = g.vertices.len() as u32;
        for s in 0..=segments {
            let a = s as f32 / segments as f32 * TAU;
            g.push(
                Vec3::new(radius * a.sin(), y, radius * a.cos()),
                Vec2::new(0.5 + 0.5 * a.sin(), 0.5 + 0.5 * a.cos()),
            );
        }
        for s in 0..segments {
            g.indices.extend_from_slice(&[center, first + s, first + s + 1]);
        }
    }
    g
}

fn icosahedron(radius: f32) -> Geometry {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let corners = [
        (-1.0, t, 0.0), (1.0, t, 0.0), (-1.0, -t, 0.0), (1.0, -t, 0.0),
        (0.0, -1.0, t), (0.0, 1.0, t), (0.0, -1.0, -t), (0.0, 1.0, -t),
        (t, 0.0, -1.0), (t, 0.0, 1.0), (-t, 0.0, -1.0), (-t, 0.0, 1.0),
    ];
    let faces: [[u32; 3]; 20] = [
        [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
        [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
        [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
        [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
    ];
    let mut g = Geometry::default();
    for (x, y, z) in corners {
        let p = Vec3::new(x, y, z).normalize() * radius;
        let n = p / radius;
        let uv = Vec2::new(0.5 + n.z.atan2(n.x) / TAU, 0.5 - n.y.asin() / PI);
        g.push(p, uv);
    }
    for f in faces {
        g.indices.extend_from_slice(&f);
    }
    g
}

fn disc(radius: f32, segments: u32) -> Geometry {
    let segments = segments.max(3);
    let mut g = Geometry::default();
    let center = g.push(Vec3::ZERO, Vec2::splat(0.5));
    for s in 0..=segments {
        let a = s as f32 / segments as f32 * TAU;
        g.push(
            Vec3::new(radius * a.cos(), radius * a.sin(), 0.0),
            Vec2::new(0.5 + 0.5 * a.cos(), 0.5 - 0.5 * a.sin()),
        );
    }
    for s in 0..segments {
        g.indices.extend_from_slice(&[center, 1 + s, 2 + s]);
    }
    g
}
