//! Flat scene graph: an arena of nodes plus the textures they sample.
//!
//! Parents are always inserted before their children, so world matrices can
//! be resolved with one forward pass over the arena.

use crate::error::SceneError;
use crate::texture::PixelCanvas;
use glam::{Mat3, Mat4, Quat, Vec3};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            ..Self::default()
        }
    }

    pub fn rotated(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn scaled(mut self, s: f32) -> Self {
        self.scale = Vec3::splat(s);
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Primitive shapes, parameterised the way the builder needs them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mesh {
    Cuboid { width: f32, height: f32, depth: f32 },
    /// Flat quad in the local XY plane facing +Z.
    Plane { width: f32, height: f32 },
    /// UV sphere; `theta_length` below PI gives a cap (PI/2 = hemisphere).
    Sphere { radius: f32, segments: u32, rings: u32, theta_length: f32 },
    Cylinder { radius_top: f32, radius_bottom: f32, height: f32, segments: u32 },
    Cone { radius: f32, height: f32, segments: u32 },
    Icosahedron { radius: f32 },
    /// Flat disc in the local XY plane facing +Z.
    Disc { radius: f32, segments: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Material {
    Color { rgb: [f32; 3], opacity: f32 },
    Textured(TextureId),
}

impl Material {
    pub fn solid(hex: u32) -> Self {
        Material::Color {
            rgb: [
                ((hex >> 16) & 0xff) as f32 / 255.0,
                ((hex >> 8) & 0xff) as f32 / 255.0,
                (hex & 0xff) as f32 / 255.0,
            ],
            opacity: 1.0,
        }
    }

    pub fn translucent(hex: u32, opacity: f32) -> Self {
        match Self::solid(hex) {
            Material::Color { rgb, .. } => Material::Color { rgb, opacity },
            other => other,
        }
    }

    pub fn is_translucent(&self) -> bool {
        matches!(self, Material::Color { opacity, .. } if *opacity < 1.0)
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub name: &'static str,
    pub parent: Option<NodeId>,
    pub children: SmallVec<[NodeId; 8]>,
    pub transform: Transform,
    pub mesh: Option<Mesh>,
    pub material: Material,
}

#[derive(Default)]
pub struct Scene {
    nodes: Vec<Node>,
    textures: Vec<PixelCanvas>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_texture(&mut self, canvas: PixelCanvas) -> TextureId {
        self.textures.push(canvas);
        TextureId(self.textures.len() - 1)
    }

    /// Add an empty grouping node.
    pub fn group(
        &mut self,
        name: &'static str,
        parent: Option<NodeId>,
        transform: Transform,
    ) -> Result<NodeId, SceneError> {
        self.insert(name, parent, transform, None, Material::solid(0xffffff))
    }

    /// Add a drawable node.
    pub fn mesh(
        &mut self,
        name: &'static str,
        parent: Option<NodeId>,
        transform: Transform,
        mesh: Mesh,
        material: Material,
    ) -> Result<NodeId, SceneError> {
        self.insert(name, parent, transform, Some(mesh), material)
    }

    fn insert(
        &mut self,
        name: &'static str,
        parent: Option<NodeId>,
        transform: Transform,
        mesh: Option<Mesh>,
        material: Material,
    ) -> Result<NodeId, SceneError> {
        if let Material::Textured(t) = material {
            if t.0 >= self.textures.len() {
                return Err(SceneError::MissingTexture(t));
            }
        }
        let id = NodeId(self.nodes.len());
        if let Some(p) = parent {
            let parent_node = self.nodes.get_mut(p.0).ok_or(SceneError::UnknownParent(p))?;
            parent_node.children.push(id);
        }
        self.nodes.push(Node {
            name,
            parent,
            children: SmallVec::new(),
            transform,
            mesh,
            material,
        });
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn transform(&self, id: NodeId) -> &Transform {
        &self.nodes[id.0].transform
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].transform
    }

    pub fn texture(&self, id: TextureId) -> &PixelCanvas {
        &self.textures[id.0]
    }

    pub fn texture_mut(&mut self, id: TextureId) -> &mut PixelCanvas {
        &mut self.textures[id.0]
    }

    pub fn textures(&self) -> &[PixelCanvas] {
        &self.textures
    }

    /// World matrix of every node, indexed like `nodes()`.
    pub fn world_matrices(&self) -> Vec<Mat4> {
        let mut out: Vec<Mat4> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let local = node.transform.matrix();
            let world = match node.parent {
                Some(p) => out[p.0] * local,
                None => local,
            };
            out.push(world);
        }
        out
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        let mut m = self.nodes[id.0].transform.matrix();
        let mut cur = self.nodes[id.0].parent;
        while let Some(p) = cur {
            m = self.nodes[p.0].transform.matrix() * m;
            cur = self.nodes[p.0].parent;
        }
        m.w_axis.truncate()
    }
}

/// Rotation that turns a node's +Z axis toward `target`, keeping +Y up.
/// Returns `None` when the two points coincide or the direction is vertical.
pub fn facing(from: Vec3, target: Vec3) -> Option<Quat> {
    let forward = (target - from).try_normalize()?;
    let right = Vec3::Y.cross(forward).try_normalize()?;
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_points_z_axis_at_target() {
        let q = facing(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0)).unwrap();
        let z = q * Vec3::Z;
        assert!((z - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn facing_rejects_degenerate_directions() {
        assert!(facing(Vec3::ONE, Vec3::ONE).is_none());
        assert!(facing(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0)).is_none());
    }
}
