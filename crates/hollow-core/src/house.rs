//! The house: walls, roof, hinged doors, furniture, the static TV and the
//! crying baby, plus the structure's own per-tick animation.

use crate::constants::*;
use crate::error::SceneError;
use crate::scene::{Material, Mesh, NodeId, Scene, TextureId, Transform};
use crate::texture;
use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorSide {
    Left,
    Right,
}

/// One leaf of the double front door.
#[derive(Clone, Copy, Debug)]
pub struct DoorLeaf {
    pub node: NodeId,
    pub side: DoorSide,
    pub closed_translation: Vec3,
}

impl DoorLeaf {
    /// Local pose for the given door state. Leaves are mirror images: the left
    /// one swings to -X, the right one to +X, both inward.
    pub fn pose(&self, open: bool) -> Transform {
        if !open {
            return Transform {
                translation: self.closed_translation,
                ..Transform::default()
            };
        }
        let (dx, angle) = match self.side {
            DoorSide::Left => (-DOOR_SWING_OFFSET, -FRAC_PI_2),
            DoorSide::Right => (DOOR_SWING_OFFSET, FRAC_PI_2),
        };
        Transform {
            translation: self.closed_translation + Vec3::new(dx, 0.0, -DOOR_SWING_OFFSET),
            rotation: Quat::from_rotation_y(angle),
            scale: Vec3::ONE,
        }
    }
}

/// A mesh whose texture is regenerated while the scene runs.
#[derive(Clone, Copy, Debug)]
pub struct AnimatedSurface {
    pub node: NodeId,
    pub texture: TextureId,
}

impl AnimatedSurface {
    pub fn refresh(&self, scene: &mut Scene, rng: &mut impl Rng) {
        scene.texture_mut(self.texture).refresh_static(rng);
    }
}

/// A falling tear that snaps back to `reset_y` once it drops out of view.
#[derive(Clone, Copy, Debug)]
pub struct TearParticle {
    pub node: NodeId,
    pub speed: f32,
    pub reset_y: f32,
}

impl TearParticle {
    pub fn fall(&self, scene: &mut Scene) {
        let t = scene.transform_mut(self.node);
        t.translation.y -= self.speed;
        if t.translation.y < TEAR_FLOOR_Y {
            t.translation.y = self.reset_y;
        }
    }
}

pub struct House {
    pub doors: [DoorLeaf; 2],
    pub screen: AnimatedSurface,
    pub tears: [TearParticle; 2],
    pub body: NodeId,
    pub head: NodeId,
}

impl House {
    pub fn build(scene: &mut Scene, rng: &mut impl Rng) -> Result<Self, SceneError> {
        let (w, h, d) = (HOUSE_WIDTH, HOUSE_HEIGHT, HOUSE_DEPTH);
        let house = scene.group(
            "house",
            None,
            Transform::at(HOUSE_POSITION.x, HOUSE_POSITION.y, HOUSE_POSITION.z),
        )?;
        let root = Some(house);

        let walls = Material::Textured(scene.add_texture(texture::brick(rng)?));
        let roof = Material::Textured(scene.add_texture(texture::roof_tiles(rng)?));
        let boards = Material::Textured(scene.add_texture(texture::wood(rng)?));
        let door = Material::Textured(scene.add_texture(texture::door_panels()?));
        let fabric = Material::Textured(scene.add_texture(texture::sofa_fabric(rng)?));

        let slab = |width: f32, height: f32, depth: f32| Mesh::Cuboid { width, height, depth };

        // Shell
        let side = w / 2.0 - 2.0;
        let shell = [
            ("back_wall", Transform::at(0.0, h / 2.0, -d / 2.0), slab(w, h, 0.5)),
            ("front_wall_left", Transform::at(-w / 4.0 - 1.0, h / 2.0, d / 2.0), slab(side, h, 0.5)),
            ("front_wall_right", Transform::at(w / 4.0 + 1.0, h / 2.0, d / 2.0), slab(side, h, 0.5)),
            ("lintel", Transform::at(0.0, h * 0.75, d / 2.0), slab(4.0, h / 2.0, 0.5)),
            ("left_wall", Transform::at(-w / 2.0, h / 2.0, 0.0), slab(0.5, h, d)),
            ("right_wall", Transform::at(w / 2.0, h / 2.0, 0.0), slab(0.5, h, d)),
        ];
        for (name, transform, mesh) in shell {
            scene.mesh(name, root, transform, mesh, walls)?;
        }
        scene.mesh(
            "roof",
            root,
            Transform::at(0.0, h + h / 4.0, 0.0).rotated(Quat::from_rotation_y(FRAC_PI_4)),
            Mesh::Cone { radius: w * 0.7, height: h / 2.0, segments: 4 },
            roof,
        )?;
        scene.mesh(
            "floor",
            root,
            Transform::at(0.0, 0.1, 0.0).rotated(Quat::from_rotation_x(-FRAC_PI_2)),
            Mesh::Plane { width: w, height: d },
            boards,
        )?;

        // Doors
        let mut leaf = |name: &'static str, side: DoorSide, x: f32| -> Result<DoorLeaf, SceneError> {
            let closed_translation = Vec3::new(x, h * 0.4, d / 2.0);
            let node = scene.mesh(
                name,
                root,
                Transform::at(closed_translation.x, closed_translation.y, closed_translation.z),
                slab(DOOR_LEAF_WIDTH, h * 0.8, 0.2),
                door,
            )?;
            Ok(DoorLeaf { node, side, closed_translation })
        };
        let doors = [
            leaf("door_left", DoorSide::Left, -DOOR_LEAF_WIDTH / 2.0)?,
            leaf("door_right", DoorSide::Right, DOOR_LEAF_WIDTH / 2.0)?,
        ];

        // Sofa
        let sofa = Some(scene.group("sofa", root, Transform::at(0.0, 1.0, -5.0))?);
        let cushions = [
            ("sofa_base", Transform::default(), slab(10.0, 2.0, 4.0)),
            ("sofa_back", Transform::at(0.0, 2.0, -1.5), slab(10.0, 4.0, 1.0)),
            ("sofa_arm_left", Transform::at(-4.5, 1.5, 0.0), slab(1.0, 3.0, 4.0)),
            ("sofa_arm_right", Transform::at(4.5, 1.5, 0.0), slab(1.0, 3.0, 4.0)),
        ];
        for (name, transform, mesh) in cushions {
            scene.mesh(name, sofa, transform, mesh, fabric)?;
        }

        // TV
        let tv = Some(scene.group("tv", root, Transform::at(0.0, 1.5, -d / 2.0 + 3.0))?);
        scene.mesh(
            "tv_stand",
            tv,
            Transform::default(),
            slab(5.0, 3.0, 2.0),
            Material::solid(0x333333),
        )?;
        let static_tex = scene.add_texture(texture::static_noise(64, 64, rng)?);
        let screen_node = scene.mesh(
            "tv_screen",
            tv,
            Transform::at(0.0, 3.0, 0.0),
            slab(4.0, 3.0, 0.2),
            Material::Textured(static_tex),
        )?;
        let screen = AnimatedSurface { node: screen_node, texture: static_tex };

        // Baby
        let baby = Some(scene.group("baby", root, Transform::at(0.0, 3.0, -5.0).scaled(1.2))?);
        let head = scene.mesh(
            "baby_head",
            baby,
            Transform::at(0.0, 0.5, 0.0),
            Mesh::Icosahedron { radius: 0.5 },
            Material::solid(0xffdbac),
        )?;
        let body = scene.mesh(
            "baby_body",
            baby,
            Transform::at(0.0, BODY_REST_Y, 0.0),
            Mesh::Cylinder { radius_top: 0.3, radius_bottom: 0.4, height: 1.0, segments: 5 },
            Material::solid(0xff8fa2),
        )?;
        let dot = Mesh::Disc { radius: 0.1, segments: 8 };
        for (name, x) in [("baby_eye_left", -0.2), ("baby_eye_right", 0.2)] {
            scene.mesh(name, baby, Transform::at(x, 0.5, 0.4), dot, Material::solid(0x000000))?;
        }
        let mut tear = |name: &'static str, x: f32, speed: f32| -> Result<TearParticle, SceneError> {
            let node = scene.mesh(
                name,
                baby,
                Transform::at(x, TEAR_RESET_Y, 0.45),
                Mesh::Sphere { radius: 0.05, segments: 4, rings: 4, theta_length: PI },
                Material::translucent(0x00ffff, 0.6),
            )?;
            Ok(TearParticle { node, speed, reset_y: TEAR_RESET_Y })
        };
        let tears = [tear("tear_left", -0.2, 0.01)?, tear("tear_right", 0.2, 0.012)?];
        scene.mesh(
            "baby_mouth",
            baby,
            Transform::at(0.0, 0.2, 0.4),
            Mesh::Disc { radius: 0.15, segments: 8 },
            Material::solid(0x000000),
        )?;

        Ok(Self {
            doors,
            screen,
            tears,
            body,
            head,
        })
    }

    /// The structure's animation callback. Motion here is driven by `time`
    /// (seconds), apart from the tears which fall a fixed amount per tick.
    pub fn update(&self, scene: &mut Scene, time: f32, rng: &mut impl Rng) {
        self.screen.refresh(scene, rng);
        for tear in &self.tears {
            tear.fall(scene);
        }
        scene.transform_mut(self.body).translation.y =
            BODY_REST_Y + (time * BODY_BOUNCE_RATE).sin() * BODY_BOUNCE;
        scene.transform_mut(self.head).rotation =
            Quat::from_rotation_z((time * HEAD_SHAKE_RATE).sin() * HEAD_SHAKE);
    }

    /// Snap both leaves to the pose for `open`.
    pub fn set_doors_open(&self, scene: &mut Scene, open: bool) {
        for leaf in &self.doors {
            *scene.transform_mut(leaf.node) = leaf.pose(open);
        }
    }
}
