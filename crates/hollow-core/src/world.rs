//! Outdoor scene construction and the decorative per-tick motion.

use crate::constants::*;
use crate::error::SceneError;
use crate::eyes::{self, Eye};
use crate::house::{AnimatedSurface, House};
use crate::scene::{Material, Mesh, NodeId, Scene, Transform};
use crate::texture;
use glam::{EulerRot, Quat, Vec2};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// A cube that tumbles about x and y by a fixed step per tick.
#[derive(Clone, Copy, Debug)]
pub struct Tumbler {
    pub node: NodeId,
    /// Accumulated x/y Euler angles in radians.
    pub angles: Vec2,
}

impl Tumbler {
    pub fn tumble(&mut self, scene: &mut Scene) {
        self.angles += Vec2::splat(TUMBLE_STEP);
        scene.transform_mut(self.node).rotation =
            Quat::from_euler(EulerRot::XYZ, self.angles.x, self.angles.y, 0.0);
    }
}

/// A TV box drifting in the air with static on its front face.
#[derive(Clone, Copy, Debug)]
pub struct FloatingScreen {
    pub node: NodeId,
    pub screen: AnimatedSurface,
    /// Radians of yaw added per tick.
    pub spin: f32,
    pub yaw: f32,
    /// Offset into the shared float wave.
    pub phase: f32,
}

impl FloatingScreen {
    pub fn drift(&mut self, scene: &mut Scene, time: f32, rng: &mut impl Rng) {
        self.screen.refresh(scene, rng);
        self.yaw += self.spin;
        let t = scene.transform_mut(self.node);
        t.rotation = Quat::from_rotation_y(self.yaw);
        t.translation.y += (time + self.phase).sin() * SCREEN_FLOAT_AMPLITUDE;
    }
}

pub struct World {
    pub scene: Scene,
    pub terrain: NodeId,
    pub tumblers: Vec<Tumbler>,
    pub mushrooms: Vec<NodeId>,
    pub screens: Vec<FloatingScreen>,
    pub eyes: Vec<Eye>,
    pub house: House,
}

impl World {
    /// Build the whole scene. Any texture or node failure aborts construction.
    pub fn build(rng: &mut impl Rng) -> Result<Self, SceneError> {
        let mut scene = Scene::new();

        let grass = scene.add_texture(texture::grass(rng)?);
        let terrain = scene.mesh(
            "terrain",
            None,
            Transform::at(0.0, TERRAIN_Y, 0.0).rotated(Quat::from_rotation_x(-FRAC_PI_2)),
            Mesh::Plane { width: TERRAIN_SIZE, height: TERRAIN_SIZE },
            Material::Textured(grass),
        )?;

        let embers = Material::Textured(scene.add_texture(texture::embers(rng)?));
        let mut tumblers = Vec::with_capacity(CUBE_COUNT);
        for _ in 0..CUBE_COUNT {
            let x = rng.gen::<f32>() * 40.0 - 20.0;
            let y = rng.gen::<f32>() * 10.0;
            let z = rng.gen::<f32>() * 40.0 - 20.0;
            let angles = Vec2::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI);
            let node = scene.mesh(
                "cube",
                None,
                Transform::at(x, y, z).rotated(Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, 0.0)),
                Mesh::Cuboid { width: 1.0, height: 1.0, depth: 1.0 },
                embers,
            )?;
            tumblers.push(Tumbler { node, angles });
        }

        let eyes = eyes::spawn(&mut scene, rng)?;

        let mut screens = Vec::with_capacity(SCREEN_COUNT);
        for _ in 0..SCREEN_COUNT {
            let static_tex = scene.add_texture(texture::static_noise(32, 32, rng)?);
            let node = scene.mesh(
                "floating_tv",
                None,
                Transform::at(
                    rng.gen::<f32>() * 30.0 - 15.0,
                    rng.gen::<f32>() * 5.0 + 2.0,
                    rng.gen::<f32>() * 30.0 - 15.0,
                ),
                Mesh::Cuboid { width: 1.5, height: 1.0, depth: 0.2 },
                Material::solid(0x333333),
            )?;
            // Sits just proud of the +Z face so it never z-fights the box.
            let face = scene.mesh(
                "floating_tv_screen",
                Some(node),
                Transform::at(0.0, 0.0, 0.101),
                Mesh::Plane { width: 1.5, height: 1.0 },
                Material::Textured(static_tex),
            )?;
            screens.push(FloatingScreen {
                node,
                screen: AnimatedSurface { node: face, texture: static_tex },
                spin: rng.gen::<f32>() * SCREEN_SPIN_MAX,
                yaw: 0.0,
                phase: rng.gen::<f32>() * TAU,
            });
        }

        let mut mushrooms = Vec::with_capacity(MUSHROOM_COUNT);
        for _ in 0..MUSHROOM_COUNT {
            let stem_height = 2.0 + rng.gen::<f32>() * 3.0;
            let cap_radius = 1.5 + rng.gen::<f32>();
            let cap_color = if rng.gen::<f32>() > 0.5 { 0xff5555 } else { 0xff55ff };
            let x = rng.gen::<f32>() * 60.0 - 30.0;
            let z = rng.gen::<f32>() * 60.0 - 30.0;
            let scale = 0.5 + rng.gen::<f32>() * 1.5;
            let mushroom = scene.group("mushroom", None, Transform::at(x, 0.0, z).scaled(scale))?;
            scene.mesh(
                "mushroom_stem",
                Some(mushroom),
                Transform::default(),
                Mesh::Cylinder { radius_top: 0.5, radius_bottom: 0.7, height: stem_height, segments: 8 },
                Material::solid(0xffffcc),
            )?;
            scene.mesh(
                "mushroom_cap",
                Some(mushroom),
                Transform::at(0.0, stem_height / 2.0, 0.0),
                Mesh::Sphere { radius: cap_radius, segments: 8, rings: 8, theta_length: FRAC_PI_2 },
                Material::solid(cap_color),
            )?;
            mushrooms.push(mushroom);
        }

        let house = House::build(&mut scene, rng)?;

        log::info!(
            "[session] scene built: {} nodes, {} textures, {} cubes, {} eyes, {} screens",
            scene.len(),
            scene.textures().len(),
            tumblers.len(),
            eyes.len(),
            screens.len()
        );

        Ok(Self {
            scene,
            terrain,
            tumblers,
            mushrooms,
            screens,
            eyes,
            house,
        })
    }
}
