//! Floating eyes that drift toward the camera and blink.

use crate::constants::*;
use crate::error::SceneError;
use crate::scene::{facing, Material, Mesh, NodeId, Scene, Transform};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

#[derive(Clone, Debug)]
pub struct Eye {
    pub node: NodeId,
    pub pupil: NodeId,
    /// Units moved per tick.
    pub speed: f32,
    /// Ticks until the next blink; values at or below zero mean the lid is
    /// moving (closing until -10, opening after).
    pub blink_timer: i32,
}

pub fn spawn(scene: &mut Scene, rng: &mut impl Rng) -> Result<Vec<Eye>, SceneError> {
    let mut eyes = Vec::with_capacity(EYE_COUNT);
    for _ in 0..EYE_COUNT {
        let node = scene.group(
            "eye",
            None,
            Transform::at(
                rng.gen::<f32>() * 40.0 - 20.0,
                rng.gen::<f32>() * 3.0 + 1.0,
                rng.gen::<f32>() * 40.0 - 20.0,
            ),
        )?;
        let ball = scene.mesh(
            "eyeball",
            Some(node),
            Transform::default(),
            Mesh::Sphere { radius: 0.3, segments: 8, rings: 8, theta_length: PI },
            Material::solid(0xffffff),
        )?;
        let pupil = scene.mesh(
            "pupil",
            Some(ball),
            Transform::at(0.0, 0.0, 0.2),
            Mesh::Sphere { radius: 0.15, segments: 8, rings: 8, theta_length: PI },
            Material::solid(0x000000),
        )?;
        eyes.push(Eye {
            node,
            pupil,
            speed: EYE_SPEED_MIN + rng.gen::<f32>() * EYE_SPEED_SPAN,
            blink_timer: rng.gen_range(0..BLINK_INITIAL_MAX),
        });
    }
    Ok(eyes)
}

/// Horizontal unit vector from `from` toward `target`, or `None` when the two
/// share the same column.
#[inline]
pub fn pursuit_direction(from: Vec3, target: Vec3) -> Option<Vec3> {
    let mut d = target - from;
    d.y = 0.0;
    d.try_normalize()
}

impl Eye {
    /// One tick: close in on `camera`, face it, advance the blink cycle.
    pub fn steer(&mut self, scene: &mut Scene, camera: Vec3, rng: &mut impl Rng) {
        let t = scene.transform_mut(self.node);
        if let Some(dir) = pursuit_direction(t.translation, camera) {
            t.translation += dir * self.speed;
        }
        if let Some(q) = facing(t.translation, camera) {
            t.rotation = q;
        }
        self.blink(&mut t.scale.y, rng);

        // The pupil tracks from its own offset, relative to the body's turn.
        let (origin, body, scale) = (t.translation, t.rotation, t.scale);
        let pupil = scene.transform_mut(self.pupil);
        let at = origin + body * (scale * pupil.translation);
        if let Some(q) = facing(at, camera) {
            pupil.rotation = body.inverse() * q;
        }
    }

    fn blink(&mut self, scale_y: &mut f32, rng: &mut impl Rng) {
        self.blink_timer -= 1;
        if self.blink_timer > 0 {
            return;
        }
        if self.blink_timer > -BLINK_CLOSING_TICKS {
            *scale_y = (*scale_y - BLINK_SCALE_STEP).max(BLINK_MIN_SCALE);
        } else {
            *scale_y = (*scale_y + BLINK_SCALE_STEP).min(1.0);
            if *scale_y >= 1.0 {
                self.blink_timer = rng.gen_range(BLINK_RESET_MIN..BLINK_RESET_MAX);
            }
        }
    }
}

pub fn steer_all(eyes: &mut [Eye], scene: &mut Scene, camera: Vec3, rng: &mut impl Rng) {
    for eye in eyes {
        eye.steer(scene, camera, rng);
    }
}
