//! First-person camera.
//!
//! Orientation is yaw about +Y followed by pitch about the rotated +X, the
//! same order a YXZ Euler camera uses. Yaw 0 looks down -Z.

use crate::constants::{EYE_HEIGHT, FOV_Y_DEGREES, Z_FAR, Z_NEAR};
use glam::{EulerRot, Mat4, Quat, Vec3};

#[derive(Clone, Debug)]
pub struct FirstPersonCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for FirstPersonCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl FirstPersonCamera {
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position).inverse()
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), aspect.max(1e-3), Z_NEAR, Z_FAR)
    }

    /// Translate by an input-space move: `strafe` is +1 right / -1 left and
    /// `back` is +1 backward / -1 forward, both scaled by `speed`.
    pub fn walk(&mut self, strafe: f32, back: f32, speed: f32) {
        if strafe == 0.0 && back == 0.0 {
            return;
        }
        let (s, c) = self.yaw.sin_cos();
        self.position.x += s * back * speed;
        self.position.z += c * back * speed;
        // yaw + 90deg basis for the strafe axis
        self.position.x += c * strafe * speed;
        self.position.z -= s * strafe * speed;
    }
}
