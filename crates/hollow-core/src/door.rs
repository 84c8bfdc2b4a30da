//! Door and room state machine.
//!
//! Only `(Closed, Outside)` and `(Open, Inside)` are reachable: every accepted
//! interaction flips both flags together.

use crate::audio::{AudioCue, Track};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorTransition {
    Opened,
    Closed,
}

#[derive(Clone, Debug)]
pub struct DoorController {
    doors_open: bool,
    inside_house: bool,
    near_door: bool,
    score_base_volume: f32,
    score_inside_volume: f32,
}

impl DoorController {
    pub fn new(score_base_volume: f32, score_inside_volume: f32) -> Self {
        Self {
            doors_open: false,
            inside_house: false,
            near_door: false,
            score_base_volume,
            score_inside_volume,
        }
    }

    pub fn doors_open(&self) -> bool {
        self.doors_open
    }

    pub fn inside_house(&self) -> bool {
        self.inside_house
    }

    pub fn near_door(&self) -> bool {
        self.near_door
    }

    /// Recompute `near_door` from the camera position. Returns true when the
    /// flag changed so callers can refresh the prompt only on edges.
    pub fn update_proximity(&mut self, camera: Vec3, anchor: Vec3, radius: f32) -> bool {
        let near = camera.distance(anchor) < radius;
        let changed = near != self.near_door;
        self.near_door = near;
        changed
    }

    /// Handle one interact press. A no-op unless the camera is near the door.
    pub fn interact(&mut self, out: &mut Vec<AudioCue>) -> Option<DoorTransition> {
        if !self.near_door {
            log::debug!("[door] interact ignored, not near the door");
            return None;
        }
        self.doors_open = !self.doors_open;
        if self.doors_open && !self.inside_house {
            self.inside_house = true;
            out.push(AudioCue::Play(Track::Distress));
            out.push(AudioCue::Volume(Track::Score, self.score_inside_volume));
            log::info!("[door] opened, entering");
            Some(DoorTransition::Opened)
        } else if !self.doors_open && self.inside_house {
            self.inside_house = false;
            out.push(AudioCue::Pause(Track::Distress));
            out.push(AudioCue::Volume(Track::Score, self.score_base_volume));
            log::info!("[door] closed, leaving");
            Some(DoorTransition::Closed)
        } else {
            // Unreachable while both flags move together; keep the pose in sync anyway.
            log::warn!(
                "[door] toggled with open={} inside={}",
                self.doors_open,
                self.inside_house
            );
            Some(if self.doors_open {
                DoorTransition::Opened
            } else {
                DoorTransition::Closed
            })
        }
    }
}
