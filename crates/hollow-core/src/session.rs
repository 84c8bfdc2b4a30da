//! The running experience: one owner for the world, camera, input and door
//! state, advanced by a fixed-step tick.
//!
//! Event handlers call the `key_*`/`mouse_move`/`set_captured` methods; the
//! frame driver calls `advance` once per display refresh and then draws.
//! Audio side effects leave through the `out` buffers as `AudioCue`s.

use crate::audio::{proximity_volume, AudioCue, Track};
use crate::camera::FirstPersonCamera;
use crate::constants::{SessionConfig, FIXED_STEP_SECS, MAX_STEPS_PER_FRAME};
use crate::door::{DoorController, DoorTransition};
use crate::error::SceneError;
use crate::eyes::steer_all;
use crate::input::{InputState, Key};
use crate::scene::Scene;
use crate::world::World;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

pub struct Session {
    world: World,
    camera: FirstPersonCamera,
    input: InputState,
    doors: DoorController,
    config: SessionConfig,
    rng: StdRng,
    /// Seconds of simulated time, advanced by the fixed step.
    clock: f32,
    accumulator: f32,
    distress_volume: f32,
    running: bool,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, SceneError> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let world = World::build(&mut rng)?;
        Ok(Self {
            world,
            camera: FirstPersonCamera::default(),
            input: InputState::with_sensitivity(config.mouse_sensitivity),
            doors: DoorController::new(config.score_base_volume, config.score_inside_volume),
            distress_volume: config.distress_initial_volume,
            config,
            rng,
            clock: 0.0,
            accumulator: 0.0,
            running: false,
        })
    }

    /// Start ticking and emit the opening audio state.
    pub fn begin(&mut self, out: &mut Vec<AudioCue>) {
        if self.running {
            return;
        }
        self.running = true;
        out.push(AudioCue::Volume(Track::Score, self.config.score_base_volume));
        out.push(AudioCue::Play(Track::Score));
        out.push(AudioCue::Volume(Track::Distress, self.distress_volume));
        log::info!("[session] begin (seed {})", self.config.seed);
    }

    /// Stop ticking and silence everything.
    pub fn end(&mut self, out: &mut Vec<AudioCue>) {
        if !self.running {
            return;
        }
        self.running = false;
        self.input.release_all();
        out.push(AudioCue::Pause(Track::Score));
        out.push(AudioCue::Pause(Track::Distress));
        log::info!("[session] end after {:.1}s", self.clock);
    }

    /// Feed elapsed wall time and run as many fixed steps as it covers, up to
    /// `MAX_STEPS_PER_FRAME`. Returns the number of steps run.
    pub fn advance(&mut self, dt: Duration, out: &mut Vec<AudioCue>) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator += dt.as_secs_f32();
        let mut steps = 0;
        while self.accumulator >= FIXED_STEP_SECS && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_STEP_SECS;
            self.step(out);
            steps += 1;
        }
        if self.accumulator >= FIXED_STEP_SECS {
            log::debug!("[session] dropping {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        steps
    }

    /// One simulation tick.
    pub fn step(&mut self, out: &mut Vec<AudioCue>) {
        self.clock += FIXED_STEP_SECS;
        let World {
            scene,
            tumblers,
            screens,
            eyes,
            house,
            ..
        } = &mut self.world;

        for cube in tumblers.iter_mut() {
            cube.tumble(scene);
        }
        for screen in screens.iter_mut() {
            screen.drift(scene, self.clock, &mut self.rng);
        }
        house.update(scene, self.clock, &mut self.rng);
        steer_all(eyes, scene, self.camera.position, &mut self.rng);

        self.doors.update_proximity(
            self.camera.position,
            self.config.door_anchor,
            self.config.near_door_radius,
        );

        if self.doors.inside_house() {
            let distance = self.camera.position.distance(self.config.interior_anchor);
            let volume = proximity_volume(distance, self.config.falloff_radius);
            if (volume - self.distress_volume).abs() > f32::EPSILON {
                self.distress_volume = volume;
                out.push(AudioCue::Volume(Track::Distress, volume));
            }
        }

        self.camera.yaw = self.input.yaw();
        self.camera.pitch = self.input.pitch();
        if self.input.captured() {
            let (strafe, back) = self.input.move_axes();
            let speed = if self.input.is_held(Key::Run) {
                self.config.move_speed * self.config.run_multiplier
            } else {
                self.config.move_speed
            };
            self.camera.walk(strafe, back, speed);
        }
    }

    /// Press `key`. The interact key acts once per press edge and only while
    /// the session is running.
    pub fn key_down(&mut self, key: Key, out: &mut Vec<AudioCue>) -> Option<DoorTransition> {
        let edge = self.input.key_down(key);
        if !(edge && key == Key::Interact && self.running) {
            return None;
        }
        let transition = self.doors.interact(out)?;
        self.world
            .house
            .set_doors_open(&mut self.world.scene, self.doors.doors_open());
        Some(transition)
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    pub fn mouse_move(&mut self, dx: f32, dy: f32) {
        self.input.mouse_move(dx, dy);
    }

    pub fn set_captured(&mut self, captured: bool) {
        self.input.set_captured(captured);
        if !captured {
            self.input.release_movement();
        }
    }

    /// Place the camera, e.g. at a spawn point. Orientation still follows input.
    pub fn place_camera(&mut self, position: Vec3) {
        self.camera.position = position;
    }

    pub fn scene(&self) -> &Scene {
        &self.world.scene
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &FirstPersonCamera {
        &self.camera
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn doors(&self) -> &DoorController {
        &self.doors
    }

    pub fn near_door(&self) -> bool {
        self.doors.near_door()
    }

    pub fn distress_volume(&self) -> f32 {
        self.distress_volume
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
