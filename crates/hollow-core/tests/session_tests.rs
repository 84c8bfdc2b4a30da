// Host-side tests for the fixed-step session: loop order effects, movement,
// door interaction and audio cues.

use glam::{Quat, Vec3};
use hollow_core::audio::{proximity_volume, AudioCue, Track};
use hollow_core::constants::*;
use hollow_core::door::DoorTransition;
use hollow_core::input::Key;
use hollow_core::session::Session;
use std::time::Duration;

fn session() -> Session {
    Session::new(SessionConfig::default()).unwrap()
}

fn running() -> Session {
    let mut s = session();
    s.begin(&mut Vec::new());
    s
}

#[test]
fn builds_the_full_population() {
    let s = session();
    let world = s.world();
    assert_eq!(world.tumblers.len(), CUBE_COUNT);
    assert_eq!(world.mushrooms.len(), MUSHROOM_COUNT);
    assert_eq!(world.screens.len(), SCREEN_COUNT);
    assert_eq!(world.eyes.len(), EYE_COUNT);
    assert_eq!(s.scene().node(world.terrain).transform.translation.y, TERRAIN_Y);
    assert_eq!(s.camera().position, Vec3::new(0.0, EYE_HEIGHT, 0.0));
}

#[test]
fn same_seed_same_world() {
    let mut a = running();
    let mut b = running();
    let mut out = Vec::new();
    for _ in 0..30 {
        a.step(&mut out);
        b.step(&mut out);
    }
    for (ea, eb) in a.world().eyes.iter().zip(&b.world().eyes) {
        assert_eq!(
            a.scene().transform(ea.node).translation,
            b.scene().transform(eb.node).translation
        );
    }
}

#[test]
fn begin_and_end_emit_the_audio_lifecycle() {
    let mut s = session();
    let mut out = Vec::new();
    s.begin(&mut out);
    assert_eq!(
        out,
        vec![
            AudioCue::Volume(Track::Score, SCORE_BASE_VOLUME),
            AudioCue::Play(Track::Score),
            AudioCue::Volume(Track::Distress, DISTRESS_INITIAL_VOLUME),
        ]
    );
    out.clear();
    s.begin(&mut out);
    assert!(out.is_empty());
    s.end(&mut out);
    assert_eq!(
        out,
        vec![AudioCue::Pause(Track::Score), AudioCue::Pause(Track::Distress)]
    );
    assert!(!s.is_running());
}

#[test]
fn a_built_session_is_silent_until_begin() {
    let mut s = session();
    let mut out = Vec::new();
    s.place_camera(DOOR_ANCHOR);
    assert_eq!(s.advance(Duration::from_secs(1), &mut out), 0);
    assert_eq!(s.key_down(Key::Interact, &mut out), None);
    s.set_captured(false);
    assert!(out.is_empty());
    assert!(!s.is_running());
    assert_eq!(s.clock(), 0.0);

    // Dropping an unstarted session needs no matching end().
    s.end(&mut out);
    assert!(out.is_empty());
}

#[test]
fn advance_runs_fixed_steps() {
    let mut s = session();
    let mut out = Vec::new();
    assert_eq!(s.advance(Duration::from_millis(100), &mut out), 0);

    s.begin(&mut out);
    assert_eq!(s.advance(Duration::from_millis(10), &mut out), 0);
    assert_eq!(s.advance(Duration::from_millis(10), &mut out), 1);
    assert_eq!(s.advance(Duration::from_millis(60), &mut out), 3);
    assert!((s.clock() - 4.0 * FIXED_STEP_SECS).abs() < 1e-6);
}

#[test]
fn advance_caps_steps_and_drops_backlog() {
    let mut s = running();
    let mut out = Vec::new();
    assert_eq!(s.advance(Duration::from_secs(2), &mut out), MAX_STEPS_PER_FRAME);
    assert_eq!(s.advance(Duration::ZERO, &mut out), 0);
}

#[test]
fn cubes_tumble_by_a_fixed_step() {
    let mut s = running();
    let before = s.world().tumblers[0].angles;
    s.step(&mut Vec::new());
    let after = s.world().tumblers[0].angles;
    assert!((after - before - glam::Vec2::splat(TUMBLE_STEP)).length() < 1e-6);
}

#[test]
fn movement_needs_capture() {
    let mut s = running();
    let mut out = Vec::new();
    s.key_down(Key::Forward, &mut out);
    for _ in 0..10 {
        s.step(&mut out);
    }
    assert_eq!(s.camera().position, Vec3::new(0.0, EYE_HEIGHT, 0.0));

    s.set_captured(true);
    s.key_down(Key::Forward, &mut out);
    for _ in 0..10 {
        s.step(&mut out);
    }
    let p = s.camera().position;
    assert!((p.z - -1.5).abs() < 1e-4);
    assert!(p.x.abs() < 1e-6);
    assert_eq!(p.y, EYE_HEIGHT);
}

#[test]
fn running_doubles_speed_and_strafe_follows_yaw() {
    let mut s = running();
    let mut out = Vec::new();
    s.set_captured(true);
    s.key_down(Key::Run, &mut out);
    s.key_down(Key::StrafeRight, &mut out);
    s.step(&mut out);
    assert!((s.camera().position.x - MOVE_SPEED * RUN_MULTIPLIER).abs() < 1e-6);

    // Turn a quarter to the left; strafing right now heads toward -Z.
    s.key_up(Key::Run);
    s.place_camera(Vec3::ZERO);
    s.mouse_move(-std::f32::consts::FRAC_PI_2 / MOUSE_SENSITIVITY, 0.0);
    s.step(&mut out);
    let p = s.camera().position;
    assert!((p - Vec3::new(0.0, 0.0, -MOVE_SPEED)).length() < 1e-4);
}

#[test]
fn releasing_capture_drops_held_keys() {
    let mut s = running();
    s.set_captured(true);
    s.key_down(Key::Back, &mut Vec::new());
    s.set_captured(false);
    assert!(!s.input().is_held(Key::Back));
}

#[test]
fn walking_up_to_the_door_and_entering() {
    let mut s = running();
    let mut out = Vec::new();

    s.place_camera(DOOR_ANCHOR + Vec3::new(0.0, 0.0, 20.0));
    s.step(&mut out);
    assert!(!s.near_door());
    assert_eq!(s.key_down(Key::Interact, &mut out), None);
    s.key_up(Key::Interact);

    s.place_camera(DOOR_ANCHOR + Vec3::new(0.0, 0.0, 4.0));
    s.step(&mut out);
    assert!(s.near_door());

    out.clear();
    assert_eq!(s.key_down(Key::Interact, &mut out), Some(DoorTransition::Opened));
    assert!(s.doors().doors_open());
    assert!(s.doors().inside_house());
    assert!(out.contains(&AudioCue::Volume(Track::Score, SCORE_INSIDE_VOLUME)));
    assert!(out.contains(&AudioCue::Play(Track::Distress)));

    let house = &s.world().house;
    let left = s.scene().transform(house.doors[0].node);
    assert_eq!(*left, house.doors[0].pose(true));
    assert!(left.rotation.angle_between(Quat::IDENTITY) > 1.0);
}

#[test]
fn held_interact_toggles_once() {
    let mut s = running();
    let mut out = Vec::new();
    s.place_camera(DOOR_ANCHOR);
    s.step(&mut out);

    assert_eq!(s.key_down(Key::Interact, &mut out), Some(DoorTransition::Opened));
    assert_eq!(s.key_down(Key::Interact, &mut out), None);
    assert_eq!(s.key_down(Key::Interact, &mut out), None);
    assert!(s.doors().doors_open());

    s.key_up(Key::Interact);
    assert_eq!(s.key_down(Key::Interact, &mut out), Some(DoorTransition::Closed));
    assert!(!s.doors().inside_house());
    let house = &s.world().house;
    assert_eq!(*s.scene().transform(house.doors[1].node), house.doors[1].pose(false));
}

#[test]
fn held_interact_survives_losing_pointer_lock() {
    let mut s = running();
    let mut out = Vec::new();
    s.set_captured(true);
    s.place_camera(DOOR_ANCHOR);
    s.step(&mut out);

    assert_eq!(s.key_down(Key::Interact, &mut out), Some(DoorTransition::Opened));
    s.key_down(Key::Forward, &mut out);
    s.set_captured(false);
    assert!(!s.input().is_held(Key::Forward));
    assert!(s.input().is_held(Key::Interact));

    // Auto-repeat of the same physical press after Esc.
    assert_eq!(s.key_down(Key::Interact, &mut out), None);
    assert!(s.doors().doors_open());
    assert!(s.doors().inside_house());

    s.key_up(Key::Interact);
    assert_eq!(s.key_down(Key::Interact, &mut out), Some(DoorTransition::Closed));
}

#[test]
fn interact_before_begin_is_ignored() {
    let mut s = session();
    let mut out = Vec::new();
    s.place_camera(DOOR_ANCHOR);
    s.step(&mut out);
    assert_eq!(s.key_down(Key::Interact, &mut out), None);
    assert!(out.is_empty());
}

#[test]
fn distress_rises_near_the_baby() {
    let mut s = running();
    let mut out = Vec::new();
    s.place_camera(DOOR_ANCHOR);
    s.step(&mut out);
    s.key_down(Key::Interact, &mut out);
    assert!(s.doors().inside_house());

    out.clear();
    s.place_camera(INTERIOR_ANCHOR + Vec3::new(0.0, 0.0, 2.0));
    s.step(&mut out);
    assert!((s.distress_volume() - 0.8).abs() < 1e-6);
    assert!(out.contains(&AudioCue::Volume(Track::Distress, s.distress_volume())));

    // No repeat cue while the level is unchanged.
    out.clear();
    s.step(&mut out);
    assert!(!out.iter().any(|c| matches!(c, AudioCue::Volume(Track::Distress, _))));
}

#[test]
fn distress_is_left_alone_outside() {
    let mut s = running();
    let mut out = Vec::new();
    s.place_camera(INTERIOR_ANCHOR);
    for _ in 0..5 {
        s.step(&mut out);
    }
    assert_eq!(s.distress_volume(), DISTRESS_INITIAL_VOLUME);
    assert!(out.is_empty());
}

#[test]
fn proximity_volume_is_bounded_and_monotone() {
    let mut last = f32::INFINITY;
    for i in 0..=60 {
        let d = i as f32 * 0.5;
        let v = proximity_volume(d, DISTRESS_FALLOFF_RADIUS);
        assert!((DISTRESS_MIN_VOLUME..=DISTRESS_MAX_VOLUME).contains(&v));
        assert!(v <= last + 1e-6, "volume rose at distance {}", d);
        last = v;
    }
    assert!((proximity_volume(2.0, 10.0) - 0.8).abs() < 1e-6);
    assert!((proximity_volume(8.0, 10.0) - 0.5).abs() < 1e-6);
}
