// Host-side tests for the level-triggered input state.

use hollow_core::constants::PITCH_MARGIN;
use hollow_core::input::{InputState, Key, PITCH_LIMIT};
use std::f32::consts::FRAC_PI_2;

#[test]
fn dom_keys_map_case_insensitively() {
    assert_eq!(Key::from_dom_key("w"), Some(Key::Forward));
    assert_eq!(Key::from_dom_key("W"), Some(Key::Forward));
    assert_eq!(Key::from_dom_key("a"), Some(Key::StrafeLeft));
    assert_eq!(Key::from_dom_key("S"), Some(Key::Back));
    assert_eq!(Key::from_dom_key("d"), Some(Key::StrafeRight));
    assert_eq!(Key::from_dom_key("Shift"), Some(Key::Run));
    assert_eq!(Key::from_dom_key("E"), Some(Key::Interact));
    assert_eq!(Key::from_dom_key("q"), None);
    assert_eq!(Key::from_dom_key("Enter"), None);
}

#[test]
fn key_down_reports_only_the_press_edge() {
    let mut input = InputState::default();
    assert!(input.key_down(Key::Interact));
    // auto-repeat while held
    assert!(!input.key_down(Key::Interact));
    assert!(!input.key_down(Key::Interact));
    input.key_up(Key::Interact);
    assert!(!input.is_held(Key::Interact));
    assert!(input.key_down(Key::Interact));
}

#[test]
fn held_keys_are_level_triggered() {
    let mut input = InputState::default();
    input.key_down(Key::Forward);
    assert_eq!(input.move_axes(), (0.0, -1.0));
    input.key_down(Key::StrafeLeft);
    input.key_down(Key::StrafeRight);
    assert_eq!(input.move_axes(), (0.0, -1.0));
    input.key_up(Key::StrafeLeft);
    assert_eq!(input.move_axes(), (1.0, -1.0));
    input.release_all();
    assert_eq!(input.move_axes(), (0.0, 0.0));
}

#[test]
fn releasing_movement_keeps_interact_held() {
    let mut input = InputState::default();
    for key in [Key::Forward, Key::StrafeLeft, Key::Run, Key::Interact] {
        input.key_down(key);
    }
    input.release_movement();
    assert_eq!(input.move_axes(), (0.0, 0.0));
    assert!(!input.is_held(Key::Run));
    assert!(input.is_held(Key::Interact));
    assert!(!input.key_down(Key::Interact));
}

#[test]
fn mouse_is_ignored_without_capture() {
    let mut input = InputState::default();
    input.mouse_move(500.0, -300.0);
    assert_eq!(input.yaw(), 0.0);
    assert_eq!(input.pitch(), 0.0);
}

#[test]
fn mouse_turns_while_captured() {
    let mut input = InputState::with_sensitivity(0.002);
    input.set_captured(true);
    input.mouse_move(100.0, 50.0);
    assert!((input.yaw() - -0.2).abs() < 1e-6);
    assert!((input.pitch() - -0.1).abs() < 1e-6);
}

#[test]
fn pitch_stays_clamped_under_any_input() {
    let mut input = InputState::default();
    input.set_captured(true);
    for dy in [1e6_f32, -1e6, 3.0, -7.5, 1e9, -1e9] {
        for _ in 0..50 {
            input.mouse_move(0.0, dy);
            assert!(input.pitch() <= PITCH_LIMIT);
            assert!(input.pitch() >= -PITCH_LIMIT);
            assert!(input.pitch().abs() < FRAC_PI_2);
        }
    }
    // yaw is unbounded
    input.mouse_move(1e5, 0.0);
    assert!(input.yaw() < -100.0);
}

#[test]
fn pitch_saturates_exactly_at_the_limit() {
    let mut input = InputState::default();
    input.set_captured(true);
    input.mouse_move(0.0, -1e6);
    assert_eq!(input.pitch(), PITCH_LIMIT);
    input.mouse_move(0.0, 1e6);
    assert_eq!(input.pitch(), -PITCH_LIMIT);
    // The inclusive bound still keeps the view PITCH_MARGIN off the poles.
    assert!(FRAC_PI_2 - input.pitch().abs() >= PITCH_MARGIN - 1e-6);
}
