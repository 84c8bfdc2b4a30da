// Host-side tests for layout constants and the default session config.

use hollow_core::constants::*;

#[test]
fn door_anchor_is_the_front_of_the_house() {
    assert_eq!(DOOR_ANCHOR.z, HOUSE_POSITION.z + HOUSE_DEPTH / 2.0);
    assert_eq!(DOOR_ANCHOR.x, HOUSE_POSITION.x);
    // the interior anchor lies behind the door, inside the walls
    assert!(INTERIOR_ANCHOR.z < DOOR_ANCHOR.z);
    assert!(INTERIOR_ANCHOR.z > HOUSE_POSITION.z - HOUSE_DEPTH / 2.0);
}

#[test]
fn camera_starts_well_outside_the_door_radius() {
    let start = glam::Vec3::new(0.0, EYE_HEIGHT, 0.0);
    assert!(start.distance(DOOR_ANCHOR) > NEAR_DOOR_RADIUS * 4.0);
}

#[test]
fn volume_levels_are_ordered() {
    assert!(DISTRESS_MIN_VOLUME < DISTRESS_MAX_VOLUME);
    assert!(SCORE_BASE_VOLUME < SCORE_INSIDE_VOLUME);
    assert!(DISTRESS_MAX_VOLUME <= 1.0);
    assert!(FADE_DELAY_MS < START_DELAY_MS);
}

#[test]
fn default_config_mirrors_the_constants() {
    let c = SessionConfig::default();
    assert_eq!(c.door_anchor, DOOR_ANCHOR);
    assert_eq!(c.interior_anchor, INTERIOR_ANCHOR);
    assert_eq!(c.near_door_radius, NEAR_DOOR_RADIUS);
    assert_eq!(c.falloff_radius, DISTRESS_FALLOFF_RADIUS);
    assert_eq!(c.move_speed, MOVE_SPEED);
    assert_eq!(c.score_inside_volume, SCORE_INSIDE_VOLUME);
}
