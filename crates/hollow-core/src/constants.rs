use glam::Vec3;

// Shared layout and tuning constants for the scene and its update loop.

// Loop timing
pub const FIXED_STEP_SECS: f32 = 1.0 / 60.0; // one simulation tick
pub const MAX_STEPS_PER_FRAME: u32 = 5; // backlog beyond this is dropped

// Population
pub const CUBE_COUNT: usize = 50;
pub const MUSHROOM_COUNT: usize = 12;
pub const SCREEN_COUNT: usize = 5;
pub const EYE_COUNT: usize = 8;

// Terrain
pub const TERRAIN_SIZE: f32 = 100.0;
pub const TERRAIN_Y: f32 = -2.0;

// Decoration motion (per tick)
pub const TUMBLE_STEP: f32 = 0.01; // radians on x and y
pub const SCREEN_FLOAT_AMPLITUDE: f32 = 0.01;
pub const SCREEN_SPIN_MAX: f32 = 0.01;

// Dynamic textures
pub const STATIC_REFRESH_FRACTION: f32 = 0.3; // share of cells redrawn per tick
pub const STATIC_CELL: u32 = 2; // px

// House placement and size
pub const HOUSE_POSITION: Vec3 = Vec3::new(0.0, -1.0, -45.0);
pub const HOUSE_WIDTH: f32 = 20.0;
pub const HOUSE_HEIGHT: f32 = 10.0;
pub const HOUSE_DEPTH: f32 = 20.0;
pub const DOOR_LEAF_WIDTH: f32 = 2.0;
pub const DOOR_SWING_OFFSET: f32 = 1.0; // lateral and inward shift of an open leaf

// Baby animation
pub const TEAR_FLOOR_Y: f32 = -0.2; // tears reset once below this
pub const TEAR_RESET_Y: f32 = 0.3;
pub const BODY_REST_Y: f32 = -0.2;
pub const BODY_BOUNCE: f32 = 0.05;
pub const BODY_BOUNCE_RATE: f32 = 10.0;
pub const HEAD_SHAKE: f32 = 0.1;
pub const HEAD_SHAKE_RATE: f32 = 15.0;

// Proximity anchors (world space)
pub const DOOR_ANCHOR: Vec3 = Vec3::new(0.0, 0.0, HOUSE_POSITION.z + HOUSE_DEPTH / 2.0);
pub const INTERIOR_ANCHOR: Vec3 = Vec3::new(0.0, 2.0, -50.0); // the baby on the sofa
pub const NEAR_DOOR_RADIUS: f32 = 5.0;
pub const DISTRESS_FALLOFF_RADIUS: f32 = 10.0;

// Eyes
pub const EYE_SPEED_MIN: f32 = 0.01;
pub const EYE_SPEED_SPAN: f32 = 0.02;
pub const BLINK_INITIAL_MAX: i32 = 100;
pub const BLINK_RESET_MIN: i32 = 50;
pub const BLINK_RESET_MAX: i32 = 200;
pub const BLINK_CLOSING_TICKS: i32 = 10; // timer in (-10, 0] closes the lid
pub const BLINK_SCALE_STEP: f32 = 0.1;
pub const BLINK_MIN_SCALE: f32 = 0.1;

// Camera and movement
pub const EYE_HEIGHT: f32 = 1.6;
pub const MOVE_SPEED: f32 = 0.15; // units per tick
pub const RUN_MULTIPLIER: f32 = 2.0;
pub const MOUSE_SENSITIVITY: f32 = 0.002; // radians per pixel
pub const PITCH_MARGIN: f32 = 0.1; // keeps pitch off the poles
pub const FOV_Y_DEGREES: f32 = 75.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

// Audio levels
pub const PROFILE_MUSIC_VOLUME: f32 = 0.3;
pub const SCORE_BASE_VOLUME: f32 = 0.4;
pub const SCORE_INSIDE_VOLUME: f32 = 0.7;
pub const DISTRESS_INITIAL_VOLUME: f32 = 0.5;
pub const DISTRESS_MIN_VOLUME: f32 = 0.3;
pub const DISTRESS_MAX_VOLUME: f32 = 0.8;

// Launch sequence delays after the avatar click
pub const FADE_DELAY_MS: i32 = 1200;
pub const START_DELAY_MS: i32 = 2000;

// Rendering look
pub const PIXEL_RATIO: f64 = 0.3; // backing store scale for the chunky look
pub const FOG_COLOR: [f32; 3] = [0.4, 0.4, 0.4]; // 0x666666
pub const FOG_DENSITY: f32 = 0.05;

/// Tunables a front end or a test may override.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub seed: u64,
    pub door_anchor: Vec3,
    pub interior_anchor: Vec3,
    pub near_door_radius: f32,
    pub falloff_radius: f32,
    pub move_speed: f32,
    pub run_multiplier: f32,
    pub mouse_sensitivity: f32,
    pub score_base_volume: f32,
    pub score_inside_volume: f32,
    pub distress_initial_volume: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            door_anchor: DOOR_ANCHOR,
            interior_anchor: INTERIOR_ANCHOR,
            near_door_radius: NEAR_DOOR_RADIUS,
            falloff_radius: DISTRESS_FALLOFF_RADIUS,
            move_speed: MOVE_SPEED,
            run_multiplier: RUN_MULTIPLIER,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            score_base_volume: SCORE_BASE_VOLUME,
            score_inside_volume: SCORE_INSIDE_VOLUME,
            distress_initial_volume: DISTRESS_INITIAL_VOLUME,
        }
    }
}
