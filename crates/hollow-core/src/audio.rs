//! Audio side effects as plain values.
//!
//! The core never touches a media element. It pushes `AudioCue`s into an
//! output buffer and the front end applies them in order.

use crate::constants::{DISTRESS_MAX_VOLUME, DISTRESS_MIN_VOLUME};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Track {
    /// The looping sad background score.
    Score,
    /// The baby crying loop heard inside the house.
    Distress,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioCue {
    Play(Track),
    Pause(Track),
    Volume(Track, f32),
}

/// Distress volume for a listener `distance` away from the interior anchor.
/// Rises linearly toward the anchor and is clamped to the distress range;
/// beyond `radius` it sits at the floor.
pub fn proximity_volume(distance: f32, radius: f32) -> f32 {
    if distance < radius {
        ((radius - distance) / radius + DISTRESS_MIN_VOLUME)
            .clamp(DISTRESS_MIN_VOLUME, DISTRESS_MAX_VOLUME)
    } else {
        DISTRESS_MIN_VOLUME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_listener_is_capped() {
        assert!((proximity_volume(2.0, 10.0) - 0.8).abs() < 1e-6);
        assert!((proximity_volume(0.0, 10.0) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn far_listener_gets_floor() {
        assert_eq!(proximity_volume(10.0, 10.0), DISTRESS_MIN_VOLUME);
        assert_eq!(proximity_volume(55.0, 10.0), DISTRESS_MIN_VOLUME);
    }
}
