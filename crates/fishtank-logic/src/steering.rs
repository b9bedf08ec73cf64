//! Heading and speed control shared by fish and the shark.
//!
//! Swimmers never snap: headings rotate at a bounded rate and speeds ease
//! toward their target. Easing factors are defined per 1/60 s frame and scaled
//! by the real delta so results depend only on the delta sequence.

use std::f32::consts::{PI, TAU};

/// Reference frame length the easing constants were tuned at.
pub const REFERENCE_FRAME: f32 = 1.0 / 60.0;

/// Wrap an angle into (-π, π].
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}

/// Signed shortest rotation from `from` to `to`, in (-π, π].
pub fn angle_difference(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}

/// Rotate `current` toward `target` by at most `max_step` radians.
/// Differences under 0.01 rad are left alone.
pub fn turn_toward(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = angle_difference(current, target);
    if diff.abs() <= 0.01 {
        return current;
    }
    let step = diff.signum() * max_step.min(diff.abs());
    normalize_angle(current + step)
}

/// Asymmetric speed easing: speeding up gains `acceleration × target` per
/// reference frame, slowing down sheds `2 × acceleration` per frame.
pub fn ease_speed(current: f32, target: f32, acceleration: f32, delta_seconds: f32) -> f32 {
    let frames = delta_seconds / REFERENCE_FRAME;
    if current < target {
        (current + acceleration * target * frames).min(target)
    } else {
        (current - acceleration * 2.0 * frames).max(target)
    }
}

/// Exponential approach toward `target`, `rate` being the fraction closed per
/// reference frame.
pub fn lerp_toward(current: f32, target: f32, rate: f32, delta_seconds: f32) -> f32 {
    let frames = delta_seconds / REFERENCE_FRAME;
    let t = 1.0 - (1.0 - rate.clamp(0.0, 1.0)).powf(frames);
    current + (target - current) * t
}

/// Sprite facing derived from the heading.
pub fn facing_right(heading: f32) -> bool {
    heading.cos() >= 0.0
}
