//! Closed-form interception solving
//!
//! Given a target's current kinematics and a fixed projectile speed, find the
//! launch velocity whose straight-line flight meets the target's predicted
//! position. Pure functions over `glam::Vec2`; no engine state, so the math
//! is unit-testable against known cases.

use glam::Vec2;

/// Below this |a| the quadratic degenerates and we fall back to
/// direct-distance timing.
const DEGENERATE_EPS: f32 = 1e-3;

/// Solve for the intercept time of a projectile of speed `speed` launched
/// from `origin` at a target at `target_pos` moving with `target_vel`.
///
/// Roots come from `a·t² + b·t + c = 0` with
/// `a = |V|² − s²`, `b = 2·V·(P − O)`, `c = |P − O|²`.
///
/// Returns 0.0 when no real solution exists (caller aims at the current
/// position instead of a lead point).
pub fn intercept_time(target_pos: Vec2, target_vel: Vec2, origin: Vec2, speed: f32) -> f32 {
    let to_target = target_pos - origin;

    let a = target_vel.length_squared() - speed * speed;
    let b = 2.0 * target_vel.dot(to_target);
    let c = to_target.length_squared();

    if a.abs() < DEGENERATE_EPS {
        // Relative closing speed cancels out; time a straight shot.
        return to_target.length() / speed;
    }

    let disc = b * b - 4.0 * a * c;
    if disc >= 0.0 {
        let sqrt_disc = disc.sqrt();
        let mut t = (-b - sqrt_disc) / (2.0 * a);
        if t < 0.0 {
            t = (-b + sqrt_disc) / (2.0 * a);
        }
        t
    } else {
        0.0
    }
}

/// Launch velocity of magnitude `speed` aimed at the predicted intercept
/// point, or directly at the target when no positive intercept time exists.
///
/// Returns `Vec2::ZERO` only when the aim point coincides with the origin;
/// callers must guard before using the result as a direction.
pub fn launch_velocity(target_pos: Vec2, target_vel: Vec2, origin: Vec2, speed: f32) -> Vec2 {
    let t = intercept_time(target_pos, target_vel, origin, speed);

    let aim_point = if t > 0.0 {
        target_pos + target_vel * t
    } else {
        target_pos
    };

    (aim_point - origin).normalize_or_zero() * speed
}
