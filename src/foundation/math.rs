use crate::foundation::core::Vec2;

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_deg(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if d >= 360.0 { 0.0 } else { d }
}

/// Round an angle to the nearest multiple of `step` degrees, then wrap into `[0, 360)`.
pub fn snap_deg(deg: f64, step: f64) -> f64 {
    if step <= 0.0 || !step.is_finite() {
        return normalize_deg(deg);
    }
    normalize_deg((deg / step).round() * step)
}

/// Rotate a screen-space delta into an element's local frame (inverse rotation by `rotation_deg`).
pub fn screen_to_local(delta: Vec2, rotation_deg: f64) -> Vec2 {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    Vec2::new(delta.x * cos + delta.y * sin, delta.y * cos - delta.x * sin)
}

/// Rotate a local-frame offset back into screen space (forward rotation by `rotation_deg`).
pub fn local_to_screen(delta: Vec2, rotation_deg: f64) -> Vec2 {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    Vec2::new(delta.x * cos - delta.y * sin, delta.x * sin + delta.y * cos)
}

pub(crate) fn finite_vec(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
