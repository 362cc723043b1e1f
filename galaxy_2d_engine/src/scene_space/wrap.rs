/// Axis-generic wrap functions.
///
/// Every 2D operation in this crate is built from these three functions
/// applied once per axis with that axis' dimension and wrap flag.

/// Reduce `pos` into `[0, dimension)` when the axis wraps.
///
/// Uses floored modulo, so negative positions re-enter from the far side.
/// Non-wrapping axes and degenerate dimensions leave `pos` untouched.
///
/// Returns the new position and whether wrapping changed it.
pub fn wrap_coordinate(pos: f32, dimension: f32, wrap: bool) -> (f32, bool) {
    if !wrap || dimension <= 0.0 {
        return (pos, false);
    }
    let mut wrapped = pos.rem_euclid(dimension);
    // rem_euclid of a tiny negative value can round up to `dimension`
    if wrapped >= dimension {
        wrapped = 0.0;
    }
    (wrapped, wrapped != pos)
}

/// Like [`wrap_coordinate`], but a non-wrapping axis is clamped into
/// `[0, dimension - 1]` so the result is always a valid pixel coordinate.
pub fn force_bounds(pos: f32, dimension: f32, wrap: bool) -> (f32, bool) {
    if wrap {
        return wrap_coordinate(pos, dimension, wrap);
    }
    let upper = (dimension - 1.0).max(0.0);
    let clamped = pos.clamp(0.0, upper);
    (clamped, clamped != pos)
}

/// Signed displacement from `a` to `b` along one axis.
///
/// On a wrapping axis the shorter way around is taken: any displacement
/// longer than half the dimension is replaced by the one going the other
/// way. The result is odd in its arguments
/// (`d(a, b) == -d(b, a)`) and never longer than `dimension / 2`.
pub fn shortest_axis_distance(a: f32, b: f32, dimension: f32, wrap: bool) -> f32 {
    let mut raw = b - a;
    if !wrap || dimension <= 0.0 {
        return raw;
    }
    // Truncated remainder keeps the sign, which preserves antisymmetry.
    raw %= dimension;
    if raw.abs() > dimension / 2.0 {
        raw -= raw.signum() * dimension;
    }
    raw
}

#[cfg(test)]
#[path = "wrap_tests.rs"]
mod tests;
