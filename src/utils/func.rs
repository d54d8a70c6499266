/// Constrain `value` to `[low, high]`. Unlike [`Ord::clamp`] this never
/// panics: when `low > high` the lower bound is checked first.
pub fn constrain(value: i32, low: i32, high: i32) -> i32 {
    if value < low {
        low
    } else if value > high {
        high
    } else {
        value
    }
}

/// Constrain a 64 bit intermediate result to the `i32` range
pub fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Linearly map `value` from the range `[in_min, in_max]` to the range
/// `[out_min, out_max]` using integer maths. An empty input range maps
/// everything to `out_min`.
pub fn scale_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    let in_delta = in_max as i64 - in_min as i64;
    if in_delta == 0 {
        return out_min;
    }

    let out_delta = out_max as i64 - out_min as i64;
    saturate(out_delta * (value as i64 - in_min as i64) / in_delta + out_min as i64)
}

/// Wrap an angle in whole degrees such that it lies in `[0, 360)`
pub fn wrap_degrees(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}
