//! Percentage and linear interpolation helpers.
//!
//! Ranges may run in either direction: `start > end` is allowed and simply
//! reverses the mapping.

/// Where `value` sits between `start` and `end`, as a fraction in `[0, 1]`.
///
/// Returns `None` for an empty range or a value outside it.
///
/// ```
/// use draglist_core::percent_of_range;
///
/// assert_eq!(percent_of_range(0.0, 200.0, 50.0), Some(0.25));
/// assert_eq!(percent_of_range(300.0, 0.0, 75.0), Some(0.75));
/// assert_eq!(percent_of_range(0.0, 10.0, 11.0), None);
/// ```
pub fn percent_of_range(start: f32, end: f32, value: f32) -> Option<f32> {
    if start == end || (value < start && value < end) || (value > start && value > end) {
        return None;
    }
    Some((value - start) / (end - start))
}

/// The value at fraction `t` between `start` and `end`.
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + t * (end - start)
}

/// Integer [`lerp`], truncating toward zero.
#[inline]
pub fn lerp_int(start: i32, end: i32, t: f32) -> i32 {
    (start as f32 + t * (end - start) as f32) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_endpoints() {
        assert_eq!(percent_of_range(0.0, 300.0, 0.0), Some(0.0));
        assert_eq!(percent_of_range(0.0, 300.0, 300.0), Some(1.0));
        assert_eq!(percent_of_range(300.0, 0.0, 300.0), Some(0.0));
    }

    #[test]
    fn test_percent_rejects_empty_and_outside() {
        assert_eq!(percent_of_range(5.0, 5.0, 5.0), None);
        assert_eq!(percent_of_range(0.0, 10.0, -0.5), None);
        assert_eq!(percent_of_range(10.0, 0.0, 10.5), None);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.8, 0.0, 0.0), 0.8);
        assert_eq!(lerp(0.8, 0.0, 1.0), 0.0);
        assert!((lerp(0.8, 0.0, 0.5) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_lerp_int_truncates() {
        assert_eq!(lerp_int(250, 0, 0.5), 125);
        assert_eq!(lerp_int(0, 10, 0.55), 5);
        assert_eq!(lerp_int(0, -10, 0.55), -5);
        assert_eq!(lerp_int(250, 0, 1.0), 0);
    }
}
