//! Shared piecewise-linear helpers.

/// Linear interpolation/extrapolation through two points.
pub(crate) fn lerp(x0: f64, y0: f64, x1: f64, y1: f64, x: f64) -> f64 {
    let slope = (y1 - y0) / (x1 - x0);
    y0 + slope * (x - x0)
}

/// Indices of the segment whose x-range brackets `x`, clamped to the
/// end segments for out-of-range queries so the caller extrapolates
/// with the nearest segment's slope.
///
/// Callers guarantee at least two items with strictly increasing keys.
pub(crate) fn segment<T>(items: &[T], key: impl Fn(&T) -> f64, x: f64) -> (usize, usize) {
    let n = items.len();
    debug_assert!(n >= 2);

    if x <= key(&items[0]) {
        return (0, 1);
    }
    if x >= key(&items[n - 1]) {
        return (n - 2, n - 1);
    }

    // First index whose key exceeds x; in (0, n) by the checks above.
    let hi = items.partition_point(|item| key(item) <= x).min(n - 1);
    (hi - 1, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_brackets_interior_points() {
        let xs = [0.0, 10.0, 20.0, 30.0];
        assert_eq!(segment(&xs, |&x| x, 5.0), (0, 1));
        assert_eq!(segment(&xs, |&x| x, 15.0), (1, 2));
        assert_eq!(segment(&xs, |&x| x, 29.9), (2, 3));
    }

    #[test]
    fn segment_clamps_to_end_segments() {
        let xs = [0.0, 10.0, 20.0];
        assert_eq!(segment(&xs, |&x| x, -5.0), (0, 1));
        assert_eq!(segment(&xs, |&x| x, 25.0), (1, 2));
    }

    #[test]
    fn lerp_midpoint() {
        assert_eq!(lerp(0.0, 900.0, 50.0, 850.0, 25.0), 875.0);
    }

    #[test]
    fn lerp_extrapolates() {
        assert_eq!(lerp(0.0, 900.0, 50.0, 850.0, 100.0), 800.0);
    }
}
