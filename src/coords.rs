//! Image-space coordinate convention shared by the source reader and the
//! depth analyzer.
//!
//! Landmark coordinates are normalized to the frame: `y = 0.0` is the top edge
//! and `y = 1.0` the bottom edge. A smaller `y` therefore means a joint sits
//! higher in the frame. Every height comparison in the crate goes through
//! [`is_above`] so flipping this convention is a one-line change.

use std::ops::RangeInclusive;

/// The y axis grows downward.
pub const Y_AXIS_DOWN: bool = true;

/// Range an extractor is expected to report. Values outside it are accepted.
pub const NORMALIZED_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// True when `a` is physically higher than `b`. NaN on either side is false.
#[inline]
pub fn is_above(a: f64, b: f64) -> bool {
    if Y_AXIS_DOWN {
        a < b
    } else {
        a > b
    }
}

/// True when `y` lies inside [`NORMALIZED_RANGE`].
#[inline]
pub fn in_frame(y: f64) -> bool {
    NORMALIZED_RANGE.contains(&y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smaller_y_is_higher() {
        assert!(is_above(0.2, 0.7));
        assert!(!is_above(0.7, 0.2));
        assert!(!is_above(0.5, 0.5));
    }

    #[test]
    fn test_nan_is_never_above() {
        assert!(!is_above(f64::NAN, 0.5));
        assert!(!is_above(0.5, f64::NAN));
    }

    #[test]
    fn test_in_frame_bounds() {
        assert!(in_frame(0.0));
        assert!(in_frame(1.0));
        assert!(!in_frame(-0.01));
        assert!(!in_frame(1.2));
        assert!(!in_frame(f64::NAN));
    }
}
