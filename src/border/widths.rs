use std::hash::{Hash, Hasher};

use crate::error::RegionError;
use crate::geometry::{hash_f64, Insets};

/// Widths of the four sides of a border (or the slices of a border image).
/// Each width is absolute or a fraction of the box dimension across it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderWidths {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
    top_percent: bool,
    right_percent: bool,
    bottom_percent: bool,
    left_percent: bool,
}

impl BorderWidths {
    /// Sentinel width meaning "use the intrinsic width".
    pub const AUTO: f64 = -1.0;

    pub const DEFAULT: BorderWidths = BorderWidths::uniform_const(1.0, false);
    pub const EMPTY: BorderWidths = BorderWidths::uniform_const(0.0, false);
    pub const FULL: BorderWidths = BorderWidths::uniform_const(1.0, true);

    const fn uniform_const(width: f64, percent: bool) -> Self {
        Self {
            top: width,
            right: width,
            bottom: width,
            left: width,
            top_percent: percent,
            right_percent: percent,
            bottom_percent: percent,
            left_percent: percent,
        }
    }

    pub fn uniform(width: f64) -> Result<Self, RegionError> {
        Self::new([width; 4], [false; 4])
    }

    /// Widths and percentage flags in top, right, bottom, left order.
    pub fn new(widths: [f64; 4], percent: [bool; 4]) -> Result<Self, RegionError> {
        for w in widths {
            if w.is_nan() || (w < 0.0 && w != Self::AUTO) {
                return Err(RegionError::invalid(format!(
                    "border width must be >= 0 or AUTO, got {}",
                    w
                )));
            }
        }
        let [top, right, bottom, left] = widths;
        let [top_percent, right_percent, bottom_percent, left_percent] = percent;
        Ok(Self {
            top,
            right,
            bottom,
            left,
            top_percent,
            right_percent,
            bottom_percent,
            left_percent,
        })
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn is_top_percent(&self) -> bool {
        self.top_percent
    }

    pub fn is_right_percent(&self) -> bool {
        self.right_percent
    }

    pub fn is_bottom_percent(&self) -> bool {
        self.bottom_percent
    }

    pub fn is_left_percent(&self) -> bool {
        self.left_percent
    }

    /// The same widths with the flagged sides (top, right, bottom, left)
    /// set to zero.
    pub(crate) fn without_sides(mut self, sides: [bool; 4]) -> Self {
        let [top, right, bottom, left] = sides;
        if top {
            self.top = 0.0;
        }
        if right {
            self.right = 0.0;
        }
        if bottom {
            self.bottom = 0.0;
        }
        if left {
            self.left = 0.0;
        }
        self
    }

    /// Absolute widths as insets. Percentage and AUTO widths count as zero
    /// since they cannot be resolved without a box.
    pub fn absolute_insets(&self) -> Insets {
        let abs = |w: f64, percent: bool| if percent || w < 0.0 { 0.0 } else { w };
        Insets::new(
            abs(self.top, self.top_percent),
            abs(self.right, self.right_percent),
            abs(self.bottom, self.bottom_percent),
            abs(self.left, self.left_percent),
        )
    }

    /// Resolve against a `width` x `height` box; AUTO resolves to `auto`.
    pub fn resolve(&self, width: f64, height: f64, auto: Insets) -> Insets {
        let side = |w: f64, percent: bool, extent: f64, fallback: f64| {
            if w == Self::AUTO {
                fallback
            } else if percent {
                w * extent
            } else {
                w
            }
        };
        Insets::new(
            side(self.top, self.top_percent, height, auto.top),
            side(self.right, self.right_percent, width, auto.right),
            side(self.bottom, self.bottom_percent, height, auto.bottom),
            side(self.left, self.left_percent, width, auto.left),
        )
    }
}

impl Default for BorderWidths {
    fn default() -> Self {
        BorderWidths::DEFAULT
    }
}

impl Hash for BorderWidths {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in [self.top, self.right, self.bottom, self.left] {
            hash_f64(v, state);
        }
        [
            self.top_percent,
            self.right_percent,
            self.bottom_percent,
            self.left_percent,
        ]
        .hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_widths_are_rejected_except_auto() {
        assert!(BorderWidths::uniform(-3.0).is_err());
        assert!(BorderWidths::uniform(BorderWidths::AUTO).is_ok());
    }

    #[test]
    fn percentage_widths_do_not_count_as_absolute() {
        let w = BorderWidths::new([2.0, 0.5, 3.0, BorderWidths::AUTO], [false, true, false, false])
            .unwrap();
        assert_eq!(w.absolute_insets(), Insets::new(2.0, 0.0, 3.0, 0.0));
    }

    #[test]
    fn resolve_against_box() {
        let w = BorderWidths::new([0.1, 0.25, 4.0, BorderWidths::AUTO], [true, true, false, false])
            .unwrap();
        let r = w.resolve(200.0, 50.0, Insets::uniform(7.0));
        assert_eq!(r.right, 50.0);
        assert_eq!(r.bottom, 4.0);
        assert_eq!(r.left, 7.0);
    }

    #[test]
    fn accessors_and_zeroed_sides_keep_values_valid() {
        let w = BorderWidths::new([1.0, 0.5, 3.0, 4.0], [false, true, false, false]).unwrap();
        assert_eq!((w.top(), w.right(), w.bottom(), w.left()), (1.0, 0.5, 3.0, 4.0));
        assert!(w.is_right_percent() && !w.is_left_percent());

        let z = w.without_sides([true, false, false, true]);
        assert_eq!((z.top(), z.right(), z.bottom(), z.left()), (0.0, 0.5, 3.0, 0.0));
        assert!(BorderWidths::new([z.top(), z.right(), z.bottom(), z.left()], [false; 4]).is_ok());
        assert!(BorderWidths::new([1.0, f64::NAN, 1.0, 1.0], [false; 4]).is_err());
    }
}
