use std::hash::{Hash, Hasher};

use crate::error::RegionError;
use crate::geometry::{hash_f64, Side};

/// Where a background image is anchored. Each axis is an offset from a
/// side: the horizontal axis from LEFT or RIGHT, the vertical axis from TOP
/// or BOTTOM. Offsets are absolute lengths or fractions of the free space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundPosition {
    horizontal_side: Side,
    horizontal_position: f64,
    horizontal_percent: bool,
    vertical_side: Side,
    vertical_position: f64,
    vertical_percent: bool,
}

impl BackgroundPosition {
    /// Anchored at the top-left corner.
    pub const DEFAULT: BackgroundPosition = BackgroundPosition {
        horizontal_side: Side::Left,
        horizontal_position: 0.0,
        horizontal_percent: true,
        vertical_side: Side::Top,
        vertical_position: 0.0,
        vertical_percent: true,
    };

    /// Centered on both axes.
    pub const CENTER: BackgroundPosition = BackgroundPosition {
        horizontal_side: Side::Left,
        horizontal_position: 0.5,
        horizontal_percent: true,
        vertical_side: Side::Top,
        vertical_position: 0.5,
        vertical_percent: true,
    };

    /// A missing side defaults to LEFT (horizontal) or TOP (vertical).
    /// Anchoring the horizontal axis to TOP/BOTTOM, or the vertical axis to
    /// LEFT/RIGHT, is rejected.
    pub fn new(
        horizontal_side: Option<Side>,
        horizontal_position: f64,
        horizontal_percent: bool,
        vertical_side: Option<Side>,
        vertical_position: f64,
        vertical_percent: bool,
    ) -> Result<Self, RegionError> {
        let horizontal_side = horizontal_side.unwrap_or(Side::Left);
        if !horizontal_side.is_horizontal_anchor() {
            return Err(RegionError::invalid(format!(
                "horizontal side must be Left or Right, got {:?}",
                horizontal_side
            )));
        }
        let vertical_side = vertical_side.unwrap_or(Side::Top);
        if !vertical_side.is_vertical_anchor() {
            return Err(RegionError::invalid(format!(
                "vertical side must be Top or Bottom, got {:?}",
                vertical_side
            )));
        }
        Ok(Self {
            horizontal_side,
            horizontal_position,
            horizontal_percent,
            vertical_side,
            vertical_position,
            vertical_percent,
        })
    }

    pub fn horizontal_side(&self) -> Side {
        self.horizontal_side
    }

    pub fn horizontal_position(&self) -> f64 {
        self.horizontal_position
    }

    pub fn is_horizontal_percent(&self) -> bool {
        self.horizontal_percent
    }

    pub fn vertical_side(&self) -> Side {
        self.vertical_side
    }

    pub fn vertical_position(&self) -> f64 {
        self.vertical_position
    }

    pub fn is_vertical_percent(&self) -> bool {
        self.vertical_percent
    }

    /// Top-left offset of an image of `image` size inside `area`.
    pub fn resolve(&self, area: (f64, f64), image: (f64, f64)) -> (f64, f64) {
        let free_x = area.0 - image.0;
        let free_y = area.1 - image.1;
        let dx = if self.horizontal_percent {
            self.horizontal_position * free_x
        } else {
            self.horizontal_position
        };
        let dy = if self.vertical_percent {
            self.vertical_position * free_y
        } else {
            self.vertical_position
        };
        let x = match self.horizontal_side {
            Side::Right => free_x - dx,
            _ => dx,
        };
        let y = match self.vertical_side {
            Side::Bottom => free_y - dy,
            _ => dy,
        };
        (x, y)
    }
}

impl Default for BackgroundPosition {
    fn default() -> Self {
        BackgroundPosition::DEFAULT
    }
}

impl Hash for BackgroundPosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.horizontal_side.hash(state);
        hash_f64(self.horizontal_position, state);
        self.horizontal_percent.hash(state);
        self.vertical_side.hash(state);
        hash_f64(self.vertical_position, state);
        self.vertical_percent.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_side_combinations_construct() {
        for h in [Some(Side::Left), Some(Side::Right), None] {
            for v in [Some(Side::Top), Some(Side::Bottom), None] {
                let pos = BackgroundPosition::new(h, 5.0, false, v, 7.0, true).unwrap();
                assert_eq!(pos.horizontal_side(), h.unwrap_or(Side::Left));
                assert_eq!(pos.vertical_side(), v.unwrap_or(Side::Top));
            }
        }
    }

    #[test]
    fn vertical_sides_rejected_for_horizontal_axis() {
        for h in [Side::Top, Side::Bottom] {
            for v in [Some(Side::Top), Some(Side::Bottom), None] {
                assert!(BackgroundPosition::new(Some(h), 0.0, true, v, 0.0, true).is_err());
            }
        }
    }

    #[test]
    fn horizontal_sides_rejected_for_vertical_axis() {
        for v in [Side::Left, Side::Right] {
            for h in [Some(Side::Left), Some(Side::Right), None] {
                assert!(BackgroundPosition::new(h, 0.0, true, Some(v), 0.0, true).is_err());
            }
        }
    }

    #[test]
    fn center_resolves_to_middle_of_free_space() {
        let (x, y) = BackgroundPosition::CENTER.resolve((100.0, 50.0), (20.0, 10.0));
        assert_eq!((x, y), (40.0, 20.0));
    }

    #[test]
    fn right_bottom_offsets_measure_from_far_edges() {
        let pos = BackgroundPosition::new(
            Some(Side::Right),
            20.0,
            false,
            Some(Side::Bottom),
            10.0,
            false,
        )
        .unwrap();
        assert_eq!(pos.resolve((100.0, 50.0), (20.0, 10.0)), (60.0, 30.0));
    }
}
