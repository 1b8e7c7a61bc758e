//! # Geometry
//!
//! Small value types shared by the paint model and the layout engine:
//! edge insets, sides, alignment positions, orientations and bounds.

use std::hash::{Hash, Hasher};
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Hash an `f64` by bit pattern, folding `-0.0` into `0.0` so that values
/// which compare equal also hash equal.
pub(crate) fn hash_f64<H: Hasher>(value: f64, state: &mut H) {
    let normalized = if value == 0.0 { 0.0f64 } else { value };
    normalized.to_bits().hash(state);
}

/// Offsets for the four edges of a rectangular area, in top, right, bottom,
/// left order. Values may be negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    pub const EMPTY: Insets = Insets {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }

    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    pub fn is_empty(&self) -> bool {
        *self == Insets::EMPTY
    }

    /// Edge values in top, right, bottom, left order.
    pub fn to_array(&self) -> [f64; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    pub(crate) fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.top), f(self.right), f(self.bottom), f(self.left))
    }

    pub(crate) fn edge_max(self, other: Insets) -> Self {
        Self::new(
            self.top.max(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
            self.left.max(other.left),
        )
    }
}

impl Add for Insets {
    type Output = Insets;

    fn add(self, rhs: Insets) -> Insets {
        Insets::new(
            self.top + rhs.top,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
            self.left + rhs.left,
        )
    }
}

impl Hash for Insets {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in self.to_array() {
            hash_f64(v, state);
        }
    }
}

/// One side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub fn is_horizontal_anchor(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    pub fn is_vertical_anchor(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

/// Axis along which a size depends on the other axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Horizontal alignment within an area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HPos {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical alignment within an area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VPos {
    Top,
    #[default]
    Center,
    Baseline,
    Bottom,
}

/// Combined horizontal and vertical alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pos {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    #[default]
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    BaselineLeft,
    BaselineCenter,
    BaselineRight,
}

impl Pos {
    pub fn hpos(self) -> HPos {
        match self {
            Pos::TopLeft | Pos::CenterLeft | Pos::BottomLeft | Pos::BaselineLeft => HPos::Left,
            Pos::TopCenter | Pos::Center | Pos::BottomCenter | Pos::BaselineCenter => HPos::Center,
            Pos::TopRight | Pos::CenterRight | Pos::BottomRight | Pos::BaselineRight => {
                HPos::Right
            }
        }
    }

    pub fn vpos(self) -> VPos {
        match self {
            Pos::TopLeft | Pos::TopCenter | Pos::TopRight => VPos::Top,
            Pos::CenterLeft | Pos::Center | Pos::CenterRight => VPos::Center,
            Pos::BottomLeft | Pos::BottomCenter | Pos::BottomRight => VPos::Bottom,
            Pos::BaselineLeft | Pos::BaselineCenter | Pos::BaselineRight => VPos::Baseline,
        }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    /// Shrink this rectangle by the given insets.
    pub fn inset(&self, insets: &Insets) -> Bounds {
        Bounds::new(
            self.min_x + insets.left,
            self.min_y + insets.top,
            self.width - insets.horizontal(),
            self.height - insets.vertical(),
        )
    }
}
