//! # Paint
//!
//! What fills and strokes are painted with: solid colors and linear
//! gradients. The layout core only needs to know whether a paint is fully
//! opaque or fully transparent; everything else is carried through for the
//! renderer.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::geometry::hash_f64;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Parse any CSS color: named colors, hex forms and the functional
    /// notations (`rgb()`, `rgba()`, `hsl()`, ...).
    pub fn parse(text: &str) -> Option<Self> {
        let parsed: csscolorparser::Color = text.trim().parse().ok()?;
        let [r, g, b, a] = parsed.to_rgba8();
        Some(Self::rgba8(r, g, b, a))
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in [self.r, self.g, self.b, self.a] {
            hash_f64(v, state);
        }
    }
}

/// A color at a proportional offset along a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub offset: f64,
    pub color: Color,
}

impl Hash for Stop {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_f64(self.offset, state);
        self.color.hash(state);
    }
}

/// A linear gradient between two points. When `proportional` is set the
/// points are fractions of the painted area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearGradient {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    pub proportional: bool,
    pub stops: Vec<Stop>,
}

impl LinearGradient {
    /// Build a gradient, normalizing the stop list: offsets are clamped to
    /// 0..1 and made non-decreasing.
    pub fn new(
        start: (f64, f64),
        end: (f64, f64),
        proportional: bool,
        stops: Vec<Stop>,
    ) -> Self {
        let mut last = 0.0f64;
        let stops = stops
            .into_iter()
            .map(|s| {
                let offset = s.offset.clamp(0.0, 1.0).max(last);
                last = offset;
                Stop {
                    offset,
                    color: s.color,
                }
            })
            .collect();
        Self {
            start_x: start.0,
            start_y: start.1,
            end_x: end.0,
            end_y: end.1,
            proportional,
            stops,
        }
    }
}

impl Hash for LinearGradient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in [self.start_x, self.start_y, self.end_x, self.end_y] {
            hash_f64(v, state);
        }
        self.proportional.hash(state);
        self.stops.hash(state);
    }
}

/// Anything a fill or stroke can be painted with.
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
pub enum Paint {
    Color(Color),
    LinearGradient(LinearGradient),
}

impl Paint {
    /// True when every pixel painted is fully opaque.
    pub fn is_opaque(&self) -> bool {
        match self {
            Paint::Color(c) => c.is_opaque(),
            Paint::LinearGradient(g) => {
                !g.stops.is_empty() && g.stops.iter().all(|s| s.color.is_opaque())
            }
        }
    }

    /// True when nothing visible is painted.
    pub fn is_transparent(&self) -> bool {
        match self {
            Paint::Color(c) => c.is_transparent(),
            Paint::LinearGradient(g) => g.stops.iter().all(|s| s.color.is_transparent()),
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Color(c)
    }
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Color(Color::TRANSPARENT)
    }
}
