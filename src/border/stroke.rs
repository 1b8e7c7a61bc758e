use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::background::CornerRadii;
use crate::border::BorderWidths;
use crate::geometry::{hash_f64, Insets};
use crate::paint::Paint;

/// Where a stroke sits relative to the edge it follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrokeType {
    #[default]
    Inside,
    Outside,
    Centered,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrokeLineJoin {
    #[default]
    Miter,
    Bevel,
    Round,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrokeLineCap {
    Square,
    #[default]
    Butt,
    Round,
}

/// How one side of a border is stroked.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderStrokeStyle {
    none: bool,
    stroke_type: StrokeType,
    line_join: StrokeLineJoin,
    line_cap: StrokeLineCap,
    miter_limit: f64,
    dash_offset: f64,
    dash_array: Vec<f64>,
}

impl BorderStrokeStyle {
    /// No stroke; a side with this style has zero width.
    pub const NONE: BorderStrokeStyle = BorderStrokeStyle {
        none: true,
        stroke_type: StrokeType::Inside,
        line_join: StrokeLineJoin::Miter,
        line_cap: StrokeLineCap::Butt,
        miter_limit: 0.0,
        dash_offset: 0.0,
        dash_array: Vec::new(),
    };

    pub const SOLID: BorderStrokeStyle = BorderStrokeStyle {
        none: false,
        stroke_type: StrokeType::Inside,
        line_join: StrokeLineJoin::Miter,
        line_cap: StrokeLineCap::Butt,
        miter_limit: 10.0,
        dash_offset: 0.0,
        dash_array: Vec::new(),
    };

    pub fn new(
        stroke_type: StrokeType,
        line_join: StrokeLineJoin,
        line_cap: StrokeLineCap,
        miter_limit: f64,
        dash_offset: f64,
        dash_array: Vec<f64>,
    ) -> Self {
        Self {
            none: false,
            stroke_type,
            line_join,
            line_cap,
            miter_limit,
            dash_offset,
            dash_array,
        }
    }

    pub fn dotted() -> Self {
        Self {
            line_cap: StrokeLineCap::Round,
            dash_array: vec![0.0, 2.0],
            ..Self::SOLID
        }
    }

    pub fn dashed() -> Self {
        Self {
            dash_array: vec![2.0, 1.4],
            ..Self::SOLID
        }
    }

    pub fn is_none(&self) -> bool {
        self.none
    }

    pub fn stroke_type(&self) -> StrokeType {
        self.stroke_type
    }

    pub fn line_join(&self) -> StrokeLineJoin {
        self.line_join
    }

    pub fn line_cap(&self) -> StrokeLineCap {
        self.line_cap
    }

    pub fn miter_limit(&self) -> f64 {
        self.miter_limit
    }

    pub fn dash_offset(&self) -> f64 {
        self.dash_offset
    }

    pub fn dash_array(&self) -> &[f64] {
        &self.dash_array
    }
}

impl Default for BorderStrokeStyle {
    fn default() -> Self {
        BorderStrokeStyle::NONE
    }
}

impl Hash for BorderStrokeStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.none.hash(state);
        self.stroke_type.hash(state);
        self.line_join.hash(state);
        self.line_cap.hash(state);
        hash_f64(self.miter_limit, state);
        hash_f64(self.dash_offset, state);
        self.dash_array.len().hash(state);
        for d in &self.dash_array {
            hash_f64(*d, state);
        }
    }
}

/// A stroked border layer. Each side has its own paint and style; radii,
/// widths and insets are shared.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct BorderStroke {
    paints: [Paint; 4],
    styles: [BorderStrokeStyle; 4],
    radii: CornerRadii,
    widths: BorderWidths,
    insets: Insets,
    inner_edge: Insets,
    outer_edge: Insets,
}

impl BorderStroke {
    /// Same paint and style on every side. Missing parts take their
    /// defaults: style NONE, radii EMPTY, widths DEFAULT, insets EMPTY.
    pub fn new(
        paint: impl Into<Paint>,
        style: Option<BorderStrokeStyle>,
        radii: Option<CornerRadii>,
        widths: Option<BorderWidths>,
        insets: Option<Insets>,
    ) -> Self {
        let paint = paint.into();
        let style = style.unwrap_or_default();
        Self::with_sides(
            [paint.clone(), paint.clone(), paint.clone(), paint],
            [style.clone(), style.clone(), style.clone(), style],
            radii,
            widths,
            insets,
        )
    }

    /// Per-side paints and styles in top, right, bottom, left order.
    pub fn with_sides(
        paints: [Paint; 4],
        styles: [BorderStrokeStyle; 4],
        radii: Option<CornerRadii>,
        widths: Option<BorderWidths>,
        insets: Option<Insets>,
    ) -> Self {
        let widths = widths
            .unwrap_or_default()
            .without_sides([0, 1, 2, 3].map(|i| styles[i].is_none()));
        let insets = insets.unwrap_or(Insets::EMPTY);

        let w = widths.absolute_insets();
        let edge = |inset: f64, width: f64, style: &BorderStrokeStyle| match style.stroke_type {
            StrokeType::Inside => (inset + width, -inset),
            StrokeType::Centered => (inset + width / 2.0, -inset + width / 2.0),
            StrokeType::Outside => (inset, -inset + width),
        };
        let (it, ot) = edge(insets.top, w.top, &styles[0]);
        let (ir, or) = edge(insets.right, w.right, &styles[1]);
        let (ib, ob) = edge(insets.bottom, w.bottom, &styles[2]);
        let (il, ol) = edge(insets.left, w.left, &styles[3]);

        Self {
            paints,
            styles,
            radii: radii.unwrap_or(CornerRadii::EMPTY),
            widths,
            insets,
            inner_edge: Insets::new(it, ir, ib, il),
            outer_edge: Insets::new(ot, or, ob, ol),
        }
    }

    pub fn top_paint(&self) -> &Paint {
        &self.paints[0]
    }

    pub fn right_paint(&self) -> &Paint {
        &self.paints[1]
    }

    pub fn bottom_paint(&self) -> &Paint {
        &self.paints[2]
    }

    pub fn left_paint(&self) -> &Paint {
        &self.paints[3]
    }

    pub fn top_style(&self) -> &BorderStrokeStyle {
        &self.styles[0]
    }

    pub fn right_style(&self) -> &BorderStrokeStyle {
        &self.styles[1]
    }

    pub fn bottom_style(&self) -> &BorderStrokeStyle {
        &self.styles[2]
    }

    pub fn left_style(&self) -> &BorderStrokeStyle {
        &self.styles[3]
    }

    pub fn radii(&self) -> &CornerRadii {
        &self.radii
    }

    pub fn widths(&self) -> &BorderWidths {
        &self.widths
    }

    pub fn insets(&self) -> &Insets {
        &self.insets
    }

    /// Distance from the border box to the inside of the stroke, per edge.
    pub fn inner_edge(&self) -> Insets {
        self.inner_edge
    }

    /// Distance the stroke reaches outside the border box, per edge.
    /// Negative when the stroke stays inside.
    pub fn outer_edge(&self) -> Insets {
        self.outer_edge
    }

    pub fn is_strokes_uniform(&self) -> bool {
        self.paints.iter().all(|p| *p == self.paints[0])
            && self.styles.iter().all(|s| *s == self.styles[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    fn styled(stroke_type: StrokeType) -> BorderStrokeStyle {
        BorderStrokeStyle::new(
            stroke_type,
            StrokeLineJoin::Miter,
            StrokeLineCap::Butt,
            10.0,
            0.0,
            Vec::new(),
        )
    }

    #[test]
    fn none_style_zeroes_width() {
        let stroke = BorderStroke::new(
            Color::BLACK,
            None,
            None,
            Some(BorderWidths::uniform(4.0).unwrap()),
            None,
        );
        assert_eq!(stroke.widths().top(), 0.0);
        assert_eq!(stroke.inner_edge(), Insets::EMPTY);
    }

    #[test]
    fn edges_follow_stroke_type() {
        let widths = Some(BorderWidths::uniform(4.0).unwrap());
        let insets = Some(Insets::uniform(1.0));

        let inside = BorderStroke::new(Color::BLACK, Some(styled(StrokeType::Inside)), None, widths, insets);
        assert_eq!(inside.inner_edge(), Insets::uniform(5.0));
        assert_eq!(inside.outer_edge(), Insets::uniform(-1.0));

        let centered =
            BorderStroke::new(Color::BLACK, Some(styled(StrokeType::Centered)), None, widths, insets);
        assert_eq!(centered.inner_edge(), Insets::uniform(3.0));
        assert_eq!(centered.outer_edge(), Insets::uniform(1.0));

        let outside = BorderStroke::new(Color::BLACK, Some(styled(StrokeType::Outside)), None, widths, insets);
        assert_eq!(outside.inner_edge(), Insets::uniform(1.0));
        assert_eq!(outside.outer_edge(), Insets::uniform(3.0));
    }

    #[test]
    fn per_side_styles() {
        let red: Paint = Color::rgb(1.0, 0.0, 0.0).into();
        let stroke = BorderStroke::with_sides(
            [red.clone(), red.clone(), red.clone(), red],
            [
                BorderStrokeStyle::SOLID,
                BorderStrokeStyle::NONE,
                BorderStrokeStyle::dashed(),
                BorderStrokeStyle::NONE,
            ],
            None,
            Some(BorderWidths::uniform(2.0).unwrap()),
            None,
        );
        assert_eq!(stroke.inner_edge(), Insets::new(2.0, 0.0, 2.0, 0.0));
        assert!(!stroke.is_strokes_uniform());
    }

    #[test]
    fn dash_presets() {
        assert_eq!(BorderStrokeStyle::dotted().line_cap(), StrokeLineCap::Round);
        assert_eq!(BorderStrokeStyle::dashed().dash_array(), &[2.0, 1.4]);
        assert!(BorderStrokeStyle::SOLID.dash_array().is_empty());
        assert!(BorderStrokeStyle::NONE.is_none());
    }
}
