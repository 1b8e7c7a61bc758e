//! # Borders
//!
//! A [`Border`] is an ordered stack of stroke layers followed by an ordered
//! stack of nine-slice image layers. Like [`Background`](crate::background::Background)
//! it copies its inputs on construction and never changes afterwards.
//!
//! Each layer knows its inner edge (how far in from the border box its
//! drawing reaches) and its outer edge (how far out). The aggregate folds
//! those into `insets` (the space a region reserves for its border before
//! padding) and `outsets` (how far the border bleeds outside the box).

mod image;
mod stroke;
mod widths;

pub use image::{BorderImage, BorderRepeat};
pub use stroke::{BorderStroke, BorderStrokeStyle, StrokeLineCap, StrokeLineJoin, StrokeType};
pub use widths::BorderWidths;

use crate::geometry::Insets;
use crate::paint::Paint;

#[derive(Debug, Clone, PartialEq, Hash)]
pub struct Border {
    strokes: Vec<BorderStroke>,
    images: Vec<BorderImage>,
    insets: Insets,
    outsets: Insets,
}

impl Border {
    pub const EMPTY: Border = Border {
        strokes: Vec::new(),
        images: Vec::new(),
        insets: Insets::EMPTY,
        outsets: Insets::EMPTY,
    };

    pub fn new(
        strokes: impl IntoIterator<Item = BorderStroke>,
        images: impl IntoIterator<Item = BorderImage>,
    ) -> Self {
        let strokes: Vec<BorderStroke> = strokes.into_iter().collect();
        let images: Vec<BorderImage> = images.into_iter().collect();

        let edges = strokes
            .iter()
            .map(|s| (s.inner_edge(), s.outer_edge()))
            .chain(images.iter().map(|i| (i.inner_edge(), i.outer_edge())));
        let (insets, outer) = edges.fold(
            (Insets::EMPTY, Insets::EMPTY),
            |(inner_acc, outer_acc), (inner, outer)| {
                (inner_acc.edge_max(inner), outer_acc.edge_max(outer))
            },
        );

        Self {
            strokes,
            images,
            insets,
            outsets: outer.map(|v| v.max(0.0)),
        }
    }

    /// Build from optional slices with optional entries; missing entries
    /// are skipped and the input is copied.
    pub fn from_optional(
        strokes: Option<&[Option<BorderStroke>]>,
        images: Option<&[Option<BorderImage>]>,
    ) -> Self {
        Self::new(
            strokes.unwrap_or_default().iter().flatten().cloned(),
            images.unwrap_or_default().iter().flatten().cloned(),
        )
    }

    pub fn with_strokes(strokes: &[BorderStroke]) -> Self {
        Self::new(strokes.iter().cloned(), [])
    }

    pub fn with_images(images: &[BorderImage]) -> Self {
        Self::new([], images.iter().cloned())
    }

    /// A solid one pixel border in the given paint.
    pub fn stroke(paint: impl Into<Paint>) -> Self {
        Self::with_strokes(&[BorderStroke::new(
            paint,
            Some(BorderStrokeStyle::SOLID),
            None,
            None,
            None,
        )])
    }

    pub fn strokes(&self) -> &[BorderStroke] {
        &self.strokes
    }

    pub fn images(&self) -> &[BorderImage] {
        &self.images
    }

    /// Space taken up inside the border box, per edge.
    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// How far the border reaches outside the border box, per edge.
    pub fn outsets(&self) -> Insets {
        self.outsets
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.images.is_empty()
    }
}

impl Default for Border {
    fn default() -> Self {
        Border::EMPTY
    }
}
