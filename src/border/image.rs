use serde::{Deserialize, Serialize};

use crate::border::BorderWidths;
use crate::geometry::Insets;
use crate::image::Image;

/// How the edge and middle slices of a border image fill their area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BorderRepeat {
    #[default]
    Stretch,
    Repeat,
    Round,
    Space,
}

/// A nine-slice image border.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct BorderImage {
    image: Image,
    widths: BorderWidths,
    insets: Insets,
    slices: BorderWidths,
    filled: bool,
    repeat_x: BorderRepeat,
    repeat_y: BorderRepeat,
    inner_edge: Insets,
    outer_edge: Insets,
}

impl BorderImage {
    /// Missing widths default to `DEFAULT`, insets to `EMPTY`, slices to
    /// `FULL` and repeats to `Stretch`.
    pub fn new(
        image: Image,
        widths: Option<BorderWidths>,
        insets: Option<Insets>,
        slices: Option<BorderWidths>,
        filled: bool,
        repeat_x: Option<BorderRepeat>,
        repeat_y: Option<BorderRepeat>,
    ) -> Self {
        let widths = widths.unwrap_or_default();
        let insets = insets.unwrap_or(Insets::EMPTY);
        let inner_edge = insets + widths.absolute_insets();
        let outer_edge = insets.map(|v| -v);
        Self {
            image,
            widths,
            insets,
            slices: slices.unwrap_or(BorderWidths::FULL),
            filled,
            repeat_x: repeat_x.unwrap_or_default(),
            repeat_y: repeat_y.unwrap_or_default(),
            inner_edge,
            outer_edge,
        }
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn widths(&self) -> &BorderWidths {
        &self.widths
    }

    pub fn insets(&self) -> &Insets {
        &self.insets
    }

    pub fn slices(&self) -> &BorderWidths {
        &self.slices
    }

    /// Whether the middle slice is drawn.
    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn repeat_x(&self) -> BorderRepeat {
        self.repeat_x
    }

    pub fn repeat_y(&self) -> BorderRepeat {
        self.repeat_y
    }

    pub fn inner_edge(&self) -> Insets {
        self.inner_edge
    }

    pub fn outer_edge(&self) -> Insets {
        self.outer_edge
    }
}
