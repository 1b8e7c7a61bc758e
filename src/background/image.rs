use serde::{Deserialize, Serialize};

use crate::background::{BackgroundPosition, BackgroundSize};
use crate::image::Image;

/// How a background image tiles along one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackgroundRepeat {
    #[default]
    Repeat,
    Space,
    Round,
    NoRepeat,
}

/// An image layer of a background. Image layers never extend past the
/// border box, so they contribute nothing to a background's outsets.
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct BackgroundImage {
    image: Image,
    repeat_x: BackgroundRepeat,
    repeat_y: BackgroundRepeat,
    position: BackgroundPosition,
    size: BackgroundSize,
}

impl BackgroundImage {
    pub fn new(
        image: Image,
        repeat_x: Option<BackgroundRepeat>,
        repeat_y: Option<BackgroundRepeat>,
        position: Option<BackgroundPosition>,
        size: Option<BackgroundSize>,
    ) -> Self {
        Self {
            image,
            repeat_x: repeat_x.unwrap_or_default(),
            repeat_y: repeat_y.unwrap_or_default(),
            position: position.unwrap_or_default(),
            size: size.unwrap_or_default(),
        }
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn repeat_x(&self) -> BackgroundRepeat {
        self.repeat_x
    }

    pub fn repeat_y(&self) -> BackgroundRepeat {
        self.repeat_y
    }

    pub fn position(&self) -> &BackgroundPosition {
        &self.position
    }

    pub fn size(&self) -> &BackgroundSize {
        &self.size
    }
}
