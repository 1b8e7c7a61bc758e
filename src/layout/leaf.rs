//! Childless nodes.

use crate::geometry::Orientation;

use super::{Node, NodeId};

/// A fixed-size shape. Parents move it but never resize it.
#[derive(Debug, Clone)]
pub struct Rectangle {
    id: NodeId,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    managed: bool,
}

impl Rectangle {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            id: NodeId::next(),
            x: 0.0,
            y: 0.0,
            width,
            height,
            managed: true,
        }
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

impl Node for Rectangle {
    fn id(&self) -> NodeId {
        self.id
    }

    fn kind_name(&self) -> &'static str {
        "Rectangle"
    }

    fn is_resizable(&self) -> bool {
        false
    }

    fn is_managed(&self) -> bool {
        self.managed
    }

    fn set_managed(&mut self, managed: bool) {
        self.managed = managed;
    }

    fn min_width(&self, _height: Option<f64>) -> f64 {
        self.width
    }

    fn min_height(&self, _width: Option<f64>) -> f64 {
        self.height
    }

    fn pref_width(&self, _height: Option<f64>) -> f64 {
        self.width
    }

    fn pref_height(&self, _width: Option<f64>) -> f64 {
        self.height
    }

    fn max_width(&self, _height: Option<f64>) -> f64 {
        self.width
    }

    fn max_height(&self, _width: Option<f64>) -> f64 {
        self.height
    }

    fn layout_x(&self) -> f64 {
        self.x
    }

    fn layout_y(&self) -> f64 {
        self.y
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn relocate(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn resize(&mut self, _width: f64, _height: f64) {}
}

/// A resizable leaf with declared min, pref and max sizes.
///
/// With a content bias it behaves like wrapped text: it covers a constant
/// area, so the biased axis decides the other (`height = area / width` for a
/// horizontal bias). The declared pref size is used when the other extent is
/// not known.
#[derive(Debug, Clone)]
pub struct Block {
    id: NodeId,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    min: (f64, f64),
    pref: (f64, f64),
    max: (f64, f64),
    bias: Option<(Orientation, f64)>,
    baseline: Option<f64>,
    managed: bool,
}

impl Block {
    pub fn new(pref_width: f64, pref_height: f64) -> Self {
        Self {
            id: NodeId::next(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            min: (0.0, 0.0),
            pref: (pref_width, pref_height),
            max: (f64::MAX, f64::MAX),
            bias: None,
            baseline: None,
            managed: true,
        }
    }

    pub fn with_min(mut self, width: f64, height: f64) -> Self {
        self.min = (width, height);
        self
    }

    pub fn with_pref(mut self, width: f64, height: f64) -> Self {
        self.pref = (width, height);
        self
    }

    pub fn with_max(mut self, width: f64, height: f64) -> Self {
        self.max = (width, height);
        self
    }

    pub fn with_bias(mut self, orientation: Orientation, area: f64) -> Self {
        self.bias = Some((orientation, area));
        self
    }

    pub fn with_baseline(mut self, offset: f64) -> Self {
        self.baseline = Some(offset);
        self
    }

    /// Extent along the dependent axis when the biased axis is `given`.
    fn dependent(&self, axis: Orientation, given: Option<f64>) -> Option<f64> {
        match (self.bias, given) {
            (Some((orientation, area)), Some(extent)) if orientation == axis && extent > 0.0 => {
                Some(area / extent)
            }
            _ => None,
        }
    }
}

impl Node for Block {
    fn id(&self) -> NodeId {
        self.id
    }

    fn kind_name(&self) -> &'static str {
        "Block"
    }

    fn is_managed(&self) -> bool {
        self.managed
    }

    fn set_managed(&mut self, managed: bool) {
        self.managed = managed;
    }

    fn content_bias(&self) -> Option<Orientation> {
        self.bias.map(|(orientation, _)| orientation)
    }

    fn min_width(&self, height: Option<f64>) -> f64 {
        self.dependent(Orientation::Vertical, height)
            .map_or(self.min.0, |w| w.max(self.min.0))
    }

    fn min_height(&self, width: Option<f64>) -> f64 {
        self.dependent(Orientation::Horizontal, width)
            .map_or(self.min.1, |h| h.max(self.min.1))
    }

    fn pref_width(&self, height: Option<f64>) -> f64 {
        self.dependent(Orientation::Vertical, height).unwrap_or(self.pref.0)
    }

    fn pref_height(&self, width: Option<f64>) -> f64 {
        self.dependent(Orientation::Horizontal, width).unwrap_or(self.pref.1)
    }

    fn max_width(&self, _height: Option<f64>) -> f64 {
        self.max.0
    }

    fn max_height(&self, _width: Option<f64>) -> f64 {
        self.max.1
    }

    fn baseline_offset(&self) -> Option<f64> {
        self.baseline
    }

    fn layout_x(&self) -> f64 {
        self.x
    }

    fn layout_y(&self) -> f64 {
        self.y
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn relocate(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}
