//! # Region Layout Engine
//!
//! Box layout for a tree of [`Node`]s. Every pass is the same three steps,
//! driven from the root:
//!
//! 1. **Measure**: a parent asks its children for min, pref and max sizes.
//!    The query for one axis takes an optional extent for the other axis,
//!    which only matters for nodes with a content bias (their size along one
//!    axis depends on what they get along the other, like wrapped text).
//! 2. **Clamp**: the parent picks a size inside `[min, max]` for each child.
//!    When `min > max`, `min` wins.
//! 3. **Position**: the child is placed inside its area by alignment and
//!    margin.
//!
//! Containers are [`Region`]s parameterized by a [`Layout`] kind: a free
//! [`Pane`], a [`StackPane`] and a [`BorderPane`]. The functions in this
//! module are the shared building blocks those kinds are written with:
//! [`layout_in_area`], [`position_in_area`] and the `child_*_area_*` family
//! that measures a child together with its margin.
//!
//! Nothing is cached between passes except each node's last size; a region
//! only re-runs its `layout_children` when something it depends on changed
//! (see [`Region::request_layout`]).

mod border_pane;
mod leaf;
mod region;
mod stack;

pub use border_pane::{BorderLayout, BorderPane, Slot};
pub use leaf::{Block, Rectangle};
pub use region::{FreeLayout, Layout, Pane, Region, SizeOverride};
pub use stack::{StackLayout, StackPane};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::background::Background;
use crate::border::Border;
use crate::geometry::{Bounds, HPos, Insets, Orientation, VPos};

/// Identity of a node within a process. Side tables (margins, alignments,
/// slots) are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        NodeId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A participant in layout.
///
/// Size queries take the extent of the other axis when the caller knows
/// it. Nodes without a content bias ignore it.
pub trait Node: fmt::Debug {
    fn id(&self) -> NodeId;

    /// Short type name used in layout dumps.
    fn kind_name(&self) -> &'static str;

    /// Non-resizable nodes keep their own size; parents only move them.
    fn is_resizable(&self) -> bool {
        true
    }

    /// Unmanaged nodes are skipped by their parent's measurement and layout.
    fn is_managed(&self) -> bool;

    fn set_managed(&mut self, managed: bool);

    fn content_bias(&self) -> Option<Orientation> {
        None
    }

    fn min_width(&self, height: Option<f64>) -> f64;
    fn min_height(&self, width: Option<f64>) -> f64;
    fn pref_width(&self, height: Option<f64>) -> f64;
    fn pref_height(&self, width: Option<f64>) -> f64;
    fn max_width(&self, height: Option<f64>) -> f64;
    fn max_height(&self, width: Option<f64>) -> f64;

    /// Distance from the top of the node to its baseline. `None` means the
    /// baseline is the bottom edge.
    fn baseline_offset(&self) -> Option<f64> {
        None
    }

    fn layout_x(&self) -> f64;
    fn layout_y(&self) -> f64;
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn layout_bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width(), self.height())
    }

    fn relocate(&mut self, x: f64, y: f64);

    /// Ignored by non-resizable nodes.
    fn resize(&mut self, width: f64, height: f64);

    /// Lay out this node's children, if it has any.
    fn layout(&mut self) {}

    /// Resize to the preferred size, clamped to min and max, asking the
    /// biased axis second.
    fn autosize(&mut self) {
        if !self.is_resizable() {
            return;
        }
        let (w, h) = match self.content_bias() {
            Some(Orientation::Vertical) => {
                let h = bounded_size(
                    self.min_height(None),
                    self.pref_height(None),
                    self.max_height(None),
                );
                let w = bounded_size(
                    self.min_width(Some(h)),
                    self.pref_width(Some(h)),
                    self.max_width(Some(h)),
                );
                (w, h)
            }
            bias => {
                let w = bounded_size(self.min_width(None), self.pref_width(None), self.max_width(None));
                let cross = (bias == Some(Orientation::Horizontal)).then_some(w);
                let h = bounded_size(
                    self.min_height(cross),
                    self.pref_height(cross),
                    self.max_height(cross),
                );
                (w, h)
            }
        };
        self.resize(w, h);
    }

    fn children(&self) -> &[Box<dyn Node>] {
        &[]
    }

    fn background(&self) -> Option<&Background> {
        None
    }

    fn border(&self) -> Option<&Border> {
        None
    }
}

/// `pref` clamped into `[min, max]`; `min` wins when `min > max`.
pub fn bounded_size(min: f64, pref: f64, max: f64) -> f64 {
    let a = if pref >= min { pref } else { min };
    let b = if min >= max { min } else { max };
    if a <= b {
        a
    } else {
        b
    }
}

// ── Pixel snapping (render scale 1) ────────────────────────────────

const SNAP_EPSILON: f64 = 1e-9;

pub(crate) fn snap_space(value: f64, snap: bool) -> f64 {
    if snap {
        value.round()
    } else {
        value
    }
}

pub(crate) fn snap_size(value: f64, snap: bool) -> f64 {
    if snap && value.is_finite() {
        let snapped = (value - SNAP_EPSILON).ceil();
        // no -0.0
        if snapped == 0.0 {
            0.0
        } else {
            snapped
        }
    } else {
        value
    }
}

pub(crate) fn snap_position(value: f64, snap: bool) -> f64 {
    if snap {
        value.round()
    } else {
        value
    }
}

fn snap_insets(insets: Insets, snap: bool) -> Insets {
    insets.map(|v| snap_space(v, snap))
}

fn x_offset(width: f64, content: f64, hpos: HPos) -> f64 {
    match hpos {
        HPos::Left => 0.0,
        HPos::Center => (width - content) / 2.0,
        HPos::Right => width - content,
    }
}

fn y_offset(height: f64, content: f64, vpos: VPos) -> f64 {
    match vpos {
        VPos::Top | VPos::Baseline => 0.0,
        VPos::Center => (height - content) / 2.0,
        VPos::Bottom => height - content,
    }
}

/// Size a resizable node for an area, honoring its content bias. When a fill
/// flag is off the node gets at most its preferred size on that axis.
pub fn bounded_node_size_with_bias(
    node: &dyn Node,
    area_width: f64,
    area_height: f64,
    fill_width: bool,
    fill_height: bool,
) -> (f64, f64) {
    let width_for = |height: Option<f64>| {
        let target = if fill_width {
            area_width
        } else {
            area_width.min(node.pref_width(height))
        };
        bounded_size(node.min_width(height), target, node.max_width(height))
    };
    let height_for = |width: Option<f64>| {
        let target = if fill_height {
            area_height
        } else {
            area_height.min(node.pref_height(width))
        };
        bounded_size(node.min_height(width), target, node.max_height(width))
    };
    match node.content_bias() {
        None => (width_for(None), height_for(None)),
        Some(Orientation::Horizontal) => {
            let w = width_for(None);
            (w, height_for(Some(w)))
        }
        Some(Orientation::Vertical) => {
            let h = height_for(None);
            (width_for(Some(h)), h)
        }
    }
}

/// Place a child inside `area` (offset by `margin`) without resizing it.
///
/// With `VPos::Baseline` the child's baseline (its height when it has none)
/// is lined up with `area_baseline`, measured from the top margin.
#[allow(clippy::too_many_arguments)]
pub fn position_in_area(
    child: &mut dyn Node,
    area: Bounds,
    area_baseline: f64,
    margin: Insets,
    hpos: HPos,
    vpos: VPos,
    snap: bool,
) {
    let margin = snap_insets(margin, snap);
    let bounds = child.layout_bounds();
    let x = margin.left + x_offset(area.width - margin.horizontal(), bounds.width, hpos);
    let y = match vpos {
        VPos::Baseline => {
            let baseline = child.baseline_offset().unwrap_or(bounds.height);
            margin.top + area_baseline - baseline
        }
        _ => margin.top + y_offset(area.height - margin.vertical(), bounds.height, vpos),
    };
    child.relocate(
        snap_position(area.min_x + x, snap),
        snap_position(area.min_y + y, snap),
    );
}

/// Resize a child to fit `area` minus `margin` (filling each axis when asked,
/// never outside the child's min and max) and then position it.
#[allow(clippy::too_many_arguments)]
pub fn layout_in_area(
    child: &mut dyn Node,
    area: Bounds,
    area_baseline: f64,
    margin: Insets,
    fill_width: bool,
    fill_height: bool,
    hpos: HPos,
    vpos: VPos,
    snap: bool,
) {
    let m = snap_insets(margin, snap);
    if child.is_resizable() {
        let (w, h) = bounded_node_size_with_bias(
            child,
            area.width - m.horizontal(),
            area.height - m.vertical(),
            fill_width,
            fill_height,
        );
        child.resize(snap_size(w, snap), snap_size(h, snap));
    }
    position_in_area(child, area, area_baseline, margin, hpos, vpos, snap);
}

/// Height the child would get in an area `height` tall, used to measure a
/// vertically biased child's width.
fn cross_height(child: &dyn Node, height: f64, fill_height: bool, snap: bool) -> f64 {
    let h = if fill_height {
        bounded_size(child.min_height(None), height, child.max_height(None))
    } else {
        bounded_size(
            child.min_height(None),
            child.pref_height(None),
            child.max_height(None).min(height),
        )
    };
    snap_size(h, snap)
}

/// The height to measure a vertically biased child with, if any.
fn vertical_alt(
    child: &dyn Node,
    margin: Insets,
    height: Option<f64>,
    fill_height: bool,
    snap: bool,
) -> Option<f64> {
    let height = height?;
    if !child.is_resizable() || child.content_bias() != Some(Orientation::Vertical) {
        return None;
    }
    let m = snap_insets(margin, snap);
    Some(cross_height(child, height - m.vertical(), fill_height, snap))
}

fn is_horizontally_biased(child: &dyn Node) -> bool {
    child.is_resizable() && child.content_bias() == Some(Orientation::Horizontal)
}

/// Minimum width of a child's area: its min width plus horizontal margin.
pub fn child_min_area_width(
    child: &dyn Node,
    margin: Insets,
    height: Option<f64>,
    fill_height: bool,
    snap: bool,
) -> f64 {
    let m = snap_insets(margin, snap);
    let alt = vertical_alt(child, margin, height, fill_height, snap);
    m.left + snap_size(child.min_width(alt), snap) + m.right
}

pub fn child_min_area_height(child: &dyn Node, margin: Insets, width: Option<f64>, snap: bool) -> f64 {
    let m = snap_insets(margin, snap);
    let alt = is_horizontally_biased(child).then(|| {
        let w = match width {
            Some(w) => bounded_size(child.min_width(None), w - m.horizontal(), child.max_width(None)),
            None => child.max_width(None),
        };
        snap_size(w, snap)
    });
    m.top + snap_size(child.min_height(alt), snap) + m.bottom
}

pub fn child_pref_area_width(
    child: &dyn Node,
    margin: Insets,
    height: Option<f64>,
    fill_height: bool,
    snap: bool,
) -> f64 {
    let m = snap_insets(margin, snap);
    let alt = vertical_alt(child, margin, height, fill_height, snap);
    let w = bounded_size(child.min_width(alt), child.pref_width(alt), child.max_width(alt));
    m.left + snap_size(w, snap) + m.right
}

pub fn child_pref_area_height(child: &dyn Node, margin: Insets, width: Option<f64>, snap: bool) -> f64 {
    let m = snap_insets(margin, snap);
    let alt = is_horizontally_biased(child).then(|| {
        let w = match width {
            Some(w) => w - m.horizontal(),
            None => child.pref_width(None),
        };
        snap_size(
            bounded_size(child.min_width(None), w, child.max_width(None)),
            snap,
        )
    });
    let h = bounded_size(child.min_height(alt), child.pref_height(alt), child.max_height(alt));
    m.top + snap_size(h, snap) + m.bottom
}

/// Maximum width of a child's area. An unbounded child stays unbounded
/// regardless of margin.
pub fn child_max_area_width(
    child: &dyn Node,
    margin: Insets,
    height: Option<f64>,
    fill_height: bool,
    snap: bool,
) -> f64 {
    let mut max = child.max_width(None);
    if max == f64::MAX {
        return max;
    }
    if let Some(alt) = vertical_alt(child, margin, height, fill_height, snap) {
        max = child.max_width(Some(alt));
    }
    let m = snap_insets(margin, snap);
    m.left + snap_size(max, snap) + m.right
}

pub fn child_max_area_height(child: &dyn Node, margin: Insets, width: Option<f64>, snap: bool) -> f64 {
    let mut max = child.max_height(None);
    if max == f64::MAX {
        return max;
    }
    let m = snap_insets(margin, snap);
    if is_horizontally_biased(child) {
        let w = match width {
            Some(w) => bounded_size(child.min_width(None), w - m.horizontal(), child.max_width(None)),
            None => child.min_width(None),
        };
        max = child.max_height(Some(snap_size(w, snap)));
    }
    m.top + snap_size(max, snap) + m.bottom
}
