//! # StackPane
//!
//! Every managed child gets the whole content area. Each child is sized up
//! to that area (within its own min and max) and aligned by its own
//! alignment, falling back to the pane's.

use std::collections::HashMap;

use crate::geometry::{Bounds, Insets, Orientation, Pos, VPos};

use super::region::{Layout, Region};
use super::{
    bounded_size, child_min_area_height, child_min_area_width, child_pref_area_height,
    child_pref_area_width, layout_in_area, Node, NodeId,
};

#[derive(Debug, Clone, Default)]
pub struct StackLayout {
    alignment: Pos,
    alignments: HashMap<NodeId, Pos>,
    margins: HashMap<NodeId, Insets>,
}

impl StackLayout {
    fn margin(&self, id: NodeId) -> Insets {
        self.margins.get(&id).copied().unwrap_or(Insets::EMPTY)
    }
}

pub type StackPane = Region<StackLayout>;

impl Region<StackLayout> {
    /// Default alignment for children without their own. Center unless set.
    pub fn alignment(&self) -> Pos {
        self.kind.alignment
    }

    pub fn set_alignment(&mut self, alignment: Pos) {
        self.kind.alignment = alignment;
        self.request_layout();
    }

    pub fn child_alignment(&self, id: NodeId) -> Option<Pos> {
        self.kind.alignments.get(&id).copied()
    }

    pub fn set_child_alignment(&mut self, id: NodeId, alignment: Option<Pos>) {
        match alignment {
            Some(pos) => self.kind.alignments.insert(id, pos),
            None => self.kind.alignments.remove(&id),
        };
        self.request_layout();
    }

    pub fn margin(&self, id: NodeId) -> Option<Insets> {
        self.kind.margins.get(&id).copied()
    }

    pub fn set_margin(&mut self, id: NodeId, margin: Option<Insets>) {
        match margin {
            Some(m) => self.kind.margins.insert(id, m),
            None => self.kind.margins.remove(&id),
        };
        self.request_layout();
    }

    /// Largest baseline among the managed children, measured from the top of
    /// their areas. Children without a baseline count with their height.
    fn area_baseline(&self) -> f64 {
        self.managed_children()
            .map(|child| {
                child.baseline_offset().unwrap_or_else(|| {
                    bounded_size(child.min_height(None), child.pref_height(None), child.max_height(None))
                })
            })
            .fold(0.0, f64::max)
    }

    fn max_over_children(&self, measure: impl Fn(&dyn Node, Insets) -> f64) -> f64 {
        self.managed_children()
            .map(|child| measure(child, self.kind.margin(child.id())))
            .fold(0.0, f64::max)
    }
}

impl Layout for StackLayout {
    const KIND: &'static str = "StackPane";

    fn content_bias(region: &Region<Self>) -> Option<Orientation> {
        let mut bias = None;
        for child in region.managed_children() {
            match child.content_bias() {
                Some(Orientation::Horizontal) => return Some(Orientation::Horizontal),
                Some(Orientation::Vertical) => bias = Some(Orientation::Vertical),
                None => {}
            }
        }
        bias
    }

    fn compute_min_width(region: &Region<Self>, height: Option<f64>) -> f64 {
        let insets = region.insets();
        let inner = height.map(|h| h - insets.vertical());
        let snap = region.snap_to_pixel();
        insets.horizontal()
            + region.max_over_children(|c, m| child_min_area_width(c, m, inner, true, snap))
    }

    fn compute_min_height(region: &Region<Self>, width: Option<f64>) -> f64 {
        let insets = region.insets();
        let inner = width.map(|w| w - insets.horizontal());
        let snap = region.snap_to_pixel();
        insets.vertical() + region.max_over_children(|c, m| child_min_area_height(c, m, inner, snap))
    }

    fn compute_pref_width(region: &Region<Self>, height: Option<f64>) -> f64 {
        let insets = region.insets();
        let inner = height.map(|h| h - insets.vertical());
        let snap = region.snap_to_pixel();
        insets.horizontal()
            + region.max_over_children(|c, m| child_pref_area_width(c, m, inner, true, snap))
    }

    fn compute_pref_height(region: &Region<Self>, width: Option<f64>) -> f64 {
        let insets = region.insets();
        let inner = width.map(|w| w - insets.horizontal());
        let snap = region.snap_to_pixel();
        insets.vertical() + region.max_over_children(|c, m| child_pref_area_height(c, m, inner, snap))
    }

    fn layout_children(region: &mut Region<Self>) {
        let insets = region.insets();
        let area = Bounds::new(0.0, 0.0, region.width(), region.height()).inset(&insets);
        let snap = region.snap_to_pixel();
        let default = region.kind.alignment;
        let baseline_aligned = default.vpos() == VPos::Baseline
            || region.kind.alignments.values().any(|p| p.vpos() == VPos::Baseline);
        let baseline = if baseline_aligned {
            region.area_baseline()
        } else {
            0.0
        };

        let kind = &region.kind;
        for child in region.children.iter_mut().filter(|c| c.is_managed()) {
            let id = child.id();
            let pos = kind.alignments.get(&id).copied().unwrap_or(default);
            layout_in_area(
                child.as_mut(),
                area,
                baseline,
                kind.margin(id),
                true,
                true,
                pos.hpos(),
                pos.vpos(),
                snap,
            );
        }
    }

    fn child_removed(&mut self, id: NodeId) {
        self.alignments.remove(&id);
        self.margins.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Block, Rectangle};

    #[test]
    fn fixed_child_centers_over_resizable_child() {
        let mut stack = StackPane::new();
        assert_eq!(stack.alignment(), Pos::Center);
        let big = stack.add_child(Block::new(300.0, 400.0));
        let rect = stack.add_child(Rectangle::new(100.0, 100.0));
        stack.autosize();
        stack.layout();

        assert_eq!((stack.width(), stack.height()), (300.0, 400.0));
        let r = stack.child(rect).unwrap();
        assert_eq!((r.layout_x(), r.layout_y()), (100.0, 150.0));
        let b = stack.child(big).unwrap();
        assert_eq!((b.layout_x(), b.layout_y(), b.width(), b.height()), (0.0, 0.0, 300.0, 400.0));
    }

    #[test]
    fn child_alignment_and_margin_override_the_pane() {
        let mut stack = StackPane::new();
        stack.add_child(Block::new(200.0, 100.0));
        let small = stack.add_child(Block::new(20.0, 10.0).with_max(20.0, 10.0));
        stack.set_child_alignment(small, Some(Pos::BottomRight));
        stack.set_margin(small, Some(Insets::new(0.0, 5.0, 4.0, 0.0)));
        stack.autosize();
        stack.layout();

        let s = stack.child(small).unwrap();
        assert_eq!((s.layout_x(), s.layout_y()), (175.0, 86.0));
    }

    #[test]
    fn sizes_include_margins_and_padding() {
        let mut stack = StackPane::new();
        stack.set_padding(Insets::uniform(10.0));
        let a = stack.add_child(Block::new(50.0, 20.0).with_min(5.0, 6.0));
        stack.add_child(Block::new(30.0, 60.0));
        stack.set_margin(a, Some(Insets::uniform(5.0)));
        assert_eq!(stack.pref_width(None), 80.0);
        assert_eq!(stack.pref_height(None), 80.0);
        assert_eq!(stack.min_width(None), 35.0);
    }

    #[test]
    fn horizontal_bias_wins() {
        let mut stack = StackPane::new();
        stack.add_child(Block::new(10.0, 10.0).with_bias(Orientation::Vertical, 100.0));
        assert_eq!(stack.content_bias(), Some(Orientation::Vertical));
        stack.add_child(Block::new(10.0, 10.0).with_bias(Orientation::Horizontal, 100.0));
        assert_eq!(stack.content_bias(), Some(Orientation::Horizontal));
    }

    #[test]
    fn removal_clears_side_tables() {
        let mut stack = StackPane::new();
        let id = stack.add_child(Block::new(10.0, 10.0));
        stack.set_margin(id, Some(Insets::uniform(1.0)));
        stack.set_child_alignment(id, Some(Pos::TopLeft));
        stack.remove_child(id);
        assert_eq!(stack.margin(id), None);
        assert_eq!(stack.child_alignment(id), None);
    }

    #[test]
    fn baseline_alignment_lines_up_children() {
        let mut stack = StackPane::new();
        stack.set_alignment(Pos::BaselineLeft);
        let tall = stack.add_child(Block::new(40.0, 30.0).with_max(40.0, 30.0).with_baseline(24.0));
        let short = stack.add_child(Block::new(40.0, 12.0).with_max(40.0, 12.0).with_baseline(10.0));
        stack.autosize();
        stack.layout();
        assert_eq!(stack.child(tall).unwrap().layout_y(), 0.0);
        assert_eq!(stack.child(short).unwrap().layout_y(), 14.0);
    }
}
