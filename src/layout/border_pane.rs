//! # BorderPane
//!
//! Five named slots around a center. Top and bottom get their preferred
//! height and the full inside width. Left and right get their preferred
//! width and the height left between top and bottom. The center fills what
//! remains.
//!
//! Slots are handles into the region's single child list, so removing a
//! child through [`Region::remove_child`] also empties its slot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Insets, Orientation, Pos};

use super::region::{Layout, Region};
use super::{
    bounded_node_size_with_bias, child_min_area_height, child_min_area_width,
    child_pref_area_height, child_pref_area_width, layout_in_area, position_in_area, snap_size,
    snap_space, Node, NodeId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Top,
    Right,
    Bottom,
    Left,
    Center,
}

impl Slot {
    const ALL: [Slot; 5] = [Slot::Top, Slot::Right, Slot::Bottom, Slot::Left, Slot::Center];

    fn index(self) -> usize {
        self as usize
    }

    /// Alignment used when the child has none of its own.
    fn default_alignment(self) -> Pos {
        match self {
            Slot::Top | Slot::Left => Pos::TopLeft,
            Slot::Right => Pos::TopRight,
            Slot::Bottom => Pos::BottomLeft,
            Slot::Center => Pos::Center,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BorderLayout {
    slots: [Option<NodeId>; 5],
    margins: HashMap<NodeId, Insets>,
    alignments: HashMap<NodeId, Pos>,
}

impl BorderLayout {
    fn margin(&self, id: NodeId) -> Insets {
        self.margins.get(&id).copied().unwrap_or(Insets::EMPTY)
    }
}

pub type BorderPane = Region<BorderLayout>;

impl Region<BorderLayout> {
    /// Put a child in a slot, returning the child it replaces.
    pub fn set(&mut self, slot: Slot, child: impl Node + 'static) -> (NodeId, Option<Box<dyn Node>>) {
        self.set_boxed(slot, Box::new(child))
    }

    pub fn set_boxed(&mut self, slot: Slot, child: Box<dyn Node>) -> (NodeId, Option<Box<dyn Node>>) {
        let previous = self.take(slot);
        let id = self.add_boxed(child);
        self.kind.slots[slot.index()] = Some(id);
        (id, previous)
    }

    /// Empty a slot, removing its child from the region.
    pub fn take(&mut self, slot: Slot) -> Option<Box<dyn Node>> {
        let id = self.kind.slots[slot.index()]?;
        self.remove_child(id)
    }

    pub fn slot_id(&self, slot: Slot) -> Option<NodeId> {
        self.kind.slots[slot.index()]
    }

    pub fn slot_node(&self, slot: Slot) -> Option<&dyn Node> {
        self.child(self.slot_id(slot)?)
    }

    pub fn slot_of(&self, id: NodeId) -> Option<Slot> {
        Slot::ALL.into_iter().find(|s| self.slot_id(*s) == Some(id))
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

    fn managed_slot(&self, slot: Slot) -> Option<&dyn Node> {
        self.slot_node(slot).filter(|c| c.is_managed())
    }

    fn has_bias(&self, slot: Slot, orientation: Orientation) -> bool {
        self.managed_slot(slot)
            .is_some_and(|c| c.content_bias() == Some(orientation))
    }

    fn area_width(&self, slot: Slot, height: Option<f64>, minimum: bool) -> f64 {
        let Some(child) = self.managed_slot(slot) else {
            return 0.0;
        };
        let margin = self.kind.margin(child.id());
        let snap = self.snap_to_pixel();
        if minimum {
            child_min_area_width(child, margin, height, false, snap)
        } else {
            child_pref_area_width(child, margin, height, false, snap)
        }
    }

    fn area_height(&self, slot: Slot, width: Option<f64>, minimum: bool) -> f64 {
        let Some(child) = self.managed_slot(slot) else {
            return 0.0;
        };
        let margin = self.kind.margin(child.id());
        let snap = self.snap_to_pixel();
        if minimum {
            child_min_area_height(child, margin, width, snap)
        } else {
            child_pref_area_height(child, margin, width, snap)
        }
    }

    /// Width of the left, center and right areas. `height` is the content
    /// height inside the insets. When it is known and
    /// one of them depends on it, they are measured against the height left
    /// between top and bottom.
    fn middle_width(&self, height: Option<f64>, minimum: bool) -> f64 {
        let biased = [Slot::Left, Slot::Right, Slot::Center]
            .into_iter()
            .any(|s| self.has_bias(s, Orientation::Vertical));
        let middle = match height {
            Some(h) if biased => {
                let edges = self.area_height(Slot::Top, None, false)
                    + self.area_height(Slot::Bottom, None, false);
                Some((h - edges).max(0.0))
            }
            _ => None,
        };
        self.area_width(Slot::Left, middle, false)
            + self.area_width(Slot::Center, middle, minimum)
            + self.area_width(Slot::Right, middle, false)
    }

    /// Height of the tallest of left, center and right. `width` is the
    /// content width inside the insets.
    fn middle_height(&self, width: Option<f64>, minimum: bool) -> f64 {
        let center_width = match width {
            Some(w) if self.has_bias(Slot::Center, Orientation::Horizontal) => {
                let sides = self.area_width(Slot::Left, None, false)
                    + self.area_width(Slot::Right, None, false);
                Some((w - sides).max(0.0))
            }
            _ => None,
        };
        self.area_height(Slot::Center, center_width, minimum)
            .max(self.area_height(Slot::Left, None, minimum))
            .max(self.area_height(Slot::Right, None, minimum))
    }

    /// Index, margin and alignment of a managed slot child.
    fn slot_entry(&self, slot: Slot) -> Option<(usize, Insets, Pos)> {
        let id = self.managed_slot(slot)?.id();
        let index = self.index_of(id)?;
        let pos = self
            .kind
            .alignments
            .get(&id)
            .copied()
            .unwrap_or(slot.default_alignment());
        Some((index, self.kind.margin(id), pos))
    }
}

/// Size an edge child: preferred extent across its edge (at most what is
/// available), filled along it. Returns that extent plus margins.
fn size_edge(
    child: &mut dyn Node,
    margin: Insets,
    available: (f64, f64),
    across: Orientation,
    snap: bool,
) -> f64 {
    let m = margin.map(|v| snap_space(v, snap));
    let width = available.0 - m.horizontal();
    let height = available.1 - m.vertical();
    match across {
        Orientation::Vertical => {
            let pref = snap_size(child.pref_height(Some(width)), snap).min(height);
            let (w, h) = bounded_node_size_with_bias(child, width, pref, true, true);
            let h = snap_size(h, snap);
            child.resize(snap_size(w, snap), h);
            m.top + h + m.bottom
        }
        Orientation::Horizontal => {
            let pref = snap_size(child.pref_width(Some(height)), snap).min(width);
            let (w, h) = bounded_node_size_with_bias(child, pref, height, true, true);
            let w = snap_size(w, snap);
            child.resize(w, snap_size(h, snap));
            m.left + w + m.right
        }
    }
}

impl Layout for BorderLayout {
    const KIND: &'static str = "BorderPane";

    fn content_bias(region: &Region<Self>) -> Option<Orientation> {
        [Slot::Center, Slot::Right, Slot::Bottom, Slot::Left, Slot::Top]
            .into_iter()
            .find_map(|s| region.managed_slot(s).and_then(|c| c.content_bias()))
    }

    fn compute_min_width(region: &Region<Self>, height: Option<f64>) -> f64 {
        let insets = region.insets();
        let inner = height.map(|h| h - insets.vertical());
        let edges = region
            .area_width(Slot::Top, None, true)
            .max(region.area_width(Slot::Bottom, None, true));
        insets.horizontal() + region.middle_width(inner, true).max(edges)
    }

    fn compute_min_height(region: &Region<Self>, width: Option<f64>) -> f64 {
        let insets = region.insets();
        let inner = width.map(|w| w - insets.horizontal());
        insets.vertical()
            + region.area_height(Slot::Top, inner, false)
            + region.middle_height(inner, true)
            + region.area_height(Slot::Bottom, inner, false)
    }

    fn compute_pref_width(region: &Region<Self>, height: Option<f64>) -> f64 {
        let insets = region.insets();
        let inner = height.map(|h| h - insets.vertical());
        let edges = region
            .area_width(Slot::Top, None, false)
            .max(region.area_width(Slot::Bottom, None, false));
        insets.horizontal() + region.middle_width(inner, false).max(edges)
    }

    fn compute_pref_height(region: &Region<Self>, width: Option<f64>) -> f64 {
        let insets = region.insets();
        let inner = width.map(|w| w - insets.horizontal());
        insets.vertical()
            + region.area_height(Slot::Top, inner, false)
            + region.middle_height(inner, false)
            + region.area_height(Slot::Bottom, inner, false)
    }

    fn layout_children(region: &mut Region<Self>) {
        let insets = region.insets();
        let snap = region.snap_to_pixel();
        let (mut width, mut height) = (region.width(), region.height());
        match region.content_bias() {
            Some(Orientation::Vertical) => {
                height = height.max(region.min_height(None));
                width = width.max(region.min_width(Some(height)));
            }
            bias => {
                width = width.max(region.min_width(None));
                let cross = (bias == Some(Orientation::Horizontal)).then_some(width);
                height = height.max(region.min_height(cross));
            }
        }
        let inside = Bounds::new(0.0, 0.0, width, height).inset(&insets);

        let mut top = 0.0;
        if let Some((i, margin, pos)) = region.slot_entry(Slot::Top) {
            let child = region.children[i].as_mut();
            top = size_edge(child, margin, (inside.width, inside.height), Orientation::Vertical, snap);
            let area = Bounds::new(inside.min_x, inside.min_y, inside.width, top);
            position_in_area(child, area, 0.0, margin, pos.hpos(), pos.vpos(), snap);
        }

        let mut bottom = 0.0;
        if let Some((i, margin, pos)) = region.slot_entry(Slot::Bottom) {
            let child = region.children[i].as_mut();
            let available = (inside.width, inside.height - top);
            bottom = size_edge(child, margin, available, Orientation::Vertical, snap);
            let area = Bounds::new(inside.min_x, inside.max_y() - bottom, inside.width, bottom);
            position_in_area(child, area, 0.0, margin, pos.hpos(), pos.vpos(), snap);
        }

        let middle = inside.height - top - bottom;
        let mut left = 0.0;
        if let Some((i, margin, pos)) = region.slot_entry(Slot::Left) {
            let child = region.children[i].as_mut();
            left = size_edge(child, margin, (inside.width, middle), Orientation::Horizontal, snap);
            let area = Bounds::new(inside.min_x, inside.min_y + top, left, middle);
            position_in_area(child, area, 0.0, margin, pos.hpos(), pos.vpos(), snap);
        }

        let mut right = 0.0;
        if let Some((i, margin, pos)) = region.slot_entry(Slot::Right) {
            let child = region.children[i].as_mut();
            let available = (inside.width - left, middle);
            right = size_edge(child, margin, available, Orientation::Horizontal, snap);
            let area = Bounds::new(inside.max_x() - right, inside.min_y + top, right, middle);
            position_in_area(child, area, 0.0, margin, pos.hpos(), pos.vpos(), snap);
        }

        if let Some((i, margin, pos)) = region.slot_entry(Slot::Center) {
            let area = Bounds::new(
                inside.min_x + left,
                inside.min_y + top,
                inside.width - left - right,
                middle,
            );
            layout_in_area(
                region.children[i].as_mut(),
                area,
                0.0,
                margin,
                true,
                true,
                pos.hpos(),
                pos.vpos(),
                snap,
            );
        }
    }

    fn child_removed(&mut self, id: NodeId) {
        for slot in self.slots.iter_mut() {
            if *slot == Some(id) {
                *slot = None;
            }
        }
        self.margins.remove(&id);
        self.alignments.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Block, Rectangle};

    fn bounds(node: &dyn Node) -> (f64, f64, f64, f64) {
        (node.layout_x(), node.layout_y(), node.width(), node.height())
    }

    #[test]
    fn center_only_reports_its_sizes() {
        let mut pane = BorderPane::new();
        let (center, _) = pane.set(
            Slot::Center,
            Block::new(100.0, 200.0)
                .with_min(10.0, 20.0)
                .with_max(700.0, 800.0),
        );
        assert_eq!(pane.min_width(None), 10.0);
        assert_eq!(pane.min_height(None), 20.0);
        assert_eq!(pane.pref_width(None), 100.0);
        assert_eq!(pane.pref_height(None), 200.0);
        assert_eq!(pane.max_width(None), f64::MAX);
        assert_eq!(pane.max_height(None), f64::MAX);

        pane.autosize();
        pane.layout();
        assert_eq!(bounds(pane.child(center).unwrap()), (0.0, 0.0, 100.0, 200.0));
    }

    #[test]
    fn all_five_slots() {
        let mut pane = BorderPane::new();
        let (top, _) = pane.set(Slot::Top, Block::new(50.0, 20.0));
        let (bottom, _) = pane.set(Slot::Bottom, Block::new(50.0, 30.0));
        let (left, _) = pane.set(Slot::Left, Block::new(40.0, 10.0));
        let (right, _) = pane.set(Slot::Right, Rectangle::new(30.0, 30.0));
        let (center, _) = pane.set(Slot::Center, Block::new(100.0, 80.0));

        assert_eq!(pane.pref_width(None), 170.0);
        assert_eq!(pane.pref_height(None), 130.0);

        pane.resize(300.0, 200.0);
        pane.layout();
        assert_eq!(bounds(pane.child(top).unwrap()), (0.0, 0.0, 300.0, 20.0));
        assert_eq!(bounds(pane.child(bottom).unwrap()), (0.0, 170.0, 300.0, 30.0));
        assert_eq!(bounds(pane.child(left).unwrap()), (0.0, 20.0, 40.0, 150.0));
        assert_eq!(bounds(pane.child(right).unwrap()), (270.0, 20.0, 30.0, 30.0));
        assert_eq!(bounds(pane.child(center).unwrap()), (40.0, 20.0, 230.0, 150.0));
    }

    #[test]
    fn margins_surround_slot_content() {
        let mut pane = BorderPane::new();
        pane.set_padding(Insets::uniform(2.0));
        let (top, _) = pane.set(Slot::Top, Block::new(50.0, 20.0));
        let (center, _) = pane.set(Slot::Center, Block::new(50.0, 50.0));
        pane.set_margin(top, Some(Insets::uniform(5.0)));
        pane.set_child_alignment(center, Some(Pos::TopLeft));
        assert_eq!(pane.pref_height(None), 84.0);

        pane.resize(104.0, 104.0);
        pane.layout();
        assert_eq!(bounds(pane.child(top).unwrap()), (7.0, 7.0, 90.0, 20.0));
        assert_eq!(bounds(pane.child(center).unwrap()), (2.0, 32.0, 100.0, 70.0));
    }

    #[test]
    fn removing_a_child_clears_its_slot() {
        let mut pane = BorderPane::new();
        let (center, _) = pane.set(Slot::Center, Block::new(10.0, 10.0));
        assert_eq!(pane.slot_of(center), Some(Slot::Center));
        pane.set_margin(center, Some(Insets::uniform(1.0)));
        assert!(pane.remove_child(center).is_some());
        assert_eq!(pane.slot_id(Slot::Center), None);
        assert_eq!(pane.margin(center), None);
        assert_eq!(pane.pref_width(None), 0.0);
    }

    #[test]
    fn replacing_a_slot_returns_the_old_child() {
        let mut pane = BorderPane::new();
        let (first, _) = pane.set(Slot::Left, Block::new(10.0, 10.0));
        let (second, previous) = pane.set(Slot::Left, Block::new(20.0, 10.0));
        assert_eq!(previous.map(|p| p.id()), Some(first));
        assert_eq!(pane.children().len(), 1);
        assert_eq!(pane.slot_id(Slot::Left), Some(second));
        assert!(pane.take(Slot::Left).is_some());
        assert!(pane.children().is_empty());
    }

    #[test]
    fn bias_follows_slot_order() {
        let mut pane = BorderPane::new();
        pane.set(Slot::Top, Block::new(10.0, 10.0).with_bias(Orientation::Horizontal, 100.0));
        pane.set(Slot::Right, Block::new(10.0, 10.0).with_bias(Orientation::Vertical, 100.0));
        assert_eq!(pane.content_bias(), Some(Orientation::Vertical));
        pane.set(Slot::Center, Block::new(10.0, 10.0));
        assert_eq!(pane.content_bias(), Some(Orientation::Vertical));
    }

    #[test]
    fn wrapped_top_is_measured_at_the_given_width() {
        let mut pane = BorderPane::new();
        pane.set(Slot::Top, Block::new(100.0, 10.0).with_bias(Orientation::Horizontal, 1000.0));
        assert_eq!(pane.pref_height(Some(50.0)), 20.0);
        assert_eq!(pane.pref_height(None), 10.0);
    }

    #[test]
    fn biased_slots_are_measured_inside_the_padding() {
        let mut pane = BorderPane::new();
        pane.set_padding(Insets::uniform(10.0));
        let (top, _) =
            pane.set(Slot::Top, Block::new(100.0, 10.0).with_bias(Orientation::Horizontal, 1000.0));
        assert_eq!(pane.pref_height(Some(120.0)), 30.0);
        assert_eq!(pane.min_height(Some(120.0)), 30.0);

        pane.resize(120.0, 30.0);
        pane.layout();
        let top = pane.child(top).unwrap();
        assert_eq!(bounds(top), (10.0, 10.0, 100.0, 10.0));
        assert!(top.layout_y() + top.height() <= pane.height() - 10.0);

        let mut tall = BorderPane::new();
        tall.set_padding(Insets::uniform(10.0));
        tall.set(Slot::Left, Block::new(10.0, 100.0).with_bias(Orientation::Vertical, 1000.0));
        assert_eq!(tall.pref_width(Some(120.0)), 30.0);
    }
}
