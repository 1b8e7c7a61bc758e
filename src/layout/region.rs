//! The generic container node.

use std::fmt;

use log::trace;

use crate::background::Background;
use crate::border::Border;
use crate::css::RegionStyle;
use crate::geometry::{Insets, Orientation};

use super::{bounded_size, snap_space, Node, NodeId};

/// One of a region's six size properties.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SizeOverride {
    /// Use the size computed from the content.
    #[default]
    Computed,
    /// Use the preferred size. Only meaningful for min and max; on the
    /// preferred size itself it means `Computed`.
    UsePref,
    /// A fixed size. Negative and NaN values act as 0.
    Value(f64),
}

impl SizeOverride {
    fn fixed(value: f64) -> f64 {
        if value.is_nan() || value < 0.0 {
            0.0
        } else {
            value
        }
    }
}

/// How a region measures and arranges its children.
///
/// The defaults are those of a plain region: min size is the insets, pref
/// size is the extent of the managed children at their current positions,
/// max size is unbounded, and layout only autosizes the children.
pub trait Layout: fmt::Debug + Sized + 'static {
    const KIND: &'static str;

    fn content_bias(_region: &Region<Self>) -> Option<Orientation> {
        None
    }

    fn compute_min_width(region: &Region<Self>, _height: Option<f64>) -> f64 {
        region.insets().horizontal()
    }

    fn compute_min_height(region: &Region<Self>, _width: Option<f64>) -> f64 {
        region.insets().vertical()
    }

    fn compute_pref_width(region: &Region<Self>, _height: Option<f64>) -> f64 {
        let (lo, hi) = region.managed_children().fold((0.0f64, 0.0f64), |(lo, hi), child| {
            let x = child.layout_bounds().min_x + child.layout_x();
            let w = bounded_size(child.min_width(None), child.pref_width(None), child.max_width(None));
            (lo.min(x), hi.max(x + w))
        });
        region.insets().horizontal() + hi - lo
    }

    fn compute_pref_height(region: &Region<Self>, _width: Option<f64>) -> f64 {
        let (lo, hi) = region.managed_children().fold((0.0f64, 0.0f64), |(lo, hi), child| {
            let y = child.layout_bounds().min_y + child.layout_y();
            let h = bounded_size(child.min_height(None), child.pref_height(None), child.max_height(None));
            (lo.min(y), hi.max(y + h))
        });
        region.insets().vertical() + hi - lo
    }

    fn compute_max_width(_region: &Region<Self>, _height: Option<f64>) -> f64 {
        f64::MAX
    }

    fn compute_max_height(_region: &Region<Self>, _width: Option<f64>) -> f64 {
        f64::MAX
    }

    fn layout_children(region: &mut Region<Self>) {
        for child in region.children.iter_mut().filter(|c| c.is_managed()) {
            child.autosize();
        }
    }

    /// Drop any side-table entries for a child that left the region.
    fn child_removed(&mut self, _id: NodeId) {}
}

/// Children keep the positions they were given and get their preferred
/// size.
#[derive(Debug, Clone, Default)]
pub struct FreeLayout;

impl Layout for FreeLayout {
    const KIND: &'static str = "Pane";
}

pub type Pane = Region<FreeLayout>;

/// A resizable node with a background, a border, padding and children,
/// arranged by its [`Layout`] kind.
#[derive(Debug)]
pub struct Region<K: Layout> {
    id: NodeId,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    min_width: SizeOverride,
    pref_width: SizeOverride,
    max_width: SizeOverride,
    min_height: SizeOverride,
    pref_height: SizeOverride,
    max_height: SizeOverride,
    padding: Insets,
    background: Option<Background>,
    border: Option<Border>,
    snap_to_pixel: bool,
    managed: bool,
    needs_layout: bool,
    pub(super) children: Vec<Box<dyn Node>>,
    pub(super) kind: K,
}

impl<K: Layout + Default> Region<K> {
    pub fn new() -> Self {
        Self::with_kind(K::default())
    }
}

impl<K: Layout + Default> Default for Region<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Layout> Region<K> {
    pub fn with_kind(kind: K) -> Self {
        Self {
            id: NodeId::next(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            min_width: SizeOverride::Computed,
            pref_width: SizeOverride::Computed,
            max_width: SizeOverride::Computed,
            min_height: SizeOverride::Computed,
            pref_height: SizeOverride::Computed,
            max_height: SizeOverride::Computed,
            padding: Insets::EMPTY,
            background: None,
            border: None,
            snap_to_pixel: true,
            managed: true,
            needs_layout: true,
            children: Vec::new(),
            kind,
        }
    }

    // ── Children ───────────────────────────────────────────────────

    pub fn add_child(&mut self, child: impl Node + 'static) -> NodeId {
        self.add_boxed(Box::new(child))
    }

    pub fn add_boxed(&mut self, child: Box<dyn Node>) -> NodeId {
        let id = child.id();
        self.children.push(child);
        self.needs_layout = true;
        id
    }

    /// Remove a child, clearing everything the layout kind kept for it.
    pub fn remove_child(&mut self, id: NodeId) -> Option<Box<dyn Node>> {
        let index = self.index_of(id)?;
        self.kind.child_removed(id);
        self.needs_layout = true;
        Some(self.children.remove(index))
    }

    pub fn child(&self, id: NodeId) -> Option<&dyn Node> {
        self.children
            .iter()
            .find(|c| c.id() == id)
            .map(|c| c.as_ref() as &dyn Node)
    }

    /// Mutable access to a child. The region is laid out again on the next
    /// pass since the child may have changed size.
    pub fn child_mut(&mut self, id: NodeId) -> Option<&mut (dyn Node + 'static)> {
        let index = self.index_of(id)?;
        self.needs_layout = true;
        Some(self.children[index].as_mut())
    }

    pub(super) fn index_of(&self, id: NodeId) -> Option<usize> {
        self.children.iter().position(|c| c.id() == id)
    }

    pub fn managed_children(&self) -> impl Iterator<Item = &(dyn Node + 'static)> + '_ {
        self.children.iter().filter(|c| c.is_managed()).map(|c| c.as_ref())
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    // ── Properties ─────────────────────────────────────────────────

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn set_padding(&mut self, padding: Insets) {
        if padding != self.padding {
            self.padding = padding;
            self.needs_layout = true;
        }
    }

    pub fn set_background(&mut self, background: Option<Background>) {
        self.background = background;
    }

    pub fn set_border(&mut self, border: Option<Border>) {
        if border != self.border {
            self.border = border;
            self.needs_layout = true;
        }
    }

    /// Border insets plus padding.
    pub fn insets(&self) -> Insets {
        let border = self.border.as_ref().map(Border::insets).unwrap_or(Insets::EMPTY);
        let snap = self.snap_to_pixel;
        border.map(|v| snap_space(v, snap)) + self.padding.map(|v| snap_space(v, snap))
    }

    pub fn snap_to_pixel(&self) -> bool {
        self.snap_to_pixel
    }

    pub fn set_snap_to_pixel(&mut self, snap: bool) {
        if snap != self.snap_to_pixel {
            self.snap_to_pixel = snap;
            self.needs_layout = true;
        }
    }

    pub fn min_width_override(&self) -> SizeOverride {
        self.min_width
    }

    pub fn pref_width_override(&self) -> SizeOverride {
        self.pref_width
    }

    pub fn max_width_override(&self) -> SizeOverride {
        self.max_width
    }

    pub fn min_height_override(&self) -> SizeOverride {
        self.min_height
    }

    pub fn pref_height_override(&self) -> SizeOverride {
        self.pref_height
    }

    pub fn max_height_override(&self) -> SizeOverride {
        self.max_height
    }

    pub fn set_min_width(&mut self, value: SizeOverride) {
        self.min_width = value;
        self.needs_layout = true;
    }

    pub fn set_pref_width(&mut self, value: SizeOverride) {
        self.pref_width = value;
        self.needs_layout = true;
    }

    pub fn set_max_width(&mut self, value: SizeOverride) {
        self.max_width = value;
        self.needs_layout = true;
    }

    pub fn set_min_height(&mut self, value: SizeOverride) {
        self.min_height = value;
        self.needs_layout = true;
    }

    pub fn set_pref_height(&mut self, value: SizeOverride) {
        self.pref_height = value;
        self.needs_layout = true;
    }

    pub fn set_max_height(&mut self, value: SizeOverride) {
        self.max_height = value;
        self.needs_layout = true;
    }

    pub fn set_min_size(&mut self, width: f64, height: f64) {
        self.set_min_width(SizeOverride::Value(width));
        self.set_min_height(SizeOverride::Value(height));
    }

    pub fn set_pref_size(&mut self, width: f64, height: f64) {
        self.set_pref_width(SizeOverride::Value(width));
        self.set_pref_height(SizeOverride::Value(height));
    }

    pub fn set_max_size(&mut self, width: f64, height: f64) {
        self.set_max_width(SizeOverride::Value(width));
        self.set_max_height(SizeOverride::Value(height));
    }

    /// Apply everything a resolved style sets, leaving the rest alone.
    /// A cleared background or border replaces the current one with `None`.
    pub fn apply_style(&mut self, style: &RegionStyle) {
        if let Some(background) = style.background.to_update() {
            self.set_background(background);
        }
        if let Some(border) = style.border.to_update() {
            self.set_border(border);
        }
        if let Some(padding) = style.padding {
            self.set_padding(padding);
        }
        let overrides: [(Option<SizeOverride>, fn(&mut Self, SizeOverride)); 6] = [
            (style.min_width, Self::set_min_width),
            (style.pref_width, Self::set_pref_width),
            (style.max_width, Self::set_max_width),
            (style.min_height, Self::set_min_height),
            (style.pref_height, Self::set_pref_height),
            (style.max_height, Self::set_max_height),
        ];
        for (value, set) in overrides {
            if let Some(value) = value {
                set(self, value);
            }
        }
        if let Some(snap) = style.snap_to_pixel {
            self.set_snap_to_pixel(snap);
        }
    }

    /// Insets from the border box to the area the background is sure to
    /// cover opaquely.
    pub fn opaque_insets(&self) -> Option<Insets> {
        self.background.as_ref()?.opaque_insets(self.width, self.height)
    }

    // ── Layout state ───────────────────────────────────────────────

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Force `layout_children` to run on the next pass.
    pub fn request_layout(&mut self) {
        self.needs_layout = true;
    }
}

impl<K: Layout> Node for Region<K> {
    fn id(&self) -> NodeId {
        self.id
    }

    fn kind_name(&self) -> &'static str {
        K::KIND
    }

    fn is_managed(&self) -> bool {
        self.managed
    }

    fn set_managed(&mut self, managed: bool) {
        self.managed = managed;
    }

    fn content_bias(&self) -> Option<Orientation> {
        K::content_bias(self)
    }

    fn min_width(&self, height: Option<f64>) -> f64 {
        match self.min_width {
            SizeOverride::Computed => K::compute_min_width(self, height),
            SizeOverride::UsePref => self.pref_width(height),
            SizeOverride::Value(v) => SizeOverride::fixed(v),
        }
    }

    fn min_height(&self, width: Option<f64>) -> f64 {
        match self.min_height {
            SizeOverride::Computed => K::compute_min_height(self, width),
            SizeOverride::UsePref => self.pref_height(width),
            SizeOverride::Value(v) => SizeOverride::fixed(v),
        }
    }

    fn pref_width(&self, height: Option<f64>) -> f64 {
        match self.pref_width {
            SizeOverride::Computed | SizeOverride::UsePref => K::compute_pref_width(self, height),
            SizeOverride::Value(v) => SizeOverride::fixed(v),
        }
    }

    fn pref_height(&self, width: Option<f64>) -> f64 {
        match self.pref_height {
            SizeOverride::Computed | SizeOverride::UsePref => K::compute_pref_height(self, width),
            SizeOverride::Value(v) => SizeOverride::fixed(v),
        }
    }

    fn max_width(&self, height: Option<f64>) -> f64 {
        match self.max_width {
            SizeOverride::Computed => K::compute_max_width(self, height),
            SizeOverride::UsePref => self.pref_width(height),
            SizeOverride::Value(v) => SizeOverride::fixed(v),
        }
    }

    fn max_height(&self, width: Option<f64>) -> f64 {
        match self.max_height {
            SizeOverride::Computed => K::compute_max_height(self, width),
            SizeOverride::UsePref => self.pref_height(width),
            SizeOverride::Value(v) => SizeOverride::fixed(v),
        }
    }

    /// The baseline of the first managed child that has one.
    fn baseline_offset(&self) -> Option<f64> {
        self.managed_children().find_map(|child| {
            let offset = child.baseline_offset()?;
            Some(child.layout_bounds().min_y + child.layout_y() + offset)
        })
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
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.needs_layout = true;
        }
    }

    fn layout(&mut self) {
        if self.needs_layout {
            trace!(
                "{} {} laying out {} children in {}x{}",
                K::KIND,
                self.id,
                self.children.len(),
                self.width,
                self.height
            );
            K::layout_children(self);
            self.needs_layout = false;
        }
        for child in &mut self.children {
            child.layout();
        }
    }

    fn children(&self) -> &[Box<dyn Node>] {
        &self.children
    }

    fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    fn border(&self) -> Option<&Border> {
        self.border.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::StyleResolver;
    use crate::image::NullLoader;
    use crate::layout::{Block, Rectangle};
    use crate::paint::Color;

    #[test]
    fn pane_measures_children_where_they_are() {
        let mut pane = Pane::new();
        pane.set_padding(Insets::uniform(5.0));
        let mut block = Block::new(40.0, 30.0);
        block.relocate(10.0, 20.0);
        pane.add_child(block);
        pane.add_child(Rectangle::new(20.0, 20.0));

        assert_eq!(pane.pref_width(None), 60.0);
        assert_eq!(pane.pref_height(None), 60.0);
        assert_eq!(pane.min_width(None), 10.0);
        assert_eq!(pane.max_width(None), f64::MAX);
    }

    #[test]
    fn pane_layout_autosizes_children_in_place() {
        let mut pane = Pane::new();
        let mut block = Block::new(40.0, 30.0);
        block.relocate(7.0, 9.0);
        let id = pane.add_child(block);
        pane.autosize();
        pane.layout();

        let child = pane.child(id).unwrap();
        assert_eq!((child.layout_x(), child.layout_y()), (7.0, 9.0));
        assert_eq!((child.width(), child.height()), (40.0, 30.0));
    }

    #[test]
    fn overrides_replace_computed_sizes() {
        let mut pane = Pane::new();
        pane.add_child(Block::new(40.0, 30.0));
        pane.set_min_width(SizeOverride::UsePref);
        pane.set_max_height(SizeOverride::UsePref);
        pane.set_pref_width(SizeOverride::Value(-3.0));
        assert_eq!(pane.pref_width(None), 0.0);
        assert_eq!(pane.min_width(None), 0.0);
        assert_eq!(pane.max_height(None), 30.0);

        pane.set_pref_width(SizeOverride::Value(f64::NAN));
        assert_eq!(pane.pref_width(None), 0.0);
        pane.set_pref_width(SizeOverride::Computed);
        assert_eq!(pane.min_width(None), 40.0);
    }

    #[test]
    fn insets_are_border_plus_padding() {
        let mut pane = Pane::new();
        pane.set_padding(Insets::new(1.0, 2.0, 3.0, 4.0));
        pane.set_border(Some(Border::stroke(Color::BLACK)));
        assert_eq!(pane.insets(), Insets::new(2.0, 3.0, 4.0, 5.0));
        assert_eq!(pane.min_height(None), 6.0);
    }

    #[test]
    fn unmanaged_children_are_not_measured_or_sized() {
        let mut pane = Pane::new();
        pane.add_child(Block::new(10.0, 10.0));
        let mut big = Block::new(500.0, 500.0);
        big.set_managed(false);
        let id = pane.add_child(big);
        assert_eq!(pane.pref_width(None), 10.0);
        pane.autosize();
        pane.layout();
        assert_eq!(pane.child(id).unwrap().width(), 0.0);
    }

    #[test]
    fn baseline_comes_from_first_child_with_one() {
        let mut pane = Pane::new();
        pane.add_child(Rectangle::new(10.0, 10.0));
        let mut text = Block::new(30.0, 12.0).with_baseline(9.0);
        text.relocate(0.0, 4.0);
        pane.add_child(text);
        assert_eq!(pane.baseline_offset(), Some(13.0));
        assert_eq!(Pane::new().baseline_offset(), None);
    }

    #[test]
    fn layout_reruns_only_when_dirty() {
        let mut pane = Pane::new();
        let id = pane.add_child(Block::new(10.0, 10.0));
        pane.autosize();
        pane.layout();
        assert!(!pane.needs_layout());

        pane.resize(10.0, 10.0);
        assert!(!pane.needs_layout());

        pane.child_mut(id).unwrap().resize(1.0, 1.0);
        assert!(pane.needs_layout());
        pane.layout();
        assert_eq!(pane.child(id).unwrap().width(), 10.0);
    }

    #[test]
    fn removing_a_child_returns_it() {
        let mut pane = Pane::new();
        let id = pane.add_child(Block::new(10.0, 10.0));
        let removed = pane.remove_child(id).unwrap();
        assert_eq!(removed.id(), id);
        assert!(pane.children().is_empty());
        assert!(pane.remove_child(id).is_none());
    }

    #[test]
    fn style_is_applied_selectively() {
        let style = RegionStyle {
            padding: Some(Insets::uniform(3.0)),
            pref_width: Some(SizeOverride::Value(50.0)),
            snap_to_pixel: Some(false),
            ..RegionStyle::default()
        };
        let mut pane = Pane::new();
        pane.set_min_height(SizeOverride::Value(7.0));
        pane.apply_style(&style);
        assert_eq!(pane.padding(), Insets::uniform(3.0));
        assert_eq!(pane.pref_width(None), 50.0);
        assert_eq!(pane.min_height(None), 7.0);
        assert!(!pane.snap_to_pixel());
    }

    #[test]
    fn null_restyle_clears_background_and_border() {
        let resolver = StyleResolver::new().with_image_loader(NullLoader);
        let mut pane = Pane::new();
        pane.apply_style(&resolver.resolve_text("-fx-background-color: red; -fx-border-color: blue"));
        assert_eq!(pane.background().map(|bg| bg.fills().len()), Some(1));
        assert_eq!(pane.insets(), Insets::uniform(1.0));

        pane.apply_style(&resolver.resolve_text("-fx-padding: 2"));
        assert!(pane.background().is_some());
        assert!(pane.border().is_some());
        pane.layout();
        assert!(!pane.needs_layout());

        pane.apply_style(&resolver.resolve_text("-fx-background-color: null; -fx-border-color: none"));
        assert!(pane.background().is_none());
        assert!(pane.border().is_none());
        assert_eq!(pane.insets(), Insets::uniform(2.0));
        assert!(pane.needs_layout());
    }
}
