//! # Scene Description
//!
//! A JSON description of a region tree, the tree it builds, and the
//! serializable snapshot of a laid-out tree.
//!
//! ```text
//! { "width": 400, "height": 300,
//!   "root": { "kind": { "type": "BorderPane" },
//!             "style": "-fx-background-color: white; -fx-padding: 8",
//!             "children": [
//!               { "kind": { "type": "Block", "pref": { "width": 100, "height": 40 } },
//!                 "slot": "Top", "name": "header" } ] } }
//! ```
//!
//! A node's `style` text wins over its own fields (padding, size overrides)
//! when both set the same property.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::css::StyleResolver;
use crate::error::RegionError;
use crate::geometry::{Insets, Orientation, Pos};
use crate::layout::{
    bounded_size, Block, BorderPane, Layout, Node, NodeId, Pane, Rectangle, Region, SizeOverride,
    Slot, StackPane,
};

/// The top of a scene document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Width to lay the root out at. The root's preferred width when absent.
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    /// Font size in px for `em` lengths in styles.
    #[serde(default)]
    pub font_size: Option<f64>,
    pub root: SceneNode,
}

/// One node of the scene tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    pub kind: NodeKind,

    /// Name reported in the layout output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `-fx-*` declarations, e.g. `"-fx-background-color: red; -fx-padding: 4"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,

    /// Region padding. May be omitted but not `null`.
    #[serde(default)]
    pub padding: Insets,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<SizeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pref_width: Option<SizeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<SizeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<SizeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pref_height: Option<SizeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<SizeValue>,

    /// Margin inside a StackPane or BorderPane.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Insets>,

    /// Alignment inside a StackPane or BorderPane.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Pos>,

    /// Required for children of a BorderPane.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<Slot>,

    /// Position inside a Pane.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,

    #[serde(default = "default_true")]
    pub managed: bool,

    #[serde(default)]
    pub children: Vec<SceneNode>,
}

fn default_true() -> bool {
    true
}

/// The different kinds of scene nodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    /// Children keep their `x`/`y` and get their preferred size.
    Pane,

    /// Children are stacked in the same area.
    StackPane {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alignment: Option<Pos>,
    },

    /// Children occupy named slots.
    BorderPane,

    /// A fixed-size shape.
    Rectangle { width: f64, height: f64 },

    /// A resizable leaf. With a bias it keeps `area` constant, like wrapped
    /// text.
    Block {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<Extent>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pref: Option<Extent>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<Extent>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bias: Option<Orientation>,
        #[serde(default)]
        area: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        baseline: Option<f64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

/// A size property: a number of px or one of `"Computed"` and `"UsePref"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeValue {
    Fixed(f64),
    Keyword(SizeKeyword),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SizeKeyword {
    Computed,
    UsePref,
}

impl From<SizeValue> for SizeOverride {
    fn from(value: SizeValue) -> Self {
        match value {
            SizeValue::Fixed(v) => SizeOverride::Value(v),
            SizeValue::Keyword(SizeKeyword::Computed) => SizeOverride::Computed,
            SizeValue::Keyword(SizeKeyword::UsePref) => SizeOverride::UsePref,
        }
    }
}

fn invalid(msg: impl Into<String>) -> RegionError {
    RegionError::InvalidScene(msg.into())
}

fn label(node: &SceneNode) -> String {
    match &node.name {
        Some(name) => format!("'{}'", name),
        None => format!("unnamed {}", node.kind.type_name()),
    }
}

impl NodeKind {
    fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Pane => "Pane",
            NodeKind::StackPane { .. } => "StackPane",
            NodeKind::BorderPane => "BorderPane",
            NodeKind::Rectangle { .. } => "Rectangle",
            NodeKind::Block { .. } => "Block",
        }
    }

    fn is_leaf(&self) -> bool {
        matches!(self, NodeKind::Rectangle { .. } | NodeKind::Block { .. })
    }
}

impl Scene {
    /// Build the node tree, resolving styles with `resolver`.
    pub fn build(&self, resolver: &StyleResolver) -> Result<SceneGraph, RegionError> {
        for (what, value) in [("width", self.width), ("height", self.height)] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(invalid(format!("scene {} must be a finite size >= 0, got {}", what, v)));
                }
            }
        }
        let mut names = HashMap::new();
        let root = build_node(&self.root, resolver, &mut names)?;
        Ok(SceneGraph { root, names })
    }

    /// Build and lay out with a resolver using this scene's font size.
    pub fn layout(&self) -> Result<LayoutInfo, RegionError> {
        let resolver = StyleResolver::new()
            .with_font_size(self.font_size.unwrap_or(StyleResolver::DEFAULT_FONT_SIZE));
        let mut graph = self.build(&resolver)?;
        graph.layout(self.width, self.height);
        Ok(graph.info())
    }
}

fn build_node(
    node: &SceneNode,
    resolver: &StyleResolver,
    names: &mut HashMap<NodeId, String>,
) -> Result<Box<dyn Node>, RegionError> {
    if node.kind.is_leaf() && !node.children.is_empty() {
        return Err(invalid(format!("{} cannot have children", label(node))));
    }

    let mut built: Box<dyn Node> = match &node.kind {
        NodeKind::Pane => {
            let mut pane = Pane::new();
            configure(&mut pane, node, resolver);
            for child in &node.children {
                no_slot(child, "Pane")?;
                let mut built = build_node(child, resolver, names)?;
                built.relocate(child.x.unwrap_or(0.0), child.y.unwrap_or(0.0));
                pane.add_boxed(built);
            }
            Box::new(pane)
        }
        NodeKind::StackPane { alignment } => {
            let mut stack = StackPane::new();
            configure(&mut stack, node, resolver);
            if let Some(alignment) = alignment {
                stack.set_alignment(*alignment);
            }
            for child in &node.children {
                no_slot(child, "StackPane")?;
                let id = stack.add_boxed(build_node(child, resolver, names)?);
                stack.set_margin(id, child.margin);
                stack.set_child_alignment(id, child.alignment);
            }
            Box::new(stack)
        }
        NodeKind::BorderPane => {
            let mut pane = BorderPane::new();
            configure(&mut pane, node, resolver);
            for child in &node.children {
                let slot = child
                    .slot
                    .ok_or_else(|| invalid(format!("BorderPane child {} has no slot", label(child))))?;
                if pane.slot_id(slot).is_some() {
                    return Err(invalid(format!("BorderPane slot {:?} is used twice", slot)));
                }
                let (id, _) = pane.set_boxed(slot, build_node(child, resolver, names)?);
                pane.set_margin(id, child.margin);
                pane.set_child_alignment(id, child.alignment);
            }
            Box::new(pane)
        }
        NodeKind::Rectangle { width, height } => {
            if *width < 0.0 || *height < 0.0 {
                return Err(invalid(format!("{} has a negative size", label(node))));
            }
            Box::new(Rectangle::new(*width, *height))
        }
        NodeKind::Block {
            min,
            pref,
            max,
            bias,
            area,
            baseline,
        } => {
            let pref = pref.unwrap_or(Extent { width: 0.0, height: 0.0 });
            let mut block = Block::new(pref.width, pref.height);
            if let Some(min) = min {
                block = block.with_min(min.width, min.height);
            }
            if let Some(max) = max {
                block = block.with_max(max.width, max.height);
            }
            if let Some(bias) = bias {
                if *area <= 0.0 {
                    return Err(invalid(format!("{} has a bias but no area", label(node))));
                }
                block = block.with_bias(*bias, *area);
            }
            if let Some(baseline) = baseline {
                block = block.with_baseline(*baseline);
            }
            Box::new(block)
        }
    };

    if node.kind.is_leaf() && (node.style.is_some() || !node.padding.is_empty()) {
        debug!("{}: style and padding only apply to regions, ignored", label(node));
    }
    built.set_managed(node.managed);
    if let Some(name) = &node.name {
        names.insert(built.id(), name.clone());
    }
    Ok(built)
}

fn no_slot(child: &SceneNode, parent: &str) -> Result<(), RegionError> {
    match child.slot {
        Some(slot) => Err(invalid(format!(
            "{} has slot {:?} but its parent is a {}",
            label(child),
            slot,
            parent
        ))),
        None => Ok(()),
    }
}

/// Region fields first, then the style on top.
fn configure<K: Layout>(region: &mut Region<K>, node: &SceneNode, resolver: &StyleResolver) {
    region.set_padding(node.padding);
    let sizes: [(Option<SizeValue>, fn(&mut Region<K>, SizeOverride)); 6] = [
        (node.min_width, Region::<K>::set_min_width),
        (node.pref_width, Region::<K>::set_pref_width),
        (node.max_width, Region::<K>::set_max_width),
        (node.min_height, Region::<K>::set_min_height),
        (node.pref_height, Region::<K>::set_pref_height),
        (node.max_height, Region::<K>::set_max_height),
    ];
    for (value, set) in sizes {
        if let Some(value) = value {
            set(region, value.into());
        }
    }
    if let Some(style) = &node.style {
        region.apply_style(&resolver.resolve_text(style));
    }
}

/// A built scene: the root node plus the names given in the description.
#[derive(Debug)]
pub struct SceneGraph {
    root: Box<dyn Node>,
    names: HashMap<NodeId, String>,
}

impl SceneGraph {
    pub fn root(&self) -> &dyn Node {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> &mut (dyn Node + 'static) {
        self.root.as_mut()
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Find a node by the name it was given.
    pub fn find(&self, name: &str) -> Option<&dyn Node> {
        fn walk<'a>(node: &'a dyn Node, names: &HashMap<NodeId, String>, name: &str) -> Option<&'a dyn Node> {
            if names.get(&node.id()).is_some_and(|n| n == name) {
                return Some(node);
            }
            node.children()
                .iter()
                .find_map(|child| walk(child.as_ref(), names, name))
        }
        walk(self.root.as_ref(), &self.names, name)
    }

    /// Size the root (the given extents, its clamped preferred size for the
    /// rest) and lay the tree out.
    pub fn layout(&mut self, width: Option<f64>, height: Option<f64>) {
        let root = self.root.as_mut();
        let (w, h) = match (width, height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => {
                let cross = Some(w);
                (w, bounded_size(root.min_height(cross), root.pref_height(cross), root.max_height(cross)))
            }
            (None, Some(h)) => {
                let cross = Some(h);
                (bounded_size(root.min_width(cross), root.pref_width(cross), root.max_width(cross)), h)
            }
            (None, None) => {
                root.autosize();
                (root.width(), root.height())
            }
        };
        root.resize(w, h);
        root.layout();
    }

    /// Snapshot of the current geometry.
    pub fn info(&self) -> LayoutInfo {
        LayoutInfo {
            width: self.root.width(),
            height: self.root.height(),
            root: self.element(self.root.as_ref()),
        }
    }

    fn element(&self, node: &dyn Node) -> ElementInfo {
        let (width, height) = (node.width(), node.height());
        ElementInfo {
            name: self.names.get(&node.id()).cloned(),
            kind: node.kind_name().to_string(),
            x: node.layout_x(),
            y: node.layout_y(),
            width,
            height,
            managed: node.is_managed(),
            baseline: node.baseline_offset(),
            background: node.background().map(|bg| BackgroundInfo {
                fills: bg.fills().len(),
                images: bg.images().len(),
                outsets: bg.outsets(),
                opaque_insets: bg.opaque_insets(width, height),
            }),
            border: node.border().map(|border| BorderInfo {
                strokes: border.strokes().len(),
                images: border.images().len(),
                insets: border.insets(),
                outsets: border.outsets(),
            }),
            children: node
                .children()
                .iter()
                .map(|child| self.element(child.as_ref()))
                .collect(),
        }
    }
}

/// Serializable geometry of a laid-out scene.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    pub width: f64,
    pub height: f64,
    pub root: ElementInfo,
}

/// One node's geometry. `x` and `y` are relative to the parent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub managed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<BorderInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementInfo>,
}

impl ElementInfo {
    /// Depth-first search by name.
    pub fn find(&self, name: &str) -> Option<&ElementInfo> {
        if self.name.as_deref() == Some(name) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundInfo {
    pub fills: usize,
    pub images: usize,
    pub outsets: Insets,
    /// Absent when nothing is painted opaquely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opaque_insets: Option<Insets>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderInfo {
    pub strokes: usize,
    pub images: usize,
    pub insets: Insets,
    pub outsets: Insets,
}
