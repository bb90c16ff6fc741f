//! The read-only host document tree.
//!
//! A [`SceneNode`] carries the properties shared by every node kind plus a
//! [`NodeKind`] holding the kind-specific data. The JSON shape mirrors the
//! host's plugin API: the kind is the `type` field and kind properties sit
//! next to the common ones.
//!
//! ```
//! use ds_core::{NodeType, SceneNode};
//!
//! let node: SceneNode = serde_json::from_str(r#"{
//!     "id": "1:2",
//!     "name": "Button",
//!     "type": "COMPONENT",
//!     "width": 120,
//!     "height": 44,
//!     "layoutMode": "HORIZONTAL",
//!     "paddingLeft": 16
//! }"#).unwrap();
//!
//! assert_eq!(node.node_type(), NodeType::Component);
//! assert_eq!(node.auto_layout().map(|l| l.padding_left), Some(16.0));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::paint::Paint;
use super::record::Padding;

fn visible() -> bool {
    true
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// Auto-layout direction of a frame-like node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    /// No auto-layout.
    #[default]
    None,
    /// Children flow left to right.
    Horizontal,
    /// Children flow top to bottom.
    Vertical,
}

/// How an auto-layout axis is sized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizingMode {
    /// Explicit size.
    #[default]
    Fixed,
    /// Sized to content.
    Auto,
}

/// Whether auto-layout children wrap onto new lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutWrap {
    /// Single line.
    #[default]
    NoWrap,
    /// Wraps.
    Wrap,
}

/// Alignment of a node inside its auto-layout parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutAlign {
    /// Follows the parent.
    #[default]
    Inherit,
    /// Stretches across the counter axis.
    Stretch,
    /// Start.
    Min,
    /// Center.
    Center,
    /// End.
    Max,
}

/// Text box resize behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAutoResize {
    /// Fixed box.
    #[default]
    None,
    /// Grows in both directions.
    WidthAndHeight,
    /// Fixed width, grows vertically.
    Height,
    /// Fixed box with truncation.
    Truncate,
}

/// Auto-layout properties of a frame-like node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoLayout {
    /// Layout direction; [`LayoutMode::None`] means no auto-layout.
    pub layout_mode: LayoutMode,
    /// Sizing along the layout direction.
    pub primary_axis_sizing_mode: SizingMode,
    /// Sizing across the layout direction.
    pub counter_axis_sizing_mode: SizingMode,
    /// Wrapping behavior.
    pub layout_wrap: LayoutWrap,
    /// Top padding.
    pub padding_top: f64,
    /// Right padding.
    pub padding_right: f64,
    /// Bottom padding.
    pub padding_bottom: f64,
    /// Left padding.
    pub padding_left: f64,
    /// Gap between children.
    pub item_spacing: f64,
    /// Minimum height constraint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
}

impl AutoLayout {
    /// Returns `true` if auto-layout is enabled.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.layout_mode != LayoutMode::None
    }

    /// The four padding values.
    #[must_use]
    pub const fn padding(&self) -> Padding {
        Padding {
            top: self.padding_top,
            right: self.padding_right,
            bottom: self.padding_bottom,
            left: self.padding_left,
        }
    }
}

/// Data shared by frames, groups, components, and instances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerNode {
    /// Child nodes in paint order.
    #[serde(default)]
    pub children: Vec<SceneNode>,
    /// Auto-layout properties.
    #[serde(flatten)]
    pub layout: AutoLayout,
    /// Fill paints.
    #[serde(default)]
    pub fills: Vec<Paint>,
    /// Stroke paints.
    #[serde(default)]
    pub strokes: Vec<Paint>,
    /// Paint style applied to the fills.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_style_id: Option<String>,
    /// Paint style applied to the strokes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_style_id: Option<String>,
    /// Whether the node comes from a team library.
    #[serde(default, skip_serializing_if = "is_false")]
    pub remote: bool,
}

/// A declared variant property of a component set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantProperty {
    /// Legal values in declaration order.
    #[serde(default)]
    pub values: Vec<String>,
}

/// A component set: a container whose children are the variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSetNode {
    /// Container data; the children are the variants.
    #[serde(flatten)]
    pub frame: ContainerNode,
    /// Declared variant properties.
    #[serde(default)]
    pub variant_group_properties: BTreeMap<String, VariantProperty>,
    /// Id of the default variant, if the host reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_variant_id: Option<String>,
}

/// An instance of a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceNode {
    /// Container data.
    #[serde(flatten)]
    pub frame: ContainerNode,
    /// Id of the main component. Resolved through the host, so this may be
    /// absent in snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_component_id: Option<String>,
}

/// Family and style of a font.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontName {
    /// Font family, e.g. `Roboto`.
    pub family: String,
    /// Font style, e.g. `Medium`.
    #[serde(default)]
    pub style: String,
}

/// A text layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    /// Font size; absent when the text mixes sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Font name; absent when the text mixes fonts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_name: Option<FontName>,
    /// Numeric font weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    /// Resize behavior.
    #[serde(default)]
    pub text_auto_resize: TextAutoResize,
    /// Text content.
    #[serde(default)]
    pub characters: String,
    /// Fill paints.
    #[serde(default)]
    pub fills: Vec<Paint>,
    /// Paint style applied to the fills.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_style_id: Option<String>,
    /// Text style applied to the layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style_id: Option<String>,
}

/// A vector, rectangle, or ellipse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeNode {
    /// Fill paints.
    #[serde(default)]
    pub fills: Vec<Paint>,
    /// Stroke paints.
    #[serde(default)]
    pub strokes: Vec<Paint>,
    /// Paint style applied to the fills.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_style_id: Option<String>,
    /// Paint style applied to the strokes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_style_id: Option<String>,
}

/// Kind-specific node data, tagged by the host's `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    /// Frame.
    Frame(ContainerNode),
    /// Group.
    Group(ContainerNode),
    /// Component (possibly a variant inside a set).
    Component(ContainerNode),
    /// Component set.
    ComponentSet(ComponentSetNode),
    /// Component instance.
    Instance(InstanceNode),
    /// Text layer.
    Text(TextNode),
    /// Vector path.
    Vector(ShapeNode),
    /// Rectangle.
    Rectangle(ShapeNode),
    /// Ellipse.
    Ellipse(ShapeNode),
}

/// Fieldless mirror of [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// Frame.
    Frame,
    /// Group.
    Group,
    /// Component.
    Component,
    /// Component set.
    ComponentSet,
    /// Instance.
    Instance,
    /// Text.
    Text,
    /// Vector.
    Vector,
    /// Rectangle.
    Rectangle,
    /// Ellipse.
    Ellipse,
}

/// A node in the host document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneNode {
    /// Host-assigned id, unique within the document.
    pub id: String,
    /// Layer name.
    #[serde(default)]
    pub name: String,
    /// Whether the layer is shown.
    #[serde(default = "visible")]
    pub visible: bool,
    /// X offset relative to the parent.
    #[serde(default)]
    pub x: f64,
    /// Y offset relative to the parent.
    #[serde(default)]
    pub y: f64,
    /// Width.
    #[serde(default)]
    pub width: f64,
    /// Height.
    #[serde(default)]
    pub height: f64,
    /// Alignment inside an auto-layout parent.
    #[serde(default)]
    pub layout_align: LayoutAlign,
    /// Kind-specific data.
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl SceneNode {
    /// Returns the fieldless node type.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        match &self.kind {
            NodeKind::Frame(_) => NodeType::Frame,
            NodeKind::Group(_) => NodeType::Group,
            NodeKind::Component(_) => NodeType::Component,
            NodeKind::ComponentSet(_) => NodeType::ComponentSet,
            NodeKind::Instance(_) => NodeType::Instance,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::Vector(_) => NodeType::Vector,
            NodeKind::Rectangle(_) => NodeType::Rectangle,
            NodeKind::Ellipse(_) => NodeType::Ellipse,
        }
    }

    /// Container data for frame-like nodes.
    #[must_use]
    pub const fn container(&self) -> Option<&ContainerNode> {
        match &self.kind {
            NodeKind::Frame(c) | NodeKind::Group(c) | NodeKind::Component(c) => Some(c),
            NodeKind::ComponentSet(set) => Some(&set.frame),
            NodeKind::Instance(instance) => Some(&instance.frame),
            NodeKind::Text(_)
            | NodeKind::Vector(_)
            | NodeKind::Rectangle(_)
            | NodeKind::Ellipse(_) => None,
        }
    }

    /// Direct children; empty for leaf kinds.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        self.container().map_or(&[], |c| c.children.as_slice())
    }

    /// Auto-layout properties, only when auto-layout is enabled.
    #[must_use]
    pub fn auto_layout(&self) -> Option<&AutoLayout> {
        self.container()
            .map(|c| &c.layout)
            .filter(|layout| layout.is_enabled())
    }

    /// Fill paints.
    #[must_use]
    pub fn fills(&self) -> &[Paint] {
        match &self.kind {
            NodeKind::Text(t) => &t.fills,
            NodeKind::Vector(s) | NodeKind::Rectangle(s) | NodeKind::Ellipse(s) => &s.fills,
            _ => self.container().map_or(&[], |c| c.fills.as_slice()),
        }
    }

    /// Stroke paints.
    #[must_use]
    pub fn strokes(&self) -> &[Paint] {
        match &self.kind {
            NodeKind::Text(_) => &[],
            NodeKind::Vector(s) | NodeKind::Rectangle(s) | NodeKind::Ellipse(s) => &s.strokes,
            _ => self.container().map_or(&[], |c| c.strokes.as_slice()),
        }
    }

    /// Paint style id applied to the fills.
    #[must_use]
    pub fn fill_style_id(&self) -> Option<&str> {
        let id = match &self.kind {
            NodeKind::Text(t) => t.fill_style_id.as_deref(),
            NodeKind::Vector(s) | NodeKind::Rectangle(s) | NodeKind::Ellipse(s) => {
                s.fill_style_id.as_deref()
            }
            _ => self.container().and_then(|c| c.fill_style_id.as_deref()),
        };
        id.filter(|id| !id.is_empty())
    }

    /// Paint style id applied to the strokes.
    #[must_use]
    pub fn stroke_style_id(&self) -> Option<&str> {
        let id = match &self.kind {
            NodeKind::Text(_) => None,
            NodeKind::Vector(s) | NodeKind::Rectangle(s) | NodeKind::Ellipse(s) => {
                s.stroke_style_id.as_deref()
            }
            _ => self.container().and_then(|c| c.stroke_style_id.as_deref()),
        };
        id.filter(|id| !id.is_empty())
    }

    /// Whether the node comes from a team library.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.container().is_some_and(|c| c.remote)
    }

    /// Returns `true` if position and size are all finite numbers.
    #[must_use]
    pub const fn has_finite_geometry(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// A top-level page of the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page id.
    pub id: String,
    /// Page name.
    #[serde(default)]
    pub name: String,
    /// Top-level nodes on the page.
    #[serde(default)]
    pub children: Vec<SceneNode>,
}
