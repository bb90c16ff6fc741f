//! Per-component records emitted by a scan.
//!
//! Field names serialize in camelCase and enum values in the lowercase or
//! kebab-case spelling downstream prompt builders match on. Slot maps are
//! keyed by the exact source layer name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::paint::PaintKind;

/// A gradient stop reduced to a hex color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStopInfo {
    /// `#rrggbb` color.
    pub color: String,
    /// Position along the gradient.
    pub position: f64,
}

/// A fill or stroke resolved against the design system.
///
/// When both `designToken` and `paintStyleName` are present the token is the
/// authoritative reference; see [`ColorDescriptor::reference`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorDescriptor {
    /// Paint kind.
    #[serde(rename = "type")]
    pub kind: PaintKind,
    /// `#rrggbb` color for solid paints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Stops for gradient paints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_stops: Option<Vec<GradientStopInfo>>,
    /// Paint opacity.
    pub opacity: f64,
    /// Name of the applied paint style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paint_style_name: Option<String>,
    /// Name of the bound design token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_token: Option<String>,
    /// Whether a paint style or token is applied.
    pub uses_design_system_color: bool,
    /// Whether a bound token was resolved.
    pub uses_design_token: bool,
}

impl ColorDescriptor {
    /// The authoritative design-system name: token first, then style.
    ///
    /// # Examples
    ///
    /// ```
    /// use ds_core::{ColorDescriptor, PaintKind};
    ///
    /// let descriptor = ColorDescriptor {
    ///     kind: PaintKind::Solid,
    ///     color: Some("#6750a4".to_owned()),
    ///     gradient_stops: None,
    ///     opacity: 1.0,
    ///     paint_style_name: Some("Primary/40".to_owned()),
    ///     design_token: Some("color/primary".to_owned()),
    ///     uses_design_system_color: true,
    ///     uses_design_token: true,
    /// };
    /// assert_eq!(descriptor.reference(), Some("color/primary"));
    /// ```
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.design_token
            .as_deref()
            .or(self.paint_style_name.as_deref())
    }
}

/// Padding on four sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    /// Top.
    pub top: f64,
    /// Right.
    pub right: f64,
    /// Bottom.
    pub bottom: f64,
    /// Left.
    pub left: f64,
}

impl Padding {
    /// Returns `true` if any side is positive.
    #[must_use]
    pub fn any_positive(&self) -> bool {
        self.top > 0.0 || self.right > 0.0 || self.bottom > 0.0 || self.left > 0.0
    }

    /// Returns `true` if every side lies in `[min, max]`.
    #[must_use]
    pub fn within(&self, min: f64, max: f64) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|v| (min..=max).contains(v))
    }

    /// Rounds every side to the nearest integer.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self {
            top: self.top.round(),
            right: self.right.round(),
            bottom: self.bottom.round(),
            left: self.left.round(),
        }
    }
}

/// Which strategy produced a padding estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingSource {
    /// The node's own auto-layout padding.
    Direct,
    /// Padding of a nested auto-layout frame.
    Nested,
    /// Inferred from the first child's offset.
    Geometric,
}

/// An internal padding estimate and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddingEstimate {
    /// Padding values.
    #[serde(flatten)]
    pub padding: Padding,
    /// Strategy that produced them.
    pub source: PaddingSource,
}

/// Single or multi-line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextSlotKind {
    /// One line.
    SingleLine,
    /// Grows vertically.
    MultiLine,
}

/// A text layer that instances are expected to fill in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSlot {
    /// Whether the layer is visible by default.
    pub required: bool,
    /// Line behavior.
    #[serde(rename = "type")]
    pub kind: TextSlotKind,
    /// Estimated character capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
}

/// Rough category of a nested component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotCategory {
    /// Icon.
    Icon,
    /// Button.
    Button,
    /// Input.
    Input,
    /// Image.
    Image,
    /// Anything else.
    Container,
}

/// A nested instance that can be swapped for another component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSlot {
    /// Id of the main component, never the instance id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    /// Category guessed from the main component name.
    pub category: SlotCategory,
    /// Always `true`.
    pub swappable: bool,
    /// Whether the instance is visible by default.
    pub required: bool,
}

/// How a component sizes itself along its primary axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutSizing {
    /// Shrinks to content.
    HugContent,
    /// Stretches to the parent.
    FillContainer,
    /// Fixed size.
    Fixed,
}

/// Auto-layout direction in output form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

/// Auto-layout behavior of a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutBehavior {
    /// Primary axis sizing.
    #[serde(rename = "type")]
    pub sizing: LayoutSizing,
    /// Flow direction.
    pub direction: LayoutDirection,
    /// Whether top padding is set.
    pub has_internal_padding: bool,
    /// Whether children wrap.
    pub can_wrap: bool,
    /// Minimum height constraint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f64>,
    /// Small enough to be an icon.
    pub is_icon: bool,
    /// Tall enough to be tapped.
    pub is_touch_target: bool,
}

/// Broad semantic role of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticRole {
    /// Navigation.
    Navigation,
    /// Triggers an action.
    Action,
    /// Displays content.
    Display,
    /// Collects input.
    Input,
    /// Anything else.
    Container,
}

/// Design-system context of a component, gathered without deep traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleContext {
    /// Reference of the first visible fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    /// Reference of the first visible stroke.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    /// Reference of the first direct text layer's fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Text style name of the first direct text layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_style: Option<String>,
    /// Whether a direct child shape has an image fill.
    pub has_image_slot: bool,
    /// Semantic role from the component name.
    pub semantic_role: SemanticRole,
}

/// Page a component was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Page name.
    pub page_name: String,
    /// Page id.
    pub page_id: String,
    /// Whether this is the open page.
    pub is_current_page: bool,
}

/// Everything a scan learned about one component or component set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    /// Host node id, unique within a session.
    pub id: String,
    /// Component name as authored.
    pub name: String,
    /// UI role, or `unknown`.
    pub suggested_type: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Whether the component comes from a team library.
    pub is_from_library: bool,
    /// Variant property name to legal values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_options: Option<BTreeMap<String, Vec<String>>>,
    /// Text slots keyed by exact layer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_slots: Option<BTreeMap<String, TextSlot>>,
    /// Component slots keyed by exact layer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_slots: Option<BTreeMap<String, ComponentSlot>>,
    /// Auto-layout behavior.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_behavior: Option<LayoutBehavior>,
    /// Style context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_context: Option<StyleContext>,
    /// Internal padding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_padding: Option<PaddingEstimate>,
    /// Page the component lives on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_info: Option<PageInfo>,
}

impl ComponentRecord {
    /// A record carrying only identity and classification.
    #[must_use]
    pub fn basic(
        id: impl Into<String>,
        name: impl Into<String>,
        suggested_type: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            suggested_type: suggested_type.into(),
            confidence,
            is_from_library: false,
            variant_options: None,
            text_slots: None,
            component_slots: None,
            layout_behavior: None,
            style_context: None,
            internal_padding: None,
            page_info: None,
        }
    }
}
