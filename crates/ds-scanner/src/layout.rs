//! Padding inference, layout behavior, and style context.
//!
//! Everything here reads the representative node and, except for the nested
//! padding search, only its direct children.

use ds_core::{
    HeuristicThresholds, LayoutAlign, LayoutBehavior, LayoutDirection, LayoutMode, LayoutSizing,
    LayoutWrap, NodeKind, Padding, PaddingEstimate, PaddingSource, Paint, SceneNode, SizingMode,
    StyleContext,
};
use smallvec::SmallVec;
use tracing::debug;

use crate::classifier::infer_semantic_role;
use crate::color::ColorResolver;
use crate::registry::StyleRegistry;

/// Internal padding of a component.
///
/// Tries the node's own auto-layout padding, then the first nested
/// auto-layout frame with padding (depth-first, bounded by
/// `nested_padding_max_depth`), then the first child's offset. Only
/// COMPONENT nodes are measured.
#[must_use]
pub fn infer_padding(node: &SceneNode, thresholds: &HeuristicThresholds) -> Option<PaddingEstimate> {
    if !matches!(node.kind, NodeKind::Component(_)) {
        return None;
    }

    if let Some(padding) = node
        .auto_layout()
        .map(|layout| layout.padding())
        .filter(Padding::any_positive)
    {
        return Some(PaddingEstimate {
            padding,
            source: PaddingSource::Direct,
        });
    }

    if let Some(padding) = nested_padding(node, thresholds.nested_padding_max_depth) {
        return Some(PaddingEstimate {
            padding,
            source: PaddingSource::Nested,
        });
    }

    geometric_padding(node, thresholds).map(|padding| PaddingEstimate {
        padding,
        source: PaddingSource::Geometric,
    })
}

/// First positive auto-layout padding among the descendants of `root`, in
/// depth-first pre-order, down to `max_depth` levels.
fn nested_padding(root: &SceneNode, max_depth: usize) -> Option<Padding> {
    let mut stack: SmallVec<[(&SceneNode, usize); 16]> = SmallVec::new();
    stack.extend(root.children().iter().rev().map(|child| (child, 1)));

    while let Some((node, depth)) = stack.pop() {
        if let Some(padding) = node
            .auto_layout()
            .map(|layout| layout.padding())
            .filter(Padding::any_positive)
        {
            debug!(node_id = %node.id, depth, "Found nested auto-layout padding");
            return Some(padding);
        }
        if depth < max_depth {
            stack.extend(node.children().iter().rev().map(|child| (child, depth + 1)));
        }
    }
    None
}

/// Padding implied by the first child's position, rejected when any side
/// falls outside the configured window.
fn geometric_padding(node: &SceneNode, thresholds: &HeuristicThresholds) -> Option<Padding> {
    let first = node.children().first()?;
    if !first.has_finite_geometry() || !node.has_finite_geometry() {
        return None;
    }
    let padding = Padding {
        top: first.y,
        right: node.width - (first.x + first.width),
        bottom: node.height - (first.y + first.height),
        left: first.x,
    };
    padding
        .within(
            thresholds.geometric_padding_min,
            thresholds.geometric_padding_max,
        )
        .then(|| padding.rounded())
}

/// Shallow auto-layout behavior; `None` without auto-layout.
#[must_use]
pub fn layout_behavior(node: &SceneNode, thresholds: &HeuristicThresholds) -> Option<LayoutBehavior> {
    let layout = node.auto_layout()?;
    let sizing = if layout.primary_axis_sizing_mode == SizingMode::Auto {
        LayoutSizing::HugContent
    } else if node.layout_align == LayoutAlign::Stretch {
        LayoutSizing::FillContainer
    } else {
        LayoutSizing::Fixed
    };
    let direction = if layout.layout_mode == LayoutMode::Horizontal {
        LayoutDirection::Horizontal
    } else {
        LayoutDirection::Vertical
    };
    Some(LayoutBehavior {
        sizing,
        direction,
        has_internal_padding: layout.padding_top > 0.0,
        can_wrap: layout.layout_wrap == LayoutWrap::Wrap,
        min_height: layout.min_height.filter(|h| *h > 0.0),
        is_icon: node.width.max(node.height) <= thresholds.icon_max_size,
        is_touch_target: node.height >= thresholds.touch_target_min_height,
    })
}

/// Returns `true` if a direct RECTANGLE or ELLIPSE child is image-filled.
#[must_use]
pub fn has_image_slot(node: &SceneNode) -> bool {
    node.children().iter().any(|child| {
        matches!(child.kind, NodeKind::Rectangle(_) | NodeKind::Ellipse(_))
            && child.fills().iter().any(Paint::is_image)
    })
}

/// Design-system context of a component.
///
/// Colors are reported only by design-system reference (token, else style
/// name). `name` is the component's own name, which drives the semantic role.
#[must_use]
pub fn style_context(name: &str, node: &SceneNode, registry: &StyleRegistry) -> StyleContext {
    let resolver = ColorResolver::new(registry);
    let reference = |paints: &[Paint], style_id: Option<&str>| {
        resolver
            .resolve_first_visible(paints, style_id)
            .and_then(|d| d.reference().map(str::to_owned))
    };

    let first_text = node.children().iter().find_map(|child| match &child.kind {
        NodeKind::Text(text) => Some((child, text)),
        _ => None,
    });

    StyleContext {
        primary_color: reference(node.fills(), node.fill_style_id()),
        stroke_color: reference(node.strokes(), node.stroke_style_id()),
        text_color: first_text.and_then(|(child, _)| reference(child.fills(), child.fill_style_id())),
        text_style: first_text
            .and_then(|(_, text)| registry.text_style_name(text))
            .map(str::to_owned),
        has_image_slot: has_image_slot(node),
        semantic_role: infer_semantic_role(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_core::SemanticRole;

    fn node(json: &str) -> SceneNode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_direct_padding_wins() {
        let n = node(
            r#"{"id": "1", "type": "COMPONENT", "layoutMode": "HORIZONTAL",
                "paddingTop": 8, "paddingRight": 16, "paddingBottom": 8, "paddingLeft": 16,
                "children": [{"id": "2", "type": "FRAME", "layoutMode": "VERTICAL", "paddingTop": 4}]}"#,
        );
        let estimate = infer_padding(&n, &HeuristicThresholds::default()).unwrap();
        assert_eq!(estimate.source, PaddingSource::Direct);
        assert_eq!(estimate.padding.right, 16.0);
    }

    #[test]
    fn test_nested_padding_is_depth_first() {
        let n = node(
            r#"{"id": "1", "type": "COMPONENT", "width": 100, "height": 40, "children": [
                {"id": "2", "type": "FRAME", "children": [
                    {"id": "3", "type": "FRAME", "layoutMode": "VERTICAL", "paddingLeft": 12}
                ]},
                {"id": "4", "type": "FRAME", "layoutMode": "VERTICAL", "paddingLeft": 4}
            ]}"#,
        );
        let estimate = infer_padding(&n, &HeuristicThresholds::default()).unwrap();
        assert_eq!(estimate.source, PaddingSource::Nested);
        assert_eq!(estimate.padding.left, 12.0);
    }

    #[test]
    fn test_nested_search_respects_depth() {
        let n = node(
            r#"{"id": "1", "type": "COMPONENT", "children": [
                {"id": "2", "type": "FRAME", "children": [
                    {"id": "3", "type": "FRAME", "children": [
                        {"id": "4", "type": "FRAME", "children": [
                            {"id": "5", "type": "FRAME", "layoutMode": "VERTICAL", "paddingTop": 4}
                        ]}
                    ]}
                ]}
            ]}"#,
        );
        assert!(nested_padding(&n, 3).is_none());
        assert!(nested_padding(&n, 4).is_some());
    }

    #[test]
    fn test_geometric_padding_rounded() {
        let n = node(
            r#"{"id": "1", "type": "COMPONENT", "width": 120, "height": 48, "children": [
                {"id": "2", "type": "TEXT", "x": 16.4, "y": 12, "width": 88, "height": 24}
            ]}"#,
        );
        let estimate = infer_padding(&n, &HeuristicThresholds::default()).unwrap();
        assert_eq!(estimate.source, PaddingSource::Geometric);
        assert_eq!(
            estimate.padding,
            Padding {
                top: 12.0,
                right: 16.0,
                bottom: 12.0,
                left: 16.0
            }
        );
    }

    #[test]
    fn test_geometric_padding_rejects_out_of_window() {
        let n = node(
            r#"{"id": "1", "type": "COMPONENT", "width": 1000, "height": 48, "children": [
                {"id": "2", "type": "TEXT", "x": 500, "y": 12, "width": 88, "height": 24}
            ]}"#,
        );
        assert!(infer_padding(&n, &HeuristicThresholds::default()).is_none());
    }

    #[test]
    fn test_padding_only_for_components() {
        let n = node(
            r#"{"id": "1", "type": "FRAME", "layoutMode": "VERTICAL", "paddingTop": 8}"#,
        );
        assert!(infer_padding(&n, &HeuristicThresholds::default()).is_none());
    }

    #[test]
    fn test_layout_behavior() {
        let t = HeuristicThresholds::default();
        let hug = node(
            r#"{"id": "1", "type": "COMPONENT", "layoutMode": "HORIZONTAL",
                "primaryAxisSizingMode": "AUTO", "paddingTop": 10, "width": 120, "height": 44}"#,
        );
        let b = layout_behavior(&hug, &t).unwrap();
        assert_eq!(b.sizing, LayoutSizing::HugContent);
        assert_eq!(b.direction, LayoutDirection::Horizontal);
        assert!(b.has_internal_padding);
        assert!(b.is_touch_target);
        assert!(!b.is_icon);

        let icon = node(
            r#"{"id": "2", "type": "COMPONENT", "layoutMode": "VERTICAL", "layoutAlign": "STRETCH",
                "layoutWrap": "WRAP", "width": 24, "height": 24, "minHeight": 0}"#,
        );
        let b = layout_behavior(&icon, &t).unwrap();
        assert_eq!(b.sizing, LayoutSizing::FillContainer);
        assert!(b.can_wrap);
        assert!(b.is_icon);
        assert!(!b.is_touch_target);
        assert_eq!(b.min_height, None);

        let plain = node(r#"{"id": "3", "type": "COMPONENT"}"#);
        assert!(layout_behavior(&plain, &t).is_none());
    }

    #[test]
    fn test_image_slot_is_shallow() {
        let shallow = node(
            r#"{"id": "1", "type": "COMPONENT", "children": [
                {"id": "2", "type": "ELLIPSE", "fills": [{"type": "IMAGE"}]}
            ]}"#,
        );
        assert!(has_image_slot(&shallow));

        let deep = node(
            r#"{"id": "1", "type": "COMPONENT", "children": [
                {"id": "2", "type": "FRAME", "children": [
                    {"id": "3", "type": "RECTANGLE", "fills": [{"type": "IMAGE"}]}
                ]}
            ]}"#,
        );
        assert!(!has_image_slot(&deep));
    }

    #[test]
    fn test_style_context_without_registry_entries() {
        let n = node(
            r#"{"id": "1", "type": "COMPONENT", "fillStyleId": "S:unknown,",
                "fills": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1}}],
                "children": [{"id": "2", "type": "TEXT", "fills": [
                    {"type": "SOLID", "color": {"r": 0, "g": 0, "b": 0}}
                ]}]}"#,
        );
        let context = style_context("Nav Item", &n, &StyleRegistry::default());
        assert_eq!(context.primary_color, None);
        assert_eq!(context.text_color, None);
        assert_eq!(context.text_style, None);
        assert!(!context.has_image_slot);
        assert_eq!(context.semantic_role, SemanticRole::Navigation);
    }
}
