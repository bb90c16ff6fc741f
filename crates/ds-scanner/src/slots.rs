//! Shallow slot extraction.
//!
//! Only the direct children of a component's representative node are
//! inspected. Slot keys are the exact layer names.

use std::collections::BTreeMap;

use ds_core::{
    ComponentSlot, HeuristicThresholds, NodeKind, SceneNode, TextAutoResize, TextNode, TextSlot,
    TextSlotKind,
};
use tracing::{debug, warn};

use crate::classifier::guess_slot_category;
use crate::error::ScanError;
use crate::host::DocumentHost;

/// The node whose children describe a component.
///
/// For a component set this is the default variant, else the first variant.
/// A default variant id that names no child falls back to the first variant.
#[must_use]
pub fn representative(node: &SceneNode) -> Option<&SceneNode> {
    let NodeKind::ComponentSet(set) = &node.kind else {
        return Some(node);
    };
    let children = node.children();
    if let Some(id) = set.default_variant_id.as_deref() {
        if let Some(default) = children.iter().find(|child| child.id == id) {
            return Some(default);
        }
        warn!(
            node_id = %node.id,
            default_variant_id = id,
            "Default variant is not a child, using the first variant"
        );
    }
    children.first()
}

/// Legal values of each declared variant property, de-duplicated in order.
///
/// `None` for anything but a component set, or when no property has values.
#[must_use]
pub fn variant_options(node: &SceneNode) -> Option<BTreeMap<String, Vec<String>>> {
    let NodeKind::ComponentSet(set) = &node.kind else {
        return None;
    };
    let options: BTreeMap<_, _> = set
        .variant_group_properties
        .iter()
        .filter(|(_, property)| !property.values.is_empty())
        .map(|(name, property)| {
            let mut values: Vec<String> = Vec::with_capacity(property.values.len());
            for value in &property.values {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }
            (name.clone(), values)
        })
        .collect();
    (!options.is_empty()).then_some(options)
}

/// Estimated character capacity of a text layer.
#[must_use]
pub fn estimate_max_length(
    text: &TextNode,
    width: f64,
    thresholds: &HeuristicThresholds,
) -> Option<u32> {
    if width <= 0.0 {
        return None;
    }
    let font_size = text
        .font_size
        .filter(|size| *size > 0.0)
        .unwrap_or(thresholds.default_font_size);
    let lines = if text.text_auto_resize == TextAutoResize::Height {
        f64::from(thresholds.multi_line_count)
    } else {
        1.0
    };
    let estimate = (width / (font_size * thresholds.char_width_ratio) * lines).floor();
    (estimate.is_finite() && estimate >= 0.0).then_some(estimate as u32)
}

/// Text slots from the direct TEXT children of `node`.
#[must_use]
pub fn text_slots(
    node: &SceneNode,
    thresholds: &HeuristicThresholds,
) -> Option<BTreeMap<String, TextSlot>> {
    let slots: BTreeMap<_, _> = node
        .children()
        .iter()
        .filter_map(|child| match &child.kind {
            NodeKind::Text(text) => Some((
                child.name.clone(),
                TextSlot {
                    required: child.visible,
                    kind: if text.text_auto_resize == TextAutoResize::Height {
                        TextSlotKind::MultiLine
                    } else {
                        TextSlotKind::SingleLine
                    },
                    max_length: estimate_max_length(text, child.width, thresholds),
                },
            )),
            _ => None,
        })
        .collect();
    (!slots.is_empty()).then_some(slots)
}

/// Component slots and the failures that caused slots to be omitted.
#[derive(Debug, Default)]
pub struct ComponentSlots {
    /// Slots keyed by exact layer name.
    pub slots: Option<BTreeMap<String, ComponentSlot>>,
    /// One entry per omitted slot.
    pub errors: Vec<ScanError>,
}

/// Component slots from the direct INSTANCE children of `node`.
///
/// Each main component is resolved through the host. A failed lookup drops
/// only that slot; a lookup that finds nothing keeps the slot without an id.
pub async fn component_slots<H>(host: &H, owner_id: &str, node: &SceneNode) -> ComponentSlots
where
    H: DocumentHost + ?Sized,
{
    let mut slots = BTreeMap::new();
    let mut errors = Vec::new();
    for child in node.children() {
        if !matches!(child.kind, NodeKind::Instance(_)) {
            continue;
        }
        match host.main_component(child).await {
            Ok(main) => {
                let category = guess_slot_category(main.as_ref().map_or(&child.name, |m| &m.name));
                slots.insert(
                    child.name.clone(),
                    ComponentSlot {
                        component_id: main.map(|m| m.id),
                        category,
                        swappable: true,
                        required: child.visible,
                    },
                );
            }
            Err(source) => {
                warn!(node_id = %owner_id, slot = %child.name, error = %source, "Omitting component slot");
                errors.push(ScanError::Slot {
                    node_id: owner_id.to_owned(),
                    slot: child.name.clone(),
                    source,
                });
            }
        }
    }
    debug!(node_id = %owner_id, slots = slots.len(), "Extracted component slots");
    ComponentSlots {
        slots: (!slots.is_empty()).then_some(slots),
        errors,
    }
}
