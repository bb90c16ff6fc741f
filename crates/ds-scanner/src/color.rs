//! Turns raw paints into design-system color descriptors.
//!
//! Provenance precedence is token, then named style, then the raw value.
//! Both names are reported when present; [`ColorDescriptor::reference`] picks
//! the authoritative one.

use ds_core::{ColorDescriptor, GradientPaint, GradientStopInfo, Paint, PaintKind, Rgb};
use tracing::debug;

use crate::registry::StyleRegistry;

/// Resolves paints against a [`StyleRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct ColorResolver<'r> {
    registry: &'r StyleRegistry,
}

impl<'r> ColorResolver<'r> {
    /// Creates a resolver reading from `registry`.
    #[must_use]
    pub const fn new(registry: &'r StyleRegistry) -> Self {
        Self { registry }
    }

    /// Describes one paint. `style_id` is the node's fill or stroke style id.
    #[must_use]
    pub fn resolve(&self, paint: &Paint, style_id: Option<&str>) -> ColorDescriptor {
        let style_id = style_id.filter(|id| !id.is_empty());
        let paint_style_name = style_id
            .and_then(|id| self.registry.paint_style_name(id))
            .map(str::to_owned);
        let opacity = paint.opacity();

        match paint {
            Paint::Solid(solid) => {
                let design_token = solid.bound_color_variable().and_then(|variable_id| {
                    let name = self.registry.variable_name(variable_id);
                    if name.is_none() {
                        debug!(variable_id, "Bound variable not in registry");
                    }
                    name.map(str::to_owned)
                });
                let uses_design_token = design_token.is_some();
                ColorDescriptor {
                    kind: PaintKind::Solid,
                    color: Some(solid.color.to_hex()),
                    gradient_stops: None,
                    opacity,
                    paint_style_name,
                    design_token,
                    uses_design_system_color: style_id.is_some() || uses_design_token,
                    uses_design_token,
                }
            }
            Paint::GradientLinear(gradient)
            | Paint::GradientRadial(gradient)
            | Paint::GradientAngular(gradient)
            | Paint::GradientDiamond(gradient) => ColorDescriptor {
                kind: paint.kind(),
                color: None,
                gradient_stops: Some(gradient_stops(gradient)),
                opacity,
                paint_style_name,
                design_token: None,
                uses_design_system_color: style_id.is_some(),
                uses_design_token: false,
            },
            Paint::Image(_) => ColorDescriptor {
                kind: PaintKind::Image,
                color: None,
                gradient_stops: None,
                opacity,
                paint_style_name: None,
                design_token: None,
                uses_design_system_color: false,
                uses_design_token: false,
            },
        }
    }

    /// Describes the first visible paint of a list.
    #[must_use]
    pub fn resolve_first_visible(
        &self,
        paints: &[Paint],
        style_id: Option<&str>,
    ) -> Option<ColorDescriptor> {
        paints
            .iter()
            .find(|paint| paint.is_visible())
            .map(|paint| self.resolve(paint, style_id))
    }
}

fn gradient_stops(gradient: &GradientPaint) -> Vec<GradientStopInfo> {
    gradient
        .gradient_stops
        .iter()
        .map(|stop| GradientStopInfo {
            color: Rgb::from(stop.color).to_hex(),
            position: stop.position,
        })
        .collect()
}
